//! Data URI decode error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("not a data: URI")]
    MissingScheme,
    #[error("missing `;base64,` marker")]
    MissingBase64Marker,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}
