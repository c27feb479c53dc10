//! Codec and generator error types.

use thiserror::Error;

use bodykit_data_url::DataUrlError;

/// Failure to decode a storable representation back into a live value.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed data URI: {0}")]
    DataUrl(#[from] DataUrlError),
}

/// Failure to generate a multipart wire message.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("The form data property is not set")]
    FormNotSet,
    #[error("the form encoder cannot materialize a message from this form")]
    Unsupported,
}
