//! Data URI decoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::constants::{BASE64_MARKER, DATA_PREFIX, DEFAULT_MIME};
use crate::error::DataUrlError;

/// The MIME type and binary content parsed out of a data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrlParts {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Parses a base64 data URI into its MIME type and binary content.
///
/// Any MIME type string is accepted before the `;base64,` marker, including
/// parameterized ones such as `text/plain;charset=utf-8`. An empty MIME type
/// decodes as `application/octet-stream`.
///
/// # Example
///
/// ```
/// use bodykit_data_url::decode;
///
/// let parts = decode("data:text/plain;base64,Kioq").unwrap();
/// assert_eq!(parts.content_type, "text/plain");
/// assert_eq!(parts.data, b"***");
/// ```
pub fn decode(data_url: &str) -> Result<DataUrlParts, DataUrlError> {
    let rest = data_url
        .strip_prefix(DATA_PREFIX)
        .ok_or(DataUrlError::MissingScheme)?;
    let (mime, payload) = rest
        .split_once(BASE64_MARKER)
        .ok_or(DataUrlError::MissingBase64Marker)?;
    let data = STANDARD.decode(payload)?;
    let content_type = if mime.is_empty() {
        DEFAULT_MIME.to_string()
    } else {
        mime.to_string()
    };
    Ok(DataUrlParts { content_type, data })
}
