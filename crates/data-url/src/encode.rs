//! Data URI encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::constants::{BASE64_MARKER, DATA_PREFIX, DEFAULT_MIME};

/// Encodes binary content and its MIME type as a base64 data URI.
///
/// An empty `content_type` falls back to `application/octet-stream`.
///
/// # Example
///
/// ```
/// use bodykit_data_url::encode;
///
/// assert_eq!(encode("text/plain", b"***"), "data:text/plain;base64,Kioq");
/// assert_eq!(encode("", b"."), "data:application/octet-stream;base64,Lg==");
/// ```
pub fn encode(content_type: &str, data: &[u8]) -> String {
    let mime = if content_type.is_empty() {
        DEFAULT_MIME
    } else {
        content_type
    };
    let encoded_len = data.len().div_ceil(3) * 4;
    let mut out =
        String::with_capacity(DATA_PREFIX.len() + mime.len() + BASE64_MARKER.len() + encoded_len);
    out.push_str(DATA_PREFIX);
    out.push_str(mime);
    out.push_str(BASE64_MARKER);
    STANDARD.encode_string(data, &mut out);
    out
}
