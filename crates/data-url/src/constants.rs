//! Data URI syntax constants.

/// URI scheme prefix.
pub const DATA_PREFIX: &str = "data:";

/// Separator between the MIME type and the base64 payload.
pub const BASE64_MARKER: &str = ";base64,";

/// MIME type used when the caller provides none.
pub const DEFAULT_MIME: &str = "application/octet-stream";
