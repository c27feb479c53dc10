//! Record shapes carrying a body through the storage round-trip.

use crate::payload::Payload;

/// One stored part of a multipart form.
///
/// `value` is either the literal text (plain text part) or a base64 data URI
/// (file part, or non-file part with an explicit content type). `file_name`
/// is set only for file parts; `content_type` only for non-file parts that
/// carried an explicit MIME type. It serializes under the key `type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBodyEntry {
    pub name: String,
    pub is_file: bool,
    pub value: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    /// Disabled entries are excluded when the live form is reconstructed.
    pub enabled: bool,
}

impl Default for MultipartBodyEntry {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_file: false,
            value: String::new(),
            file_name: None,
            content_type: None,
            enabled: true,
        }
    }
}

/// A body in either live or storable form.
///
/// At most one of the three slots is meaningful at a time: a live non-text
/// `payload`, a stored `multipart` entry list, or a stored `blob` data URI.
/// The codec operations maintain that exclusivity; a record with a text
/// payload carries neither sibling.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BodyRecord {
    pub payload: Payload,
    pub multipart: Option<Vec<MultipartBodyEntry>>,
    pub blob: Option<String>,
}

impl BodyRecord {
    /// A record holding the given live payload and no stored siblings.
    pub fn with_payload(payload: Payload) -> Self {
        Self {
            payload,
            ..Self::default()
        }
    }
}

/// A request record: its own body plus an optional response body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestRecord {
    pub body: BodyRecord,
    pub response: Option<BodyRecord>,
}

/// Transport direction of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "in" => Some(Direction::In),
            "out" => Some(Direction::Out),
            _ => None,
        }
    }
}

/// A transport log entry. Its body's payload slot serializes under the key
/// `message`; log entries never carry a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub created: u64,
    pub direction: Direction,
    pub size: u64,
    pub body: BodyRecord,
}
