//! # bodykit
//!
//! HTTP body payload transcoding.
//!
//! Converts live request, response, and transport-log body values (text,
//! binary blobs, multipart forms, raw buffers) into datastore-safe storable
//! representations and restores them, and generates wire-format multipart
//! messages for previews and byte-accurate inspection.
//!
//! The codec is stateless and value-oriented: every operation consumes a
//! record and returns a new one, so no caller state is ever mutated in place
//! and no references are retained across calls.
//!
//! ## Example
//!
//! ```
//! use bodykit::processor::{payload_to_string, restore_payload};
//! use bodykit::{BodyBlob, BodyRecord, Payload};
//!
//! let record = BodyRecord::with_payload(Payload::Blob(BodyBlob::new(
//!     "text/plain",
//!     b"***".to_vec(),
//! )));
//! let stored = payload_to_string(record);
//! assert_eq!(stored.blob.as_deref(), Some("data:text/plain;base64,Kioq"));
//! assert!(stored.payload.is_none());
//!
//! let restored = restore_payload(stored);
//! let blob = restored.payload.as_blob().unwrap();
//! assert_eq!(blob.content_type, "text/plain");
//! assert_eq!(blob.size(), 3);
//! ```

pub mod json;
pub mod processor;

mod error;
mod generator;
mod payload;
mod records;

pub use error::{DecodeError, GenerateError};
pub use generator::{
    buffer_to_string, FormEncoder, MultipartGenerator, TextDecoding, WireEncoder,
};
pub use payload::{
    BodyBlob, BufferKind, FormPart, MultipartForm, PartValue, Payload, TransformedPayload,
};
pub use processor::{payload_to_string, restore_payload, restore_request, stringify_request};
pub use records::{BodyRecord, Direction, LogRecord, MultipartBodyEntry, RequestRecord};
