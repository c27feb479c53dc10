//! Data URI encoding and decoding for bodykit.
//!
//! A data URI carries binary content and its MIME type in a single
//! serialization-safe string: `data:<mime>;base64,<payload>`. This crate
//! provides the encode and decode halves used by the payload codec to store
//! binary bodies in plain-text datastores.
//!
//! # Example
//!
//! ```
//! use bodykit_data_url::{decode, encode};
//!
//! let uri = encode("text/plain", b"***");
//! assert_eq!(uri, "data:text/plain;base64,Kioq");
//!
//! let parts = decode(&uri).unwrap();
//! assert_eq!(parts.content_type, "text/plain");
//! assert_eq!(parts.data, b"***");
//! ```

pub mod constants;

mod decode;
mod encode;
mod error;

pub use decode::{decode, DataUrlParts};
pub use encode::encode;
pub use error::DataUrlError;
