//! Multipart wire message generation.
//!
//! Produces the exact bytes a transport would send for a multipart form,
//! together with the negotiated `Content-Type` header and boundary, without
//! performing a network call. Used for previews and byte-accurate inspection.

use rand::Rng;

use crate::error::GenerateError;
use crate::payload::{MultipartForm, PartValue};

const BOUNDARY_PREFIX: &str = "----WebKitFormBoundary";
const BOUNDARY_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const BOUNDARY_RANDOM_LEN: usize = 16;

const OCTET_STREAM: &str = "application/octet-stream";

/// Strategy for decoding generated message bytes into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDecoding {
    /// One-shot UTF-8 decoding. Invalid sequences become U+FFFD.
    #[default]
    Utf8,
    /// Byte-to-character mapping. Correct only for Latin-1 content.
    Latin1,
}

impl TextDecoding {
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            TextDecoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            TextDecoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}

/// Decodes a byte buffer into text using the given strategy.
pub fn buffer_to_string(buffer: &[u8], decoding: TextDecoding) -> String {
    decoding.decode(buffer)
}

/// Encodes a multipart form into wire bytes for a given boundary.
///
/// An encoder that cannot materialize a message from the form reports
/// [`GenerateError::Unsupported`].
pub trait FormEncoder {
    fn encode(&self, form: &MultipartForm, boundary: &str) -> Result<Vec<u8>, GenerateError>;
}

/// Standard `multipart/form-data` wire encoding with CRLF framing.
#[derive(Debug, Default)]
pub struct WireEncoder;

impl FormEncoder for WireEncoder {
    fn encode(&self, form: &MultipartForm, boundary: &str) -> Result<Vec<u8>, GenerateError> {
        let mut out = Vec::new();
        for part in form {
            out.extend_from_slice(b"--");
            out.extend_from_slice(boundary.as_bytes());
            out.extend_from_slice(b"\r\n");
            match &part.value {
                PartValue::Text(text) => {
                    write_disposition(&mut out, &part.name, None);
                    out.extend_from_slice(b"\r\n");
                    out.extend_from_slice(text.as_bytes());
                }
                PartValue::File { blob, file_name } => {
                    write_disposition(&mut out, &part.name, Some(file_name));
                    write_content_type(&mut out, &blob.content_type);
                    out.extend_from_slice(b"\r\n");
                    out.extend_from_slice(&blob.data);
                }
                PartValue::TypedText { blob } => {
                    // Browsers surface a typed non-file part as a file
                    // attachment named "blob" on the wire.
                    write_disposition(&mut out, &part.name, Some("blob"));
                    write_content_type(&mut out, &blob.content_type);
                    out.extend_from_slice(b"\r\n");
                    out.extend_from_slice(&blob.data);
                }
            }
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(b"--");
        out.extend_from_slice(boundary.as_bytes());
        out.extend_from_slice(b"--\r\n");
        Ok(out)
    }
}

fn write_disposition(out: &mut Vec<u8>, name: &str, file_name: Option<&str>) {
    out.extend_from_slice(b"Content-Disposition: form-data; name=\"");
    out.extend_from_slice(escape_header_value(name).as_bytes());
    out.extend_from_slice(b"\"");
    if let Some(file_name) = file_name {
        out.extend_from_slice(b"; filename=\"");
        out.extend_from_slice(escape_header_value(file_name).as_bytes());
        out.extend_from_slice(b"\"");
    }
    out.extend_from_slice(b"\r\n");
}

fn write_content_type(out: &mut Vec<u8>, content_type: &str) {
    let mime = if content_type.is_empty() {
        OCTET_STREAM
    } else {
        content_type
    };
    out.extend_from_slice(b"Content-Type: ");
    out.extend_from_slice(mime.as_bytes());
    out.extend_from_slice(b"\r\n");
}

fn escape_header_value(value: &str) -> String {
    value
        .replace('\r', "%0D")
        .replace('\n', "%0A")
        .replace('"', "%22")
}

fn generate_boundary() -> String {
    let mut rng = rand::thread_rng();
    let mut boundary = String::with_capacity(BOUNDARY_PREFIX.len() + BOUNDARY_RANDOM_LEN);
    boundary.push_str(BOUNDARY_PREFIX);
    for _ in 0..BOUNDARY_RANDOM_LEN {
        let idx = rng.gen_range(0..BOUNDARY_ALPHABET.len());
        boundary.push(BOUNDARY_ALPHABET[idx] as char);
    }
    boundary
}

/// Generates transmittable multipart messages from a form and exposes the
/// resulting boundary and `Content-Type` header.
///
/// [`MultipartGenerator::boundary`] and [`MultipartGenerator::content_type`]
/// are `None` until a message has been generated at least once; each
/// generation picks a fresh random boundary.
#[derive(Debug, Default)]
pub struct MultipartGenerator {
    form: Option<MultipartForm>,
    content_type: Option<String>,
    boundary: Option<String>,
}

impl MultipartGenerator {
    pub fn new(form: MultipartForm) -> Self {
        Self {
            form: Some(form),
            ..Self::default()
        }
    }

    /// A generator with no form set. [`MultipartGenerator::generate_preview`]
    /// fails until a form is provided.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn set_form(&mut self, form: Option<MultipartForm>) {
        self.form = form;
    }

    /// The boundary parsed from the last generated message's content type.
    pub fn boundary(&self) -> Option<&str> {
        self.boundary.as_deref()
    }

    /// The full `Content-Type` header value of the last generated message.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Generates the wire message bytes with the default encoder.
    pub fn generate_message(&mut self) -> Result<Vec<u8>, GenerateError> {
        self.generate_message_with(&WireEncoder)
    }

    /// Generates the wire message bytes with a caller-provided encoder.
    pub fn generate_message_with(
        &mut self,
        encoder: &dyn FormEncoder,
    ) -> Result<Vec<u8>, GenerateError> {
        let form = self.form.as_ref().ok_or(GenerateError::FormNotSet)?;
        let boundary = generate_boundary();
        let message = encoder.encode(form, &boundary)?;
        let header = format!("multipart/form-data; boundary={boundary}");
        self.process_content_type(&header);
        Ok(message)
    }

    fn process_content_type(&mut self, header: &str) {
        self.content_type = Some(header.to_string());
        if let Some((_, boundary)) = header.split_once("boundary=") {
            self.boundary = Some(boundary.to_string());
        }
    }

    /// Generates the message and decodes it to UTF-8 text for display.
    pub fn generate_preview(&mut self) -> Result<String, GenerateError> {
        if self.form.is_none() {
            return Err(GenerateError::FormNotSet);
        }
        let message = self.generate_message()?;
        Ok(buffer_to_string(&message, TextDecoding::Utf8))
    }
}
