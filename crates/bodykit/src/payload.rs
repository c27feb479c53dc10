//! Live body value model.
//!
//! A body is one of: nothing, UTF-8 text, a binary blob with a content type,
//! an ordered multipart form, or a raw byte buffer. The storable
//! wrapped-buffer form ([`TransformedPayload`]) also lives here because it
//! occupies the payload slot of a stringified record.

/// A live (or wrapped) request, response, or log body value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Payload {
    /// No body.
    #[default]
    None,
    /// UTF-8 text body.
    Text(String),
    /// Binary blob with a content type.
    Blob(BodyBlob),
    /// Ordered multipart form.
    Multipart(MultipartForm),
    /// Platform byte buffer.
    Buffer(Vec<u8>),
    /// Fixed-length binary array.
    ArrayBuffer(Vec<u8>),
    /// Storable wrapped-buffer representation produced by the codec.
    Transformed(TransformedPayload),
}

impl Payload {
    pub fn is_none(&self) -> bool {
        matches!(self, Payload::None)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&BodyBlob> {
        match self {
            Payload::Blob(blob) => Some(blob),
            _ => None,
        }
    }

    pub fn as_multipart(&self) -> Option<&MultipartForm> {
        match self {
            Payload::Multipart(form) => Some(form),
            _ => None,
        }
    }

    pub fn as_transformed(&self) -> Option<&TransformedPayload> {
        match self {
            Payload::Transformed(wrapped) => Some(wrapped),
            _ => None,
        }
    }
}

/// Binary content together with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyBlob {
    pub content_type: String,
    pub data: Vec<u8>,
}

impl BodyBlob {
    pub fn new(content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            content_type: content_type.into(),
            data,
        }
    }

    /// Byte length of the blob content.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// The value of a single form part.
///
/// `TypedText` is a blob-backed part that carries an explicit content type
/// without being a user-visible file attachment. It replaces the convention
/// of attaching a file named `"blob"` to smuggle a content type through a
/// form, so building a part never depends on a magic filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    /// Literal text value.
    Text(String),
    /// File attachment with its original filename.
    File { blob: BodyBlob, file_name: String },
    /// Blob-backed value with an explicit content type, not a file.
    TypedText { blob: BodyBlob },
}

/// One named part of a multipart form. Names are not unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

/// An ordered multipart form. Part order is significant and duplicate part
/// names are allowed, so this is a sequence rather than a map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a literal text part.
    pub fn append_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::Text(value.into()),
        });
    }

    /// Appends a file attachment part.
    pub fn append_file(&mut self, name: impl Into<String>, file_name: impl Into<String>, blob: BodyBlob) {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::File {
                blob,
                file_name: file_name.into(),
            },
        });
    }

    /// Appends a blob-backed part that carries an explicit content type.
    pub fn append_typed_text(&mut self, name: impl Into<String>, blob: BodyBlob) {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::TypedText { blob },
        });
    }

    /// Returns the first part with the given name.
    pub fn get(&self, name: &str) -> Option<&PartValue> {
        self.parts
            .iter()
            .find(|part| part.name == name)
            .map(|part| &part.value)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FormPart> {
        self.parts.iter()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl<'a> IntoIterator for &'a MultipartForm {
    type Item = &'a FormPart;
    type IntoIter = std::slice::Iter<'a, FormPart>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

/// Discriminator for the two recognized raw buffer kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    Buffer,
    ArrayBuffer,
}

impl BufferKind {
    /// The discriminator string used in the storable form.
    pub fn as_str(self) -> &'static str {
        match self {
            BufferKind::Buffer => "Buffer",
            BufferKind::ArrayBuffer => "ArrayBuffer",
        }
    }

    /// Parses a storable discriminator. Unrecognized tags yield `None`,
    /// which callers treat as "not a wrapped buffer".
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Buffer" => Some(BufferKind::Buffer),
            "ArrayBuffer" => Some(BufferKind::ArrayBuffer),
            _ => None,
        }
    }
}

/// Storable representation of a raw byte buffer: the buffer kind plus its
/// exact byte content. Restores byte-for-byte to the original content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedPayload {
    pub kind: BufferKind,
    pub data: Vec<u8>,
}
