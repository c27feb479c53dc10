//! Payload codec: converts live body values into datastore-safe storable
//! representations and restores them.
//!
//! The codec is stateless; every operation consumes its record and returns a
//! new one, so a caller's original value is never mutated in place. Encoding
//! never fails on well-formed live values. Decoding fails loudly on direct
//! calls, but the record-level restore operations favor partial success: a
//! malformed `multipart` or `blob` field is logged, dropped, and the rest of
//! the record (or batch) restores normally.

use std::mem;

use tracing::warn;

use crate::error::DecodeError;
use crate::payload::{
    BodyBlob, BufferKind, MultipartForm, PartValue, Payload, TransformedPayload,
};
use crate::records::{BodyRecord, LogRecord, MultipartBodyEntry, RequestRecord};

/// Stringifies a request body and, when present, its response body.
///
/// # Example
///
/// ```
/// use bodykit::processor::stringify_request;
/// use bodykit::{BodyBlob, BodyRecord, Payload, RequestRecord};
///
/// let request = RequestRecord {
///     body: BodyRecord::with_payload(Payload::Blob(BodyBlob::new(
///         "text/plain",
///         b"***".to_vec(),
///     ))),
///     response: None,
/// };
/// let stored = stringify_request(request);
/// assert_eq!(stored.body.blob.as_deref(), Some("data:text/plain;base64,Kioq"));
/// assert!(stored.body.payload.is_none());
/// ```
pub fn stringify_request(request: RequestRecord) -> RequestRecord {
    let RequestRecord { body, response } = request;
    RequestRecord {
        body: payload_to_string(body),
        response: response.map(payload_to_string),
    }
}

/// Restores a request body and, when present, its response body.
pub fn restore_request(request: RequestRecord) -> RequestRecord {
    let RequestRecord { body, response } = request;
    RequestRecord {
        body: restore_payload(body),
        response: response.map(restore_payload),
    }
}

/// Converts a single record's live payload into its storable form.
///
/// A multipart form moves to the `multipart` slot, a blob moves to the
/// `blob` slot as a data URI, and a raw buffer is wrapped in place as a
/// [`TransformedPayload`]. Absent and text payloads (and already-wrapped
/// buffers) pass through unchanged.
pub fn payload_to_string(mut record: BodyRecord) -> BodyRecord {
    match mem::take(&mut record.payload) {
        Payload::Multipart(form) => {
            record.multipart = Some(create_multipart_entries(&form));
        }
        Payload::Blob(blob) => {
            record.blob = Some(encode_blob(&blob));
        }
        Payload::Buffer(data) => {
            record.payload = Payload::Transformed(buffer_to_transformed(data));
        }
        Payload::ArrayBuffer(data) => {
            record.payload = Payload::Transformed(array_buffer_to_transformed(data));
        }
        other => record.payload = other,
    }
    record
}

/// Restores a single record's storable form back into a live payload.
///
/// Priority: a `multipart` slot wins over a `blob` slot, which wins over a
/// wrapped buffer in the payload slot. A malformed `multipart` or `blob`
/// value is logged and dropped, leaving the payload empty; the rest of the
/// record is preserved.
pub fn restore_payload(mut record: BodyRecord) -> BodyRecord {
    if let Some(model) = record.multipart.take() {
        match restore_multipart(&model) {
            Ok(form) => record.payload = Payload::Multipart(form),
            Err(err) => warn!("unable to restore multipart payload: {err}"),
        }
        return record;
    }
    if let Some(data_url) = record.blob.take() {
        match decode_blob(&data_url) {
            Ok(blob) => record.payload = Payload::Blob(blob),
            Err(err) => warn!("unable to restore blob payload: {err}"),
        }
        return record;
    }
    record.payload = match mem::take(&mut record.payload) {
        Payload::Transformed(wrapped) => transformed_to_payload(wrapped),
        other => other,
    };
    record
}

/// Stringifies a batch of transport log entries, preserving order. Entries
/// with an absent or text message are left untouched.
pub fn stringify_logs(logs: Vec<LogRecord>) -> Vec<LogRecord> {
    logs.into_iter()
        .map(|mut log| {
            log.body = payload_to_string(log.body);
            log
        })
        .collect()
}

/// Restores a batch of transport log entries, preserving order. A decode
/// failure in one entry is isolated to that entry.
pub fn restore_logs(logs: Vec<LogRecord>) -> Vec<LogRecord> {
    logs.into_iter()
        .map(|mut log| {
            log.body = restore_payload(log.body);
            log
        })
        .collect()
}

/// Computes the storable entry list for a multipart form, in part order.
pub fn create_multipart_entries(form: &MultipartForm) -> Vec<MultipartBodyEntry> {
    form.iter()
        .map(|part| compute_form_entry(&part.name, &part.value))
        .collect()
}

fn compute_form_entry(name: &str, value: &PartValue) -> MultipartBodyEntry {
    match value {
        PartValue::Text(text) => MultipartBodyEntry {
            name: name.to_string(),
            value: text.clone(),
            ..MultipartBodyEntry::default()
        },
        PartValue::File { blob, file_name } => MultipartBodyEntry {
            name: name.to_string(),
            is_file: true,
            value: encode_blob(blob),
            file_name: Some(file_name.clone()),
            ..MultipartBodyEntry::default()
        },
        PartValue::TypedText { blob } => MultipartBodyEntry {
            name: name.to_string(),
            value: encode_blob(blob),
            content_type: Some(blob.content_type.clone()),
            ..MultipartBodyEntry::default()
        },
    }
}

/// Reconstructs a live multipart form from its stored entry list, in order.
/// Entries with `enabled: false` are skipped.
pub fn restore_multipart(model: &[MultipartBodyEntry]) -> Result<MultipartForm, DecodeError> {
    let mut form = MultipartForm::new();
    for entry in model {
        if !entry.enabled {
            continue;
        }
        if entry.is_file {
            let blob = decode_blob(&entry.value)?;
            let file_name = entry.file_name.clone().unwrap_or_default();
            form.append_file(&entry.name, file_name, blob);
        } else if entry.content_type.is_some() {
            let blob = decode_blob(&entry.value)?;
            form.append_typed_text(&entry.name, blob);
        } else {
            form.append_text(&entry.name, &entry.value);
        }
    }
    Ok(form)
}

/// Wraps a platform byte buffer in its storable form.
pub fn buffer_to_transformed(data: Vec<u8>) -> TransformedPayload {
    TransformedPayload {
        kind: BufferKind::Buffer,
        data,
    }
}

/// Wraps a fixed-length binary array in its storable form.
pub fn array_buffer_to_transformed(data: Vec<u8>) -> TransformedPayload {
    TransformedPayload {
        kind: BufferKind::ArrayBuffer,
        data,
    }
}

/// Unwraps a stored buffer back into its live payload. The byte content is
/// materialized one byte per stored element, exactly as long as the stored
/// sequence.
pub fn transformed_to_payload(wrapped: TransformedPayload) -> Payload {
    match wrapped.kind {
        BufferKind::Buffer => Payload::Buffer(wrapped.data),
        BufferKind::ArrayBuffer => Payload::ArrayBuffer(wrapped.data),
    }
}

/// Encodes a blob as a base64 data URI.
pub fn encode_blob(blob: &BodyBlob) -> String {
    bodykit_data_url::encode(&blob.content_type, &blob.data)
}

/// Decodes a base64 data URI into a blob.
pub fn decode_blob(value: &str) -> Result<BodyBlob, DecodeError> {
    let parts = bodykit_data_url::decode(value)?;
    Ok(BodyBlob {
        content_type: parts.content_type,
        data: parts.data,
    })
}
