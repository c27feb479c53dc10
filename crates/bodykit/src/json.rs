//! Storable JSON conversion for records.
//!
//! Builds and parses the persisted shape of stringified records: `payload`
//! as a string or a `{type, data}` wrapped-buffer object, `multipart` as an
//! entry array, `blob` as a data URI string, with an optional nested
//! `response` of the same shape. Log entries use the `message` key for
//! their payload slot.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::payload::{BufferKind, Payload, TransformedPayload};
use crate::records::{BodyRecord, Direction, LogRecord, MultipartBodyEntry, RequestRecord};

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("payload is not in a storable form")]
    NotStorable,
    #[error("expected a JSON object")]
    NotAnObject,
    #[error("missing or invalid field `{0}`")]
    InvalidField(&'static str),
    #[error("unknown buffer kind `{0}`")]
    UnknownBufferKind(String),
}

/// Serializes a wrapped buffer as `{type, data}` with byte values 0–255.
pub fn transformed_to_json(wrapped: &TransformedPayload) -> Value {
    let mut obj = Map::new();
    obj.insert("type".into(), Value::from(wrapped.kind.as_str()));
    obj.insert(
        "data".into(),
        Value::Array(wrapped.data.iter().map(|&b| Value::from(b)).collect()),
    );
    Value::Object(obj)
}

/// Parses a `{type, data}` object back into a wrapped buffer. Returns `None`
/// when the value is not a wrapped buffer: wrong shape, an unrecognized
/// `type` tag, or byte values outside 0–255.
pub fn transformed_from_json(value: &Value) -> Option<TransformedPayload> {
    let obj = value.as_object()?;
    let kind = BufferKind::from_tag(obj.get("type")?.as_str()?)?;
    let items = obj.get("data")?.as_array()?;
    let mut data = Vec::with_capacity(items.len());
    for item in items {
        let byte = item.as_u64().filter(|&b| b <= 255)?;
        data.push(byte as u8);
    }
    Some(TransformedPayload { kind, data })
}

fn entry_to_json(entry: &MultipartBodyEntry) -> Value {
    let mut obj = Map::new();
    obj.insert("isFile".into(), Value::from(entry.is_file));
    obj.insert("name".into(), Value::from(entry.name.as_str()));
    obj.insert("value".into(), Value::from(entry.value.as_str()));
    if let Some(file_name) = &entry.file_name {
        obj.insert("fileName".into(), Value::from(file_name.as_str()));
    }
    if let Some(content_type) = &entry.content_type {
        obj.insert("type".into(), Value::from(content_type.as_str()));
    }
    obj.insert("enabled".into(), Value::from(entry.enabled));
    Value::Object(obj)
}

fn entry_from_json(value: &Value) -> Result<MultipartBodyEntry, JsonError> {
    let obj = value.as_object().ok_or(JsonError::NotAnObject)?;
    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .ok_or(JsonError::InvalidField("name"))?;
    let part_value = obj
        .get("value")
        .and_then(Value::as_str)
        .ok_or(JsonError::InvalidField("value"))?;
    Ok(MultipartBodyEntry {
        name: name.to_string(),
        is_file: obj.get("isFile").and_then(Value::as_bool).unwrap_or(false),
        value: part_value.to_string(),
        file_name: obj
            .get("fileName")
            .and_then(Value::as_str)
            .map(str::to_string),
        content_type: obj.get("type").and_then(Value::as_str).map(str::to_string),
        // Absent means enabled; only an explicit false disables the entry.
        enabled: obj.get("enabled").and_then(Value::as_bool).unwrap_or(true),
    })
}

fn payload_to_json(payload: &Payload) -> Result<Option<Value>, JsonError> {
    match payload {
        Payload::None => Ok(None),
        Payload::Text(text) => Ok(Some(Value::from(text.as_str()))),
        Payload::Transformed(wrapped) => Ok(Some(transformed_to_json(wrapped))),
        _ => Err(JsonError::NotStorable),
    }
}

fn payload_from_json(value: Option<&Value>, field: &'static str) -> Result<Payload, JsonError> {
    match value {
        None | Some(Value::Null) => Ok(Payload::None),
        Some(Value::String(text)) => Ok(Payload::Text(text.clone())),
        Some(object @ Value::Object(map)) => match transformed_from_json(object) {
            Some(wrapped) => Ok(Payload::Transformed(wrapped)),
            None => match map.get("type").and_then(Value::as_str) {
                Some(tag) => Err(JsonError::UnknownBufferKind(tag.to_string())),
                None => Err(JsonError::InvalidField(field)),
            },
        },
        Some(_) => Err(JsonError::InvalidField(field)),
    }
}

fn body_to_map(body: &BodyRecord, payload_key: &str) -> Result<Map<String, Value>, JsonError> {
    let mut obj = Map::new();
    if let Some(payload) = payload_to_json(&body.payload)? {
        obj.insert(payload_key.to_string(), payload);
    }
    if let Some(entries) = &body.multipart {
        obj.insert(
            "multipart".into(),
            Value::Array(entries.iter().map(entry_to_json).collect()),
        );
    }
    if let Some(blob) = &body.blob {
        obj.insert("blob".into(), Value::from(blob.as_str()));
    }
    Ok(obj)
}

fn body_from_map(obj: &Map<String, Value>, payload_key: &'static str) -> Result<BodyRecord, JsonError> {
    let payload = payload_from_json(obj.get(payload_key), payload_key)?;
    let multipart = match obj.get("multipart") {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .map(entry_from_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Some(_) => return Err(JsonError::InvalidField("multipart")),
    };
    let blob = match obj.get("blob") {
        None | Some(Value::Null) => None,
        Some(Value::String(blob)) => Some(blob.clone()),
        Some(_) => return Err(JsonError::InvalidField("blob")),
    };
    Ok(BodyRecord {
        payload,
        multipart,
        blob,
    })
}

/// Serializes a stringified request record. A live blob or multipart
/// payload (not yet stringified) is rejected as [`JsonError::NotStorable`].
pub fn request_to_json(request: &RequestRecord) -> Result<Value, JsonError> {
    let mut obj = body_to_map(&request.body, "payload")?;
    if let Some(response) = &request.response {
        obj.insert(
            "response".into(),
            Value::Object(body_to_map(response, "payload")?),
        );
    }
    Ok(Value::Object(obj))
}

/// Parses a stored request record.
pub fn request_from_json(value: &Value) -> Result<RequestRecord, JsonError> {
    let obj = value.as_object().ok_or(JsonError::NotAnObject)?;
    let body = body_from_map(obj, "payload")?;
    let response = match obj.get("response") {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(body_from_map(map, "payload")?),
        Some(_) => return Err(JsonError::InvalidField("response")),
    };
    Ok(RequestRecord { body, response })
}

/// Serializes a stringified log record: `{created, direction, message, size,
/// blob?}`.
pub fn log_to_json(log: &LogRecord) -> Result<Value, JsonError> {
    let mut obj = Map::new();
    obj.insert("created".into(), Value::from(log.created));
    obj.insert("direction".into(), Value::from(log.direction.as_str()));
    if let Some(message) = payload_to_json(&log.body.payload)? {
        obj.insert("message".into(), message);
    }
    obj.insert("size".into(), Value::from(log.size));
    if let Some(blob) = &log.body.blob {
        obj.insert("blob".into(), Value::from(blob.as_str()));
    }
    Ok(Value::Object(obj))
}

/// Parses a stored log record.
pub fn log_from_json(value: &Value) -> Result<LogRecord, JsonError> {
    let obj = value.as_object().ok_or(JsonError::NotAnObject)?;
    let created = obj
        .get("created")
        .and_then(Value::as_u64)
        .ok_or(JsonError::InvalidField("created"))?;
    let direction = obj
        .get("direction")
        .and_then(Value::as_str)
        .and_then(Direction::from_tag)
        .ok_or(JsonError::InvalidField("direction"))?;
    let size = obj
        .get("size")
        .and_then(Value::as_u64)
        .ok_or(JsonError::InvalidField("size"))?;
    let body = body_from_map(obj, "message")?;
    Ok(LogRecord {
        created,
        direction,
        size,
        body,
    })
}
