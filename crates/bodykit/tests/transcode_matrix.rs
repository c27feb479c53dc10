//! Storage round-trip matrix for the payload codec: stringify/restore over
//! requests, responses, and transport logs, plus the storable JSON layer.

use bodykit::processor::{
    create_multipart_entries, restore_logs, restore_multipart, stringify_logs,
    transformed_to_payload,
};
use bodykit::{
    buffer_to_string, payload_to_string, restore_payload, restore_request, stringify_request,
    BodyBlob, BodyRecord, BufferKind, Direction, LogRecord, MultipartBodyEntry, MultipartForm,
    PartValue, Payload, RequestRecord, TextDecoding, TransformedPayload,
};

fn text_plain_blob(content: &[u8]) -> BodyBlob {
    BodyBlob::new("text/plain", content.to_vec())
}

fn sample_form() -> MultipartForm {
    let mut form = MultipartForm::new();
    form.append_file("file", "file-name", text_plain_blob(b"***"));
    form.append_text("text", "abcd");
    form.append_typed_text("text-part", text_plain_blob(b"***"));
    form
}

// ---------------------------------------------------------------------------
// payload_to_string
// ---------------------------------------------------------------------------

#[test]
fn no_payload_passes_through() {
    let record = BodyRecord::default();
    let result = payload_to_string(record.clone());
    assert_eq!(result, record);
}

#[test]
fn text_payload_passes_through() {
    let record = BodyRecord::with_payload(Payload::Text("test".into()));
    let result = payload_to_string(record.clone());
    assert_eq!(result, record);
}

#[test]
fn blob_payload_moves_to_blob_slot() {
    let record = BodyRecord::with_payload(Payload::Blob(text_plain_blob(b"***")));
    let result = payload_to_string(record);
    assert_eq!(result.blob.as_deref(), Some("data:text/plain;base64,Kioq"));
    assert!(result.payload.is_none());
    assert!(result.multipart.is_none());
}

#[test]
fn multipart_payload_moves_to_multipart_slot() {
    let record = BodyRecord::with_payload(Payload::Multipart(sample_form()));
    let result = payload_to_string(record);
    let entries = result.multipart.expect("multipart entries");
    assert_eq!(entries.len(), 3);
    assert!(result.payload.is_none());
    assert!(result.blob.is_none());
}

#[test]
fn multipart_entries_match_the_stored_model() {
    let entries = create_multipart_entries(&sample_form());
    assert_eq!(
        entries[0],
        MultipartBodyEntry {
            name: "file".into(),
            is_file: true,
            value: "data:text/plain;base64,Kioq".into(),
            file_name: Some("file-name".into()),
            content_type: None,
            enabled: true,
        }
    );
    assert_eq!(
        entries[1],
        MultipartBodyEntry {
            name: "text".into(),
            is_file: false,
            value: "abcd".into(),
            file_name: None,
            content_type: None,
            enabled: true,
        }
    );
    assert_eq!(
        entries[2],
        MultipartBodyEntry {
            name: "text-part".into(),
            is_file: false,
            value: "data:text/plain;base64,Kioq".into(),
            file_name: None,
            content_type: Some("text/plain".into()),
            enabled: true,
        }
    );
}

#[test]
fn raw_buffers_wrap_in_place() {
    let record = BodyRecord::with_payload(Payload::ArrayBuffer(b"test".to_vec()));
    let result = payload_to_string(record);
    let wrapped = result.payload.as_transformed().expect("wrapped buffer");
    assert_eq!(wrapped.kind, BufferKind::ArrayBuffer);
    assert_eq!(wrapped.data, b"test");

    let record = BodyRecord::with_payload(Payload::Buffer(vec![1, 2, 3]));
    let result = payload_to_string(record);
    let wrapped = result.payload.as_transformed().expect("wrapped buffer");
    assert_eq!(wrapped.kind, BufferKind::Buffer);
    assert_eq!(wrapped.data, [1, 2, 3]);
}

// ---------------------------------------------------------------------------
// restore_payload
// ---------------------------------------------------------------------------

#[test]
fn restore_without_stored_fields_is_identity() {
    let record = BodyRecord::with_payload(Payload::Text("test".into()));
    let result = restore_payload(record.clone());
    assert_eq!(result, record);
}

#[test]
fn restore_blob_rebuilds_the_blob() {
    let record = BodyRecord {
        blob: Some("data:text/plain;base64,Kioq".into()),
        ..BodyRecord::default()
    };
    let result = restore_payload(record);
    let blob = result.payload.as_blob().expect("blob payload");
    assert_eq!(blob.content_type, "text/plain");
    assert_eq!(blob.size(), 3);
    assert!(result.blob.is_none());
}

#[test]
fn restore_multipart_rebuilds_the_form() {
    let record = BodyRecord {
        multipart: Some(vec![MultipartBodyEntry {
            name: "test-name".into(),
            value: "test-value".into(),
            ..MultipartBodyEntry::default()
        }]),
        ..BodyRecord::default()
    };
    let result = restore_payload(record);
    let form = result.payload.as_multipart().expect("multipart payload");
    assert_eq!(form.get("test-name"), Some(&PartValue::Text("test-value".into())));
    assert!(result.multipart.is_none());
}

#[test]
fn restore_wrapped_array_buffer_decodes_as_utf8_test() {
    // {type:"ArrayBuffer", data:[116,101,115,116]} is the 4 bytes of "test".
    let payload = transformed_to_payload(TransformedPayload {
        kind: BufferKind::ArrayBuffer,
        data: vec![116, 101, 115, 116],
    });
    match payload {
        Payload::ArrayBuffer(data) => {
            assert_eq!(data.len(), 4);
            assert_eq!(buffer_to_string(&data, TextDecoding::Utf8), "test");
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[test]
fn restore_prefers_multipart_over_blob() {
    let record = BodyRecord {
        multipart: Some(vec![MultipartBodyEntry {
            name: "a".into(),
            value: "1".into(),
            ..MultipartBodyEntry::default()
        }]),
        blob: Some("data:text/plain;base64,Kioq".into()),
        ..BodyRecord::default()
    };
    let result = restore_payload(record);
    assert!(result.payload.as_multipart().is_some());
    // The blob slot is untouched by the multipart branch.
    assert!(result.blob.is_some());
}

#[test]
fn malformed_blob_is_dropped_not_raised() {
    let record = BodyRecord {
        blob: Some("data:text/plain,not-base64-marker".into()),
        ..BodyRecord::default()
    };
    let result = restore_payload(record);
    assert!(result.payload.is_none());
    assert!(result.blob.is_none());
}

#[test]
fn malformed_multipart_is_dropped_not_raised() {
    let record = BodyRecord {
        multipart: Some(vec![MultipartBodyEntry {
            name: "f".into(),
            is_file: true,
            value: "not-a-data-uri".into(),
            ..MultipartBodyEntry::default()
        }]),
        ..BodyRecord::default()
    };
    let result = restore_payload(record);
    assert!(result.payload.is_none());
    assert!(result.multipart.is_none());
}

// ---------------------------------------------------------------------------
// round-trip properties
// ---------------------------------------------------------------------------

#[test]
fn text_roundtrips_unchanged() {
    for text in ["", "test", "日本語のテキスト", "a\r\nb"] {
        let record = BodyRecord::with_payload(Payload::Text(text.into()));
        let result = restore_payload(payload_to_string(record));
        assert_eq!(result.payload.as_text(), Some(text));
    }
}

#[test]
fn blob_roundtrips_type_and_content() {
    let blob = BodyBlob::new("application/json", br#"{"a":1}"#.to_vec());
    let record = BodyRecord::with_payload(Payload::Blob(blob.clone()));
    let result = restore_payload(payload_to_string(record));
    assert_eq!(result.payload.as_blob(), Some(&blob));
}

#[test]
fn multipart_roundtrips_order_and_content() {
    let form = sample_form();
    let record = BodyRecord::with_payload(Payload::Multipart(form.clone()));
    let result = restore_payload(payload_to_string(record));
    let restored = result.payload.as_multipart().expect("multipart payload");
    assert_eq!(restored.len(), form.len());
    for (restored_part, original_part) in restored.iter().zip(form.iter()) {
        assert_eq!(restored_part.name, original_part.name);
        assert_eq!(restored_part.value, original_part.value);
    }
}

#[test]
fn disabled_entries_are_excluded_on_restore() {
    let form = restore_multipart(&[MultipartBodyEntry {
        name: "x".into(),
        value: "v".into(),
        enabled: false,
        ..MultipartBodyEntry::default()
    }])
    .unwrap();
    assert!(!form.has("x"));
    assert!(form.is_empty());
}

#[test]
fn wrapped_buffer_roundtrips_exact_bytes() {
    for len in [1usize, 3, 5, 17] {
        let data: Vec<u8> = (0..len).map(|i| (i * 31 % 256) as u8).collect();
        let record = BodyRecord::with_payload(Payload::ArrayBuffer(data.clone()));
        let result = restore_payload(payload_to_string(record));
        match &result.payload {
            Payload::ArrayBuffer(restored) => assert_eq!(restored, &data),
            other => panic!("unexpected payload: {other:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// request records with responses
// ---------------------------------------------------------------------------

#[test]
fn stringify_request_covers_the_response_body() {
    let request = RequestRecord {
        body: BodyRecord::with_payload(Payload::Blob(text_plain_blob(b"***** ***"))),
        response: Some(BodyRecord::with_payload(Payload::Blob(text_plain_blob(
            b"***** ***",
        )))),
    };
    let result = stringify_request(request);
    assert_eq!(
        result.body.blob.as_deref(),
        Some("data:text/plain;base64,KioqKiogKioq")
    );
    assert_eq!(
        result.response.unwrap().blob.as_deref(),
        Some("data:text/plain;base64,KioqKiogKioq")
    );
}

#[test]
fn stringify_request_wraps_response_buffers() {
    let request = RequestRecord {
        body: BodyRecord::default(),
        response: Some(BodyRecord::with_payload(Payload::ArrayBuffer(
            b"test".to_vec(),
        ))),
    };
    let result = stringify_request(request);
    let response = result.response.unwrap();
    let wrapped = response.payload.as_transformed().expect("wrapped buffer");
    assert_eq!(wrapped.kind, BufferKind::ArrayBuffer);
}

#[test]
fn restore_request_reverses_both_bodies() {
    let request = RequestRecord {
        body: BodyRecord {
            blob: Some("data:text/plain;base64,KioqKiogKioq".into()),
            ..BodyRecord::default()
        },
        response: Some(BodyRecord::with_payload(Payload::Transformed(
            TransformedPayload {
                kind: BufferKind::ArrayBuffer,
                data: b"test-ab".to_vec(),
            },
        ))),
    };
    let result = restore_request(request);
    assert!(result.body.payload.as_blob().is_some());
    assert!(matches!(
        result.response.unwrap().payload,
        Payload::ArrayBuffer(data) if data == b"test-ab"
    ));
}

// ---------------------------------------------------------------------------
// transport log batches
// ---------------------------------------------------------------------------

fn log(payload: Payload) -> LogRecord {
    LogRecord {
        created: 1,
        direction: Direction::In,
        size: 4,
        body: BodyRecord::with_payload(payload),
    }
}

#[test]
fn stringify_logs_keeps_string_messages() {
    let result = stringify_logs(vec![log(Payload::Text("test".into()))]);
    assert_eq!(result[0].body.payload.as_text(), Some("test"));
}

#[test]
fn stringify_logs_skips_absent_messages() {
    let result = stringify_logs(vec![log(Payload::None)]);
    assert!(result[0].body.payload.is_none());
    assert!(result[0].body.blob.is_none());
}

#[test]
fn stringify_logs_transforms_blob_messages() {
    let result = stringify_logs(vec![log(Payload::Blob(text_plain_blob(b"***** ***")))]);
    assert!(result[0].body.payload.is_none());
    assert_eq!(
        result[0].body.blob.as_deref(),
        Some("data:text/plain;base64,KioqKiogKioq")
    );
}

#[test]
fn stringify_logs_wraps_buffer_messages() {
    let result = stringify_logs(vec![log(Payload::ArrayBuffer(b"test".to_vec()))]);
    let wrapped = result[0].body.payload.as_transformed().expect("wrapped");
    assert_eq!(wrapped.kind, BufferKind::ArrayBuffer);
    assert_eq!(wrapped.data, b"test");
}

#[test]
fn restore_logs_preserves_order_and_isolates_failures() {
    let logs = vec![
        LogRecord {
            body: BodyRecord {
                blob: Some("data:text/plain;base64,Kioq".into()),
                ..BodyRecord::default()
            },
            ..log(Payload::None)
        },
        LogRecord {
            // Malformed data URI: dropped, payload left empty.
            body: BodyRecord {
                blob: Some("garbage".into()),
                ..BodyRecord::default()
            },
            ..log(Payload::None)
        },
        log(Payload::Text("still here".into())),
    ];
    let result = restore_logs(logs);
    assert_eq!(result.len(), 3);
    assert!(result[0].body.payload.as_blob().is_some());
    assert!(result[1].body.payload.is_none());
    assert!(result[1].body.blob.is_none());
    assert_eq!(result[2].body.payload.as_text(), Some("still here"));
}

// ---------------------------------------------------------------------------
// storable JSON end to end
// ---------------------------------------------------------------------------

#[test]
fn stringified_request_survives_json_persistence() {
    let request = RequestRecord {
        body: BodyRecord::with_payload(Payload::Multipart(sample_form())),
        response: Some(BodyRecord::with_payload(Payload::ArrayBuffer(
            b"test".to_vec(),
        ))),
    };
    let stored = stringify_request(request);

    let value = bodykit::json::request_to_json(&stored).unwrap();
    let serialized = serde_json::to_string(&value).unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&serialized).unwrap();
    let reloaded = bodykit::json::request_from_json(&reparsed).unwrap();
    assert_eq!(reloaded, stored);

    let restored = restore_request(reloaded);
    let form = restored.body.payload.as_multipart().expect("form");
    assert_eq!(form.len(), 3);
    assert!(matches!(
        restored.response.unwrap().payload,
        Payload::ArrayBuffer(data) if data == b"test"
    ));
}
