use recordstore_core::{Record, RecordDraft, RecordValidationError};
use serde_json::json;

#[test]
fn record_serializes_to_flat_wire_fields() {
    let record = Record {
        id: 7,
        text: "walk dog".to_string(),
        done: true,
    };

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value, json!({ "id": 7, "text": "walk dog", "done": true }));

    let decoded: Record = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn draft_decodes_partial_payloads() {
    let only_text: RecordDraft = serde_json::from_value(json!({ "text": "a" })).unwrap();
    assert_eq!(only_text, RecordDraft::with_text("a"));

    let empty: RecordDraft = serde_json::from_value(json!({})).unwrap();
    assert_eq!(
        empty.validate().unwrap_err(),
        RecordValidationError::MissingText
    );
}

#[test]
fn draft_ignores_client_supplied_id() {
    let draft: RecordDraft =
        serde_json::from_value(json!({ "id": 99, "text": "mine", "done": false })).unwrap();

    let new_record = draft.validate().unwrap();
    assert_eq!(new_record.text(), "mine");
    assert!(!new_record.done());
}

#[test]
fn draft_rejects_wrong_field_types() {
    let result = serde_json::from_value::<RecordDraft>(json!({ "text": 5 }));
    assert!(result.is_err());
}
