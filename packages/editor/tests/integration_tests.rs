//! Integration tests for editor crate

use mobile_ui_editor::{
    field_path, Document, EditSession, EditorError, NumberKind, PathError, Rect, SelectEvent,
    SessionOptions, Surface, Widget,
};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

const SCREEN: &str = r#"{
  "id": "checkout",
  "title": "Caisse – paiement",
  "moduleElements": [
    {
      "id": "btn1",
      "Component": "Button",
      "props": {
        "position": {"x": 10, "y": 20, "width": 80, "height": 30},
        "enabled": true,
        "scale": 1.5,
        "actions": ["tap", {"goto": "done"}]
      }
    },
    {"id": "label", "type": "Text", "props": {"text": "Total"}}
  ],
  "enhancedData": [{"id": "banner"}],
  "analytics": {"screen": "checkout", "sampled": null}
}"#;

#[test]
fn test_round_trip_preserves_structure() {
    let doc = Document::from_source(SCREEN).unwrap();
    let text = doc.serialize().unwrap();

    let original: Value = serde_json::from_str(SCREEN).unwrap();
    let reparsed: Value = serde_json::from_slice(&text).unwrap();
    assert_eq!(reparsed, original);

    // key order survives, not just key set
    let keys: Vec<_> = reparsed.as_object().unwrap().keys().cloned().collect();
    assert_eq!(
        keys,
        vec!["id", "title", "moduleElements", "enhancedData", "analytics"]
    );
}

#[test]
fn test_serialization_is_stable() {
    let doc = Document::from_source(SCREEN).unwrap();
    let first = doc.serialize().unwrap();
    let second = Document::load(&first).unwrap().serialize().unwrap();

    assert_eq!(first, second);
    assert!(String::from_utf8(first).unwrap().contains("Caisse – paiement"));
}

#[test]
fn test_load_then_save_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("screen.json");
    fs::write(&path, SCREEN).unwrap();

    let mut session = EditSession::new(SessionOptions::default());
    session.open(&path).unwrap();
    session.save().unwrap();

    let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let original: Value = serde_json::from_str(SCREEN).unwrap();
    assert_eq!(saved, original);
}

#[test]
fn test_save_keeps_numbers_exact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("numbers.json");
    fs::write(
        &path,
        r#"{"moduleElements": [{"id": "stats", "trackingId": 123456789012345678901234, "tiny": 1.0715660391465826e-75, "huge": -1.603964615428183e143}]}"#,
    )
    .unwrap();

    let mut session = EditSession::new(SessionOptions::default());
    session.open(&path).unwrap();
    session.save().unwrap();

    let saved = fs::read_to_string(&path).unwrap();
    assert!(saved.contains("\"trackingId\": 123456789012345678901234"));
    assert!(saved.contains("\"tiny\": 1.0715660391465826e-75"));
    assert!(saved.contains("\"huge\": -1.603964615428183e143"));

    session.select(SelectEvent::ListEntry("stats".to_string()));
    let kind = |name: &str| match &session.form().field(name).unwrap().widget {
        Widget::Number { kind, .. } => *kind,
        other => panic!("unexpected widget: {other:?}"),
    };
    assert_eq!(kind("trackingId"), NumberKind::Integer);
    assert_eq!(kind("tiny"), NumberKind::Float);
}

#[test]
fn test_field_path_read_back() {
    let mut doc: Value = serde_json::from_str(SCREEN).unwrap();
    field_path::set(&mut doc, "analytics.screen", json!("cart")).unwrap();
    assert_eq!(field_path::get(&doc, "analytics.screen"), Some(&json!("cart")));
}

#[test]
fn test_position_special_case() {
    let mut element = json!({"id": "fresh", "Component": "Image"});
    field_path::set(&mut element, "props.position.x", json!(42)).unwrap();
    assert_eq!(element["props"]["position"]["x"], json!(42));
}

#[test]
fn test_missing_segment_is_path_error() {
    let mut doc = json!({"a": {"present": 1}});
    let err = field_path::set(&mut doc, "a.missing.c", json!(1)).unwrap_err();
    assert!(matches!(err, PathError::MissingSegment { .. }));
}

#[test]
fn test_single_button_selection_scenario() {
    let doc = Document::from_source(
        r#"{"moduleElements":[{"id":"btn1","Component":"Button","props":{"position":{"x":10,"y":20,"width":80,"height":30}}}]}"#,
    )
    .unwrap();
    let mut session = EditSession::with_document(doc, SessionOptions::default());

    let shapes = session.canvas().shapes();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].label, "btn1 (Button)");
    assert_eq!(
        shapes[0].rect,
        Rect {
            x: 10.0,
            y: 20.0,
            width: 80.0,
            height: 30.0
        }
    );

    let selection = session.select(SelectEvent::CanvasShape(0)).unwrap();
    let selected = session.document().resolve(&selection.node).unwrap();
    assert!(std::ptr::eq(
        selected,
        &session.document().root()["moduleElements"][0]
    ));
}

#[test]
fn test_default_stacking_scenario() {
    let doc = Document::from_source(r#"{"moduleElements":[{"id":"a"},{"id":"b"}]}"#).unwrap();
    let session = EditSession::with_document(doc, SessionOptions::default());

    let rects: Vec<_> = session.canvas().shapes().iter().map(|s| s.rect).collect();
    assert_eq!((rects[0].x, rects[0].y), (50.0, 50.0));
    assert_eq!((rects[1].x, rects[1].y), (70.0, 70.0));
    assert!(rects
        .iter()
        .all(|r| r.width == 150.0 && r.height == 100.0));
}

#[test]
fn test_malformed_raw_save_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("screen.json");
    fs::write(&path, SCREEN).unwrap();

    let mut session = EditSession::new(SessionOptions::default());
    session.open(&path).unwrap();
    session.set_active_surface(Surface::RawJson).unwrap();
    session.edit_raw("{\"id\": \"checkout\", ");

    let result = session.save();

    assert!(matches!(result, Err(EditorError::Parse(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), SCREEN);
    assert_eq!(session.document().id(), Some("checkout"));
    assert!(session.is_modified());
}

#[test]
fn test_failed_load_keeps_previous_document() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.json");
    let bad = dir.path().join("bad.json");
    fs::write(&good, SCREEN).unwrap();
    fs::write(&bad, "{ not json").unwrap();

    let mut session = EditSession::new(SessionOptions::default());
    session.open(&good).unwrap();

    assert!(matches!(session.open(&bad), Err(EditorError::Parse(_))));
    assert!(matches!(
        session.open(dir.path().join("missing.json")),
        Err(EditorError::Io(_))
    ));

    assert_eq!(session.document().id(), Some("checkout"));
    assert_eq!(session.document().path.as_deref(), Some(good.as_path()));
    assert_eq!(session.canvas().shapes().len(), 3);
}
