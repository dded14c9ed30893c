//! End-to-end editing sessions: select, edit, drag, save

use mobile_ui_editor::{
    CloseChoice, EditOutcome, EditSession, EditorError, EditorEvent, SelectEvent, Selection,
    SessionOptions, Surface,
};
use serde_json::json;
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use tempfile::TempDir;

const SCREEN: &str = r#"{
  "id": "profile",
  "moduleElements": [
    {"id": "avatar", "Component": "Image", "props": {"rounded": true, "size": 64}},
    {"id": "name", "Component": "Text", "props": {"text": "Ada", "lines": [1, 2]}}
  ],
  "enhancedData": [{"id": "footer", "type": "Banner"}],
  "theme": {"accent": "teal"}
}"#;

fn open_session(dir: &TempDir) -> (EditSession, std::path::PathBuf) {
    let path = dir.path().join("profile.json");
    fs::write(&path, SCREEN).unwrap();

    let mut session = EditSession::new(SessionOptions::default());
    session.open(&path).unwrap();
    (session, path)
}

fn record_events(session: &mut EditSession) -> Rc<RefCell<Vec<EditorEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    session.subscribe(move |event: &EditorEvent| sink.borrow_mut().push(event.clone()));
    events
}

#[test]
fn test_title_tracks_modified_state() {
    let dir = TempDir::new().unwrap();
    let (mut session, _) = open_session(&dir);

    assert_eq!(session.title(), "File: profile.json");
    assert!(session.status().starts_with("Loaded: "));

    session.select(SelectEvent::ListEntry("avatar".to_string()));
    session.edit_field("props.size", "96").unwrap();
    assert_eq!(session.title(), "File: profile.json *");

    session.save().unwrap();
    assert_eq!(session.title(), "File: profile.json");
    assert!(session.status().starts_with("Saved: "));
}

#[test]
fn test_moving_unpositioned_element() {
    let dir = TempDir::new().unwrap();
    let (mut session, path) = open_session(&dir);

    // footer is the third shape overall, stacked at 50 + 2 * 20
    assert_eq!(session.canvas().shapes()[2].rect.x, 90.0);
    assert_eq!(session.canvas().shapes()[2].label, "footer (Banner)");

    session.drag_shape(2, 12.0, 300.0).unwrap();
    session.save().unwrap();

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        saved["enhancedData"][0],
        json!({"id": "footer", "type": "Banner", "props": {"position": {"x": 12, "y": 300}}})
    );
    assert_eq!(session.canvas().shapes()[2].rect.y, 300.0);
}

#[test]
fn test_selection_replaces_form() {
    let dir = TempDir::new().unwrap();
    let (mut session, _) = open_session(&dir);

    session.select(SelectEvent::ListEntry("avatar".to_string()));
    assert!(session.form().field("props.rounded").is_some());

    let theme = session.tree().find("theme").unwrap().target.clone().unwrap();
    session.select(SelectEvent::TreeNode(theme));

    assert!(session.form().field("props.rounded").is_none());
    assert!(session.form().field("accent").is_some());
}

#[test]
fn test_tree_leaf_edit_writes_into_document() {
    let dir = TempDir::new().unwrap();
    let (mut session, _) = open_session(&dir);

    let leaf = session.tree().find("accent: teal").unwrap().target.clone().unwrap();
    session.select(SelectEvent::TreeNode(leaf));

    assert_eq!(session.form().rows().len(), 1);
    session.edit_field("accent", "coral").unwrap();
    assert_eq!(session.document().root()["theme"]["accent"], json!("coral"));
}

#[test]
fn test_list_field_round_trip() {
    let dir = TempDir::new().unwrap();
    let (mut session, _) = open_session(&dir);
    session.select(SelectEvent::CanvasShape(1));

    assert_eq!(
        session.form().field("props.lines").unwrap().widget.display(),
        "[\n  1,\n  2\n]"
    );

    let outcome = session.edit_field("props.lines", "[3, 4, 5]").unwrap();
    assert!(matches!(outcome, EditOutcome::Applied { .. }));
    assert_eq!(
        session.document().root()["moduleElements"][1]["props"]["lines"],
        json!([3, 4, 5])
    );

    assert_eq!(
        session.edit_field("props.lines", "[3, 4,").unwrap(),
        EditOutcome::Dropped
    );
    assert_eq!(
        session.document().root()["moduleElements"][1]["props"]["lines"],
        json!([3, 4, 5])
    );
}

#[test]
fn test_set_field_missing_intermediate_is_dropped_edit() {
    let dir = TempDir::new().unwrap();
    let (mut session, _) = open_session(&dir);
    session.select(SelectEvent::ListEntry("avatar".to_string()));

    let result = session.set_field("props.style.color", json!("red"));

    assert!(matches!(result, Err(EditorError::Path(_))));
    assert!(!session.is_modified());
}

#[test]
fn test_events_are_emitted_in_order() {
    let dir = TempDir::new().unwrap();
    let (mut session, path) = open_session(&dir);
    let events = record_events(&mut session);

    let selection = session
        .select(SelectEvent::ListEntry("name".to_string()))
        .unwrap();
    session.edit_field("props.text", "Grace").unwrap();
    session.save().unwrap();

    assert_eq!(
        *events.borrow(),
        vec![
            EditorEvent::Selected(selection),
            EditorEvent::Modified { version: 1 },
            EditorEvent::Saved { path },
        ]
    );
}

#[test]
fn test_raw_edit_then_save_commits() {
    let dir = TempDir::new().unwrap();
    let (mut session, path) = open_session(&dir);

    session.set_active_surface(Surface::RawJson).unwrap();
    session.edit_raw(r#"{"id": "profile-v2", "moduleElements": [{"id": "only"}]}"#);
    session.save().unwrap();

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["id"], json!("profile-v2"));
    assert_eq!(session.tree().label, "profile-v2");
    assert_eq!(session.canvas().shapes().len(), 1);
    assert_eq!(session.module_element_ids(), vec!["only".to_string()]);
}

#[test]
fn test_property_edit_after_raw_edit_wins() {
    let dir = TempDir::new().unwrap();
    let (mut session, path) = open_session(&dir);

    session.select(SelectEvent::ListEntry("avatar".to_string()));
    session.edit_raw("{ half typed");
    session.edit_field("props.size", "10").unwrap();
    session.save().unwrap();

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["moduleElements"][0]["props"]["size"], json!(10));
}

#[test]
fn test_stale_selection_cleared_after_raw_commit() {
    let dir = TempDir::new().unwrap();
    let (mut session, _) = open_session(&dir);
    session.select(SelectEvent::ListEntry("name".to_string()));

    session.set_active_surface(Surface::RawJson).unwrap();
    session.edit_raw(r#"{"moduleElements": [{"id": "avatar"}]}"#);
    session.set_active_surface(Surface::Properties).unwrap();

    assert_eq!(session.selection(), None::<&Selection>);
    assert!(session.form().is_empty());
}

#[test]
fn test_save_as_and_close() {
    let dir = TempDir::new().unwrap();
    let (mut session, original) = open_session(&dir);
    let copy = dir.path().join("copy.json");

    session.drag_shape(0, 5.0, 5.0).unwrap();
    let closed = session
        .request_close(|s| {
            assert!(s.is_modified());
            CloseChoice::Save
        })
        .unwrap();
    assert!(closed);

    session.drag_shape(0, 6.0, 6.0).unwrap();
    session.save_as(&copy).unwrap();

    assert_eq!(session.title(), "File: copy.json");
    let on_disk: serde_json::Value = serde_json::from_str(&fs::read_to_string(&original).unwrap()).unwrap();
    assert_eq!(on_disk["moduleElements"][0]["props"]["position"], json!({"x": 5, "y": 5}));
    let copied: serde_json::Value = serde_json::from_str(&fs::read_to_string(&copy).unwrap()).unwrap();
    assert_eq!(copied["moduleElements"][0]["props"]["position"], json!({"x": 6, "y": 6}));
}
