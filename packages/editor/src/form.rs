//! # Property Form
//!
//! Flat, editable view of one selected subtree.
//!
//! Every key of the subtree becomes a row. Objects become section headers
//! followed by their own rows (up to a depth limit); every other value
//! becomes a field whose widget depends on the value's kind:
//!
//! | kind    | widget                                         |
//! |---------|------------------------------------------------|
//! | array   | list editor holding pretty JSON                |
//! | boolean | two-state choice (`true` / `false`)            |
//! | number  | numeric input bounded to [-999999, 999999]     |
//! | string  | free text                                      |
//! | null    | free text                                      |
//!
//! Each field knows the dotted path from the selected subtree to its value,
//! so an edit can be handed straight to the field-path resolver.

use crate::field_path::FieldPath;
use serde_json::{Map, Number, Value};

/// Deepest nesting level that still gets rows
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Lower bound of the numeric input
pub const NUMBER_MIN: i64 = -999_999;

/// Upper bound of the numeric input
pub const NUMBER_MAX: i64 = 999_999;

/// JSON value kinds, one editing strategy each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Object,
    Array,
    Bool,
    Number,
    String,
    Null,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Null => ValueKind::Null,
        }
    }
}

/// Whether a numeric field holds whole numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Integer,
    Float,
}

/// Editing surface for one field
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    /// Structured-list editor showing the array as pretty JSON
    List { text: String },

    /// Two-state choice
    Toggle { value: bool },

    /// Bounded numeric input
    Number { value: f64, kind: NumberKind },

    /// Free text (strings, and nulls shown as empty text)
    Text { value: String },
}

impl Widget {
    /// Widget for a non-object value
    pub fn for_value(value: &Value) -> Option<Self> {
        let widget = match value {
            Value::Object(_) => return None,
            Value::Array(_) => Widget::List {
                text: serde_json::to_string_pretty(value).unwrap_or_default(),
            },
            Value::Bool(b) => Widget::Toggle { value: *b },
            Value::Number(n) => Widget::Number {
                value: clamp(n.as_f64().unwrap_or_default()),
                kind: if n.is_f64() {
                    NumberKind::Float
                } else {
                    NumberKind::Integer
                },
            },
            Value::String(s) => Widget::Text { value: s.clone() },
            Value::Null => Widget::Text {
                value: String::new(),
            },
        };
        Some(widget)
    }

    /// Text currently shown by the widget
    pub fn display(&self) -> String {
        match self {
            Widget::List { text } => text.clone(),
            Widget::Toggle { value } => value.to_string(),
            Widget::Number {
                value,
                kind: NumberKind::Integer,
            } => format!("{}", *value as i64),
            Widget::Number { value, .. } => value.to_string(),
            Widget::Text { value } => value.clone(),
        }
    }

    /// Convert user input into the value to store.
    ///
    /// `None` means the input is dropped and the document keeps its prior
    /// value (unparseable list text, unknown toggle text, non-numeric text).
    pub fn parse_input(&self, input: &str) -> Option<Value> {
        match self {
            Widget::List { .. } => serde_json::from_str::<Value>(input).ok(),
            Widget::Toggle { .. } => match input.trim() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            Widget::Number { kind, .. } => {
                let parsed: f64 = input.trim().parse().ok()?;
                number_value(parsed, *kind)
            }
            Widget::Text { .. } => Some(Value::String(input.to_string())),
        }
    }
}

/// Clamp to the numeric input's range, then store as the field's kind.
///
/// Integer fields truncate toward zero; float fields keep their fraction.
pub fn number_value(input: f64, kind: NumberKind) -> Option<Value> {
    if input.is_nan() {
        return None;
    }

    let clamped = clamp(input);
    match kind {
        NumberKind::Integer => Some(Value::from(clamped.trunc() as i64)),
        NumberKind::Float => Number::from_f64(clamped).map(Value::Number),
    }
}

fn clamp(value: f64) -> f64 {
    value.clamp(NUMBER_MIN as f64, NUMBER_MAX as f64)
}

/// Editable field bound to a path below the selected subtree
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub key: String,
    pub path: FieldPath,
    pub depth: usize,
    pub kind: ValueKind,
    pub widget: Widget,
}

/// One line of the form
#[derive(Debug, Clone, PartialEq)]
pub enum FormRow {
    /// Header introducing a nested object's fields
    Section {
        key: String,
        path: FieldPath,
        depth: usize,
    },
    Field(FormField),
}

impl FormRow {
    /// Text label as shown next to the widget
    pub fn label(&self) -> String {
        match self {
            FormRow::Section { key, .. } => format!("── {key} ──"),
            FormRow::Field(field) => format!("{}:", field.key),
        }
    }
}

/// Rows generated for the current selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyForm {
    rows: Vec<FormRow>,
}

impl PropertyForm {
    /// Form with no rows (nothing selected)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Generate rows for `subtree`.
    ///
    /// With `only_key`, the top level is restricted to that single key.
    /// Non-object subtrees produce an empty form.
    pub fn build(subtree: &Value, only_key: Option<&str>, max_depth: usize) -> Self {
        let mut rows = Vec::new();
        if let Value::Object(map) = subtree {
            collect_rows(&mut rows, map, None, 0, max_depth, only_key);
        }

        tracing::debug!(rows = rows.len(), "property form built");
        Self { rows }
    }

    pub fn rows(&self) -> &[FormRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.rows.iter().filter_map(|row| match row {
            FormRow::Field(field) => Some(field),
            FormRow::Section { .. } => None,
        })
    }

    /// Field bound to the dotted `path`
    pub fn field(&self, path: &str) -> Option<&FormField> {
        self.fields().find(|field| field.path.to_string() == path)
    }
}

fn collect_rows(
    rows: &mut Vec<FormRow>,
    map: &Map<String, Value>,
    prefix: Option<&FieldPath>,
    depth: usize,
    max_depth: usize,
    only_key: Option<&str>,
) {
    if depth > max_depth {
        return;
    }

    for (key, value) in map {
        if only_key.is_some_and(|only| only != key.as_str()) {
            continue;
        }

        let path = match prefix {
            Some(prefix) => prefix.join(key.as_str()),
            None => FieldPath::single(key.as_str()),
        };

        match value {
            Value::Object(child) => {
                rows.push(FormRow::Section {
                    key: key.clone(),
                    path: path.clone(),
                    depth,
                });
                collect_rows(rows, child, Some(&path), depth + 1, max_depth, None);
            }
            other => {
                if let Some(widget) = Widget::for_value(other) {
                    rows.push(FormRow::Field(FormField {
                        key: key.clone(),
                        path,
                        depth,
                        kind: ValueKind::of(other),
                        widget,
                    }));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn button() -> Value {
        json!({
            "id": "btn1",
            "visible": true,
            "props": {
                "position": {"x": 10, "y": 20.5},
                "tags": ["a", "b"]
            },
            "note": null
        })
    }

    #[test]
    fn test_rows_follow_key_order() {
        let form = PropertyForm::build(&button(), None, DEFAULT_MAX_DEPTH);
        let labels: Vec<_> = form.rows().iter().map(FormRow::label).collect();

        assert_eq!(
            labels,
            vec![
                "id:",
                "visible:",
                "── props ──",
                "── position ──",
                "x:",
                "y:",
                "tags:",
                "note:"
            ]
        );
    }

    #[test]
    fn test_widget_kinds() {
        let form = PropertyForm::build(&button(), None, DEFAULT_MAX_DEPTH);

        assert_eq!(form.field("visible").unwrap().widget, Widget::Toggle { value: true });
        assert_eq!(
            form.field("props.position.x").unwrap().widget,
            Widget::Number {
                value: 10.0,
                kind: NumberKind::Integer
            }
        );
        assert_eq!(
            form.field("props.position.y").unwrap().widget,
            Widget::Number {
                value: 20.5,
                kind: NumberKind::Float
            }
        );
        assert_eq!(
            form.field("props.tags").unwrap().widget,
            Widget::List {
                text: "[\n  \"a\",\n  \"b\"\n]".to_string()
            }
        );
        assert_eq!(form.field("note").unwrap().kind, ValueKind::Null);
    }

    #[test]
    fn test_depth_limit() {
        let deep = json!({"l0": {"l1": {"l2": {"l3": {"l4": {"leaf": 1}}, "at3": 1}}}});
        let form = PropertyForm::build(&deep, None, DEFAULT_MAX_DEPTH);

        assert!(form.field("l0.l1.l2.at3").is_some());
        assert!(form.field("l0.l1.l2.l3.l4.leaf").is_none());
        assert!(form.rows().iter().any(|row| row.label() == "── l3 ──"));
        assert!(!form.rows().iter().any(|row| row.label() == "── l4 ──"));
    }

    #[test]
    fn test_only_key_filter() {
        let form = PropertyForm::build(&button(), Some("visible"), DEFAULT_MAX_DEPTH);
        assert_eq!(form.rows().len(), 1);
        assert!(form.field("visible").is_some());
    }

    #[test]
    fn test_non_object_subtree_gives_empty_form() {
        assert!(PropertyForm::build(&json!([1, 2]), None, DEFAULT_MAX_DEPTH).is_empty());
    }

    #[test]
    fn test_number_clamped_and_truncated() {
        let int = Widget::Number {
            value: 0.0,
            kind: NumberKind::Integer,
        };
        assert_eq!(int.parse_input("12.9"), Some(json!(12)));
        assert_eq!(int.parse_input("-12.9"), Some(json!(-12)));
        assert_eq!(int.parse_input("5000000"), Some(json!(999_999)));
        assert_eq!(int.parse_input("abc"), None);

        let float = Widget::Number {
            value: 0.0,
            kind: NumberKind::Float,
        };
        assert_eq!(float.parse_input("1.25"), Some(json!(1.25)));
        assert_eq!(float.parse_input("-1e9"), Some(json!(-999_999.0)));
        assert_eq!(float.parse_input("NaN"), None);
    }

    #[test]
    fn test_list_input_is_lenient() {
        let list = Widget::List {
            text: "[]".to_string(),
        };
        assert_eq!(list.parse_input("[1, {\"a\": 2}]"), Some(json!([1, {"a": 2}])));
        assert_eq!(list.parse_input("[1, "), None);
    }

    #[test]
    fn test_toggle_and_text_input() {
        let toggle = Widget::Toggle { value: false };
        assert_eq!(toggle.parse_input("true"), Some(json!(true)));
        assert_eq!(toggle.parse_input("yes"), None);

        let text = Widget::Text {
            value: String::new(),
        };
        assert_eq!(text.parse_input("42"), Some(json!("42")));
    }
}
