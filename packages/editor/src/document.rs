//! # Document Handle
//!
//! Core document abstraction for the layout editor.
//!
//! A Document owns one JSON tree describing a mobile screen. The root is
//! always an object; elements meant for the canvas live in the
//! `moduleElements` and `enhancedData` arrays. Unknown keys are kept
//! verbatim and in their original order.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Parse → Edit → Serialize → Save
//!   ↓      ↓       ↓        ↓         ↓
//! File   Value  FieldPath  Text     File
//! ```

use crate::errors::{EditorError, ParseError};
use crate::field_path::{self, FieldPath};
use crate::node_ref::NodeRef;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Collection of elements placed on the canvas first
pub const MODULE_ELEMENTS: &str = "moduleElements";

/// Collection of elements placed on the canvas after `moduleElements`
pub const ENHANCED_DATA: &str = "enhancedData";

/// Element collections in canvas order
pub const ELEMENT_COLLECTIONS: [&str; 2] = [MODULE_ELEMENTS, ENHANCED_DATA];

/// Editable layout document
#[derive(Debug, Clone)]
pub struct Document {
    /// Path to source file (if any)
    pub path: Option<PathBuf>,

    /// Current version number (increments on each mutation)
    pub version: u64,

    root: Value,
    dirty: bool,
}

/// An object found in one of the element collections
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    /// Position in the combined `moduleElements` + `enhancedData` sequence
    pub index: usize,

    /// Collection the element was found in
    pub collection: &'static str,

    pub object: &'a Map<String, Value>,
}

impl Element<'_> {
    pub fn id(&self) -> Option<String> {
        self.object.get("id").and_then(id_text)
    }

    /// `Component`, falling back to `type`
    pub fn component(&self) -> Option<&str> {
        self.object
            .get("Component")
            .and_then(Value::as_str)
            .or_else(|| self.object.get("type").and_then(Value::as_str))
    }
}

/// Element plus the reference needed to find it again
#[derive(Debug, Clone)]
pub struct ElementRef<'a> {
    pub node: NodeRef,
    pub element: Element<'a>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty, memory-only document
    pub fn new() -> Self {
        Self {
            path: None,
            version: 0,
            root: Value::Object(Map::new()),
            dirty: false,
        }
    }

    /// Create document from source text (memory-backed)
    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        Self::load(source.as_bytes())
    }

    /// Parse JSON bytes into a document
    pub fn load(bytes: &[u8]) -> Result<Self, ParseError> {
        Ok(Self {
            path: None,
            version: 0,
            root: parse_root(bytes)?,
            dirty: false,
        })
    }

    /// Load document from file (file-backed)
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, EditorError> {
        let path = path.into();
        let bytes = std::fs::read(&path)?;
        let mut doc = Self::load(&bytes)?;
        doc.path = Some(path);

        tracing::info!(path = %doc.path_display(), elements = doc.elements().len(), "document loaded");
        Ok(doc)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Root object
    pub fn root_object(&self) -> &Map<String, Value> {
        match &self.root {
            Value::Object(map) => map,
            _ => unreachable!("document root is always an object"),
        }
    }

    /// Top-level `id`, when it is a string
    pub fn id(&self) -> Option<&str> {
        self.root_object().get("id").and_then(Value::as_str)
    }

    /// Pretty JSON with 2-space indentation; non-ASCII is written literally
    pub fn serialize(&self) -> Result<Vec<u8>, EditorError> {
        Ok(serde_json::to_vec_pretty(&self.root)?)
    }

    pub fn to_pretty_string(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    /// `moduleElements` followed by `enhancedData`
    pub fn elements(&self) -> Vec<ElementRef<'_>> {
        let root = self.root_object();
        let mut elements = Vec::new();

        for collection in ELEMENT_COLLECTIONS {
            let Some(Value::Array(items)) = root.get(collection) else {
                continue;
            };

            for (position, item) in items.iter().enumerate() {
                if let Value::Object(object) = item {
                    let element = Element {
                        index: elements.len(),
                        collection,
                        object,
                    };
                    elements.push(ElementRef {
                        node: NodeRef::root().key(collection).index(position),
                        element,
                    });
                }
            }
        }

        elements
    }

    /// Ids shown in the module-elements list (`"Unknown"` when missing)
    pub fn module_element_ids(&self) -> Vec<String> {
        match self.root_object().get(MODULE_ELEMENTS) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_object)
                .map(|elem| {
                    elem.get("id")
                        .and_then(id_text)
                        .unwrap_or_else(|| "Unknown".to_string())
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// First `moduleElements` entry whose `id` matches
    pub fn find_module_element(&self, id: &str) -> Option<NodeRef> {
        let Some(Value::Array(items)) = self.root_object().get(MODULE_ELEMENTS) else {
            return None;
        };

        items
            .iter()
            .position(|item| item.get("id").and_then(id_text).as_deref() == Some(id))
            .map(|position| NodeRef::root().key(MODULE_ELEMENTS).index(position))
    }

    /// Borrow a subtree
    pub fn resolve(&self, node: &NodeRef) -> Option<&Value> {
        node.resolve(&self.root)
    }

    /// Assign `value` at `path` below the subtree `node`
    pub fn set_field(
        &mut self,
        node: &NodeRef,
        path: &FieldPath,
        value: Value,
    ) -> Result<u64, EditorError> {
        let target = node
            .resolve_mut(&mut self.root)
            .ok_or_else(|| EditorError::NodeNotFound(node.to_string()))?;

        field_path::set_path(target, path, value)?;

        self.version += 1;
        self.dirty = true;
        Ok(self.version)
    }

    /// Replace the whole tree (raw-text edits)
    pub fn replace_root(&mut self, root: Value) -> Result<u64, ParseError> {
        if !root.is_object() {
            return Err(ParseError::NotAnObject {
                found: type_name(&root).to_string(),
            });
        }

        self.root = root;
        self.version += 1;
        self.dirty = true;
        Ok(self.version)
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flag unsaved changes made outside the tree (pending raw text)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Save document to its current path
    pub fn save(&mut self) -> Result<(), EditorError> {
        let path = self.path.clone().ok_or(EditorError::NoFilePath)?;
        self.write_to(&path)
    }

    /// Point the document at a new path, then save
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<(), EditorError> {
        let path = path.into();
        self.path = Some(path.clone());
        self.write_to(&path)
    }

    fn write_to(&mut self, path: &Path) -> Result<(), EditorError> {
        let bytes = self.serialize()?;
        std::fs::write(path, bytes)?;
        self.dirty = false;

        tracing::info!(path = %path.display(), version = self.version, "document saved");
        Ok(())
    }

    fn path_display(&self) -> String {
        self.path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    }
}

/// Text shown for an `id` value: strings verbatim, numbers as written
pub fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse text whose top-level value must be an object
pub fn parse_root(bytes: &[u8]) -> Result<Value, ParseError> {
    let value: Value = serde_json::from_slice(bytes)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(ParseError::NotAnObject {
            found: type_name(&value).to_string(),
        })
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
