//! # Selection Routing
//!
//! Turns a pick in any view into the subtree shown by the property form.
//!
//! Three sources can select:
//! - a tree row, which already carries its target
//! - an entry of the module-elements list, looked up by id (first match)
//! - a canvas shape, which is bound to one element
//!
//! A selection is always a `NodeRef` into the document, never a copy of the
//! selected value. Each new selection replaces the previous one.

use crate::canvas::Canvas;
use crate::document::Document;
use crate::node_ref::NodeRef;
use serde_json::Value;

/// Subtree currently shown by the property form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Selected object
    pub node: NodeRef,

    /// Restrict the form to this key of `node` (tree leaves)
    pub key: Option<String>,
}

impl Selection {
    /// Whole object at `node`
    pub fn node(node: NodeRef) -> Self {
        Self { node, key: None }
    }

    /// One key of the object at `node`
    pub fn key(node: NodeRef, key: impl Into<String>) -> Self {
        Self {
            node,
            key: Some(key.into()),
        }
    }
}

/// A pick coming from one of the views
#[derive(Debug, Clone, PartialEq)]
pub enum SelectEvent {
    /// Tree row with its attached target
    TreeNode(Selection),

    /// Module-elements list entry (element id)
    ListEntry(String),

    /// Canvas shape index
    CanvasShape(usize),
}

/// Resolves picks and remembers the current selection
#[derive(Debug, Default)]
pub struct SelectionRouter {
    current: Option<Selection>,
}

impl SelectionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `event` against the document.
    ///
    /// On success the result becomes the current selection. Picks that
    /// resolve to nothing (unknown id, missing shape, stale reference or a
    /// non-object target) leave the current selection untouched.
    pub fn on_select(
        &mut self,
        doc: &Document,
        canvas: &Canvas,
        event: SelectEvent,
    ) -> Option<Selection> {
        let selection = match event {
            SelectEvent::TreeNode(selection) => selection,
            SelectEvent::ListEntry(id) => Selection::node(doc.find_module_element(&id)?),
            SelectEvent::CanvasShape(index) => Selection::node(canvas.shape(index)?.node.clone()),
        };

        match doc.resolve(&selection.node) {
            Some(Value::Object(_)) => {
                tracing::debug!(node = %selection.node, key = ?selection.key, "selection changed");
                self.current = Some(selection.clone());
                Some(selection)
            }
            _ => {
                tracing::warn!(node = %selection.node, "selection target is not an object");
                None
            }
        }
    }

    pub fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    /// Drop the selection if it no longer resolves to an object
    pub fn revalidate(&mut self, doc: &Document) {
        let stale = self
            .current
            .as_ref()
            .is_some_and(|s| !matches!(doc.resolve(&s.node), Some(Value::Object(_))));
        if stale {
            self.current = None;
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
