//! # Structure Tree
//!
//! Collapsible outline of the whole document.
//!
//! ```text
//! home                         (document id, or "Root")
//! ├── theme                    object → expandable
//! │   └── color: red           scalar → leaf
//! ├── moduleElements (2 items) array of objects → expandable
//! │   ├── [0] btn1             one row per element
//! │   └── [1] Image
//! └── tags: ["a","b"]          any other array → leaf
//! ```
//!
//! Every row carries the selection it triggers when clicked.

use crate::document::{id_text, Document};
use crate::node_ref::NodeRef;
use crate::selection::Selection;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub label: String,

    /// Selection made when this row is picked (`None` for array headers)
    pub target: Option<Selection>,

    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(label: String, target: Option<Selection>) -> Self {
        Self {
            label,
            target,
            children: Vec::new(),
        }
    }

    /// Depth-first rows with their depth, root first
    pub fn flatten(&self) -> Vec<(usize, &TreeNode)> {
        let mut rows = Vec::new();
        self.flatten_into(0, &mut rows);
        rows
    }

    fn flatten_into<'a>(&'a self, depth: usize, rows: &mut Vec<(usize, &'a TreeNode)>) {
        rows.push((depth, self));
        for child in &self.children {
            child.flatten_into(depth + 1, rows);
        }
    }

    /// First row (depth-first) with exactly this label
    pub fn find(&self, label: &str) -> Option<&TreeNode> {
        self.flatten()
            .into_iter()
            .map(|(_, node)| node)
            .find(|node| node.label == label)
    }

    /// Indented plain-text rendering
    pub fn render(&self) -> String {
        self.flatten()
            .into_iter()
            .map(|(depth, node)| format!("{}{}\n", "  ".repeat(depth), node.label))
            .collect()
    }
}

/// Build the tree for the whole document
pub fn build(doc: &Document) -> TreeNode {
    let root = NodeRef::root();
    let mut children = Vec::new();
    add_children(&mut children, doc.root_object(), &root);

    tracing::debug!(rows = children.len(), "structure tree built");
    TreeNode {
        label: doc
            .root_object()
            .get("id")
            .and_then(id_text)
            .unwrap_or_else(|| "Root".to_string()),
        target: Some(Selection::node(root)),
        children,
    }
}

fn add_children(out: &mut Vec<TreeNode>, map: &Map<String, Value>, parent: &NodeRef) {
    for (key, value) in map {
        let node = parent.key(key.as_str());

        match value {
            Value::Object(child) => {
                let mut children = Vec::new();
                add_children(&mut children, child, &node);
                out.push(TreeNode {
                    label: key.clone(),
                    target: Some(Selection::node(node)),
                    children,
                });
            }
            Value::Array(items) if items.first().is_some_and(Value::is_object) => {
                let children = items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        let label = format!("[{}] {}", index, item_label(item));
                        let target = item
                            .is_object()
                            .then(|| Selection::node(node.index(index)));
                        TreeNode::leaf(label, target)
                    })
                    .collect();

                out.push(TreeNode {
                    label: format!("{} ({} items)", key, items.len()),
                    target: None,
                    children,
                });
            }
            other => out.push(TreeNode::leaf(
                format!("{}: {}", key, display_scalar(other)),
                Some(Selection::key(parent.clone(), key.as_str())),
            )),
        }
    }
}

/// `id`, then `Component`, then `"Item"`
fn item_label(item: &Value) -> String {
    item.get("id")
        .and_then(id_text)
        .or_else(|| {
            item.get("Component")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Item".to_string())
}

fn display_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
