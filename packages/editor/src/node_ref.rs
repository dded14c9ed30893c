//! # Node References
//!
//! Stable, non-owning addresses of subtrees inside a document.
//!
//! Views never hold borrows into the document. A canvas shape, a tree row or
//! the current selection keeps a `NodeRef` instead and resolves it against the
//! document when it needs the value. Resolution returns the value stored in
//! the document itself, so two views that resolve the same `NodeRef` see the
//! same object.
//!
//! The textual form is a JSON Pointer (`/moduleElements/0/props`).

use serde_json::Value;
use std::fmt;

/// One step from a container value to one of its children
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    Key(String),
    Index(usize),
}

/// Address of a subtree, as steps from the document root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodeRef {
    steps: Vec<Step>,
}

impl NodeRef {
    /// The document root
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Reference to `key` inside this object
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut steps = self.steps.clone();
        steps.push(Step::Key(key.into()));
        Self { steps }
    }

    /// Reference to element `index` inside this array
    pub fn index(&self, index: usize) -> Self {
        let mut steps = self.steps.clone();
        steps.push(Step::Index(index));
        Self { steps }
    }

    /// Parse a JSON Pointer. Numeric tokens become index steps.
    pub fn parse_pointer(pointer: &str) -> Option<Self> {
        if pointer.is_empty() {
            return Some(Self::root());
        }

        let rest = pointer.strip_prefix('/')?;
        let steps = rest
            .split('/')
            .map(|token| {
                let token = token.replace("~1", "/").replace("~0", "~");
                match token.parse::<usize>() {
                    Ok(index) => Step::Index(index),
                    Err(_) => Step::Key(token),
                }
            })
            .collect();

        Some(Self { steps })
    }

    /// Borrow the referenced value
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        root.pointer(&self.to_string())
    }

    /// Mutably borrow the referenced value
    pub fn resolve_mut<'a>(&self, root: &'a mut Value) -> Option<&'a mut Value> {
        root.pointer_mut(&self.to_string())
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            match step {
                Step::Key(key) => write!(f, "/{}", key.replace('~', "~0").replace('/', "~1"))?,
                Step::Index(index) => write!(f, "/{}", index)?,
            }
        }
        Ok(())
    }
}
