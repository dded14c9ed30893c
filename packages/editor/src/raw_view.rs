//! # Raw JSON View
//!
//! Full-text view of the document.
//!
//! The text is regenerated from the document whenever the document changes
//! elsewhere. Once the user types into it, the text is "pending": it is only
//! parsed back at save time or when the user leaves the raw view.

use crate::document::{parse_root, Document};
use crate::errors::{EditorError, ParseError};
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct RawView {
    text: String,
    pending: bool,
}

impl RawView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regenerate the text from the document, discarding pending edits
    pub fn refresh(&mut self, doc: &Document) -> Result<(), EditorError> {
        if self.pending {
            tracing::warn!("discarding unsynced raw JSON edits");
        }
        self.text = doc.to_pretty_string()?;
        self.pending = false;
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text with user input
    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.pending = true;
    }

    /// Whether the text holds edits not yet parsed into the document
    pub fn has_pending_edits(&self) -> bool {
        self.pending
    }

    /// Parse the current text as a document root
    pub fn parse(&self) -> Result<Value, ParseError> {
        parse_root(self.text.as_bytes())
    }
}
