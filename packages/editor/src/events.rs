//! # Editor Events
//!
//! Synchronous notifications emitted by an edit session.
//!
//! Listeners run on the caller's stack, after the session has refreshed
//! every dependent view, so a listener always observes a consistent state.

use crate::selection::Selection;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// A new document replaced the previous one
    Loaded { path: Option<PathBuf> },

    /// The property form now shows this selection
    Selected(Selection),

    /// The document (or pending raw text) changed
    Modified { version: u64 },

    /// The document was written to disk
    Saved { path: PathBuf },
}

/// Receiver of editor events
pub trait EditorListener {
    fn on_event(&mut self, event: &EditorEvent);
}

impl<F> EditorListener for F
where
    F: FnMut(&EditorEvent),
{
    fn on_event(&mut self, event: &EditorEvent) {
        self(event)
    }
}

/// Registered listeners, notified in registration order
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Box<dyn EditorListener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn EditorListener>) {
        self.listeners.push(listener);
    }

    pub fn emit(&mut self, event: EditorEvent) {
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
