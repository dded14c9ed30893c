//! # Mobile UI Editor
//!
//! Document synchronization core for the mobile UI layout editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: JSON tree + node references       │
//! │  - Load/save, element collections           │
//! │  - Field paths (props.position.x)           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ views: derived from the document            │
//! │  - tree     structure outline               │
//! │  - form     property editor                 │
//! │  - canvas   positioned shapes               │
//! │  - raw      pretty JSON text                │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: selection routing + write→refresh  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Document is source of truth**: every view is derived and disposable
//! 2. **Single writer**: all mutations go through the field-path resolver
//! 3. **References, not copies**: views hold `NodeRef`s into the document
//! 4. **Synchronous refresh**: views are current before control returns
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mobile_ui_editor::{EditSession, SelectEvent, SessionOptions};
//!
//! let mut session = EditSession::new(SessionOptions::default());
//! session.open("screen.json")?;
//!
//! // Pick the first shape on the canvas and edit it
//! session.select(SelectEvent::CanvasShape(0));
//! session.edit_field("props.position.width", "200")?;
//!
//! // Drag it somewhere else
//! session.drag_shape(0, 40.0, 120.0)?;
//!
//! session.save()?;
//! ```

mod canvas;
mod document;
mod errors;
mod events;
pub mod field_path;
mod form;
mod node_ref;
mod raw_view;
mod selection;
mod session;
pub mod tree;

pub use canvas::{Canvas, Rect, Shape, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
pub use document::{Document, Element, ElementRef, ENHANCED_DATA, MODULE_ELEMENTS};
pub use errors::{EditorError, ParseError, PathError};
pub use events::{EditorEvent, EditorListener, EventBus};
pub use field_path::FieldPath;
pub use form::{
    FormField, FormRow, NumberKind, PropertyForm, ValueKind, Widget, DEFAULT_MAX_DEPTH,
    NUMBER_MAX, NUMBER_MIN,
};
pub use node_ref::{NodeRef, Step};
pub use raw_view::RawView;
pub use selection::{SelectEvent, Selection, SelectionRouter};
pub use session::{CloseChoice, EditOutcome, EditSession, SessionOptions, Surface};
pub use tree::TreeNode;

// Re-export the value type views are built from
pub use serde_json::Value;
