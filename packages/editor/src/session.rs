//! # Edit Session Management
//!
//! An EditSession owns the document and every view derived from it, and is
//! the only place that mutates the document. Each operation follows the same
//! order: write through the document, refresh the views that depend on the
//! change, then notify listeners.
//!
//! | change              | refreshed immediately        | refreshed on save |
//! |---------------------|------------------------------|-------------------|
//! | property edit       | form, raw text               | tree, canvas      |
//! | element list edit   | form, raw, tree, canvas      |                   |
//! | canvas drag         | dragged shape, form, raw     | tree, canvas      |
//! | raw text edit       | (pending until save / leave) | everything        |
//! | load / raw commit   | everything                   |                   |

use crate::canvas::{Canvas, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use crate::document::{id_text, Document, ELEMENT_COLLECTIONS};
use crate::errors::EditorError;
use crate::events::{EditorEvent, EditorListener, EventBus};
use crate::field_path::FieldPath;
use crate::form::{PropertyForm, DEFAULT_MAX_DEPTH};
use crate::node_ref::NodeRef;
use crate::raw_view::RawView;
use crate::selection::{SelectEvent, Selection, SelectionRouter};
use crate::tree::{self, TreeNode};
use serde_json::Value;
use std::path::PathBuf;

/// Editable surfaces of the right-hand panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Properties,
    RawJson,
}

/// Answer to the unsaved-changes prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseChoice {
    Save,
    Discard,
    Cancel,
}

/// What happened to a property-form edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Written to the document
    Applied { version: u64 },

    /// Input could not be converted; the document is unchanged
    Dropped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub form_max_depth: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            form_max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Single-user editing session over one document
#[derive(Debug)]
pub struct EditSession {
    document: Document,
    tree: TreeNode,
    canvas: Canvas,
    form: PropertyForm,
    raw: RawView,
    router: SelectionRouter,
    active: Surface,
    last_edited: Surface,
    status: String,
    options: SessionOptions,
    events: EventBus,
}

impl EditSession {
    /// Session with no file loaded
    pub fn new(options: SessionOptions) -> Self {
        let document = Document::new();
        let mut session = Self {
            tree: tree::build(&document),
            canvas: Canvas::new(options.canvas_width, options.canvas_height),
            document,
            form: PropertyForm::empty(),
            raw: RawView::new(),
            router: SelectionRouter::new(),
            active: Surface::Properties,
            last_edited: Surface::Properties,
            status: "Ready".to_string(),
            options,
            events: EventBus::new(),
        };
        session.refresh_views();
        session
    }

    /// Session over an already loaded document
    pub fn with_document(document: Document, options: SessionOptions) -> Self {
        let mut session = Self::new(options);
        session.install(document);
        session
    }

    pub fn subscribe(&mut self, listener: impl EditorListener + 'static) {
        self.events.subscribe(Box::new(listener));
    }

    /// Load a file. On failure the current document stays as it was.
    pub fn open(&mut self, path: impl Into<PathBuf>) -> Result<(), EditorError> {
        let path = path.into();
        match Document::open(&path) {
            Ok(document) => {
                self.install(document);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load document");
                self.status = format!("Failed to load file: {e}");
                Err(e)
            }
        }
    }

    /// Load JSON bytes. On failure the current document stays as it was.
    pub fn load_bytes(&mut self, bytes: &[u8], path: Option<PathBuf>) -> Result<(), EditorError> {
        let mut document = Document::load(bytes)?;
        document.path = path;
        self.install(document);
        Ok(())
    }

    fn install(&mut self, document: Document) {
        self.document = document;
        self.router.clear();
        self.raw = RawView::new();
        self.form = PropertyForm::empty();
        self.active = Surface::Properties;
        self.last_edited = Surface::Properties;
        self.refresh_views();

        let path = self.document.path.clone();
        self.status = match &path {
            Some(path) => format!("Loaded: {}", path.display()),
            None => "Loaded".to_string(),
        };
        self.events.emit(EditorEvent::Loaded { path });
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn form(&self) -> &PropertyForm {
        &self.form
    }

    pub fn raw_text(&self) -> &str {
        self.raw.text()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.router.current()
    }

    /// Value the property form is bound to
    pub fn selected_value(&self) -> Option<&Value> {
        self.document.resolve(&self.router.current()?.node)
    }

    pub fn active_surface(&self) -> Surface {
        self.active
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Entries of the module-elements list
    pub fn module_element_ids(&self) -> Vec<String> {
        self.document.module_element_ids()
    }

    pub fn is_modified(&self) -> bool {
        self.document.is_dirty()
    }

    /// `No file loaded`, `File: <name>`, `File: <name> *`
    pub fn title(&self) -> String {
        let name = self
            .document
            .path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned());

        match name {
            None => "No file loaded".to_string(),
            Some(name) if self.is_modified() => format!("File: {name} *"),
            Some(name) => format!("File: {name}"),
        }
    }

    /// Route a pick to the property form
    pub fn select(&mut self, event: SelectEvent) -> Option<Selection> {
        let selection = self.router.on_select(&self.document, &self.canvas, event)?;
        self.rebuild_form();

        let label = self
            .selected_value()
            .and_then(|v| v.get("id"))
            .and_then(id_text)
            .unwrap_or_else(|| "Unknown".to_string());
        self.status = format!("Selected: {label}");
        self.events.emit(EditorEvent::Selected(selection.clone()));
        Some(selection)
    }

    /// Apply text typed into the form field bound to `path`
    pub fn edit_field(&mut self, path: &str, input: &str) -> Result<EditOutcome, EditorError> {
        let field = self
            .form
            .field(path)
            .ok_or_else(|| EditorError::FieldNotFound(path.to_string()))?;

        match field.widget.parse_input(input) {
            Some(value) => {
                let path = field.path.clone();
                self.write_selected(&path, value)
            }
            None => {
                tracing::warn!(path, input, "field input dropped");
                Ok(EditOutcome::Dropped)
            }
        }
    }

    /// Assign an already-typed value below the selection
    pub fn set_field(&mut self, path: &str, value: Value) -> Result<EditOutcome, EditorError> {
        let path: FieldPath = path.parse()?;
        self.write_selected(&path, value)
    }

    fn write_selected(
        &mut self,
        path: &FieldPath,
        value: Value,
    ) -> Result<EditOutcome, EditorError> {
        let selection = self.router.current().ok_or(EditorError::NoSelection)?.clone();
        let version = self.document.set_field(&selection.node, path, value)?;

        self.last_edited = Surface::Properties;
        if replaces_collection(&selection.node, path) {
            // shapes and tree rows address elements by index
            self.tree = tree::build(&self.document);
            self.canvas.layout(&self.document);
            self.router.revalidate(&self.document);
        }
        self.rebuild_form();
        self.raw.refresh(&self.document)?;
        self.events.emit(EditorEvent::Modified { version });
        Ok(EditOutcome::Applied { version })
    }

    /// Drag canvas shape `index` to (`x`, `y`)
    pub fn drag_shape(&mut self, index: usize, x: f64, y: f64) -> Result<(), EditorError> {
        self.canvas.drag_to(&mut self.document, index, x, y)?;

        self.last_edited = Surface::Properties;
        if self.router.current().is_some() {
            self.rebuild_form();
        }
        self.raw.refresh(&self.document)?;
        self.events.emit(EditorEvent::Modified {
            version: self.document.version,
        });
        Ok(())
    }

    /// Replace the raw JSON text with user input
    pub fn edit_raw(&mut self, text: impl Into<String>) {
        self.raw.edit(text);
        self.last_edited = Surface::RawJson;
        self.document.mark_dirty();
        self.events.emit(EditorEvent::Modified {
            version: self.document.version,
        });
    }

    /// Switch the right-hand panel. Leaving the raw view parses its pending
    /// text; on a parse error the panel stays on the raw view.
    pub fn set_active_surface(&mut self, surface: Surface) -> Result<(), EditorError> {
        if self.active == Surface::RawJson && surface != Surface::RawJson {
            self.commit_raw()?;
        }
        if surface == Surface::RawJson && !self.raw.has_pending_edits() {
            self.raw.refresh(&self.document)?;
        }
        self.active = surface;
        Ok(())
    }

    /// Parse pending raw text into the document and refresh every view
    pub fn commit_raw(&mut self) -> Result<(), EditorError> {
        if !self.raw.has_pending_edits() {
            return Ok(());
        }

        let root = self.raw.parse()?;
        let version = self.document.replace_root(root)?;
        self.last_edited = Surface::Properties;

        self.router.revalidate(&self.document);
        self.refresh_views();
        self.events.emit(EditorEvent::Modified { version });
        Ok(())
    }

    /// Write the document to its current path.
    ///
    /// Pending raw text is parsed first when it was edited last; a parse
    /// error aborts the save before the file is touched.
    pub fn save(&mut self) -> Result<(), EditorError> {
        let path = self.document.path.clone().ok_or(EditorError::NoFilePath)?;

        if self.last_edited == Surface::RawJson {
            if let Err(e) = self.commit_raw() {
                self.status = format!("Failed to save file: {e}");
                return Err(e);
            }
        }

        if let Err(e) = self.document.save() {
            tracing::warn!(path = %path.display(), error = %e, "failed to save document");
            self.status = format!("Failed to save file: {e}");
            return Err(e);
        }

        self.refresh_views();
        self.status = format!("Saved: {}", path.display());
        self.events.emit(EditorEvent::Saved { path });
        Ok(())
    }

    /// Point the session at a new file, then save
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<(), EditorError> {
        self.document.path = Some(path.into());
        self.save()
    }

    /// Ask whether the session may close.
    ///
    /// `prompt` is only consulted when there are unsaved changes. Returns
    /// `Ok(false)` when the user cancels; a failed save is returned as an
    /// error and the session stays open.
    pub fn request_close<F>(&mut self, prompt: F) -> Result<bool, EditorError>
    where
        F: FnOnce(&Self) -> CloseChoice,
    {
        if !self.is_modified() {
            return Ok(true);
        }

        match prompt(self) {
            CloseChoice::Save => {
                self.save()?;
                Ok(true)
            }
            CloseChoice::Discard => Ok(true),
            CloseChoice::Cancel => Ok(false),
        }
    }

    fn rebuild_form(&mut self) {
        self.form = match self.router.current() {
            Some(selection) => match self.document.resolve(&selection.node) {
                Some(value) => PropertyForm::build(
                    value,
                    selection.key.as_deref(),
                    self.options.form_max_depth,
                ),
                None => PropertyForm::empty(),
            },
            None => PropertyForm::empty(),
        };
    }

    fn refresh_views(&mut self) {
        self.tree = tree::build(&self.document);
        self.canvas.layout(&self.document);
        self.rebuild_form();
        if let Err(e) = self.raw.refresh(&self.document) {
            tracing::warn!(error = %e, "failed to render raw JSON");
        }
    }
}

/// Whether writing `path` below `node` swaps out a whole element collection
fn replaces_collection(node: &NodeRef, path: &FieldPath) -> bool {
    node.is_root() && path.segments().len() == 1 && ELEMENT_COLLECTIONS.contains(&path.leaf())
}
