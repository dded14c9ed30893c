//! # Canvas Layout
//!
//! One draggable shape per element, in document order
//! (`moduleElements` first, then `enhancedData`).
//!
//! Shapes take their rectangle from `props.position`. Missing coordinates
//! fall back to a staircase so unpositioned elements stay visible:
//!
//! ```text
//! element i → x = y = 50 + 20·i, width 150, height 100
//! ```
//!
//! Dragging writes `props.position.x` / `.y` back into the element,
//! creating `props` and `props.position` on first move.

use crate::document::{Document, Element};
use crate::errors::EditorError;
use crate::field_path::FieldPath;
use crate::node_ref::NodeRef;
use serde_json::Value;

/// Logical width of a phone screen
pub const DEFAULT_CANVAS_WIDTH: f64 = 375.0;

/// Logical height of a phone screen
pub const DEFAULT_CANVAS_HEIGHT: f64 = 812.0;

pub const DEFAULT_SHAPE_WIDTH: f64 = 150.0;
pub const DEFAULT_SHAPE_HEIGHT: f64 = 100.0;

const STACK_ORIGIN: f64 = 50.0;
const STACK_STEP: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Element as drawn on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Element this shape is bound to
    pub node: NodeRef,
    pub label: String,
    pub rect: Rect,
}

#[derive(Debug, Clone)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    shapes: Vec<Shape>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    /// Rebuild every shape from the document
    pub fn layout(&mut self, doc: &Document) {
        self.shapes = doc
            .elements()
            .into_iter()
            .map(|element_ref| Shape {
                rect: element_rect(&element_ref.element),
                label: element_label(&element_ref.element),
                node: element_ref.node,
            })
            .collect();

        tracing::debug!(shapes = self.shapes.len(), "canvas laid out");
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    /// Topmost shape under the point (later shapes are drawn on top)
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.shapes.iter().rposition(|shape| shape.rect.contains(x, y))
    }

    /// Move shape `index` so its top-left corner sits at (`x`, `y`) and
    /// store the new position in its element
    pub fn drag_to(
        &mut self,
        doc: &mut Document,
        index: usize,
        x: f64,
        y: f64,
    ) -> Result<(), EditorError> {
        let shape = self
            .shapes
            .get_mut(index)
            .ok_or(EditorError::ShapeNotFound(index))?;
        if let Some(bad) = [x, y].into_iter().find(|v| !v.is_finite()) {
            return Err(EditorError::InvalidCoordinate(bad));
        }

        let base = FieldPath::single("props").join("position");
        doc.set_field(&shape.node, &base.join("x"), coordinate(x))?;
        doc.set_field(&shape.node, &base.join("y"), coordinate(y))?;

        shape.rect.x = x;
        shape.rect.y = y;

        tracing::debug!(node = %shape.node, x, y, "shape moved");
        Ok(())
    }
}

/// Rectangle from `props.position`, each coordinate defaulted on its own
pub fn element_rect(element: &Element<'_>) -> Rect {
    let position = element
        .object
        .get("props")
        .and_then(|props| props.get("position"));
    let read = |axis: &str, default: f64| {
        position
            .and_then(|p| p.get(axis))
            .and_then(Value::as_f64)
            .unwrap_or(default)
    };

    let stacked = STACK_ORIGIN + STACK_STEP * element.index as f64;
    Rect {
        x: read("x", stacked),
        y: read("y", stacked),
        width: read("width", DEFAULT_SHAPE_WIDTH),
        height: read("height", DEFAULT_SHAPE_HEIGHT),
    }
}

/// `"<id> (<type>)"`
pub fn element_label(element: &Element<'_>) -> String {
    format!(
        "{} ({})",
        element.id().as_deref().unwrap_or("Unknown"),
        element.component().unwrap_or("Widget")
    )
}

/// Whole coordinates are stored as integers
fn coordinate(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}
