//! # Field Paths
//!
//! Dotted addresses of leaf values inside a subtree (`props.position.x`).
//!
//! ## Semantics
//!
//! ### set
//! - Every segment but the last must name an existing object
//! - The last segment is inserted if absent, replaced otherwise
//! - No type coercion: the caller supplies the final value
//!
//! ### Position coordinates
//! - `props.position.{x,y,width,height}` creates `props` and
//!   `props.position` when they are missing, so an element that was never
//!   positioned can always be moved

use crate::errors::PathError;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Coordinates that get their parent objects created on demand
pub const POSITION_AXES: [&str; 4] = ["x", "y", "width", "height"];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted path
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }

        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(PathError::EmptySegment {
                path: path.to_string(),
            });
        }

        Ok(Self { segments })
    }

    /// Single-segment path. The key is taken verbatim, dots included.
    pub fn single(key: impl Into<String>) -> Self {
        Self {
            segments: vec![key.into()],
        }
    }

    /// Extend this path by one key
    pub fn join(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Final segment (the key that gets assigned)
    pub fn leaf(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// `props.position.<axis>`
    pub fn is_position_coordinate(&self) -> bool {
        matches!(
            self.segments.as_slice(),
            [props, position, axis]
                if props == "props"
                    && position == "position"
                    && POSITION_AXES.contains(&axis.as_str())
        )
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Assign `value` at the dotted `path` below `root`
pub fn set(root: &mut Value, path: &str, value: Value) -> Result<(), PathError> {
    set_path(root, &FieldPath::parse(path)?, value)
}

/// Assign `value` at `path` below `root`
pub fn set_path(root: &mut Value, path: &FieldPath, value: Value) -> Result<(), PathError> {
    let create_parents = path.is_position_coordinate();
    let Some((leaf, parents)) = path.segments.split_last() else {
        return Err(PathError::Empty);
    };

    let mut current = root.as_object_mut().ok_or_else(|| PathError::RootNotObject {
        path: path.to_string(),
    })?;

    for segment in parents {
        if create_parents && !current.contains_key(segment) {
            current.insert(segment.clone(), Value::Object(Map::new()));
        }

        current = match current.get_mut(segment) {
            Some(Value::Object(child)) => child,
            Some(_) => {
                return Err(PathError::NotAnObject {
                    path: path.to_string(),
                    segment: segment.clone(),
                })
            }
            None => {
                return Err(PathError::MissingSegment {
                    path: path.to_string(),
                    segment: segment.clone(),
                })
            }
        };
    }

    tracing::debug!(path = %path, "field set");
    current.insert(leaf.clone(), value);
    Ok(())
}

/// Read the value at the dotted `path` below `root`
pub fn get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let path = FieldPath::parse(path).ok()?;
    get_path(root, &path)
}

pub fn get_path<'a>(root: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    path.segments
        .iter()
        .try_fold(root, |current, segment| current.as_object()?.get(segment))
}
