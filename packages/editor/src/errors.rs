//! Error types for the editor

use thiserror::Error;

/// Failure to turn JSON text into a document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Invalid JSON at line {line}, column {column}: {message}")]
    InvalidJson {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Top-level value must be an object, found {found}")]
    NotAnObject { found: String },
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError::InvalidJson {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        }
    }
}

/// Failure to resolve a dotted field path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("Field path is empty")]
    Empty,

    #[error("Field path '{path}' contains an empty segment")]
    EmptySegment { path: String },

    #[error("Field path '{path}' is applied to a value that is not an object")]
    RootNotObject { path: String },

    #[error("Missing segment '{segment}' in field path '{path}'")]
    MissingSegment { path: String, segment: String },

    #[error("Segment '{segment}' in field path '{path}' is not an object")]
    NotAnObject { path: String, segment: String },
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Path error: {0}")]
    Path(#[from] PathError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Document has no file path")]
    NoFilePath,

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Canvas shape not found: {0}")]
    ShapeNotFound(usize),

    #[error("Coordinate must be a finite number, got {0}")]
    InvalidCoordinate(f64),

    #[error("Field not found in property form: {0}")]
    FieldNotFound(String),

    #[error("Nothing is selected")]
    NoSelection,
}
