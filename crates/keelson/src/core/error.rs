//! Core error types
//!
//! Parsing, generation and edge geometry never fail. Errors only arise at the
//! boundaries of the library: decoding graph JSON handed over by the editor,
//! strict name lookups, diagram type detection, logging setup and I/O.

use thiserror::Error;

/// Errors raised at the library boundaries
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Detection error: {message}")]
    DetectionError { message: String },

    #[error("Unknown diagram type: {diagram_type}")]
    UnknownDiagramType { diagram_type: String },

    #[error("Logging error: {message}")]
    LoggingError { message: String },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create an error for a name that does not belong to a closed vocabulary
    pub fn unknown_variant(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }

    /// Create a new detection error
    pub fn detection_error(message: impl Into<String>) -> Self {
        Self::DetectionError {
            message: message.into(),
        }
    }

    /// Create an error for a logging setup failure
    pub fn logging_error(message: impl Into<String>) -> Self {
        Self::LoggingError {
            message: message.into(),
        }
    }

    /// Create a new unknown diagram type error
    pub fn unknown_diagram_type(diagram_type: impl Into<String>) -> Self {
        Self::UnknownDiagramType {
            diagram_type: diagram_type.into(),
        }
    }
}
