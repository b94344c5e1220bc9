//! Error types for reading and writing logs and reports.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterchangeError {
    /// Malformed XML, or XML the writer could not produce.
    #[error("XML error: {0}")]
    Xml(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InterchangeError {
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }
}
