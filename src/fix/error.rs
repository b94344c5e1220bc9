//! Error types for repair operations.

use thiserror::Error;

use crate::parser::SyntaxError;

/// Errors that can occur while repairing documentation.
///
/// Repair errors never abort a run: the pipeline records them against the
/// file they occurred in and moves on.
#[derive(Debug, Error)]
pub enum FixError {
    /// A documentation block could not be patched without risking the file.
    #[error("Malformed documentation block on '{declaration}': {reason}")]
    MalformedBlock { declaration: String, reason: String },

    /// The file has syntax errors; repairing it could attach blocks to the
    /// wrong declaration.
    #[error("{count} syntax error(s) in {path}, first: {first}")]
    Parse {
        path: String,
        count: usize,
        first: String,
    },

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Diagnostic log or report could not be read or written.
    #[cfg(feature = "interchange")]
    #[error(transparent)]
    Interchange(#[from] crate::interchange::InterchangeError),
}

impl FixError {
    /// Create a malformed block error.
    pub fn malformed(declaration: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedBlock {
            declaration: declaration.into(),
            reason: reason.into(),
        }
    }

    /// Create a parse error from the errors of one file.
    pub fn parse(path: impl Into<String>, errors: &[SyntaxError]) -> Self {
        Self::Parse {
            path: path.into(),
            count: errors.len(),
            first: errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_default(),
        }
    }
}
