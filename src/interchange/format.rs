//! Common trait for interchange formats.

use std::path::Path;

use super::InterchangeError;

/// A file format one kind of document is exchanged in.
///
/// The pipeline persists its diagnostics and its report through
/// implementations of this trait, so both go through the same file
/// handling and error mapping.
pub trait DocumentFormat: Send + Sync {
    /// What the format carries.
    type Document;

    /// Human-readable name of the format.
    fn name(&self) -> &'static str;

    /// File extension(s) for this format.
    fn extensions(&self) -> &'static [&'static str];

    /// Read a document from bytes.
    fn read(&self, input: &[u8]) -> Result<Self::Document, InterchangeError>;

    /// Write a document to bytes.
    fn write(&self, document: &Self::Document) -> Result<Vec<u8>, InterchangeError>;

    fn read_file(&self, path: &Path) -> Result<Self::Document, InterchangeError> {
        let bytes = std::fs::read(path)?;
        self.read(&bytes)
    }

    fn write_file(&self, path: &Path, document: &Self::Document) -> Result<(), InterchangeError> {
        let bytes = self.write(document)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
