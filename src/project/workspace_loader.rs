use std::path::{Path, PathBuf};

use super::file_loader;
use super::workspace::Workspace;

/// Errors raised while loading files into a workspace.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Directory not found: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load {} file(s):\n  {}", .0.len(), .0.join("\n  "))]
    Files(Vec<String>),
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Loads source files from disk into a [`Workspace`]
#[derive(Debug, Default)]
pub struct WorkspaceLoader;

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Loads all `.cs` files under a directory. Returns the number loaded.
    ///
    /// Every readable file is loaded even when others fail; the failures are
    /// reported together afterwards.
    pub fn load_directory(&self, path: impl AsRef<Path>, ws: &mut Workspace) -> Result<usize, LoadError> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(LoadError::NotADirectory(path.to_path_buf()));
        }
        let paths = file_loader::collect_file_paths(path).map_err(|e| LoadError::io(path, e))?;
        let mut errors = Vec::new();
        let mut loaded = 0;

        for path in paths {
            match self.load_file(&path, ws) {
                Ok(()) => loaded += 1,
                Err(e) => errors.push(e.to_string()),
            }
        }

        tracing::debug!(loaded, failed = errors.len(), dir = %path.display(), "loaded workspace");
        if errors.is_empty() {
            Ok(loaded)
        } else {
            Err(LoadError::Files(errors))
        }
    }

    /// Loads a single file, keyed by its path as given.
    pub fn load_file(&self, path: impl AsRef<Path>, ws: &mut Workspace) -> Result<(), LoadError> {
        let path = path.as_ref();
        let (text, bom) = file_loader::read_source(path).map_err(|e| LoadError::io(path, e))?;
        ws.insert_with_bom(path.to_string_lossy().into_owned(), text, bom);
        Ok(())
    }
}
