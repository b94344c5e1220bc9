//! In-memory workspace of source files.
//!
//! Files are kept in insertion order; a file's [`FileId`] is its position in
//! that order and never changes while the workspace lives. Repairs replace a
//! file's text in memory and mark it changed; [`Workspace::write_back`]
//! persists changed files.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::base::FileId;

/// One source file held by the workspace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceFile {
    pub id: FileId,
    pub path: Arc<str>,
    pub text: Arc<str>,
    /// The file started with a UTF-8 byte order mark on disk.
    pub bom: bool,
    changed: bool,
}

impl WorkspaceFile {
    pub fn is_changed(&self) -> bool {
        self.changed
    }
}

#[derive(Clone, Debug, Default)]
pub struct Workspace {
    files: IndexMap<Arc<str>, WorkspaceFile>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, or replace the text of an existing one (keeping its id).
    pub fn insert(&mut self, path: impl Into<Arc<str>>, text: impl Into<Arc<str>>) -> FileId {
        self.insert_with_bom(path, text, false)
    }

    pub(crate) fn insert_with_bom(
        &mut self,
        path: impl Into<Arc<str>>,
        text: impl Into<Arc<str>>,
        bom: bool,
    ) -> FileId {
        let path = path.into();
        let text = text.into();
        let next_id = FileId::from(self.files.len());
        let entry = self
            .files
            .entry(path.clone())
            .or_insert_with(|| WorkspaceFile {
                id: next_id,
                path,
                text: Arc::from(""),
                bom,
                changed: false,
            });
        entry.text = text;
        entry.bom = bom;
        entry.id
    }

    pub fn get(&self, path: &str) -> Option<&WorkspaceFile> {
        self.files.get(path)
    }

    pub fn file(&self, id: FileId) -> Option<&WorkspaceFile> {
        self.files.get_index(id.index()).map(|(_, f)| f)
    }

    /// Replace a file's text; returns `true` if the text actually changed.
    pub fn set_text(&mut self, path: &str, text: impl Into<Arc<str>>) -> bool {
        let Some(file) = self.files.get_mut(path) else {
            return false;
        };
        let text = text.into();
        if file.text == text {
            return false;
        }
        file.text = text;
        file.changed = true;
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkspaceFile> {
        self.files.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Arc<str>> {
        self.files.keys()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn changed_files(&self) -> impl Iterator<Item = &WorkspaceFile> {
        self.files.values().filter(|f| f.changed)
    }

    /// Write every changed file back to its path and clear the changed flags.
    ///
    /// Returns the number of files written. Stops at the first I/O error;
    /// files written before it are marked clean.
    pub fn write_back(&mut self) -> std::io::Result<usize> {
        let mut written = 0;
        for file in self.files.values_mut().filter(|f| f.changed) {
            let mut contents = String::with_capacity(file.text.len() + 3);
            if file.bom {
                contents.push('\u{feff}');
            }
            contents.push_str(&file.text);
            std::fs::write(Path::new(&*file.path), contents)?;
            file.changed = false;
            written += 1;
        }
        Ok(written)
    }
}
