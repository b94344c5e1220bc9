/// Identifier of a file inside a workspace.
///
/// Ids are dense indices handed out in insertion order, so they can be used
/// to index per-file vectors directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u32);

impl FileId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for FileId {
    fn from(index: usize) -> Self {
        Self(index as u32)
    }
}
