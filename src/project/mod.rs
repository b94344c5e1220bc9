//! Project management: the in-memory workspace and loading it from disk.

mod file_filter;
pub mod file_loader;
mod workspace;
pub mod workspace_loader;

pub use file_filter::FileFilter;
pub use workspace::{Workspace, WorkspaceFile};
pub use workspace_loader::{LoadError, WorkspaceLoader};
