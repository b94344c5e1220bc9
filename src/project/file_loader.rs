mod collection;

// Re-export file collection (generic, no language dependencies)
pub use collection::{SOURCE_EXTENSION, collect_file_paths, has_source_extension, read_source};
