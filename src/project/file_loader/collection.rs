use std::path::{Path, PathBuf};

/// Extension of the source files the workspace loads.
pub const SOURCE_EXTENSION: &str = "cs";

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &["bin", "obj", ".git", ".vs"];

/// Check whether a path has the `.cs` extension (case-insensitive).
pub fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(SOURCE_EXTENSION))
}

/// Recursively collects all source file paths under `dir`, sorted.
///
/// Build output directories (`bin`, `obj`) and tool directories are skipped.
pub fn collect_file_paths(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    collect_recursive(dir, &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn collect_recursive(dir: &Path, paths: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            let skipped = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| SKIPPED_DIRS.iter().any(|s| s.eq_ignore_ascii_case(n)));
            if !skipped {
                collect_recursive(&path, paths)?;
            }
        } else if path.is_file() && has_source_extension(&path) {
            paths.push(path);
        }
    }
    Ok(())
}

/// Read a source file, splitting off a UTF-8 byte order mark.
///
/// Returns the text and whether a mark was present, so writing the file
/// back can restore it.
pub fn read_source(path: &Path) -> std::io::Result<(String, bool)> {
    let text = std::fs::read_to_string(path)?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => (stripped.to_string(), true),
        None => (text, false),
    })
}
