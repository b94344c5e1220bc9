//! Restricts repair to a chosen set of files.

/// A `;`-separated list of paths; an empty filter admits every file.
///
/// Paths compare case-insensitively with `\` and `/` treated alike. An entry
/// also admits any path that ends with it on a component boundary, so
/// relative entries match absolute workspace paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileFilter {
    entries: Vec<String>,
}

impl FileFilter {
    /// Admit every file.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn parse(list: &str) -> Self {
        let entries = list
            .split(';')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(normalize)
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn admits(&self, path: &str) -> bool {
        if self.entries.is_empty() {
            return true;
        }
        let path = normalize(path);
        self.entries.iter().any(|entry| {
            path == *entry
                || path
                    .strip_suffix(entry.as_str())
                    .is_some_and(|head| head.ends_with('/'))
        })
    }
}

impl std::str::FromStr for FileFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/").to_lowercase()
}
