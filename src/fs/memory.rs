//! In-memory filesystem double backed by a set of known paths.

use fnv::FnvHashSet;

use super::FileSystem;

/// A virtual filesystem built from a flat list of known paths.
///
/// Paths are stored normalized (no trailing separators) and compared
/// case-insensitively. A stored path names an entry and implies every
/// directory on the way to it: enumerating `C:\Test` against a stored
/// `C:\Test\SubDir1\bin` yields the derived child `C:\Test\SubDir1`.
#[derive(Debug, Clone)]
pub struct MemoryFileSystem {
    /// Normalized paths in insertion order, original casing preserved.
    paths: Vec<String>,
    /// Lowercased copies for membership checks.
    lookup: FnvHashSet<String>,
    separator: char,
    current_directory: String,
}

impl MemoryFileSystem {
    pub fn new(current_directory: &str, paths: &[&str], separator: char) -> Self {
        let normalized = paths
            .iter()
            .map(|path| normalize(path, separator))
            .collect::<Vec<_>>();
        let lookup = normalized
            .iter()
            .map(|path| path.to_ascii_lowercase())
            .collect::<FnvHashSet<_>>();

        Self {
            paths: normalized,
            lookup,
            separator,
            current_directory: current_directory.to_string(),
        }
    }

    /// Truncates each stored path under `prefix` to its first component and
    /// deduplicates, preserving insertion order.
    fn immediate_children(&self, path: &str) -> Vec<String> {
        let prefix = format!("{}{}", normalize(path, self.separator), self.separator);
        let prefix_lower = prefix.to_ascii_lowercase();

        let mut seen = FnvHashSet::default();
        let mut children = Vec::new();
        for stored in &self.paths {
            let stored_lower = stored.to_ascii_lowercase();
            if !stored_lower.starts_with(prefix_lower.as_str()) {
                continue;
            }
            let remainder = &stored[prefix.len()..];
            let child = match remainder.find(self.separator) {
                Some(index) => &stored[..prefix.len() + index],
                None => stored.as_str(),
            };
            if seen.insert(child.to_ascii_lowercase()) {
                children.push(child.to_string());
            }
        }
        children
    }
}

impl FileSystem for MemoryFileSystem {
    fn subdirectories(&self, path: &str) -> Vec<String> {
        self.immediate_children(path)
    }

    // The double has no file/directory distinction at the listing level;
    // every known path is an entry.
    fn entries(&self, path: &str) -> Vec<String> {
        self.immediate_children(path)
    }

    fn parent(&self, path: &str) -> Option<String> {
        let normalized = normalize(path, self.separator);
        match normalized.rfind(self.separator) {
            Some(index) if index > 0 => Some(normalized[..index].to_string()),
            _ => None,
        }
    }

    fn leaf_name(&self, path: &str) -> Option<String> {
        let normalized = normalize(path, self.separator);
        if normalized.is_empty() {
            return None;
        }
        match normalized.rfind(self.separator) {
            Some(index) => Some(normalized[index + 1..].to_string()),
            None => Some(normalized),
        }
    }

    fn join(&self, parts: &[&str]) -> String {
        parts.join(self.separator.to_string().as_str())
    }

    fn file_exists(&self, path: &str) -> bool {
        let normalized = normalize(path, self.separator).to_ascii_lowercase();
        self.lookup.contains(normalized.as_str())
    }

    fn directory_exists(&self, path: &str) -> bool {
        if self.file_exists(path) {
            return true;
        }
        let prefix = format!(
            "{}{}",
            normalize(path, self.separator).to_ascii_lowercase(),
            self.separator
        );
        self.lookup
            .iter()
            .any(|stored| stored.starts_with(prefix.as_str()))
    }

    fn separator(&self) -> char {
        self.separator
    }

    fn current_directory(&self) -> String {
        self.current_directory.clone()
    }
}

fn normalize(path: &str, separator: char) -> String {
    path.trim_end_matches(|c: char| c == separator || c == '/' || c == '\\')
        .to_string()
}
