//! `:tagged(marker):` — match directories that contain a marker entry.

use std::sync::Arc;

use crate::fs::FileSystem;

use super::{PathIter, SegmentStrategy};

const CALL_PREFIX: &str = ":tagged(";
const CALL_SUFFIX: &str = "):";

/// Accepts a directory iff an entry named `marker` (file or directory)
/// exists directly inside it. The directory's own name never matters.
pub struct TaggedStrategy {
    marker: String,
    filesystem: Arc<dyn FileSystem>,
}

impl TaggedStrategy {
    pub fn new(marker: &str, filesystem: Arc<dyn FileSystem>) -> Self {
        Self {
            marker: marker.to_string(),
            filesystem,
        }
    }

    /// Recognizes the `:tagged(marker):` form; a blank marker is treated as
    /// unrecognized so the segment falls through the registry chain.
    pub fn try_from_segment(segment: &str, filesystem: Arc<dyn FileSystem>) -> Option<Self> {
        let marker = segment
            .strip_prefix(CALL_PREFIX)?
            .strip_suffix(CALL_SUFFIX)?;
        if marker.trim().is_empty() {
            return None;
        }
        Some(Self::new(marker, filesystem))
    }
}

impl std::fmt::Debug for TaggedStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaggedStrategy")
            .field("marker", &self.marker)
            .finish()
    }
}

impl SegmentStrategy for TaggedStrategy {
    fn matches(&self, path: &str) -> bool {
        let marker_path = self.filesystem.join(&[path, self.marker.as_str()]);
        self.filesystem.entry_exists(marker_path.as_str())
    }

    fn source(&self, directory: &str) -> PathIter {
        Box::new(self.filesystem.subdirectories(directory).into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;

    fn filesystem() -> Arc<dyn FileSystem> {
        Arc::new(MemoryFileSystem::new(
            "C:\\Test",
            &[
                "C:\\Test\\With\\.marker",
                "C:\\Test\\With\\payload",
                "C:\\Test\\Without\\payload",
            ],
            '\\',
        ))
    }

    #[test]
    fn recognizes_the_call_form() {
        assert!(TaggedStrategy::try_from_segment(":tagged(.marker):", filesystem()).is_some());
        assert!(TaggedStrategy::try_from_segment(":tagged():", filesystem()).is_none());
        assert!(TaggedStrategy::try_from_segment(":tagged( ):", filesystem()).is_none());
        assert!(TaggedStrategy::try_from_segment(":other(.marker):", filesystem()).is_none());
        assert!(TaggedStrategy::try_from_segment("tagged(.marker)", filesystem()).is_none());
    }

    #[test]
    fn the_marker_decides_the_match() {
        let strategy = TaggedStrategy::try_from_segment(":tagged(.marker):", filesystem()).unwrap();
        assert!(strategy.matches("C:\\Test\\With"));
        assert!(!strategy.matches("C:\\Test\\Without"));
    }

    #[test]
    fn source_is_the_immediate_subdirectories() {
        let strategy = TaggedStrategy::try_from_segment(":tagged(.marker):", filesystem()).unwrap();
        let source = strategy.source("C:\\Test").collect::<Vec<_>>();
        assert_eq!(source, vec!["C:\\Test\\With", "C:\\Test\\Without"]);
    }
}
