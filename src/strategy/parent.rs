//! Structural traversal: `..` (single parent) and `...` (all ancestors).

use std::sync::Arc;

use crate::fs::FileSystem;

use super::{PathIter, SegmentStrategy};

/// `..` — steps to the parent of the current directory; empty at a root.
pub struct ParentStrategy {
    filesystem: Arc<dyn FileSystem>,
}

impl ParentStrategy {
    pub fn new(filesystem: Arc<dyn FileSystem>) -> Self {
        Self { filesystem }
    }
}

impl std::fmt::Debug for ParentStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParentStrategy").finish()
    }
}

impl SegmentStrategy for ParentStrategy {
    fn matches(&self, _path: &str) -> bool {
        true
    }

    fn source(&self, directory: &str) -> PathIter {
        Box::new(self.filesystem.parent(directory).into_iter())
    }
}

/// `...` — the current directory, then each ancestor up to the root.
pub struct AncestorsStrategy {
    filesystem: Arc<dyn FileSystem>,
}

impl AncestorsStrategy {
    pub fn new(filesystem: Arc<dyn FileSystem>) -> Self {
        Self { filesystem }
    }
}

impl std::fmt::Debug for AncestorsStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AncestorsStrategy").finish()
    }
}

impl SegmentStrategy for AncestorsStrategy {
    fn matches(&self, _path: &str) -> bool {
        true
    }

    fn source(&self, directory: &str) -> PathIter {
        Box::new(AncestorWalk {
            filesystem: Arc::clone(&self.filesystem),
            next: Some(directory.to_string()),
        })
    }
}

struct AncestorWalk {
    filesystem: Arc<dyn FileSystem>,
    next: Option<String>,
}

impl Iterator for AncestorWalk {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let current = self.next.take()?;
        self.next = self.filesystem.parent(current.as_str());
        Some(current)
    }
}
