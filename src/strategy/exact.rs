//! Literal segment matching.

use std::sync::Arc;

use crate::fs::{is_drive_letter, FileSystem};

use super::{PathIter, SegmentStrategy};

/// Matches entries whose leaf name equals the segment text,
/// case-insensitively.
///
/// When the segment is the first in its chain and names a bare drive
/// (`C:`), the source is the drive literal itself instead of an
/// enumeration, so resolution can start at a drive root without asking the
/// filesystem for the drive's siblings.
pub struct ExactMatchStrategy {
    literal: String,
    is_first: bool,
    filesystem: Arc<dyn FileSystem>,
}

impl ExactMatchStrategy {
    pub fn new(literal: &str, is_first: bool, filesystem: Arc<dyn FileSystem>) -> Self {
        Self {
            literal: literal.to_string(),
            is_first,
            filesystem,
        }
    }
}

impl std::fmt::Debug for ExactMatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExactMatchStrategy")
            .field("literal", &self.literal)
            .field("is_first", &self.is_first)
            .finish()
    }
}

impl SegmentStrategy for ExactMatchStrategy {
    fn matches(&self, path: &str) -> bool {
        self.filesystem
            .leaf_name(path)
            .is_some_and(|leaf| leaf.eq_ignore_ascii_case(self.literal.as_str()))
    }

    fn source(&self, directory: &str) -> PathIter {
        if self.is_first && is_drive_letter(self.literal.as_str()) {
            return Box::new(std::iter::once(self.literal.clone()));
        }
        Box::new(self.filesystem.entries(directory).into_iter())
    }
}
