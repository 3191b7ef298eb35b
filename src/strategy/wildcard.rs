//! Wildcard segment matching: a string-operation fast path for the common
//! one-star shapes, and an anchored-regex fallback for everything else.

use std::sync::Arc;

use regex::{Regex, RegexBuilder};

use crate::error::{PathQueryError, Result};
use crate::fs::FileSystem;

use super::{PathIter, SegmentStrategy};

#[derive(Debug, Clone)]
enum WildcardForm {
    /// `pre*` — leaf starts with the literal.
    Prefix(String),
    /// `*suf` — leaf ends with the literal.
    Suffix(String),
    /// `*mid*` — leaf contains the literal.
    Contains(String),
    /// `pre*suf` — leaf starts with the prefix and ends with the suffix.
    Bounded { prefix: String, suffix: String },
}

/// Non-regex matcher for patterns with at most two `*`-delimited literal
/// parts. `Hello*`, `*World`, `*lo Wo*`, and `He*ld` all match
/// `"Hello World"`, case-insensitively.
pub struct SimpleWildcardStrategy {
    form: WildcardForm,
    filesystem: Arc<dyn FileSystem>,
}

impl SimpleWildcardStrategy {
    /// Returns `None` when the pattern does not decompose into one of the
    /// simple shapes and needs the regex fallback.
    pub fn try_new(segment: &str, filesystem: Arc<dyn FileSystem>) -> Option<Self> {
        let parts = segment.split('*').collect::<Vec<_>>();
        let form = match parts.as_slice() {
            ["", literal] => WildcardForm::Suffix(literal.to_ascii_lowercase()),
            [literal, ""] => WildcardForm::Prefix(literal.to_ascii_lowercase()),
            [prefix, suffix] => WildcardForm::Bounded {
                prefix: prefix.to_ascii_lowercase(),
                suffix: suffix.to_ascii_lowercase(),
            },
            ["", literal, ""] if !literal.is_empty() => {
                WildcardForm::Contains(literal.to_ascii_lowercase())
            }
            _ => return None,
        };

        Some(Self { form, filesystem })
    }
}

impl std::fmt::Debug for SimpleWildcardStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleWildcardStrategy")
            .field("form", &self.form)
            .finish()
    }
}

impl SegmentStrategy for SimpleWildcardStrategy {
    fn matches(&self, path: &str) -> bool {
        let Some(leaf) = self.filesystem.leaf_name(path) else {
            return false;
        };
        if leaf.is_empty() {
            return false;
        }
        let folded = leaf.to_ascii_lowercase();
        match &self.form {
            WildcardForm::Prefix(prefix) => folded.starts_with(prefix.as_str()),
            WildcardForm::Suffix(suffix) => folded.ends_with(suffix.as_str()),
            WildcardForm::Contains(middle) => folded.contains(middle.as_str()),
            WildcardForm::Bounded { prefix, suffix } => {
                folded.starts_with(prefix.as_str()) && folded.ends_with(suffix.as_str())
            }
        }
    }

    fn source(&self, directory: &str) -> PathIter {
        Box::new(self.filesystem.entries(directory).into_iter())
    }
}

/// Regex fallback for glob patterns the fast path rejects.
///
/// Every `*` becomes `.*`; every other character is escaped literally; the
/// whole pattern is anchored.
pub struct RegexWildcardStrategy {
    pattern: Regex,
    filesystem: Arc<dyn FileSystem>,
}

impl RegexWildcardStrategy {
    pub fn new(segment: &str, filesystem: Arc<dyn FileSystem>) -> Result<Self> {
        let translated = segment
            .split('*')
            .map(|part| regex::escape(part))
            .collect::<Vec<_>>()
            .join(".*");
        let pattern = RegexBuilder::new(format!("^{translated}$").as_str())
            .case_insensitive(true)
            .build()
            .map_err(|error| {
                PathQueryError::StrategyConstruction(format!(
                    "cannot compile wildcard '{segment}': {error}"
                ))
            })?;

        Ok(Self {
            pattern,
            filesystem,
        })
    }
}

impl std::fmt::Debug for RegexWildcardStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegexWildcardStrategy")
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

impl SegmentStrategy for RegexWildcardStrategy {
    fn matches(&self, path: &str) -> bool {
        self.filesystem
            .leaf_name(path)
            .is_some_and(|leaf| self.pattern.is_match(leaf.as_str()))
    }

    fn source(&self, directory: &str) -> PathIter {
        Box::new(self.filesystem.entries(directory).into_iter())
    }
}
