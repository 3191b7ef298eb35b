//! Segment strategies: one matching/enumeration policy per segment kind.
//!
//! A strategy answers two questions for its segment: where do candidate
//! paths come from (`source`), and does a candidate belong to the result
//! (`matches`). The chain evaluator composes the answers depth-first; no
//! strategy drives iteration itself.

mod any;
mod exact;
mod parent;
mod tagged;
mod wildcard;

pub use any::{AnyRecursiveStrategy, AnySegmentStrategy};
pub use exact::ExactMatchStrategy;
pub use parent::{AncestorsStrategy, ParentStrategy};
pub use tagged::TaggedStrategy;
pub use wildcard::{RegexWildcardStrategy, SimpleWildcardStrategy};

/// A boxed, owning stream of candidate paths.
pub type PathIter = Box<dyn Iterator<Item = String>>;

/// The matching/enumeration policy bound to one expression segment.
///
/// Implementations are immutable after construction and hold their own
/// filesystem handle; `source` returns an iterator that owns everything it
/// needs, so evaluation can interleave sources from several chain levels.
pub trait SegmentStrategy: Send + Sync + std::fmt::Debug {
    /// Returns true if the candidate path belongs to this segment's results.
    fn matches(&self, path: &str) -> bool;

    /// Enumerates candidate paths starting from `directory`.
    fn source(&self, directory: &str) -> PathIter;
}
