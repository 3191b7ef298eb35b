//! Strategy registries: mapping segment tokens to strategies.
//!
//! Recognition is a priority chain. The builtin registry handles keywords,
//! wildcards, and `:tagged(...):`; the custom registry handles user-registered
//! predicate calls; the default registry turns anything left into an exact
//! match. The first registry that recognizes a token wins.

use std::sync::Arc;

use fnv::FnvHashMap;

use crate::call::StrategyCall;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::segment::SegmentToken;
use crate::strategy::{
    AncestorsStrategy, AnyRecursiveStrategy, AnySegmentStrategy, ExactMatchStrategy,
    ParentStrategy, RegexWildcardStrategy, SegmentStrategy, SimpleWildcardStrategy, TaggedStrategy,
};

/// Maps a segment token to a strategy.
///
/// `Ok(None)` means "not recognized here, try the next registry"; `Err`
/// means the token was recognized but is invalid (malformed call syntax,
/// rejected constructor arguments).
pub trait StrategyFactory: Send + Sync {
    fn try_create(&self, token: &SegmentToken<'_>) -> Result<Option<Box<dyn SegmentStrategy>>>;
}

// ---------------------------------------------------------------------------
// Builtin registry
// ---------------------------------------------------------------------------

/// Recognizes the built-in segment forms.
pub struct BuiltinStrategyFactory {
    filesystem: Arc<dyn FileSystem>,
}

impl BuiltinStrategyFactory {
    pub fn new(filesystem: Arc<dyn FileSystem>) -> Self {
        Self { filesystem }
    }

    fn wildcard(&self, segment: &str) -> Result<Box<dyn SegmentStrategy>> {
        let filesystem = Arc::clone(&self.filesystem);
        match SimpleWildcardStrategy::try_new(segment, filesystem) {
            Some(strategy) => Ok(Box::new(strategy)),
            None => Ok(Box::new(RegexWildcardStrategy::new(
                segment,
                Arc::clone(&self.filesystem),
            )?)),
        }
    }
}

impl StrategyFactory for BuiltinStrategyFactory {
    fn try_create(&self, token: &SegmentToken<'_>) -> Result<Option<Box<dyn SegmentStrategy>>> {
        let filesystem = || Arc::clone(&self.filesystem);
        let strategy: Option<Box<dyn SegmentStrategy>> = match token.text {
            ".." => Some(Box::new(ParentStrategy::new(filesystem()))),
            "..." => Some(Box::new(AncestorsStrategy::new(filesystem()))),
            "*" => Some(Box::new(AnySegmentStrategy::new(filesystem()))),
            "**" => Some(Box::new(AnyRecursiveStrategy::new(filesystem()))),
            text if text.contains('*') => Some(self.wildcard(text)?),
            text => TaggedStrategy::try_from_segment(text, filesystem())
                .map(|strategy| Box::new(strategy) as Box<dyn SegmentStrategy>),
        };
        Ok(strategy)
    }
}

// ---------------------------------------------------------------------------
// Custom-predicate registry
// ---------------------------------------------------------------------------

/// Builds a strategy from a parsed predicate call and the filesystem handle.
///
/// The registered name decides dispatch; the constructor decides validity
/// (arity, argument shape) and reports violations as
/// [`PathQueryError::StrategyConstruction`].
pub type StrategyConstructor =
    Box<dyn Fn(&StrategyCall, Arc<dyn FileSystem>) -> Result<Box<dyn SegmentStrategy>> + Send + Sync>;

/// Open registration table for `:name(args):` predicates.
///
/// Names are matched case-sensitively, like any other identifier table; a
/// well-formed call whose name is unregistered falls through to the next
/// registry. Malformed call syntax inside a `:`-delimited token is an error,
/// not a fall-through.
pub struct CustomStrategyFactory {
    filesystem: Arc<dyn FileSystem>,
    strategies: FnvHashMap<String, StrategyConstructor>,
}

impl CustomStrategyFactory {
    pub fn new(filesystem: Arc<dyn FileSystem>) -> Self {
        Self {
            filesystem,
            strategies: FnvHashMap::default(),
        }
    }

    /// Associates a predicate name (as written in `:name(...):`) with a
    /// constructor.
    pub fn register(&mut self, name: impl Into<String>, constructor: StrategyConstructor) {
        self.strategies.insert(name.into(), constructor);
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl StrategyFactory for CustomStrategyFactory {
    fn try_create(&self, token: &SegmentToken<'_>) -> Result<Option<Box<dyn SegmentStrategy>>> {
        let text = token.text;
        if text.len() < 2 || !text.starts_with(':') || !text.ends_with(':') {
            return Ok(None);
        }

        let call = StrategyCall::parse(text)?;
        let Some(constructor) = self.strategies.get(call.name.as_str()) else {
            return Ok(None);
        };

        Ok(Some(constructor(&call, Arc::clone(&self.filesystem))?))
    }
}

// ---------------------------------------------------------------------------
// Default registry
// ---------------------------------------------------------------------------

/// Unconditional fallback: everything is an exact-match literal.
pub struct DefaultStrategyFactory {
    filesystem: Arc<dyn FileSystem>,
}

impl DefaultStrategyFactory {
    pub fn new(filesystem: Arc<dyn FileSystem>) -> Self {
        Self { filesystem }
    }
}

impl StrategyFactory for DefaultStrategyFactory {
    fn try_create(&self, token: &SegmentToken<'_>) -> Result<Option<Box<dyn SegmentStrategy>>> {
        Ok(Some(Box::new(ExactMatchStrategy::new(
            token.text,
            token.is_first,
            Arc::clone(&self.filesystem),
        ))))
    }
}

// ---------------------------------------------------------------------------
// Composite registry
// ---------------------------------------------------------------------------

/// Tries registries in priority order; the first recognition wins.
pub struct CompositeStrategyFactory {
    factories: Vec<Box<dyn StrategyFactory>>,
}

impl CompositeStrategyFactory {
    pub fn new(factories: Vec<Box<dyn StrategyFactory>>) -> Self {
        Self { factories }
    }

    /// The standard chain: builtins, then the default exact match.
    pub fn with_defaults(filesystem: Arc<dyn FileSystem>) -> Self {
        Self::new(vec![
            Box::new(BuiltinStrategyFactory::new(Arc::clone(&filesystem))),
            Box::new(DefaultStrategyFactory::new(filesystem)),
        ])
    }
}

impl StrategyFactory for CompositeStrategyFactory {
    fn try_create(&self, token: &SegmentToken<'_>) -> Result<Option<Box<dyn SegmentStrategy>>> {
        for factory in &self.factories {
            if let Some(strategy) = factory.try_create(token)? {
                return Ok(Some(strategy));
            }
        }
        Ok(None)
    }
}
