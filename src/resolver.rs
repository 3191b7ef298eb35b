//! Resolution facade: compile an expression, evaluate it lazily.

use std::sync::Arc;

use crate::cancel::CancellationToken;
use crate::chain::{Evaluation, SegmentChain};
use crate::error::{PathQueryError, Result};
use crate::factory::{
    BuiltinStrategyFactory, CompositeStrategyFactory, CustomStrategyFactory,
    DefaultStrategyFactory, StrategyConstructor, StrategyFactory,
};
use crate::fs::{FileSystem, RealFileSystem};
use crate::segment::split_expression;

/// Resolves path expressions against a filesystem capability.
///
/// A resolver owns its registry; there is no process-wide default, so two
/// resolvers never observe each other's registrations. All state is
/// immutable after construction and every resolve call builds its own
/// chain, so one resolver can serve concurrent callers.
pub struct PathResolver {
    filesystem: Arc<dyn FileSystem>,
    factory: Arc<dyn StrategyFactory>,
    start_directory: String,
    separator: char,
}

impl PathResolver {
    /// A resolver over the real filesystem, starting at the process
    /// current directory.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> PathResolverBuilder {
        PathResolverBuilder::default()
    }

    /// The separator used to split expressions.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// The filesystem capability this resolver runs against.
    pub fn filesystem(&self) -> &Arc<dyn FileSystem> {
        &self.filesystem
    }

    /// Returns the first match for `expression`.
    pub fn resolve_first(&self, expression: &str) -> Result<String> {
        self.resolve_first_with(expression, &CancellationToken::new())
    }

    /// Returns the first match for `expression`, honoring `token`.
    pub fn resolve_first_with(
        &self,
        expression: &str,
        token: &CancellationToken,
    ) -> Result<String> {
        self.first_from(self.start_directory.as_str(), expression, token)
    }

    /// Returns the first match for `expression`, starting from
    /// `start_directory` instead of the configured start.
    pub fn resolve_first_from(
        &self,
        start_directory: &str,
        expression: &str,
        token: &CancellationToken,
    ) -> Result<String> {
        self.first_from(start_directory, expression, token)
    }

    /// Returns the first match for pre-split segments.
    pub fn resolve_first_segments(
        &self,
        segments: &[&str],
        token: &CancellationToken,
    ) -> Result<String> {
        let owned = segments
            .iter()
            .map(|segment| segment.to_string())
            .collect::<Vec<_>>();
        self.first_of(owned, self.start_directory.as_str(), token)
    }

    /// Returns all matches for `expression` as a lazy sequence.
    pub fn resolve_all(&self, expression: &str) -> Result<Evaluation> {
        self.resolve_all_with(expression, &CancellationToken::new())
    }

    /// Returns all matches for `expression`, honoring `token`.
    pub fn resolve_all_with(
        &self,
        expression: &str,
        token: &CancellationToken,
    ) -> Result<Evaluation> {
        self.all_from(self.start_directory.as_str(), expression, token)
    }

    /// Returns all matches for `expression` from `start_directory`.
    pub fn resolve_all_from(
        &self,
        start_directory: &str,
        expression: &str,
        token: &CancellationToken,
    ) -> Result<Evaluation> {
        self.all_from(start_directory, expression, token)
    }

    /// Returns all matches for pre-split segments.
    pub fn resolve_all_segments(
        &self,
        segments: &[&str],
        token: &CancellationToken,
    ) -> Result<Evaluation> {
        let owned = segments
            .iter()
            .map(|segment| segment.to_string())
            .collect::<Vec<_>>();
        self.evaluate(owned, self.start_directory.as_str(), token)
    }

    fn first_from(
        &self,
        start_directory: &str,
        expression: &str,
        token: &CancellationToken,
    ) -> Result<String> {
        let segments = split_expression(expression, self.separator);
        self.first_of(segments, start_directory, token)
    }

    fn all_from(
        &self,
        start_directory: &str,
        expression: &str,
        token: &CancellationToken,
    ) -> Result<Evaluation> {
        let segments = split_expression(expression, self.separator);
        self.evaluate(segments, start_directory, token)
    }

    fn first_of(
        &self,
        segments: Vec<String>,
        start_directory: &str,
        token: &CancellationToken,
    ) -> Result<String> {
        let expression = segments.join(self.separator.to_string().as_str());
        let mut evaluation = self.evaluate(segments.clone(), start_directory, token)?;
        match evaluation.next() {
            Some(path) => Ok(path),
            None if token.is_cancelled() => Err(PathQueryError::Cancelled),
            None => Err(PathQueryError::NotFound {
                expression,
                segments,
            }),
        }
    }

    fn evaluate(
        &self,
        segments: Vec<String>,
        start_directory: &str,
        token: &CancellationToken,
    ) -> Result<Evaluation> {
        let chain = SegmentChain::build(segments.as_slice(), self.factory.as_ref())?;
        Ok(chain.evaluate(start_directory, token.clone()))
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Configures and builds a [`PathResolver`].
#[derive(Default)]
pub struct PathResolverBuilder {
    filesystem: Option<Arc<dyn FileSystem>>,
    start_directory: Option<String>,
    separator: Option<char>,
    custom: Vec<(String, StrategyConstructor)>,
}

impl PathResolverBuilder {
    pub fn filesystem(mut self, filesystem: Arc<dyn FileSystem>) -> Self {
        self.filesystem = Some(filesystem);
        self
    }

    /// Overrides the starting directory (default: the capability's current
    /// directory).
    pub fn start_directory(mut self, start_directory: &str) -> Self {
        self.start_directory = Some(start_directory.to_string());
        self
    }

    /// Overrides the expression separator (default: the capability's
    /// separator). Lets `/`-delimited expressions run against a `\`
    /// filesystem.
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Registers a custom predicate under `name`, callable as `:name(...):`.
    pub fn custom_strategy(
        mut self,
        name: impl Into<String>,
        constructor: StrategyConstructor,
    ) -> Self {
        self.custom.push((name.into(), constructor));
        self
    }

    pub fn build(self) -> PathResolver {
        let filesystem = self
            .filesystem
            .unwrap_or_else(|| Arc::new(RealFileSystem::new()));

        let mut custom = CustomStrategyFactory::new(Arc::clone(&filesystem));
        for (name, constructor) in self.custom {
            custom.register(name, constructor);
        }

        let mut factories: Vec<Box<dyn StrategyFactory>> = Vec::with_capacity(3);
        factories.push(Box::new(BuiltinStrategyFactory::new(Arc::clone(
            &filesystem,
        ))));
        if !custom.is_empty() {
            factories.push(Box::new(custom));
        }
        factories.push(Box::new(DefaultStrategyFactory::new(Arc::clone(
            &filesystem,
        ))));

        PathResolver {
            separator: self.separator.unwrap_or_else(|| filesystem.separator()),
            start_directory: self
                .start_directory
                .unwrap_or_else(|| filesystem.current_directory()),
            factory: Arc::new(CompositeStrategyFactory::new(factories)),
            filesystem,
        }
    }
}
