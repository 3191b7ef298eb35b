//! Segment chain construction and lazy depth-first evaluation.
//!
//! A chain is one link per expression segment, built in a single pass so
//! every link knows its position up front. Evaluation is pull-based: a frame
//! stack holds one live candidate source per active chain level, and each
//! accepted candidate either surfaces (tail link) or opens a frame for the
//! next link rooted at that candidate. Nothing below a level is enumerated
//! until a candidate at that level has been accepted.

use crate::cancel::CancellationToken;
use crate::error::{PathQueryError, Result};
use crate::factory::StrategyFactory;
use crate::segment::SegmentToken;
use crate::strategy::{PathIter, SegmentStrategy};

#[derive(Debug)]
struct ChainLink {
    strategy: Box<dyn SegmentStrategy>,
    raw: String,
}

/// The compiled form of one expression: an ordered list of segment
/// strategies. Built fresh for every resolve call; nothing is cached.
#[derive(Debug)]
pub struct SegmentChain {
    links: Vec<ChainLink>,
}

impl SegmentChain {
    /// Resolves every segment to a strategy through `factory`.
    ///
    /// Fails on an empty segment list, on malformed predicate calls, and on
    /// registry configurations that leave a segment unrecognized.
    pub fn build(segments: &[String], factory: &dyn StrategyFactory) -> Result<Self> {
        if segments.is_empty() {
            return Err(PathQueryError::EmptyExpression);
        }

        let mut links = Vec::with_capacity(segments.len());
        for (index, text) in segments.iter().enumerate() {
            let token = SegmentToken::new(text.as_str(), index);
            let strategy = factory
                .try_create(&token)?
                .ok_or_else(|| PathQueryError::UnrecognizedSegment(text.clone()))?;
            links.push(ChainLink {
                strategy,
                raw: text.clone(),
            });
        }

        Ok(Self { links })
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The raw segment tokens, in chain order.
    pub fn raw_tokens(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|link| link.raw.as_str())
    }

    /// Starts a lazy evaluation of the chain from `start_directory`.
    pub fn evaluate(self, start_directory: &str, token: CancellationToken) -> Evaluation {
        log::debug!(
            "evaluating {} segment(s) from {start_directory}",
            self.links.len()
        );
        let first = self.links[0].strategy.source(start_directory);
        Evaluation {
            links: self.links,
            frames: vec![Frame {
                link: 0,
                source: first,
            }],
            token,
        }
    }
}

struct Frame {
    link: usize,
    source: PathIter,
}

/// Lazy sequence of matching absolute paths.
///
/// Depth-first: candidates accepted at level *n* are fully expanded through
/// level *n + 1* before the next level-*n* candidate is considered. The
/// cancellation token is checked before every candidate; once signalled, the
/// sequence ends without yielding further results.
pub struct Evaluation {
    links: Vec<ChainLink>,
    frames: Vec<Frame>,
    token: CancellationToken,
}

impl Iterator for Evaluation {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if self.token.is_cancelled() {
                self.frames.clear();
                return None;
            }

            let frame = self.frames.last_mut()?;
            let link = frame.link;
            let Some(candidate) = frame.source.next() else {
                self.frames.pop();
                continue;
            };

            if !self.links[link].strategy.matches(candidate.as_str()) {
                continue;
            }
            if link + 1 == self.links.len() {
                return Some(candidate);
            }

            let source = self.links[link + 1].strategy.source(candidate.as_str());
            self.frames.push(Frame {
                link: link + 1,
                source,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::factory::CompositeStrategyFactory;
    use crate::fs::{FileSystem, MemoryFileSystem};
    use crate::segment::split_expression;

    fn filesystem() -> Arc<dyn FileSystem> {
        Arc::new(MemoryFileSystem::new(
            "C:\\Test",
            &[
                "C:\\Test\\a\\x\\leaf",
                "C:\\Test\\b\\x\\leaf",
                "C:\\Test\\c",
            ],
            '\\',
        ))
    }

    fn evaluate(expression: &str, start: &str, token: CancellationToken) -> Vec<String> {
        let filesystem = filesystem();
        let factory = CompositeStrategyFactory::with_defaults(filesystem);
        let segments = split_expression(expression, '\\');
        SegmentChain::build(segments.as_slice(), &factory)
            .unwrap()
            .evaluate(start, token)
            .collect::<Vec<_>>()
    }

    #[test]
    fn empty_segment_list_is_rejected() {
        let factory = CompositeStrategyFactory::with_defaults(filesystem());
        let error = SegmentChain::build(&[], &factory).unwrap_err();
        assert!(matches!(error, PathQueryError::EmptyExpression));
    }

    #[test]
    fn chain_composition_is_depth_first() {
        let results = evaluate("*\\x\\leaf", "C:\\Test", CancellationToken::new());
        assert_eq!(
            results,
            vec!["C:\\Test\\a\\x\\leaf", "C:\\Test\\b\\x\\leaf"]
        );
    }

    #[test]
    fn tail_candidates_are_yielded_directly() {
        let results = evaluate("c", "C:\\Test", CancellationToken::new());
        assert_eq!(results, vec!["C:\\Test\\c"]);
    }

    #[test]
    fn pre_cancelled_token_yields_nothing() {
        let token = CancellationToken::new();
        token.cancel();
        assert!(evaluate("**", "C:\\Test", token).is_empty());
    }

    #[test]
    fn cancellation_stops_a_running_evaluation() {
        let filesystem = filesystem();
        let factory = CompositeStrategyFactory::with_defaults(filesystem);
        let segments = split_expression("**", '\\');
        let token = CancellationToken::new();
        let mut evaluation = SegmentChain::build(segments.as_slice(), &factory)
            .unwrap()
            .evaluate("C:\\Test", token.clone());

        assert!(evaluation.next().is_some());
        token.cancel();
        assert!(evaluation.next().is_none());
    }

    #[test]
    fn raw_tokens_keep_chain_order() {
        let factory = CompositeStrategyFactory::with_defaults(filesystem());
        let segments = split_expression("...\\**\\kxd", '\\');
        let chain = SegmentChain::build(segments.as_slice(), &factory).unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(
            chain.raw_tokens().collect::<Vec<_>>(),
            vec!["...", "**", "kxd"]
        );
    }
}
