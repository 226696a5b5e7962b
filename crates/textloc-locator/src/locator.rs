//! The locate pipeline: expression in, ranked matches out.

use tracing::{debug, trace};

use textloc_core::{LocatorConfig, Result};
use textloc_document::{ElementKind, NodeId, TextIndex};
use textloc_pattern::{CacheStats, PatternCache};

use crate::aggregation::WeightedMatchList;
use crate::context::MatchContext;
use crate::control::{strategies_for, ControlKind};
use crate::path::PathExpression;
use crate::strategies::{is_in_table_coordinates, Strategy};

/// Locates elements of a document by textual path expressions.
///
/// A locator is cheap to share: it only holds its configuration, the
/// enabled strategies and a cache of compiled patterns, so one instance
/// can serve any number of documents.
///
/// ```
/// use textloc_core::LocatorConfig;
/// use textloc_document::{DocumentBuilder, DocumentIndex, ElementBuilder, TextIndex};
/// use textloc_locator::{ControlKind, Locator};
///
/// let document = DocumentBuilder::new()
///     .text("Username")
///     .child(ElementBuilder::new("input").id("user"))
///     .build();
/// let index = DocumentIndex::new(&document);
///
/// let locator = Locator::new(LocatorConfig::default());
/// let matches = locator.locate(&index, "Username", ControlKind::TextInput).unwrap();
/// assert_eq!(matches.best()[0].element, index.element_by_id("user").unwrap());
/// ```
#[derive(Debug)]
pub struct Locator {
    config: LocatorConfig,
    strategies: Vec<Strategy>,
    cache: PatternCache,
}

impl Locator {
    /// Create a locator with every strategy enabled.
    pub fn new(config: LocatorConfig) -> Self {
        let cache = PatternCache::new(config.matching.pattern_cache_capacity);
        Self {
            config,
            strategies: Strategy::ALL.to_vec(),
            cache,
        }
    }

    /// Restrict the locator to the given strategies.
    pub fn with_strategies(mut self, strategies: impl IntoIterator<Item = Strategy>) -> Self {
        self.strategies = strategies.into_iter().collect();
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Enabled strategies.
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Statistics of the pattern cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Parse, validate and evaluate an expression against all displayed
    /// elements.
    pub fn locate(
        &self,
        index: &dyn TextIndex,
        expression: &str,
        kind: ControlKind,
    ) -> Result<WeightedMatchList> {
        let expression = PathExpression::parse(expression);
        expression.validate()?;
        Ok(self.locate_path(index, &expression, kind, None))
    }

    /// Evaluate a parsed expression.
    ///
    /// Without explicit `candidates` every displayed element that is a
    /// control of `kind`, or a `label`, is scored.
    pub fn locate_path(
        &self,
        index: &dyn TextIndex,
        expression: &PathExpression,
        kind: ControlKind,
        candidates: Option<&[NodeId]>,
    ) -> WeightedMatchList {
        let context = MatchContext::new(
            index,
            expression,
            kind,
            self.config.matching.include_invisible,
            |source| self.cache.get_or_compile(source),
        );
        let mut results = WeightedMatchList::from_settings(&self.config.aggregation);

        if context.anchor.is_not_found() {
            debug!("Path of '{}' does not occur in the document", expression);
            return results;
        }
        if let Some(path) = &context.path_pattern {
            let occurences = index.occurences(path).len();
            if occurences > 1 {
                debug!(
                    "Path of '{}' occurs {} times, anchoring at the first",
                    expression, occurences
                );
            }
        }

        let default_candidates;
        let candidates = match candidates {
            Some(candidates) => candidates,
            None => {
                default_candidates = self.default_candidates(index, kind);
                &default_candidates
            }
        };
        debug!(
            "Locating '{}' ({}) among {} candidates",
            expression,
            kind,
            candidates.len()
        );

        let by_coordinates = context.search_pattern.is_none()
            && !context.coordinates.is_empty()
            && self.strategies.contains(&Strategy::TableCoordinates);

        for &candidate in candidates {
            let Some(element_kind) = index.kind(candidate) else {
                continue;
            };
            let applicable = strategies_for(element_kind)
                .iter()
                .filter(|strategy| self.strategies.contains(*strategy))
                .chain(by_coordinates.then_some(&Strategy::TableCoordinates));

            for strategy in applicable {
                for result in strategy.evaluate(&context, candidate) {
                    trace!(
                        "{} matched {} (coverage {}, distance {}, start {})",
                        strategy,
                        result.element,
                        result.coverage,
                        result.distance,
                        result.start
                    );
                    results.add(index.describe(result.element), result);
                }
            }
        }

        if context.search_pattern.is_some() && !context.coordinates.is_empty() {
            let before = results.len();
            results.retain(|entry| {
                is_in_table_coordinates(index, entry.element, &context.coordinates, context.anchor)
            });
            debug!(
                "Table coordinates kept {} of {} matches",
                results.len(),
                before
            );
        }

        debug!("Located {} matches for '{}'", results.len(), expression);
        results
    }

    fn default_candidates(&self, index: &dyn TextIndex, kind: ControlKind) -> Vec<NodeId> {
        index
            .visible_elements()
            .iter()
            .copied()
            .filter(|&node| {
                index
                    .kind(node)
                    .is_some_and(|k| k == ElementKind::Label || kind.accepts(k))
            })
            .collect()
    }
}

impl Default for Locator {
    fn default() -> Self {
        Self::new(LocatorConfig::default())
    }
}
