//! Ranking of the matches collected for one locate run.

use std::cmp::Ordering;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use textloc_core::{AggregationSettings, FoundType, Ranking, Result};
use textloc_document::NodeId;

use crate::result::MatchResult;

/// A match together with a description of its element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RankedMatch {
    /// Human-readable description of the element
    pub description: String,
    /// The element
    pub element: NodeId,
    /// Strategy that produced the match
    pub found_type: FoundType,
    /// Unmatched characters of the matched text
    pub coverage: usize,
    /// Characters between the anchor and the element
    pub distance: usize,
    /// Start of the element in the flattened text
    pub start: usize,
}

impl RankedMatch {
    /// Describe a match.
    pub fn new(description: impl Into<String>, result: MatchResult) -> Self {
        Self {
            description: description.into(),
            element: result.element,
            found_type: result.found_type,
            coverage: result.coverage,
            distance: result.distance,
            start: result.start,
        }
    }

    fn scores(&self, ranking: Ranking) -> (u32, usize, usize, usize) {
        let weight = match ranking {
            Ranking::Tiered => self.found_type.weight(),
            Ranking::Tuple => 0,
        };
        (weight, self.coverage, self.distance, self.start)
    }

    fn compare(&self, other: &Self, ranking: Ranking) -> Ordering {
        self.scores(ranking)
            .cmp(&other.scores(ranking))
            .then_with(|| self.description.cmp(&other.description))
    }
}

impl fmt::Display for RankedMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} found by: {} coverage: {} distance: {} start: {}",
            self.description, self.found_type, self.coverage, self.distance, self.start
        )
    }
}

/// Matches of all strategies for all candidates.
///
/// Entries are kept in insertion order; [`WeightedMatchList::entries_sorted`]
/// ranks them. Under [`Ranking::Tiered`] a match of a heavier found type
/// never outranks a lighter one, whatever its scores.
#[derive(Debug, Clone)]
pub struct WeightedMatchList {
    ranking: Ranking,
    deduplicate: bool,
    entries: Vec<RankedMatch>,
}

impl WeightedMatchList {
    /// Create an empty list.
    pub fn new(ranking: Ranking, deduplicate: bool) -> Self {
        Self {
            ranking,
            deduplicate,
            entries: Vec::new(),
        }
    }

    /// Create an empty list configured by `settings`.
    pub fn from_settings(settings: &AggregationSettings) -> Self {
        Self::new(settings.ranking, settings.deduplicate)
    }

    /// Add a match.
    pub fn add(&mut self, description: impl Into<String>, result: MatchResult) {
        self.entries.push(RankedMatch::new(description, result));
    }

    /// Take over all entries of another list.
    pub fn extend(&mut self, other: WeightedMatchList) {
        self.entries.extend(other.entries);
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[RankedMatch] {
        &self.entries
    }

    /// Keep only entries for which `keep` holds.
    pub fn retain(&mut self, keep: impl FnMut(&RankedMatch) -> bool) {
        self.entries.retain(keep);
    }

    /// Entries best first; with deduplication only the best entry per
    /// element survives.
    pub fn entries_sorted(&self) -> Vec<RankedMatch> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| a.compare(b, self.ranking));

        if self.deduplicate {
            let mut seen = Vec::new();
            sorted.retain(|entry| {
                if seen.contains(&entry.element) {
                    false
                } else {
                    seen.push(entry.element);
                    true
                }
            });
        }
        sorted
    }

    /// All entries tied with the best one.
    ///
    /// Ties ignore the description; more than one entry means the
    /// expression is ambiguous.
    pub fn best(&self) -> Vec<RankedMatch> {
        let sorted = self.entries_sorted();
        let Some(first) = sorted.first() else {
            return Vec::new();
        };
        let best = first.scores(self.ranking);
        sorted
            .iter()
            .take_while(|entry| entry.scores(self.ranking) == best)
            .cloned()
            .collect()
    }

    /// Ranked entries as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries_sorted())?)
    }
}

impl Default for WeightedMatchList {
    fn default() -> Self {
        Self::from_settings(&AggregationSettings::default())
    }
}

impl fmt::Display for WeightedMatchList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.entries_sorted() {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}
