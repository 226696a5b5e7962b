//! Scored matches produced by strategies.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use textloc_core::FoundType;
use textloc_document::NodeId;

/// One candidate element matched by one strategy.
///
/// Lower values are better for all three scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MatchResult {
    /// The matched element
    pub element: NodeId,
    /// Strategy that produced the match
    pub found_type: FoundType,
    /// Characters of the matched text the pattern did not consume
    pub coverage: usize,
    /// Characters between the path anchor and the element
    pub distance: usize,
    /// Start of the element in the flattened text
    pub start: usize,
}

impl MatchResult {
    /// Create a new match.
    pub fn new(
        element: NodeId,
        found_type: FoundType,
        coverage: usize,
        distance: usize,
        start: usize,
    ) -> Self {
        Self {
            element,
            found_type,
            coverage,
            distance,
            start,
        }
    }
}
