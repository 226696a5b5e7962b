//! Positions of matches inside a text.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A character range `[start, end)` marking where a match occurs.
///
/// Offsets count characters, not bytes. The sentinel [`FindSpot::NOT_FOUND`]
/// marks the absence of a match for queries that always return a spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct FindSpot {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl FindSpot {
    /// Sentinel for "no match".
    pub const NOT_FOUND: FindSpot = FindSpot {
        start: usize::MAX,
        end: usize::MAX,
    };

    /// Create a new spot. `end` is raised to `start` if it lies before it.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Whether this spot marks an actual match.
    pub fn is_found(&self) -> bool {
        *self != Self::NOT_FOUND
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the spot covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for FindSpot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_found() {
            write!(f, "{}-{}", self.start, self.end)
        } else {
            write!(f, "NOT_FOUND")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_spot() {
        let spot = FindSpot::new(2, 5);
        assert!(spot.is_found());
        assert_eq!(spot.len(), 3);
        assert!(!spot.is_empty());
    }

    #[test]
    fn test_end_never_before_start() {
        let spot = FindSpot::new(5, 2);
        assert_eq!(spot.end, 5);
        assert!(spot.is_empty());
    }

    #[test]
    fn test_not_found() {
        assert!(!FindSpot::NOT_FOUND.is_found());
        assert_eq!(FindSpot::NOT_FOUND.to_string(), "NOT_FOUND");
        assert_eq!(FindSpot::new(0, 4).to_string(), "0-4");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&FindSpot::new(1, 3)).unwrap();
        assert_eq!(json, r#"{"start":1,"end":3}"#);
    }
}
