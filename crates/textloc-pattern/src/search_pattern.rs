//! The public pattern surface.

use std::fmt;

use textloc_core::FindSpot;

use crate::automaton::Haystack;
use crate::compiler::WildcardPattern;
use crate::scan::{FromEndScanner, ShortFromEndScanner, ShortScanner, StandardScanner};

/// A compiled wildcard pattern with positional queries.
///
/// All offsets and counts are measured in characters. Counting queries
/// return `None` when the pattern cannot occur in the text.
///
/// # Example
/// ```
/// use textloc_pattern::SearchPattern;
///
/// let pattern = SearchPattern::compile("t?t");
/// assert!(pattern.matches("tat"));
/// assert_eq!(pattern.no_of_surrounding_chars_in("Metator"), Some(4));
/// assert_eq!(pattern.no_of_chars_after_last_occurence_in("Metator"), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern {
    source: String,
    pattern: WildcardPattern,
}

impl SearchPattern {
    /// Compile a wildcard string. Never fails.
    pub fn compile(source: &str) -> Self {
        Self {
            source: source.to_string(),
            pattern: WildcardPattern::compile(source),
        }
    }

    /// Join segments with `*` and compile the result.
    pub fn create_from_list<S: AsRef<str>>(segments: &[S]) -> Self {
        let joined = segments
            .iter()
            .map(|segment| segment.as_ref())
            .collect::<Vec<_>>()
            .join("*");
        Self::compile(&joined)
    }

    /// The wildcard string this pattern was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled representation.
    pub fn pattern(&self) -> &WildcardPattern {
        &self.pattern
    }

    /// Whether this pattern matches every text.
    pub fn is_match_all(&self) -> bool {
        matches!(self.pattern, WildcardPattern::MatchAll)
    }

    /// Characters any match consumes at least.
    pub fn min_length(&self) -> usize {
        self.pattern.min_length()
    }

    /// Whole-text match.
    pub fn matches(&self, text: &str) -> bool {
        match &self.pattern {
            WildcardPattern::MatchAll => true,
            WildcardPattern::Literal(literal) => text.chars().eq(literal.iter().copied()),
            WildcardPattern::Compiled { automaton, .. } => automaton.run(text),
        }
    }

    /// Whether the pattern matches a suffix of `text`.
    pub fn matches_at_end(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        match &self.pattern {
            WildcardPattern::MatchAll => false,
            WildcardPattern::Literal(literal) => {
                let chars: Vec<char> = text.chars().collect();
                chars.ends_with(literal)
            }
            WildcardPattern::Compiled {
                automaton,
                min_length,
            } => {
                let haystack = Haystack::new(text);
                if haystack.len() < *min_length {
                    return false;
                }
                FromEndScanner::new(automaton, &haystack)
                    .next()
                    .is_some_and(|spot| spot.end == haystack.len())
            }
        }
    }

    /// Leftmost match, or [`FindSpot::NOT_FOUND`].
    pub fn first_occurence_in(&self, text: &str) -> FindSpot {
        self.first_occurence_in_from(text, 0)
    }

    /// Leftmost match starting at or after `from`, or [`FindSpot::NOT_FOUND`].
    ///
    /// A match-all pattern covers the rest of the text, so a whole-text
    /// match is always also the first occurrence.
    pub fn first_occurence_in_from(&self, text: &str, from: usize) -> FindSpot {
        let found = match &self.pattern {
            WildcardPattern::MatchAll => {
                let len = text.chars().count();
                Some(FindSpot::new(from.min(len), len))
            }
            WildcardPattern::Literal(literal) => {
                let chars: Vec<char> = text.chars().collect();
                find_literal(&chars, literal, from)
                    .map(|start| FindSpot::new(start, start + literal.len()))
            }
            WildcardPattern::Compiled {
                automaton,
                min_length,
            } => {
                let haystack = Haystack::new(text);
                if haystack.len() < *min_length {
                    None
                } else {
                    StandardScanner::new(automaton, &haystack, from).next()
                }
            }
        };
        found.unwrap_or(FindSpot::NOT_FOUND)
    }

    /// Every minimal occurrence, left to right, non-overlapping.
    ///
    /// Each occurrence is the one ending first after the previous, trimmed
    /// from the left. A match-all pattern yields the whole text once.
    pub fn occurences_in(&self, text: &str) -> Vec<FindSpot> {
        match &self.pattern {
            WildcardPattern::MatchAll => vec![FindSpot::new(0, text.chars().count())],
            WildcardPattern::Literal(literal) => {
                let chars: Vec<char> = text.chars().collect();
                let mut spots = Vec::new();
                let mut from = 0;
                while let Some(start) = find_literal(&chars, literal, from) {
                    spots.push(FindSpot::new(start, start + literal.len()));
                    from = start + literal.len();
                }
                spots
            }
            WildcardPattern::Compiled {
                automaton,
                min_length,
            } => {
                let haystack = Haystack::new(text);
                if haystack.len() < *min_length {
                    return Vec::new();
                }
                ShortScanner::new(automaton, &haystack, 0).collect()
            }
        }
    }

    /// Rightmost match, extended greedily towards the end of `text`.
    pub fn last_occurence_in(&self, text: &str) -> Option<FindSpot> {
        self.last_spot(text)
    }

    /// Characters after the end of the last occurrence.
    ///
    /// A match-all pattern leaves nothing after it, for every text.
    pub fn no_of_chars_after_last_occurence_in(&self, text: &str) -> Option<usize> {
        if self.is_match_all() {
            return Some(0);
        }
        let len = text.chars().count();
        self.last_spot(text).map(|spot| len - spot.end)
    }

    /// Characters before the start of the last occurrence.
    pub fn no_of_chars_before_last_occurence_in(&self, text: &str) -> Option<usize> {
        if self.is_match_all() {
            return (!text.is_empty()).then_some(0);
        }
        self.last_spot(text).map(|spot| spot.start)
    }

    /// Characters after the end of the last shortest occurrence.
    pub fn no_of_chars_after_last_shortest_occurence_in(&self, text: &str) -> Option<usize> {
        if self.is_match_all() {
            return Some(0);
        }
        let len = text.chars().count();
        self.last_shortest_spot(text).map(|spot| len - spot.end)
    }

    /// Characters before the start of the last shortest occurrence.
    pub fn no_of_chars_before_last_shortest_occurence_in(&self, text: &str) -> Option<usize> {
        if self.is_match_all() {
            return (!text.is_empty()).then_some(0);
        }
        self.last_shortest_spot(text).map(|spot| spot.start)
    }

    /// Fewest characters any single occurrence leaves unmatched.
    ///
    /// This is the coverage value of fuzzy matches; 0 means the pattern
    /// consumed the whole text.
    pub fn no_of_surrounding_chars_in(&self, text: &str) -> Option<usize> {
        match &self.pattern {
            WildcardPattern::MatchAll => Some(0),
            WildcardPattern::Literal(literal) => {
                let chars: Vec<char> = text.chars().collect();
                if chars.is_empty() {
                    return None;
                }
                find_literal(&chars, literal, 0).map(|_| chars.len() - literal.len())
            }
            WildcardPattern::Compiled {
                automaton,
                min_length,
            } => {
                let haystack = Haystack::new(text);
                if haystack.len() < *min_length {
                    return None;
                }
                StandardScanner::new(automaton, &haystack, 0)
                    .map(|spot| haystack.len() - spot.len())
                    .min()
            }
        }
    }

    fn last_spot(&self, text: &str) -> Option<FindSpot> {
        match &self.pattern {
            WildcardPattern::MatchAll => None,
            WildcardPattern::Literal(literal) => {
                let chars: Vec<char> = text.chars().collect();
                rfind_literal(&chars, literal)
                    .map(|start| FindSpot::new(start, start + literal.len()))
            }
            WildcardPattern::Compiled {
                automaton,
                min_length,
            } => {
                let haystack = Haystack::new(text);
                if haystack.is_empty() || haystack.len() < *min_length {
                    return None;
                }
                FromEndScanner::new(automaton, &haystack).next()
            }
        }
    }

    fn last_shortest_spot(&self, text: &str) -> Option<FindSpot> {
        match &self.pattern {
            WildcardPattern::MatchAll => None,
            WildcardPattern::Literal(literal) => {
                let chars: Vec<char> = text.chars().collect();
                rfind_literal(&chars, literal)
                    .map(|start| FindSpot::new(start, start + literal.len()))
            }
            WildcardPattern::Compiled {
                automaton,
                min_length,
            } => {
                let haystack = Haystack::new(text);
                if haystack.is_empty() || haystack.len() < *min_length {
                    return None;
                }
                ShortFromEndScanner::new(automaton, &haystack).next()
            }
        }
    }
}

impl fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pattern {
            WildcardPattern::MatchAll => write!(f, "SearchPattern '{}' [matchAll]", self.source),
            WildcardPattern::Literal(literal) => write!(
                f,
                "SearchPattern '{}' [text: '{}']",
                self.source,
                literal.iter().collect::<String>()
            ),
            WildcardPattern::Compiled { .. } => {
                write!(f, "SearchPattern '{}' [automaton]", self.source)
            }
        }
    }
}

fn find_literal(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if from > haystack.len() || needle.len() > haystack.len() - from {
        return None;
    }
    (from..=haystack.len() - needle.len()).find(|&start| haystack[start..].starts_with(needle))
}

fn rfind_literal(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .rev()
        .find(|&start| haystack[start..].starts_with(needle))
}
