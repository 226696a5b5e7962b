//! Scan modes over a compiled automaton.
//!
//! Each scanner owns its cursor and borrows the automaton immutably, so one
//! automaton can serve any number of concurrent scans. All scanners are
//! iterators over [`FindSpot`]s. The standard scanner is a plain regex
//! search; the other modes are loops that restart the engine from shifting
//! offsets.

use textloc_core::FindSpot;

use crate::automaton::{Automaton, Haystack};

/// Leftmost-longest matches, left to right, non-overlapping.
///
/// `*` is greedy: a match extends as far as the rest of the pattern allows.
pub struct StandardScanner<'a> {
    automaton: &'a Automaton,
    haystack: &'a Haystack<'a>,
    cursor: usize,
}

impl<'a> StandardScanner<'a> {
    /// Scan `haystack` starting at `offset`.
    pub fn new(automaton: &'a Automaton, haystack: &'a Haystack<'a>, offset: usize) -> Self {
        Self {
            automaton,
            haystack,
            cursor: offset,
        }
    }
}

impl Iterator for StandardScanner<'_> {
    type Item = FindSpot;

    fn next(&mut self) -> Option<FindSpot> {
        let (start, end) = self.automaton.find_longest(self.haystack, self.cursor)?;
        self.cursor = if end == start { start + 1 } else { end };
        Some(FindSpot::new(start, end))
    }
}

/// Rightmost-starting matches, right to left.
///
/// The first result is the match with the largest start, extended greedily
/// towards the end of the text. Each further call only considers starts left
/// of the previous one.
pub struct FromEndScanner<'a> {
    automaton: &'a Automaton,
    haystack: &'a Haystack<'a>,
    remaining: usize,
}

impl<'a> FromEndScanner<'a> {
    /// Scan `haystack` backwards from its end.
    pub fn new(automaton: &'a Automaton, haystack: &'a Haystack<'a>) -> Self {
        let remaining = if automaton.is_match(haystack.as_str()) {
            haystack.len() + 1
        } else {
            0
        };
        Self {
            automaton,
            haystack,
            remaining,
        }
    }
}

impl Iterator for FromEndScanner<'_> {
    type Item = FindSpot;

    fn next(&mut self) -> Option<FindSpot> {
        while self.remaining > 0 {
            self.remaining -= 1;
            let begin = self.remaining;
            if let Some(end) = self.automaton.longest_match_from(self.haystack, begin) {
                return Some(FindSpot::new(begin, end));
            }
        }
        None
    }
}

/// Shortest matches, left to right, non-overlapping.
///
/// Each result is the match ending first at or after the cursor, trimmed
/// from the left as far as the pattern allows.
pub struct ShortScanner<'a> {
    automaton: &'a Automaton,
    haystack: &'a Haystack<'a>,
    reversed: Haystack<'static>,
    cursor: usize,
}

impl<'a> ShortScanner<'a> {
    /// Scan `haystack` starting at `offset`.
    pub fn new(automaton: &'a Automaton, haystack: &'a Haystack<'a>, offset: usize) -> Self {
        Self {
            automaton,
            haystack,
            reversed: haystack.reversed(),
            cursor: offset,
        }
    }
}

impl Iterator for ShortScanner<'_> {
    type Item = FindSpot;

    fn next(&mut self) -> Option<FindSpot> {
        let end = self
            .automaton
            .first_match_end_from(self.haystack, self.cursor)?;
        let start = self
            .automaton
            .shortest_match_to(&self.reversed, self.cursor, end)?;

        self.cursor = if start == end { end + 1 } else { end };
        Some(FindSpot::new(start, end))
    }
}

/// Shortest matches by end position, right to left.
///
/// For every end offset from the text length down to 0 that some match
/// ends at, yields the shortest match ending there.
pub struct ShortFromEndScanner<'a> {
    automaton: &'a Automaton,
    reversed: Haystack<'static>,
    remaining: usize,
}

impl<'a> ShortFromEndScanner<'a> {
    /// Scan `haystack` backwards from its end.
    pub fn new(automaton: &'a Automaton, haystack: &Haystack<'_>) -> Self {
        let remaining = if automaton.is_match(haystack.as_str()) {
            haystack.len() + 1
        } else {
            0
        };
        Self {
            automaton,
            reversed: haystack.reversed(),
            remaining,
        }
    }
}

impl Iterator for ShortFromEndScanner<'_> {
    type Item = FindSpot;

    fn next(&mut self) -> Option<FindSpot> {
        while self.remaining > 0 {
            self.remaining -= 1;
            let end = self.remaining;
            if let Some(start) = self.automaton.shortest_match_to(&self.reversed, 0, end) {
                return Some(FindSpot::new(start, end));
            }
        }
        None
    }
}
