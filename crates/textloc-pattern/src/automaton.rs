//! Wildcard automaton backed by `regex`.
//!
//! A compiled wildcard is a flat token list. It is translated once into
//! four regular expressions that the scanners drive:
//! - `greedy`: unanchored, `*` as `.*`; leftmost match with the longest end
//! - `lazy`: unanchored, `*` as `.*?`; leftmost match with the earliest end
//! - `anchored`: greedy, anchored at the start of the searched slice
//! - `backward`: the reversed token list, lazy and anchored, run over the
//!   reversed text to find the shortest match ending at a given offset
//!
//! `regex` works on byte offsets while every result here is in characters;
//! [`Haystack`] converts between the two.

use std::borrow::Cow;

use regex::{Regex, RegexBuilder};

/// Compiled program size limit for one wildcard.
const SIZE_LIMIT: usize = 64 * (1 << 20);

/// One element of a compiled wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A literal character
    Char(char),
    /// `?` - exactly one arbitrary character
    AnyOne,
    /// `*` - zero or more arbitrary characters
    AnyMany,
}

/// Text prepared for searching, with char to byte offset mapping.
#[derive(Debug, Clone)]
pub struct Haystack<'a> {
    text: Cow<'a, str>,
    /// Byte offset of every char boundary, the text length included
    bounds: Vec<usize>,
}

impl<'a> Haystack<'a> {
    /// Prepare `text`.
    pub fn new(text: &'a str) -> Self {
        Self::from_cow(Cow::Borrowed(text))
    }

    fn from_cow(text: Cow<'a, str>) -> Self {
        let bounds = text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(text.len()))
            .collect();
        Self { text, bounds }
    }

    /// The text, characters in reverse order.
    pub fn reversed(&self) -> Haystack<'static> {
        Haystack::from_cow(Cow::Owned(self.text.chars().rev().collect()))
    }

    /// The text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte offset of char offset `offset`, clamped to the text end.
    fn byte(&self, offset: usize) -> usize {
        self.bounds[offset.min(self.len())]
    }

    /// Char offset of a byte offset on a char boundary.
    fn offset(&self, byte: usize) -> usize {
        self.bounds.binary_search(&byte).unwrap_or_else(|i| i)
    }
}

/// Compiled wildcard automaton.
#[derive(Debug, Clone)]
pub struct Automaton {
    tokens: Vec<Token>,
    greedy: Regex,
    lazy: Regex,
    anchored: Regex,
    backward: Regex,
}

impl Automaton {
    /// Build the automaton for a token list.
    ///
    /// Fails only when the translated expression exceeds the size limit.
    pub fn new(tokens: Vec<Token>) -> Result<Self, regex::Error> {
        let forward = translate(tokens.iter(), false);
        let forward_lazy = translate(tokens.iter(), true);
        let backward = translate(tokens.iter().rev(), true);

        Ok(Self {
            greedy: build(&forward)?,
            lazy: build(&forward_lazy)?,
            anchored: build(&format!("^(?:{forward})"))?,
            backward: build(&format!("^(?:{backward})"))?,
            tokens,
        })
    }

    /// The tokens in reading order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Whether the empty string is accepted.
    pub fn accepts_empty(&self) -> bool {
        self.tokens.iter().all(|token| *token == Token::AnyMany)
    }

    /// Whether some match occurs anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.greedy.is_match(text)
    }

    /// Whole-text match.
    pub fn run(&self, text: &str) -> bool {
        self.anchored
            .find(text)
            .is_some_and(|found| found.end() == text.len())
    }

    /// Leftmost match starting at or after `from`, `*` greedy.
    pub fn find_longest(&self, haystack: &Haystack<'_>, from: usize) -> Option<(usize, usize)> {
        if from > haystack.len() {
            return None;
        }
        self.greedy
            .find_at(haystack.as_str(), haystack.byte(from))
            .map(|found| (haystack.offset(found.start()), haystack.offset(found.end())))
    }

    /// Smallest end of any match starting at or after `from`.
    pub fn first_match_end_from(&self, haystack: &Haystack<'_>, from: usize) -> Option<usize> {
        if from > haystack.len() {
            return None;
        }
        self.lazy
            .find_at(haystack.as_str(), haystack.byte(from))
            .map(|found| haystack.offset(found.end()))
    }

    /// End of the longest match beginning at `begin`.
    pub fn longest_match_from(&self, haystack: &Haystack<'_>, begin: usize) -> Option<usize> {
        if begin > haystack.len() {
            return None;
        }
        let start = haystack.byte(begin);
        self.anchored
            .find(&haystack.as_str()[start..])
            .map(|found| haystack.offset(start + found.end()))
    }

    /// Start of the shortest match ending at `end` that starts at or after
    /// `floor`. `reversed` is the searched text reversed.
    pub fn shortest_match_to(
        &self,
        reversed: &Haystack<'_>,
        floor: usize,
        end: usize,
    ) -> Option<usize> {
        let len = reversed.len();
        if floor > end || end > len {
            return None;
        }
        let window_start = reversed.byte(len - end);
        let window_end = reversed.byte(len - floor);
        self.backward
            .find(&reversed.as_str()[window_start..window_end])
            .map(|found| {
                let consumed = reversed.offset(window_start + found.end()) - (len - end);
                end - consumed
            })
    }
}

impl PartialEq for Automaton {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

impl Eq for Automaton {}

/// Regular expression for a token sequence; `.` matches line breaks too.
fn translate<'t>(tokens: impl Iterator<Item = &'t Token>, lazy: bool) -> String {
    let mut pattern = String::from("(?s)");
    for token in tokens {
        match token {
            Token::Char(c) => pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
            Token::AnyOne => pattern.push('.'),
            Token::AnyMany if lazy => pattern.push_str(".*?"),
            Token::AnyMany => pattern.push_str(".*"),
        }
    }
    pattern
}

fn build(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).size_limit(SIZE_LIMIT).build()
}
