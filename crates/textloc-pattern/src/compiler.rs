//! Wildcard compiler.
//!
//! Turns a DOS style wildcard string (`*`, `?` and `\` escapes) into one of
//! three representations. Compilation is total: every input string yields a
//! pattern.

use tracing::warn;

use crate::automaton::{Automaton, Token};

/// The compiled form of a wildcard string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WildcardPattern {
    /// Empty pattern or only unescaped `*`; matches every text
    MatchAll,
    /// No unescaped wildcard; plain text comparison
    Literal(Vec<char>),
    /// Contains `?` or `*` mixed with text
    Compiled {
        /// The automaton
        automaton: Automaton,
        /// Characters any match consumes at least
        min_length: usize,
    },
}

impl WildcardPattern {
    /// Compile a wildcard string.
    pub fn compile(source: &str) -> Self {
        let tokens = tokenize(source);

        if tokens.iter().all(|token| *token == Token::AnyMany) {
            return WildcardPattern::MatchAll;
        }

        if tokens.iter().all(|token| matches!(token, Token::Char(_))) {
            let text = tokens
                .into_iter()
                .filter_map(|token| match token {
                    Token::Char(c) => Some(c),
                    _ => None,
                })
                .collect();
            return WildcardPattern::Literal(text);
        }

        let min_length = tokens
            .iter()
            .filter(|token| **token != Token::AnyMany)
            .count();
        match Automaton::new(collapse_stars(tokens)) {
            Ok(automaton) => WildcardPattern::Compiled {
                automaton,
                min_length,
            },
            Err(e) => {
                warn!("Wildcard '{}' cannot be compiled, comparing it as text: {}", source, e);
                WildcardPattern::Literal(source.chars().collect())
            }
        }
    }

    /// Characters any match consumes at least.
    pub fn min_length(&self) -> usize {
        match self {
            WildcardPattern::MatchAll => 0,
            WildcardPattern::Literal(text) => text.len(),
            WildcardPattern::Compiled { min_length, .. } => *min_length,
        }
    }
}

/// Split a wildcard string into tokens.
///
/// `\*`, `\?` and `\\` produce the escaped character. A backslash before
/// any other character, or at the very end, stays a literal backslash.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(source.len());
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => tokens.push(Token::AnyMany),
            '?' => tokens.push(Token::AnyOne),
            '\\' => match chars.peek() {
                Some(&next) if matches!(next, '*' | '?' | '\\') => {
                    tokens.push(Token::Char(next));
                    chars.next();
                }
                _ => tokens.push(Token::Char('\\')),
            },
            other => tokens.push(Token::Char(other)),
        }
    }
    tokens
}

/// `**` behaves like `*`; keep the state count small.
fn collapse_stars(tokens: Vec<Token>) -> Vec<Token> {
    let mut collapsed: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if token == Token::AnyMany && collapsed.last() == Some(&Token::AnyMany) {
            continue;
        }
        collapsed.push(token);
    }
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(text: &str) -> WildcardPattern {
        WildcardPattern::Literal(text.chars().collect())
    }

    #[test]
    fn test_match_all() {
        assert_eq!(WildcardPattern::compile(""), WildcardPattern::MatchAll);
        assert_eq!(WildcardPattern::compile("*"), WildcardPattern::MatchAll);
        assert_eq!(WildcardPattern::compile("***"), WildcardPattern::MatchAll);
    }

    #[test]
    fn test_literal() {
        assert_eq!(WildcardPattern::compile("Metator"), literal("Metator"));
        assert_eq!(WildcardPattern::compile("a (b) [c] +^$."), literal("a (b) [c] +^$."));
    }

    #[test]
    fn test_escapes_yield_literal() {
        assert_eq!(WildcardPattern::compile("\\*"), literal("*"));
        assert_eq!(WildcardPattern::compile("\\?"), literal("?"));
        assert_eq!(WildcardPattern::compile("\\\\"), literal("\\"));
        assert_eq!(WildcardPattern::compile("a\\*b"), literal("a*b"));
    }

    #[test]
    fn test_lonely_backslash_stays() {
        assert_eq!(WildcardPattern::compile("a\\b"), literal("a\\b"));
        assert_eq!(WildcardPattern::compile("ab\\"), literal("ab\\"));
    }

    #[test]
    fn test_compiled_min_length() {
        let pattern = WildcardPattern::compile("Me*t?r");
        assert!(matches!(pattern, WildcardPattern::Compiled { .. }));
        assert_eq!(pattern.min_length(), 5);

        assert_eq!(WildcardPattern::compile("?").min_length(), 1);
        assert_eq!(WildcardPattern::compile("*a*").min_length(), 1);
        assert_eq!(WildcardPattern::compile("\\**").min_length(), 1);
    }

    #[test]
    fn test_literal_min_length_counts_chars() {
        assert_eq!(WildcardPattern::compile("äöü").min_length(), 3);
        assert_eq!(WildcardPattern::compile("").min_length(), 0);
    }

    #[test]
    fn test_stars_are_collapsed() {
        match WildcardPattern::compile("a***b") {
            WildcardPattern::Compiled { automaton, .. } => {
                assert_eq!(
                    automaton.tokens(),
                    &[Token::Char('a'), Token::AnyMany, Token::Char('b')]
                );
            }
            other => panic!("unexpected pattern {other:?}"),
        }
    }

    #[test]
    fn test_compilation_is_deterministic() {
        assert_eq!(
            WildcardPattern::compile("x?y*z"),
            WildcardPattern::compile("x?y*z")
        );
    }
}
