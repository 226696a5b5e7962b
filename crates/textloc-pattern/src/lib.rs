//! # textloc-pattern
//!
//! Wildcard pattern engine for textloc.
//!
//! This crate provides:
//! - A compiler classifying wildcard strings (`*`, `?`, `\` escapes) into
//!   match-all, literal and automaton-backed patterns
//! - An automaton built on `regex` with four scan modes (standard, from-end,
//!   short and short-from-end)
//! - The [`SearchPattern`] facade with the positional and counting queries
//!   used for scoring
//! - A thread-safe [`PatternCache`]
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends only on textloc-core.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod automaton;
pub mod cache;
pub mod compiler;
pub mod scan;
pub mod search_pattern;

// Re-export commonly used types
pub use automaton::{Automaton, Haystack, Token};
pub use cache::{CacheStats, PatternCache};
pub use compiler::WildcardPattern;
pub use scan::{FromEndScanner, ShortFromEndScanner, ShortScanner, StandardScanner};
pub use search_pattern::SearchPattern;
