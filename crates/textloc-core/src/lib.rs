//! # textloc-core
//!
//! Core types for textloc.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other textloc crates. It provides:
//!
//! - Positional types ([`FindSpot`])
//! - The stable [`FoundType`] vocabulary used for ranking and reports
//! - Locator configuration loaded from YAML
//! - Error types
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other textloc crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod find_spot;
pub mod found_type;

// Re-export commonly used types
pub use config::{AggregationSettings, LocatorConfig, LoggingSettings, MatchingSettings, Ranking};
pub use error::{Error, Result};
pub use find_spot::FindSpot;
pub use found_type::FoundType;
