//! textloc command line library
//!
//! Argument parsing with clap, the subcommands and the schema output of
//! the `textloc` binary. The binary itself is in main.rs.

pub mod commands;
pub mod schema;

// Re-export commonly used types
pub use commands::{load_document, locate, render_text, Cli, Command, LocateArgs, TextArgs};
pub use schema::{SchemaTarget, SchemaTransformer};
