//! # textloc
//!
//! Locate elements of a document by human-readable textual descriptions.
//!
//! ## Overview
//!
//! The binary provides:
//! - `locate`: rank the elements of a JSON document against an expression
//! - `text`: print the flattened text the locator works on
//! - `schema`: print the JSON schema of documents or results
//!
//! ## Architecture
//!
//! This is Layer 4 - the command line front end over:
//! - textloc-core: Errors, configuration, found types
//! - textloc-document: Document model and text index
//! - textloc-locator: Expression parsing, strategies and ranking

use clap::Parser;
use textloc::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let command = Cli::parse().command;
    let config = command.config()?;

    // Logs go to stderr so that stdout stays machine readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "textloc v{} running {}",
        env!("CARGO_PKG_VERSION"),
        command.name()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    command.run(&config, &mut out).map_err(|e| {
        tracing::error!("{} failed: {:#}", command.name(), e);
        e
    })?;

    Ok(())
}
