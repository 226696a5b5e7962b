//! Command line parsing and the subcommands.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use textloc_core::LocatorConfig;
use textloc_document::{Document, DocumentIndex, TextIndex};
use textloc_locator::{ControlKind, Locator, WeightedMatchList};

use crate::schema::SchemaTarget;

/// Locate document elements by textual descriptions.
#[derive(Parser, Debug)]
#[command(
    name = "textloc",
    version,
    about = "Locate document elements by textual descriptions",
    after_help = "The log level is taken from RUST_LOG, else from logging.level of the config."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Arguments of `textloc locate`.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct LocateArgs {
    /// JSON document to search
    #[arg(short, long)]
    pub document: PathBuf,
    /// YAML locator configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Kind of control to look for
    #[arg(short, long, value_enum, default_value_t = ControlKind::Any, ignore_case = true)]
    pub kind: ControlKind,
    /// Locator expression, e.g. "Shipping address > Street" or "[Amount; Row 2]"
    pub expression: String,
}

/// Arguments of `textloc text`.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct TextArgs {
    /// JSON document to render
    #[arg(short, long)]
    pub document: PathBuf,
    /// Render only the element with this id
    #[arg(short, long)]
    pub element: Option<String>,
    /// Leave form-control content out
    #[arg(long)]
    pub without_form_controls: bool,
}

/// The subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Rank the elements matching an expression
    Locate(LocateArgs),
    /// Print the flattened text
    Text(TextArgs),
    /// Print a JSON schema
    Schema {
        /// Which schema to print
        #[arg(value_enum, default_value_t)]
        target: SchemaTarget,
    },
}

impl Command {
    /// Short name for log messages.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Locate(_) => "locate",
            Command::Text(_) => "text",
            Command::Schema { .. } => "schema",
        }
    }

    /// The configuration this command runs with.
    pub fn config(&self) -> anyhow::Result<LocatorConfig> {
        match self {
            Command::Locate(LocateArgs {
                config: Some(path), ..
            }) => LocatorConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            _ => Ok(LocatorConfig::default()),
        }
    }

    /// Run the command, writing its output to `out`.
    pub fn run(&self, config: &LocatorConfig, out: &mut dyn Write) -> anyhow::Result<()> {
        match self {
            Command::Locate(args) => {
                let document = load_document(&args.document)?;
                let matches = locate(&document, config, args.kind, &args.expression)?;
                writeln!(out, "{}", matches.to_json()?)?;
            }
            Command::Text(args) => {
                let document = load_document(&args.document)?;
                writeln!(out, "{}", render_text(&document, args)?)?;
            }
            Command::Schema { target } => {
                writeln!(out, "{}", serde_json::to_string_pretty(&target.schema())?)?;
            }
        }
        Ok(())
    }
}

/// Read and validate a JSON document.
pub fn load_document(path: &Path) -> anyhow::Result<Document> {
    let document = Document::from_file(path)
        .with_context(|| format!("Failed to read document {}", path.display()))?;
    document
        .validate()
        .with_context(|| format!("Rejected document {}", path.display()))?;
    debug!("Loaded document {} ({} top-level nodes)", path.display(), document.body.len());
    Ok(document)
}

/// Index `document` and rank its elements against `expression`.
pub fn locate(
    document: &Document,
    config: &LocatorConfig,
    kind: ControlKind,
    expression: &str,
) -> anyhow::Result<WeightedMatchList> {
    let index = DocumentIndex::new(document);
    let locator = Locator::new(config.clone());
    let matches = locator
        .locate(&index, expression, kind)
        .with_context(|| format!("Cannot evaluate '{expression}'"))?;

    info!("'{}' matched {} elements", expression, matches.len());
    if matches.best().len() > 1 {
        info!("'{}' is ambiguous", expression);
    }
    Ok(matches)
}

/// The flattened text of a document or of one of its elements.
pub fn render_text(document: &Document, args: &TextArgs) -> anyhow::Result<String> {
    let index = DocumentIndex::new(document);
    let Some(id) = &args.element else {
        return Ok(if args.without_form_controls {
            index.text_without_form_controls()
        } else {
            index.text().to_string()
        });
    };

    let element = index.require_element_by_id(id)?;
    let text = if args.without_form_controls {
        index.as_text_without_form_controls(element)
    } else {
        index.as_text(element)
    };
    Ok(text.unwrap_or_default())
}
