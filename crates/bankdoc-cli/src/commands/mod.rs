//! Document extraction commands.

pub mod batch;
pub mod process;
pub mod source;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, warn};

use bankdoc_core::{BankdocConfig, DocumentParser, GazetteerRecognizer};

use source::Source;

/// Arguments for document extraction.
#[derive(Args)]
pub struct ExtractArgs {
    /// Document, directory of documents, or `-` for standard input
    input: PathBuf,

    /// Write JSON results to this file instead of stdout
    output: Option<PathBuf>,

    /// Keep a preview of the cleaned text in each record
    #[arg(long)]
    debug: bool,

    /// Disable the named-entity fallback for bank name and state
    #[arg(long)]
    no_ner: bool,

    /// Fail instead of processing the parent directory of a missing file
    #[arg(long)]
    no_fallback: bool,

    /// Also write a per-file summary CSV (directory input only)
    #[arg(long, value_name = "CSV")]
    summary: Option<PathBuf>,
}

pub fn run(args: ExtractArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(&args, config_path)?;
    let parser = build_parser(&config)?;

    let source = source::resolve(&args.input, config.input.fallback_to_parent_dir)?;
    if args.summary.is_some() && !matches!(source, Source::Directory(_)) {
        warn!("--summary only applies to directory input, ignoring");
    }

    match source {
        Source::Stdin => {
            let record = process::run_stdin(&parser)?;
            write_output(&record, args.output.as_deref())
        }
        Source::File(path) => {
            let record = process::run_file(&path, &parser)?;
            write_output(&record, args.output.as_deref())
        }
        Source::Directory(dir) => {
            let results = batch::run(&dir, &config.input.extension, &parser)?;
            if let Some(summary_path) = &args.summary {
                batch::write_summary(summary_path, &results)?;
                eprintln!(
                    "{} Summary written to {}",
                    style("✓").green(),
                    summary_path.display()
                );
            }
            write_output(&batch::records_by_name(results), args.output.as_deref())
        }
    }
}

/// Load the config file, then apply command-line and environment overrides.
fn load_config(args: &ExtractArgs, config_path: Option<&Path>) -> anyhow::Result<BankdocConfig> {
    let mut config = match config_path {
        Some(path) => BankdocConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => BankdocConfig::default(),
    };

    if args.debug || debug_env_enabled() {
        config.extraction.include_cleaned_text = true;
    }
    if args.no_ner {
        config.ner.enabled = false;
    }
    if args.no_fallback {
        config.input.fallback_to_parent_dir = false;
    }

    config.validate()?;
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

fn debug_env_enabled() -> bool {
    std::env::var_os("DEBUG").is_some_and(|value| !value.is_empty())
}

/// Build the parser once; the recognizer is shared by every document.
fn build_parser(config: &BankdocConfig) -> anyhow::Result<DocumentParser> {
    let parser = DocumentParser::new(config.extraction.clone());
    if !config.ner.enabled {
        return Ok(parser);
    }

    let recognizer = match &config.ner.gazetteer {
        Some(path) => GazetteerRecognizer::from_file(path),
        None => GazetteerRecognizer::malaysian(),
    }
    .context("Failed to load entity recognizer")?;

    Ok(parser.with_recognizer(Arc::new(recognizer)))
}

/// Write pretty JSON to `output`, or to stdout when no file is given.
fn write_output<T: Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    match output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write results to {}", path.display()))?;
            eprintln!(
                "{} Results saved to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
