//! Single-document extraction from a file or standard input.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use bankdoc_core::{DocumentParser, ExtractionRecord};

/// Extract one document read from `path`.
pub fn run_file(path: &Path, parser: &DocumentParser) -> anyhow::Result<ExtractionRecord> {
    info!("Processing file: {}", path.display());
    let text = read_document(path)?;
    Ok(parser.extract(&text))
}

/// Extract one document read from standard input.
pub fn run_stdin(parser: &DocumentParser) -> anyhow::Result<ExtractionRecord> {
    info!("Reading from standard input");
    let mut bytes = Vec::new();
    std::io::stdin()
        .read_to_end(&mut bytes)
        .context("Failed to read standard input")?;
    Ok(parser.extract(&String::from_utf8_lossy(&bytes)))
}

/// Read a document, replacing invalid UTF-8 rather than failing.
pub fn read_document(path: &Path) -> anyhow::Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
