//! Batch extraction over every document in a directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use console::style;
use glob::{glob, Pattern};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use bankdoc_core::{DocumentParser, ExtractionRecord, FieldKey};

use super::process::read_document;

/// Result of processing a single file.
pub struct ProcessResult {
    pub name: String,
    pub record: ExtractionRecord,
    pub error: Option<String>,
    pub processing_time_ms: u64,
}

/// Documents in `dir` with the given extension, sorted by path.
pub fn find_documents(dir: &Path, extension: &str) -> anyhow::Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&dir.to_string_lossy()),
        Pattern::escape(extension)
    );

    let mut files: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Extract every document in `dir`.
///
/// An unreadable file is reported and contributes an empty record.
pub fn run(dir: &Path, extension: &str, parser: &DocumentParser) -> anyhow::Result<Vec<ProcessResult>> {
    let start = Instant::now();
    let files = find_documents(dir, extension)?;

    eprintln!(
        "{} Found {} .{} files in {}",
        style("ℹ").blue(),
        files.len(),
        extension,
        dir.display()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.set_message(name.clone());

        let (record, error) = match read_document(&path) {
            Ok(text) => (parser.extract(&text), None),
            Err(e) => {
                warn!("Failed to process {}: {:#}", path.display(), e);
                (ExtractionRecord::new(), Some(format!("{:#}", e)))
            }
        };
        debug!("{}: {} field(s)", name, record.len());

        results.push(ProcessResult {
            name,
            record,
            error,
            processing_time_ms: file_start.elapsed().as_millis() as u64,
        });
        pb.inc(1);
    }
    pb.finish_and_clear();

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    eprintln!(
        "{} Processed {} files in {:?} ({} failed)",
        style("✓").green(),
        results.len(),
        start.elapsed(),
        style(failed).red()
    );

    Ok(results)
}

/// Records keyed by file name.
pub fn records_by_name(results: Vec<ProcessResult>) -> BTreeMap<String, ExtractionRecord> {
    results.into_iter().map(|r| (r.name, r.record)).collect()
}

pub fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "fields",
        "bank_name",
        "amount",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let status = if result.error.is_some() { "error" } else { "success" };
        wtr.write_record([
            result.name.as_str(),
            status,
            &result.record.len().to_string(),
            result.record.text(FieldKey::BankName).unwrap_or(""),
            &result
                .record
                .decimal(FieldKey::Amount)
                .map(|d| d.to_string())
                .unwrap_or_default(),
            &result.processing_time_ms.to_string(),
            result.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
