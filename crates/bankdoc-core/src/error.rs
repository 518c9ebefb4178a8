//! Error types for the bankdoc-core library.

use thiserror::Error;

/// Main error type for the bankdoc library.
#[derive(Error, Debug)]
pub enum BankdocError {
    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Named-entity recognizer error.
    #[error("NER error: {0}")]
    Ner(#[from] NerError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning a matched candidate into a field value.
///
/// These never abort a document: the extractor that hits one logs it and
/// moves on to its next candidate or strategy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A matched digit group did not parse as a decimal amount.
    #[error("failed to parse {field}: {value:?}")]
    Parse { field: String, value: String },

    /// A bank layout matched but its groups could not be reassembled.
    #[error("layout {layout} produced no usable digits")]
    Layout { layout: String },
}

/// Errors related to the named-entity recognizer.
#[derive(Error, Debug)]
pub enum NerError {
    /// The recognizer (or its gazetteer) could not be loaded.
    #[error("failed to load recognizer: {0}")]
    ModelLoad(String),

    /// Recognition failed for a document.
    #[error("recognition failed: {0}")]
    Recognition(String),
}

/// Result type for the bankdoc library.
pub type Result<T> = std::result::Result<T, BankdocError>;
