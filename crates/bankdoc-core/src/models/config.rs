//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::record::CurrencyStyle;
use crate::error::BankdocError;

/// Main configuration for bankdoc.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BankdocConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Named-entity fallback configuration.
    pub ner: NerConfig,

    /// Input discovery configuration.
    pub input: InputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Keep a `_cleaned_text` preview of the normalized text in the output.
    pub include_cleaned_text: bool,

    /// Number of characters kept in the preview.
    pub preview_chars: usize,

    /// Currency rendering for print-as and in-words strings.
    pub currency: CurrencyStyle,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            include_cleaned_text: false,
            preview_chars: 200,
            currency: CurrencyStyle::default(),
        }
    }
}

/// Named-entity fallback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NerConfig {
    /// Run the recognizer for fields the rules left unset.
    pub enabled: bool,

    /// JSON gazetteer extending the built-in organization and place lists.
    pub gazetteer: Option<PathBuf>,
}

impl Default for NerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            gazetteer: None,
        }
    }
}

/// Input discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// File extension picked up when processing a directory.
    pub extension: String,

    /// Process the parent directory when a named file does not exist.
    pub fallback_to_parent_dir: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extension: "txt".to_string(),
            fallback_to_parent_dir: true,
        }
    }
}

impl BankdocConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Reject settings the pipeline cannot work with.
    pub fn validate(&self) -> crate::Result<()> {
        if self.input.extension.trim().is_empty() {
            return Err(BankdocError::Config("input.extension must not be empty".to_string()));
        }
        if self.extraction.currency.code.trim().is_empty() {
            return Err(BankdocError::Config(
                "extraction.currency.code must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
