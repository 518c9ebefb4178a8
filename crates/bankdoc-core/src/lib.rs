//! Core library for Malaysian bank loan document extraction.
//!
//! This crate provides:
//! - OCR text normalization (watermarks, quotes, misread digits, decimals)
//! - Rule-based field extractors for bank names, amounts, addresses,
//!   property, location, title and company details
//! - A named-entity fallback for bank names and states
//! - A document parser merging all of the above with first-writer-wins precedence

pub mod error;
pub mod extract;
pub mod models;
pub mod ner;
pub mod normalize;

pub use error::{BankdocError, ExtractionError, NerError, Result};
pub use extract::{DocumentParser, FieldExtractor, ParseOutcome};
pub use models::{
    AmountField, AmountKind, BankdocConfig, CurrencyStyle, ExtractionConfig, ExtractionRecord,
    FieldKey, FieldValue, InputConfig, NerConfig,
};
pub use ner::{Entity, EntityLabel, EntityRecognizer, Gazetteer, GazetteerRecognizer, NerFallback};
pub use normalize::normalize;
