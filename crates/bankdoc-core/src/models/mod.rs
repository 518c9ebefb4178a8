//! Data models for extraction output and configuration.

pub mod config;
pub mod record;

pub use config::{BankdocConfig, ExtractionConfig, InputConfig, NerConfig};
pub use record::{AmountField, AmountKind, CurrencyStyle, ExtractionRecord, FieldKey, FieldValue};
