//! Rule-based field extractors for Malaysian bank loan documents.

pub mod address;
pub mod amounts;
pub mod bank;
pub mod company;
pub mod layouts;
pub mod location;
pub mod patterns;
pub mod property;
pub mod title;

pub use address::{extract_address, AddressExtractor};
pub use amounts::{parse_amount, AmountExtractor, AmountFallback};
pub use bank::{extract_bank_name, BankNameExtractor};
pub use company::CompanyInfoExtractor;
pub use layouts::{Assembly, BankLayout, UOB_LAYOUTS};
pub use location::LocationInfoExtractor;
pub use property::PropertyDetailsExtractor;
pub use title::TitleInfoExtractor;

use regex::Regex;

use crate::models::{ExtractionRecord, FieldKey};

/// Trait for field extractors.
///
/// An extractor reads normalized text and returns only the fields it owns.
/// Merging partial records, and deciding who wins a contested key, is the
/// parser's job.
pub trait FieldExtractor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Extract this extractor's fields from normalized text.
    fn extract(&self, text: &str) -> ExtractionRecord;
}

/// A compiled pattern and the field its first capture group populates.
///
/// Alternatives for the same field are ranked by their position in the
/// table that holds them.
pub struct MatchPattern {
    pub key: FieldKey,
    pub pattern: &'static Regex,
}

impl MatchPattern {
    pub const fn new(key: FieldKey, pattern: &'static Regex) -> Self {
        Self { key, pattern }
    }

    /// Trimmed first capture group, if the pattern matches with a non-empty value.
    pub fn capture(&self, text: &str) -> Option<String> {
        let caps = self.pattern.captures(text)?;
        let value = caps.get(1)?.as_str().trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

/// Run each pattern independently; each sets its own field on a match.
pub(crate) fn extract_labelled(patterns: &[MatchPattern], text: &str) -> ExtractionRecord {
    let mut record = ExtractionRecord::new();
    for rule in patterns {
        if let Some(value) = rule.capture(text) {
            record.set_if_absent(rule.key, value);
        }
    }
    record
}
