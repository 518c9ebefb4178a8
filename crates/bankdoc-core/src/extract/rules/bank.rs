//! Bank name detection against a fixed allowlist.

use super::patterns::BANK_NAMES;
use super::FieldExtractor;
use crate::models::{ExtractionRecord, FieldKey};

/// Bank name extractor.
pub struct BankNameExtractor;

impl BankNameExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BankNameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for BankNameExtractor {
    fn name(&self) -> &'static str {
        "bank_name"
    }

    fn extract(&self, text: &str) -> ExtractionRecord {
        let mut record = ExtractionRecord::new();
        if let Some(name) = extract_bank_name(text) {
            record.set_if_absent(FieldKey::BankName, name);
        }
        record
    }
}

/// First known bank name found in `text`, as written there.
pub fn extract_bank_name(text: &str) -> Option<String> {
    BANK_NAMES
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_full_legal_name() {
        let text = "United Overseas Bank (Malaysia) Bhd\nUOB Plaza";
        assert_eq!(
            extract_bank_name(text).as_deref(),
            Some("United Overseas Bank (Malaysia) Bhd")
        );
    }

    #[test]
    fn keeps_document_casing() {
        assert_eq!(extract_bank_name("Dear Sir, MAYBANK hereby").as_deref(), Some("MAYBANK"));
    }

    #[test]
    fn list_order_beats_text_order() {
        // UOB is listed before Maybank, so it wins even though it appears later.
        let text = "Maybank Islamic ... refinanced from UOB";
        assert_eq!(extract_bank_name(text).as_deref(), Some("UOB"));
    }

    #[test]
    fn unknown_bank_is_absent() {
        let record = BankNameExtractor::new().extract("Bank Rakyat letter of offer");
        assert!(record.is_empty());
    }
}
