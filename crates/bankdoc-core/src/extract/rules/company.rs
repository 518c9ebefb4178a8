//! Company registration details.

use super::patterns::{COMPANY_NAME, COMPANY_REG_NO};
use super::{FieldExtractor, MatchPattern};
use crate::models::{ExtractionRecord, FieldKey};

/// Company information extractor.
pub struct CompanyInfoExtractor;

impl CompanyInfoExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CompanyInfoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CompanyInfoExtractor {
    fn name(&self) -> &'static str {
        "company_info"
    }

    fn extract(&self, text: &str) -> ExtractionRecord {
        let mut record = ExtractionRecord::new();

        if let Some(reg_no) = MatchPattern::new(FieldKey::CompanyRegNo, &COMPANY_REG_NO).capture(text) {
            record.set_if_absent(FieldKey::CompanyRegNo, reg_no);
        }

        // Canonical form regardless of "Sdn. Bhd." or "Berhad" spelling
        if let Some(caps) = COMPANY_NAME.captures(text) {
            let name = caps[1].trim();
            let number = caps[2].trim();
            record.set_if_absent(FieldKey::CompanyName, format!("{name} Sdn Bhd ({number})"));
        }

        record
    }
}
