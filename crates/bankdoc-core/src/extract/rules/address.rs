//! Property and correspondence address extraction.

use super::patterns::{ADDRESS_PATTERNS, OFFICE_MARKER, POSTCODE};
use super::FieldExtractor;
use crate::models::{ExtractionRecord, FieldKey};

/// Lines collected after the office marker before giving up on a postcode.
const MAX_LETTERHEAD_LINES: usize = 6;

/// Address extractor.
pub struct AddressExtractor;

impl AddressExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AddressExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AddressExtractor {
    fn name(&self) -> &'static str {
        "address"
    }

    fn extract(&self, text: &str) -> ExtractionRecord {
        let mut record = ExtractionRecord::new();
        if let Some(address) = extract_address(text) {
            record.set_if_absent(FieldKey::Address, address);
        }
        record
    }
}

/// Extract an address from `text`.
///
/// Single-line shapes are tried first; a letterhead spread over several
/// lines is the last resort.
pub fn extract_address(text: &str) -> Option<String> {
    ADDRESS_PATTERNS
        .iter()
        .find_map(|pattern| {
            let caps = pattern.captures(text)?;
            let matched = caps.get(1).or_else(|| caps.get(0))?;
            let address = strip_quotes(matched.as_str());
            (!address.is_empty()).then_some(address)
        })
        .or_else(|| letterhead_address(text))
}

fn strip_quotes(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(*c, '\u{2018}' | '\u{2019}' | '\u{201c}' | '\u{201d}'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Join the lines from the office marker down to the first postcode line.
fn letterhead_address(text: &str) -> Option<String> {
    let lines = text
        .lines()
        .map(str::trim)
        .skip_while(|line| !OFFICE_MARKER.is_match(line))
        .filter(|line| !line.is_empty());

    let mut collected = Vec::new();
    for line in lines {
        collected.push(line);
        if POSTCODE.is_match(line) || collected.len() >= MAX_LETTERHEAD_LINES {
            break;
        }
    }

    (!collected.is_empty()).then(|| collected.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn located_at_label() {
        let text = "The property located at No. 5, Jalan Mawar\nnext line";
        assert_eq!(extract_address(text).as_deref(), Some("No. 5, Jalan Mawar"));
    }

    #[test]
    fn address_label_with_colon() {
        let text = "Address: 12 Jalan SS2/24, Petaling Jaya";
        assert_eq!(extract_address(text).as_deref(), Some("12 Jalan SS2/24, Petaling Jaya"));
    }

    #[test]
    fn numbered_street_with_postcode() {
        let text = "Borrower residing at\nNo. 12 Jalan Bukit, Taman Melawati, 53100 Kuala Lumpur";
        assert_eq!(
            extract_address(text).as_deref(),
            Some("No. 12 Jalan Bukit, Taman Melawati, 53100")
        );
    }

    #[test]
    fn property_at_street_keyword() {
        let text = "Charge over the property at Lot 5 Jalan Ampang Heights";
        assert_eq!(extract_address(text).as_deref(), Some("Lot 5 Jalan Ampang Heights"));
    }

    #[test]
    fn level_with_three_parts_and_postcode() {
        let text = "Level 8, Menara Hap Seng, Jalan P. Ramlee, Kuala Lumpur 50250";
        assert_eq!(
            extract_address(text).as_deref(),
            Some("Level 8, Menara Hap Seng, Jalan P. Ramlee, Kuala Lumpur 50250")
        );
    }

    #[test]
    fn uob_plaza_single_line() {
        let text = "Level 12, UOB Plaza 1 Kuala Lumpur No. 7 Jalan Raja Laut, 50350 Kuala Lumpur";
        assert_eq!(
            extract_address(text).as_deref(),
            Some("Level 12, UOB Plaza 1 Kuala Lumpur No. 7 Jalan Raja Laut, 50350")
        );
    }

    #[test]
    fn strips_typographic_quotes() {
        let text = "situated at \u{201c}Lot 8, Kampung Baru\u{201d}";
        assert_eq!(extract_address(text).as_deref(), Some("Lot 8, Kampung Baru"));
    }

    #[test]
    fn multi_line_letterhead() {
        let text = "Level 12, UOB Plaza 1\nNo. 7 Jalan Raja Laut\n50350 Kuala Lumpur\nDear Sir";
        assert_eq!(
            extract_address(text).as_deref(),
            Some("Level 12, UOB Plaza 1 No. 7 Jalan Raja Laut 50350 Kuala Lumpur")
        );
    }

    #[test]
    fn letterhead_without_postcode_is_bounded() {
        let text = "Level 3, UOB Plaza\na\nb\nc\nd\ne\nf\ng";
        assert_eq!(
            extract_address(text).as_deref(),
            Some("Level 3, UOB Plaza a b c d e")
        );
    }

    #[test]
    fn no_address() {
        assert!(AddressExtractor::new().extract("Dear Sir, facility offer").is_empty());
    }
}
