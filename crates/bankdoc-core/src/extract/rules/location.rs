//! District, state and land office details.

use super::patterns::{DISTRICT, LAND_OFFICE, POSTCODE_PLACE, STATE, SUB_DISTRICT, TENURE};
use super::{extract_labelled, FieldExtractor, MatchPattern};
use crate::models::{ExtractionRecord, FieldKey};

/// Location extractor.
pub struct LocationInfoExtractor {
    patterns: Vec<MatchPattern>,
}

impl LocationInfoExtractor {
    pub fn new() -> Self {
        Self {
            patterns: vec![
                MatchPattern::new(FieldKey::State, &STATE),
                MatchPattern::new(FieldKey::SubDistrict, &SUB_DISTRICT),
                MatchPattern::new(FieldKey::LandOffice, &LAND_OFFICE),
                MatchPattern::new(FieldKey::Tenure, &TENURE),
            ],
        }
    }
}

impl Default for LocationInfoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LocationInfoExtractor {
    fn name(&self) -> &'static str {
        "location_info"
    }

    fn extract(&self, text: &str) -> ExtractionRecord {
        let mut record = ExtractionRecord::new();
        if let Some(district) = district(text) {
            record.set_if_absent(FieldKey::District, district);
        }
        record.absorb(extract_labelled(&self.patterns, text));

        // "50350 Kuala Lumpur, Malaysia" style address lines
        if !record.contains(FieldKey::State) {
            if let Some(caps) = POSTCODE_PLACE.captures(text) {
                record.set_if_absent(FieldKey::State, caps[2].trim());
            }
        }

        record
    }
}

/// First "District of" value that is not part of a sub-district label.
fn district(text: &str) -> Option<&str> {
    DISTRICT
        .captures_iter(text)
        .filter(|caps| caps.get(1).is_none())
        .map(|caps| caps.get(2).map_or("", |m| m.as_str()).trim())
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn labelled_location_fields() {
        let text = "Mukim of Damansara, Sub-District of Bukit Raja, District of Petaling, State of Selangor\nLand Office of Petaling Jaya\nTenure: Freehold";
        let record = LocationInfoExtractor::new().extract(text);

        assert_eq!(record.text(FieldKey::District), Some("Petaling"));
        assert_eq!(record.text(FieldKey::SubDistrict), Some("Bukit Raja"));
        assert_eq!(record.text(FieldKey::State), Some("Selangor"));
        assert_eq!(record.text(FieldKey::LandOffice), Some("Petaling Jaya"));
        assert_eq!(record.text(FieldKey::Tenure), Some("Freehold"));
    }

    #[test]
    fn spaced_sub_district_is_not_a_district() {
        let text = "Sub District of Damansara, District of Petaling";
        let record = LocationInfoExtractor::new().extract(text);
        assert_eq!(record.text(FieldKey::District), Some("Petaling"));
        assert_eq!(record.text(FieldKey::SubDistrict), Some("Damansara"));
    }

    #[test]
    fn sub_district_alone_leaves_district_unset() {
        let record = LocationInfoExtractor::new().extract("Sub District of Damansara");
        assert!(!record.contains(FieldKey::District));
    }

    #[test]
    fn state_from_postcode_line() {
        let record = LocationInfoExtractor::new().extract("50350 Kuala Lumpur, Malaysia");
        assert_eq!(record.text(FieldKey::State), Some("Kuala Lumpur"));
    }

    #[test]
    fn labelled_state_beats_postcode_line() {
        let text = "State of Johor\n50350 Kuala Lumpur, Malaysia";
        let record = LocationInfoExtractor::new().extract(text);
        assert_eq!(record.text(FieldKey::State), Some("Johor"));
    }
}
