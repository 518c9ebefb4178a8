//! Property identifiers: title numbers, parcel and unit details.

use super::patterns::{CAR_PARK_NO, HSD_NO, PARCEL_NO, PTD_NO, RESIDENTIAL_AREA, STOREY_NO, UNIT_NO};
use super::{extract_labelled, FieldExtractor, MatchPattern};
use crate::models::{ExtractionRecord, FieldKey};

/// Property details extractor. Every field has its own label pattern.
pub struct PropertyDetailsExtractor {
    patterns: Vec<MatchPattern>,
}

impl PropertyDetailsExtractor {
    pub fn new() -> Self {
        Self {
            patterns: vec![
                MatchPattern::new(FieldKey::HsdNo, &HSD_NO),
                MatchPattern::new(FieldKey::PtdNo, &PTD_NO),
                MatchPattern::new(FieldKey::ParcelNo, &PARCEL_NO),
                MatchPattern::new(FieldKey::UnitNo, &UNIT_NO),
                MatchPattern::new(FieldKey::StoreyNo, &STOREY_NO),
                MatchPattern::new(FieldKey::CarParkNo, &CAR_PARK_NO),
                MatchPattern::new(FieldKey::ResidentialArea, &RESIDENTIAL_AREA),
            ],
        }
    }
}

impl Default for PropertyDetailsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PropertyDetailsExtractor {
    fn name(&self) -> &'static str {
        "property_details"
    }

    fn extract(&self, text: &str) -> ExtractionRecord {
        extract_labelled(&self.patterns, text)
    }
}
