//! Title, description and property classification.

use super::patterns::{CATEGORY, DESCRIPTION, PROPERTY_TYPE, SUBJECT, TITLE, TITLE_DESCRIPTION};
use super::{extract_labelled, FieldExtractor, MatchPattern};
use crate::models::{ExtractionRecord, FieldKey};

/// Title information extractor.
pub struct TitleInfoExtractor {
    patterns: Vec<MatchPattern>,
}

impl TitleInfoExtractor {
    pub fn new() -> Self {
        Self {
            patterns: vec![
                MatchPattern::new(FieldKey::Description, &DESCRIPTION),
                MatchPattern::new(FieldKey::PropertyType, &PROPERTY_TYPE),
                MatchPattern::new(FieldKey::Category, &CATEGORY),
                MatchPattern::new(FieldKey::TitleDescription, &TITLE_DESCRIPTION),
            ],
        }
    }
}

impl Default for TitleInfoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TitleInfoExtractor {
    fn name(&self) -> &'static str {
        "title_info"
    }

    fn extract(&self, text: &str) -> ExtractionRecord {
        let mut record = ExtractionRecord::new();

        // A "Title Description" label is not a title; keep looking past it.
        let title = TITLE
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .find(|title| {
                !title.is_empty() && !title.to_ascii_lowercase().starts_with("description")
            });
        if let Some(title) = title {
            record.set_if_absent(FieldKey::Title, title);
        }

        record.absorb(extract_labelled(&self.patterns, text));

        if !record.contains(FieldKey::Description) {
            if let Some(caps) = SUBJECT.captures(text) {
                record.set_if_absent(FieldKey::Description, caps[1].trim());
            }
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn labelled_title_fields() {
        let text = "Title: Geran 56789\nProperty Type: Terrace House\nCategory: Building\nTitle Description: Geran Mukim 123";
        let record = TitleInfoExtractor::new().extract(text);

        assert_eq!(record.text(FieldKey::Title), Some("Geran 56789"));
        assert_eq!(record.text(FieldKey::PropertyType), Some("Terrace House"));
        assert_eq!(record.text(FieldKey::Category), Some("Building"));
        assert_eq!(record.text(FieldKey::TitleDescription), Some("Geran Mukim 123"));
        // The description label inside "Title Description" is still a description.
        assert_eq!(record.text(FieldKey::Description), Some("Geran Mukim 123"));
    }

    #[test]
    fn title_description_alone_is_not_a_title() {
        let record = TitleInfoExtractor::new().extract("Title Description: Freehold land");
        assert!(!record.contains(FieldKey::Title));
        assert_eq!(record.text(FieldKey::TitleDescription), Some("Freehold land"));
    }

    #[test]
    fn title_after_title_description_label() {
        let text = "Title Description: Geran Mukim 123\nTitle: Geran 56789";
        let record = TitleInfoExtractor::new().extract(text);
        assert_eq!(record.text(FieldKey::Title), Some("Geran 56789"));
        assert_eq!(record.text(FieldKey::TitleDescription), Some("Geran Mukim 123"));
    }

    #[test]
    fn description_from_subject_line() {
        let text = "Subject: Letter of Offer for Housing Loan. Dear Sir";
        let record = TitleInfoExtractor::new().extract(text);
        assert_eq!(record.text(FieldKey::Description), Some("Letter of Offer for Housing Loan"));
    }
}
