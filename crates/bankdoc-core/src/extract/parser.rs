//! Document parser running the normalizer, the rule extractors and the
//! NER fallback in precedence order.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use super::rules::{
    AddressExtractor, AmountExtractor, BankNameExtractor, CompanyInfoExtractor, FieldExtractor,
    LocationInfoExtractor, PropertyDetailsExtractor, TitleInfoExtractor,
};
use crate::models::{ExtractionConfig, ExtractionRecord, FieldKey};
use crate::ner::{EntityRecognizer, NerFallback};
use crate::normalize::{normalize, preview};

/// Result of parsing one document.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Extracted fields.
    pub record: ExtractionRecord,
    /// The text the extractors saw.
    pub normalized_text: String,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
    /// Extractors that contributed at least one field, in precedence order.
    pub contributors: Vec<&'static str>,
}

/// Parser for one loan document at a time.
///
/// Extractors run in a fixed order and the first value written for a key
/// wins, so an earlier extractor always beats a later one and the NER
/// fallback only fills what the rules left empty.
pub struct DocumentParser {
    extractors: Vec<Box<dyn FieldExtractor>>,
    ner: Option<NerFallback>,
    include_cleaned_text: bool,
    preview_chars: usize,
}

impl DocumentParser {
    /// Create a parser with the standard extractors and no recognizer.
    pub fn new(config: ExtractionConfig) -> Self {
        let extractors: Vec<Box<dyn FieldExtractor>> = vec![
            Box::new(BankNameExtractor::new()),
            Box::new(AmountExtractor::new(config.currency)),
            Box::new(AddressExtractor::new()),
            Box::new(PropertyDetailsExtractor::new()),
            Box::new(LocationInfoExtractor::new()),
            Box::new(TitleInfoExtractor::new()),
            Box::new(CompanyInfoExtractor::new()),
        ];

        Self {
            extractors,
            ner: None,
            include_cleaned_text: config.include_cleaned_text,
            preview_chars: config.preview_chars,
        }
    }

    /// Use `recognizer` to fill `bank_name` and `state` when the rules miss them.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        self.ner = Some(NerFallback::new(recognizer));
        self
    }

    /// Keep a `_cleaned_text` preview in the record.
    pub fn with_cleaned_text(mut self, include: bool) -> Self {
        self.include_cleaned_text = include;
        self
    }

    /// Names of the extractors in precedence order.
    pub fn extractor_names(&self) -> Vec<&'static str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }

    /// Parse raw OCR text.
    pub fn parse(&self, raw: &str) -> ParseOutcome {
        let start = Instant::now();
        info!("Parsing document from {} characters of text", raw.len());

        let text = normalize(raw);
        let mut record = ExtractionRecord::new();
        let mut contributors = Vec::new();

        for extractor in &self.extractors {
            let partial = extractor.extract(&text);
            let found = partial.len();
            let kept = record.absorb(partial);
            debug!("{}: found {} field(s), kept {}", extractor.name(), found, kept);
            if kept > 0 {
                contributors.push(extractor.name());
            }
        }

        if let Some(ner) = &self.ner {
            if ner.apply(&text, &mut record) > 0 {
                contributors.push("ner");
            }
        }

        if self.include_cleaned_text {
            record.set_if_absent(FieldKey::CleanedText, preview(&text, self.preview_chars));
        }

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Extracted {} field(s) in {} ms from {:?}",
            record.len(),
            processing_time_ms,
            contributors
        );

        ParseOutcome {
            record,
            normalized_text: text,
            processing_time_ms,
            contributors,
        }
    }

    /// Parse raw OCR text and keep only the record.
    pub fn extract(&self, raw: &str) -> ExtractionRecord {
        self.parse(raw).record
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ner::GazetteerRecognizer;
    use pretty_assertions::assert_eq;

    #[test]
    fn extractors_run_in_precedence_order() {
        assert_eq!(
            DocumentParser::default().extractor_names(),
            vec![
                "bank_name",
                "amounts",
                "address",
                "property_details",
                "location_info",
                "title_info",
                "company_info"
            ]
        );
    }

    #[test]
    fn cleaned_text_only_when_requested() {
        let raw = "Maybank  CamScanner letter";

        let record = DocumentParser::default().extract(raw);
        assert!(!record.contains(FieldKey::CleanedText));

        let record = DocumentParser::default().with_cleaned_text(true).extract(raw);
        assert_eq!(record.text(FieldKey::CleanedText), Some("Maybank letter"));
    }

    #[test]
    fn cleaned_text_preview_is_truncated() {
        let config = ExtractionConfig {
            include_cleaned_text: true,
            preview_chars: 7,
            ..ExtractionConfig::default()
        };
        let record = DocumentParser::new(config).extract("Maybank letter of offer");
        assert_eq!(record.text(FieldKey::CleanedText), Some("Maybank..."));
    }

    #[test]
    fn reports_contributors() {
        let raw = "Maybank\nDistrict of Petaling\nKuala Lumpur branch";
        let parser = DocumentParser::default()
            .with_recognizer(Arc::new(GazetteerRecognizer::malaysian().unwrap()));
        let outcome = parser.parse(raw);

        assert_eq!(outcome.contributors, vec!["bank_name", "location_info", "ner"]);
        assert_eq!(outcome.record.text(FieldKey::State), Some("Kuala Lumpur"));
        assert_eq!(outcome.normalized_text, raw);
    }

    #[test]
    fn empty_document_yields_empty_record() {
        let outcome = DocumentParser::default().parse("");
        assert!(outcome.record.is_empty());
        assert!(outcome.contributors.is_empty());
    }
}
