//! Named-entity fallback for fields the rules could not fill.
//!
//! The recognizer is an injected collaborator: the parser only consumes
//! organization and place entities, and only for `bank_name` and `state`.

mod gazetteer;

pub use gazetteer::{Gazetteer, GazetteerRecognizer};

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::NerError;
use crate::models::{ExtractionRecord, FieldKey};

/// Entity class reported by a recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityLabel {
    Organization,
    Place,
    Other(String),
}

impl EntityLabel {
    /// Map a conventional NER label (`ORG`, `GPE`, `LOC`, ...) to a class.
    pub fn from_label(label: &str) -> Self {
        match label {
            "ORG" => EntityLabel::Organization,
            "GPE" | "LOC" => EntityLabel::Place,
            other => EntityLabel::Other(other.to_string()),
        }
    }
}

/// A recognized span of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub label: EntityLabel,
    pub text: String,
    /// Byte offsets into the recognized text.
    pub start: usize,
    pub end: usize,
}

/// Trait for named-entity recognizers.
pub trait EntityRecognizer: Send + Sync {
    /// Recognize entities in `text`, in text order.
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, NerError>;
}

/// Fills `bank_name` and `state` from recognized entities.
#[derive(Clone)]
pub struct NerFallback {
    recognizer: Arc<dyn EntityRecognizer>,
}

impl NerFallback {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Apply the fallback to `record`. Returns the number of fields filled.
    ///
    /// A recognizer failure is logged and leaves the record untouched.
    pub fn apply(&self, text: &str, record: &mut ExtractionRecord) -> usize {
        if record.contains(FieldKey::BankName) && record.contains(FieldKey::State) {
            debug!("bank_name and state already set, skipping NER");
            return 0;
        }

        let entities = match self.recognizer.recognize(text) {
            Ok(entities) => entities,
            Err(e) => {
                warn!("NER fallback skipped: {}", e);
                return 0;
            }
        };

        let first = |label: EntityLabel| {
            entities
                .iter()
                .find(|entity| entity.label == label)
                .map(|entity| entity.text.clone())
        };

        let mut filled = 0;
        if let Some(org) = first(EntityLabel::Organization) {
            if record.set_if_absent(FieldKey::BankName, org) {
                filled += 1;
            }
        }
        if let Some(place) = first(EntityLabel::Place) {
            if record.set_if_absent(FieldKey::State, place) {
                filled += 1;
            }
        }

        debug!("NER fallback filled {} field(s) from {} entities", filled, entities.len());
        filled
    }
}
