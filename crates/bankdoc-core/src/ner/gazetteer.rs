//! Dictionary-backed recognizer for Malaysian organizations and places.

use std::cmp::Reverse;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Entity, EntityLabel, EntityRecognizer};
use crate::error::NerError;

/// States and federal territories, including common alternate spellings.
const MALAYSIAN_PLACES: &[&str] = &[
    "Johor",
    "Kedah",
    "Kelantan",
    "Melaka",
    "Malacca",
    "Negeri Sembilan",
    "Pahang",
    "Pulau Pinang",
    "Penang",
    "Perak",
    "Perlis",
    "Sabah",
    "Sarawak",
    "Selangor",
    "Terengganu",
    "Kuala Lumpur",
    "Labuan",
    "Putrajaya",
];

/// Leading words that make a capitalised phrase generic ("The Bank").
const DETERMINERS: &[&str] = &["The", "This", "That", "Our", "Your", "Said"];

lazy_static! {
    // Capitalised words on one line ending in an organization suffix
    static ref ORGANIZATION_PHRASE: Regex = Regex::new(
        r"\b[A-Z][\w&'.-]*(?:[ \t]+[A-Z][\w&'.-]*){0,4}[ \t]+(?:Bank|Berhad|Bhd)\b"
    ).unwrap();
}

/// Organization and place names known up front.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Gazetteer {
    pub organizations: Vec<String>,
    pub places: Vec<String>,
}

impl Gazetteer {
    /// The built-in list of Malaysian states and federal territories.
    pub fn malaysia() -> Self {
        Self {
            organizations: Vec::new(),
            places: MALAYSIAN_PLACES.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Load a gazetteer from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, NerError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NerError::ModelLoad(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| NerError::ModelLoad(format!("{}: {}", path.display(), e)))
    }

    /// Add the entries of `other`, skipping duplicates.
    pub fn extend(&mut self, other: Gazetteer) {
        for org in other.organizations {
            if !self.organizations.contains(&org) {
                self.organizations.push(org);
            }
        }
        for place in other.places {
            if !self.places.contains(&place) {
                self.places.push(place);
            }
        }
    }
}

/// Recognizer combining an organization-suffix heuristic with gazetteer lookups.
pub struct GazetteerRecognizer {
    organizations: Option<Regex>,
    places: Option<Regex>,
}

impl GazetteerRecognizer {
    /// Compile the gazetteer into matchers.
    pub fn new(gazetteer: &Gazetteer) -> Result<Self, NerError> {
        Ok(Self {
            organizations: literal_matcher(&gazetteer.organizations)?,
            places: literal_matcher(&gazetteer.places)?,
        })
    }

    /// Recognizer over the built-in Malaysian gazetteer.
    pub fn malaysian() -> Result<Self, NerError> {
        Self::new(&Gazetteer::malaysia())
    }

    /// Built-in gazetteer extended with the entries of a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, NerError> {
        let mut gazetteer = Gazetteer::malaysia();
        gazetteer.extend(Gazetteer::from_file(path)?);
        debug!(
            "Loaded gazetteer from {} ({} organizations, {} places)",
            path.display(),
            gazetteer.organizations.len(),
            gazetteer.places.len()
        );
        Self::new(&gazetteer)
    }
}

/// One case-sensitive, word-bounded alternation; longest names first.
fn literal_matcher(names: &[String]) -> Result<Option<Regex>, NerError> {
    let mut names: Vec<&str> = names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .collect();
    if names.is_empty() {
        return Ok(None);
    }
    names.sort_by(|a, b| b.len().cmp(&a.len()));

    let alternation = names
        .iter()
        .map(|n| regex::escape(n))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alternation})\b"))
        .map(Some)
        .map_err(|e| NerError::ModelLoad(e.to_string()))
}

/// Drop leading determiners; `None` if only the suffix is left.
fn organization_name(phrase: &str) -> Option<(usize, &str)> {
    let mut offset = 0;
    let mut rest = phrase;
    while let Some((word, tail)) = rest.split_once([' ', '\t']) {
        if !DETERMINERS.contains(&word) {
            break;
        }
        let trimmed = tail.trim_start();
        offset += rest.len() - trimmed.len();
        rest = trimmed;
    }
    rest.contains([' ', '\t']).then_some((offset, rest))
}

impl EntityRecognizer for GazetteerRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, NerError> {
        let mut entities = Vec::new();

        for m in ORGANIZATION_PHRASE.find_iter(text) {
            if let Some((offset, name)) = organization_name(m.as_str()) {
                entities.push(Entity {
                    label: EntityLabel::Organization,
                    text: name.to_string(),
                    start: m.start() + offset,
                    end: m.end(),
                });
            }
        }

        let lookups = [
            (&self.organizations, EntityLabel::Organization),
            (&self.places, EntityLabel::Place),
        ];
        for (matcher, label) in lookups {
            let Some(matcher) = matcher else { continue };
            entities.extend(matcher.find_iter(text).map(|m| Entity {
                label: label.clone(),
                text: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
            }));
        }

        // Text order; the longest span wins among entities sharing a start.
        entities.sort_by_key(|e| (e.start, Reverse(e.end)));
        Ok(entities)
    }
}
