//! Field extraction from normalized loan document text.

mod parser;
pub mod rules;

pub use parser::{DocumentParser, ParseOutcome};
pub use rules::FieldExtractor;
