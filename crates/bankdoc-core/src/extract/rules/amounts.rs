//! Amount extraction for loan facility letters.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, warn};

use super::layouts::{BankLayout, UOB_LAYOUTS};
use super::patterns::{
    AMOUNT, BALANCE, DEPOSIT, EARNEST_DEPOSIT, FACILITY_SECTION, MRTA_AMOUNT,
    QUOTED_DIGIT_GROUPS, SECTION_TERM_LOAN, SECTION_TOTAL, TERM_LOAN_ANYWHERE,
};
use super::FieldExtractor;
use crate::error::ExtractionError;
use crate::models::{AmountField, AmountKind, CurrencyStyle, ExtractionRecord, FieldKey};

/// Parse a matched amount such as `1,000` or `7000006.00`.
///
/// Thousands separators are dropped and a missing fraction becomes `.00`.
pub fn parse_amount(field: FieldKey, raw: &str) -> Result<Decimal, ExtractionError> {
    let parse_error = || ExtractionError::Parse {
        field: field.to_string(),
        value: raw.to_string(),
    };

    if !raw.chars().any(|c| c.is_ascii_digit()) {
        return Err(parse_error());
    }

    let mut digits = raw.replace(',', "");
    if !digits.contains('.') {
        digits.push_str(".00");
    } else if digits.ends_with('.') {
        digits.push_str("00");
    }

    Decimal::from_str(&digits).map_err(|_| parse_error())
}

/// Parse a candidate, logging and discarding it on failure.
fn parse_candidate(field: FieldKey, raw: &str) -> Option<Decimal> {
    match parse_amount(field, raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Discarding amount candidate: {}", e);
            None
        }
    }
}

fn labelled_pattern(kind: AmountKind) -> &'static Regex {
    match kind {
        AmountKind::EarnestDeposit => &EARNEST_DEPOSIT,
        AmountKind::Deposit => &DEPOSIT,
        AmountKind::Amount => &AMOUNT,
        AmountKind::MrtaAmount => &MRTA_AMOUNT,
        AmountKind::Balance => &BALANCE,
    }
}

/// Strategies for finding the facility amount when no label names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountFallback {
    /// First term-loan figure inside the "Approved Limit ... TOTAL" table.
    SectionTermLoan,
    /// The TOTAL figure of that table.
    SectionTotal,
    /// A term-loan figure anywhere in the document.
    TermLoanAnywhere,
    /// Integer and fraction groups separated by stray quotes or a colon.
    QuotedDigitGroups,
}

impl AmountFallback {
    /// Strategies in the order they are tried.
    pub const ALL: [AmountFallback; 4] = [
        AmountFallback::SectionTermLoan,
        AmountFallback::SectionTotal,
        AmountFallback::TermLoanAnywhere,
        AmountFallback::QuotedDigitGroups,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AmountFallback::SectionTermLoan => "section_term_loan",
            AmountFallback::SectionTotal => "section_total",
            AmountFallback::TermLoanAnywhere => "term_loan_anywhere",
            AmountFallback::QuotedDigitGroups => "quoted_digit_groups",
        }
    }

    /// Try this strategy against the whole document.
    pub fn try_extract(self, text: &str, currency: &CurrencyStyle) -> Option<AmountField> {
        let raw = match self {
            AmountFallback::SectionTermLoan => {
                let section = FACILITY_SECTION.find(text)?.as_str();
                SECTION_TERM_LOAN.captures(section)?[1].to_string()
            }
            AmountFallback::SectionTotal => {
                let section = FACILITY_SECTION.find(text)?.as_str();
                SECTION_TOTAL.captures(section)?[1].to_string()
            }
            AmountFallback::TermLoanAnywhere => TERM_LOAN_ANYWHERE.captures(text)?[1].to_string(),
            AmountFallback::QuotedDigitGroups => {
                let caps = QUOTED_DIGIT_GROUPS.captures(text)?;
                format!("{}.{}", &caps[1], &caps[2])
            }
        };

        let value = parse_candidate(FieldKey::Amount, &raw)?;
        debug!("Amount fallback {} matched {}", self.name(), raw);
        Some(AmountField::new(value, &raw, currency))
    }
}

/// Amount field extractor.
///
/// Bank layouts run first, then the labelled patterns for each amount kind,
/// then the fallback chain if `amount` is still missing.
pub struct AmountExtractor {
    currency: CurrencyStyle,
    layouts: &'static [BankLayout],
    fallbacks: Vec<AmountFallback>,
}

impl AmountExtractor {
    pub fn new(currency: CurrencyStyle) -> Self {
        Self {
            currency,
            layouts: UOB_LAYOUTS.as_slice(),
            fallbacks: AmountFallback::ALL.to_vec(),
        }
    }

    /// Replace the fallback chain.
    pub fn with_fallbacks(mut self, fallbacks: Vec<AmountFallback>) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    fn match_layout(&self, text: &str) -> Option<AmountField> {
        for layout in self.layouts {
            match layout.try_extract(text, &self.currency) {
                Ok(Some(field)) => return Some(field),
                Ok(None) => {}
                Err(e) => warn!("Layout {} skipped: {}", layout.name, e),
            }
        }
        None
    }

    fn match_label(&self, kind: AmountKind, text: &str) -> Option<AmountField> {
        let caps = labelled_pattern(kind).captures(text)?;
        let raw = &caps[1];
        let value = parse_candidate(kind.key(), raw)?;
        Some(AmountField::new(value, raw, &self.currency))
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new(CurrencyStyle::default())
    }
}

impl FieldExtractor for AmountExtractor {
    fn name(&self) -> &'static str {
        "amounts"
    }

    fn extract(&self, text: &str) -> ExtractionRecord {
        let mut record = ExtractionRecord::new();

        if let Some(field) = self.match_layout(text) {
            record.set_amount(AmountKind::Amount, field);
        }

        for kind in AmountKind::ALL {
            if record.contains(kind.key()) {
                continue;
            }
            if let Some(field) = self.match_label(kind, text) {
                record.set_amount(kind, field);
            }
        }

        if !record.contains(FieldKey::Amount) {
            if let Some(field) = self
                .fallbacks
                .iter()
                .find_map(|fallback| fallback.try_extract(text, &self.currency))
            {
                record.set_amount(AmountKind::Amount, field);
            }
        }

        record
    }
}
