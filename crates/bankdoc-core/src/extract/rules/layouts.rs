//! Garbled facility-table layouts that need bespoke digit reassembly.
//!
//! Each layout is data: a pattern and the rule that rebuilds the amount
//! from its capture groups. Supporting another bank's scanned template is a
//! matter of adding a table entry.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use rust_decimal::Decimal;
use tracing::debug;

use super::amounts::parse_amount;
use crate::error::ExtractionError;
use crate::models::{AmountField, CurrencyStyle, FieldKey};

/// How a layout's capture groups become a value and a display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assembly {
    /// Three groups: thousands (may hold commas), three units digits, fraction.
    /// `"7000,006:00"` reads as `7000006.00`.
    SplitThousands,
    /// Four groups of 1+/3/3/2 digits with the fraction last.
    GroupedDecimal,
    /// Four groups of 1/3/3/3 digits forming a whole number; the display
    /// form gains a `.00` suffix.
    GroupedWhole,
}

impl Assembly {
    /// Digits to parse and the text to display.
    fn assemble(self, caps: &Captures<'_>) -> Option<(String, String)> {
        let group = |i: usize| caps.get(i).map(|m| m.as_str());
        match self {
            Assembly::SplitThousands => {
                let (thousands, units, fraction) = (group(1)?, group(2)?, group(3)?);
                Some((
                    format!("{}{}.{}", thousands.replace(',', ""), units, fraction),
                    format!("{thousands},{units}.{fraction}"),
                ))
            }
            Assembly::GroupedDecimal => {
                let (a, b, c, fraction) = (group(1)?, group(2)?, group(3)?, group(4)?);
                Some((
                    format!("{a}{b}{c}.{fraction}"),
                    format!("{a},{b},{c}.{fraction}"),
                ))
            }
            Assembly::GroupedWhole => {
                let (a, b, c, d) = (group(1)?, group(2)?, group(3)?, group(4)?);
                Some((format!("{a}{b}{c}{d}"), format!("{a},{b},{c},{d}.00")))
            }
        }
    }
}

/// A bank-specific amount layout.
pub struct BankLayout {
    pub name: &'static str,
    pub pattern: Regex,
    pub assembly: Assembly,
}

impl BankLayout {
    /// Try this layout against `text`.
    ///
    /// `Ok(None)` means the layout does not appear; `Err` means it appeared
    /// but its digits did not parse.
    pub fn try_extract(
        &self,
        text: &str,
        currency: &CurrencyStyle,
    ) -> Result<Option<AmountField>, ExtractionError> {
        let Some(caps) = self.pattern.captures(text) else {
            return Ok(None);
        };
        let (digits, shown) = self.assembly.assemble(&caps).ok_or_else(|| {
            ExtractionError::Layout {
                layout: self.name.to_string(),
            }
        })?;
        let value: Decimal = parse_amount(FieldKey::Amount, &digits)?;
        debug!("Layout {} matched {}", self.name, shown);
        Ok(Some(AmountField::new(value, &shown, currency)))
    }
}

lazy_static! {
    /// UOB facility-letter layouts, tried in order.
    pub static ref UOB_LAYOUTS: Vec<BankLayout> = vec![
        BankLayout {
            name: "uob_term_loan",
            pattern: Regex::new(
                r#"["']?(\d[\d,]*?)[,']?(\d{3})[:"']-?(\d+)["']?\s*(?:Term\s+Loan|Temtoanst|TL)"#
            ).unwrap(),
            assembly: Assembly::SplitThousands,
        },
        BankLayout {
            name: "uob_term_loan_2",
            pattern: Regex::new(
                r"(\d+)(\d{3})(\d{3})[-:.](\d{2})\s*(?:Term\s+Loan\s+2|TL2)"
            ).unwrap(),
            assembly: Assembly::GroupedDecimal,
        },
        BankLayout {
            name: "uob_total",
            pattern: Regex::new(r"(\d)(\d{3})(\d{3})(\d{3})\s*TOTAL").unwrap(),
            assembly: Assembly::GroupedWhole,
        },
    ];
}
