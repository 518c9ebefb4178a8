//! The flat key-value record produced for each document.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

macro_rules! field_keys {
    ($($variant:ident => $name:literal,)+) => {
        /// Every key an extraction record may carry.
        ///
        /// Declaration order is the output order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum FieldKey {
            $($variant,)+
        }

        impl FieldKey {
            /// All keys in output order.
            pub const ALL: &'static [FieldKey] = &[$(FieldKey::$variant,)+];

            /// The key as it appears in JSON output.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(FieldKey::$variant => $name,)+
                }
            }
        }

        impl FromStr for FieldKey {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(FieldKey::$variant),)+
                    other => Err(format!("Unknown field key: '{other}'")),
                }
            }
        }
    };
}

field_keys! {
    BankName => "bank_name",
    EarnestDeposit => "earnest_deposit",
    EarnestDepositPrintAs => "earnest_deposit_print_as",
    EarnestDepositInWord => "earnest_deposit_in_word",
    Deposit => "deposit",
    DepositPrintAs => "deposit_print_as",
    DepositInWord => "deposit_in_word",
    Amount => "amount",
    AmountPrintAs => "amount_print_as",
    AmountInWord => "amount_in_word",
    MrtaAmount => "mrta_amount",
    MrtaAmountPrintAs => "mrta_amount_print_as",
    MrtaAmountInWord => "mrta_amount_in_word",
    Balance => "balance",
    BalancePrintAs => "balance_print_as",
    BalanceInWord => "balance_in_word",
    Address => "address",
    HsdNo => "HSD_No",
    PtdNo => "PTD_No",
    ParcelNo => "Parcel_No",
    UnitNo => "Unit_No",
    StoreyNo => "Storey_No",
    CarParkNo => "Car_Park_No",
    ResidentialArea => "residential_area",
    District => "district",
    State => "state",
    SubDistrict => "sub_district",
    LandOffice => "land_office",
    Tenure => "tenure",
    Title => "title",
    Description => "description",
    PropertyType => "type",
    Category => "category",
    TitleDescription => "title_description",
    CompanyRegNo => "company_reg_no",
    CompanyName => "company_name",
    CleanedText => "_cleaned_text",
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        FieldKey::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// The monetary fields that carry a value / print-as / in-words triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmountKind {
    EarnestDeposit,
    Deposit,
    Amount,
    MrtaAmount,
    Balance,
}

impl AmountKind {
    /// Order in which the labelled amount rules are tried.
    pub const ALL: [AmountKind; 5] = [
        AmountKind::EarnestDeposit,
        AmountKind::Deposit,
        AmountKind::Amount,
        AmountKind::MrtaAmount,
        AmountKind::Balance,
    ];

    /// The `(value, print_as, in_word)` keys for this amount.
    pub fn keys(self) -> (FieldKey, FieldKey, FieldKey) {
        match self {
            AmountKind::EarnestDeposit => (
                FieldKey::EarnestDeposit,
                FieldKey::EarnestDepositPrintAs,
                FieldKey::EarnestDepositInWord,
            ),
            AmountKind::Deposit => (
                FieldKey::Deposit,
                FieldKey::DepositPrintAs,
                FieldKey::DepositInWord,
            ),
            AmountKind::Amount => (
                FieldKey::Amount,
                FieldKey::AmountPrintAs,
                FieldKey::AmountInWord,
            ),
            AmountKind::MrtaAmount => (
                FieldKey::MrtaAmount,
                FieldKey::MrtaAmountPrintAs,
                FieldKey::MrtaAmountInWord,
            ),
            AmountKind::Balance => (
                FieldKey::Balance,
                FieldKey::BalancePrintAs,
                FieldKey::BalanceInWord,
            ),
        }
    }

    /// The value key, also used as the field name in parse errors.
    pub fn key(self) -> FieldKey {
        self.keys().0
    }
}

/// How amounts are rendered in the print-as and in-words strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyStyle {
    /// Prefix for the display string (e.g. `RM`).
    pub code: String,
    /// Prefix for the spelled-out phrase (e.g. `Ringgit Malaysia`).
    pub words: String,
}

impl Default for CurrencyStyle {
    fn default() -> Self {
        Self {
            code: "RM".to_string(),
            words: "Ringgit Malaysia".to_string(),
        }
    }
}

/// A monetary value together with its two display forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountField {
    /// Non-negative value with exactly two fractional digits.
    pub value: Decimal,
    /// Currency-prefixed display string, e.g. `RM 50,000`.
    pub print_as: String,
    /// Spelled-out phrase, e.g. `Ringgit Malaysia 50,000 only`.
    pub in_words: String,
}

impl AmountField {
    /// Build the triple from a parsed value and the text it should be shown as.
    pub fn new(value: Decimal, display: &str, currency: &CurrencyStyle) -> Self {
        let mut value = value.abs().round_dp(2);
        value.rescale(2);
        Self {
            value,
            print_as: format!("{} {}", currency.code, display),
            in_words: format!("{} {} only", currency.words, display),
        }
    }
}

/// A single value in the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Amount(#[serde(with = "rust_decimal::serde::float")] Decimal),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Amount(_) => None,
        }
    }

    pub fn as_amount(&self) -> Option<Decimal> {
        match self {
            FieldValue::Amount(d) => Some(*d),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<Decimal> for FieldValue {
    fn from(d: Decimal) -> Self {
        FieldValue::Amount(d)
    }
}

/// The flat key-value result for one document.
///
/// Keys are written at most once: every setter leaves an existing value in
/// place, which is what gives earlier extractors precedence over later ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionRecord {
    fields: BTreeMap<FieldKey, FieldValue>,
}

impl ExtractionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: FieldKey) -> Option<&FieldValue> {
        self.fields.get(&key)
    }

    /// Text value of a field, if set and textual.
    pub fn text(&self, key: FieldKey) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    /// Decimal value of a field, if set and numeric.
    pub fn decimal(&self, key: FieldKey) -> Option<Decimal> {
        self.get(key).and_then(FieldValue::as_amount)
    }

    /// Full triple for an amount kind, if present.
    pub fn amount(&self, kind: AmountKind) -> Option<AmountField> {
        let (value, print_as, in_words) = kind.keys();
        Some(AmountField {
            value: self.decimal(value)?,
            print_as: self.text(print_as)?.to_string(),
            in_words: self.text(in_words)?.to_string(),
        })
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.fields.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    /// Set `key` unless it already holds a value. Returns whether it was written.
    pub fn set_if_absent(&mut self, key: FieldKey, value: impl Into<FieldValue>) -> bool {
        if self.fields.contains_key(&key) {
            debug!("{} already set, keeping existing value", key);
            return false;
        }
        self.fields.insert(key, value.into());
        true
    }

    /// Set all three keys of an amount, or none of them if the value is taken.
    pub fn set_amount(&mut self, kind: AmountKind, field: AmountField) -> bool {
        let (value, print_as, in_words) = kind.keys();
        if self.fields.contains_key(&value) {
            debug!("{} already set, keeping existing amount", value);
            return false;
        }
        self.fields.insert(value, FieldValue::Amount(field.value));
        self.fields.insert(print_as, FieldValue::Text(field.print_as));
        self.fields.insert(in_words, FieldValue::Text(field.in_words));
        true
    }

    /// Merge a partial record in, keeping every value already present.
    ///
    /// Returns the number of keys taken from `other`.
    pub fn absorb(&mut self, other: ExtractionRecord) -> usize {
        other
            .fields
            .into_iter()
            .filter(|(key, value)| self.set_if_absent(*key, value.clone()))
            .count()
    }
}

impl FromIterator<(FieldKey, FieldValue)> for ExtractionRecord {
    fn from_iter<I: IntoIterator<Item = (FieldKey, FieldValue)>>(iter: I) -> Self {
        let mut record = ExtractionRecord::new();
        for (key, value) in iter {
            record.set_if_absent(key, value);
        }
        record
    }
}
