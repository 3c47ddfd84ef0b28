//! Amount type for handling monetary values scraped from flyer text.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles parsing values that
//! may or may not include a currency sign and thousands commas. Flyer prices arrive as free-form
//! OCR text, so alongside the strict `FromStr` there is a single lenient parser, `parse_money`,
//! and an explicit fallback wrapper, `parse_or_zero`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Represents a non-negative price amount.
///
/// This type wraps `Decimal` and provides custom serialization/deserialization to handle amounts
/// that may be formatted with or without currency signs or commas.
///
/// Strict parsing:
/// ```
/// # use flyer_compare::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("$1,250.00").unwrap();
/// assert_eq!(amount.to_string(), "$1,250.00");
/// ```
///
/// Lenient parsing of OCR noise:
/// ```
/// # use flyer_compare::model::Amount;
/// let amount = Amount::parse_or_zero("only 45.00 each!");
/// assert_eq!(amount.to_price_string(), "45.00");
/// let garbage = Amount::parse_or_zero("two for one");
/// assert_eq!(garbage.to_price_string(), "0.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.value().is_sign_positive()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.value().is_sign_negative()
    }

    /// The single audited parser for OCR-noisy price text.
    ///
    /// Strips every character except ASCII digits, `.` and `-`, then parses the remainder as a
    /// decimal. A negative result is an error: flyer prices are non-negative, so a leading minus
    /// is scanner noise, not a refund.
    pub fn parse_money(s: &str) -> Result<Self, AmountError> {
        let cleaned: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        if cleaned.is_empty() {
            return Err(AmountError::Empty);
        }
        let value = Decimal::from_str(&cleaned).map_err(AmountError::Unparseable)?;
        if value.is_sign_negative() {
            return Err(AmountError::Negative(value));
        }
        Ok(Amount { value })
    }

    /// Lenient parse with the fallback policy applied: malformed input becomes `0.00`.
    ///
    /// Never panics and never errors. Use this wherever a price must be rendered or summed; use
    /// `parse_money` directly when the caller needs to distinguish garbage (e.g. sort ordering).
    pub fn parse_or_zero(s: &str) -> Self {
        Self::parse_money(s).unwrap_or_default()
    }

    /// Subtracts `other`, for budget arithmetic. May go negative (over budget).
    pub fn minus(&self, other: Amount) -> Amount {
        Amount::new(self.value - other.value)
    }

    /// Adds `other`.
    pub fn plus(&self, other: Amount) -> Amount {
        Amount::new(self.value + other.value)
    }

    /// Renders the bare number with exactly two fraction digits, e.g. `45.00`.
    ///
    /// This is the canonical form used in deduplication keys and shared text exports.
    pub fn to_price_string(&self) -> String {
        format!("{:.2}", self.value)
    }
}

/// An error that can occur when parsing strings into `Amount` values.
#[derive(Debug)]
pub enum AmountError {
    /// Nothing numeric remained after cleaning the input.
    Empty,
    /// The cleaned input was not a valid decimal.
    Unparseable(rust_decimal::Error),
    /// The input parsed to a negative value.
    Negative(Decimal),
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::Empty => write!(f, "No numeric value found"),
            AmountError::Unparseable(e) => Display::fmt(e, f),
            AmountError::Negative(d) => write!(f, "Negative price value '{d}'"),
        }
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AmountError::Unparseable(e) => Some(e),
            _ => None,
        }
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // Handle empty string
        if trimmed.is_empty() {
            return Ok(Amount::default());
        }

        // Remove a currency sign if present, tolerating "-$5.00" as well as "$-5.00"
        let without_sign = if let Some(after_minus) = trimmed.strip_prefix('-') {
            if let Some(after_dollar) = after_minus.strip_prefix('$') {
                format!("-{after_dollar}")
            } else {
                trimmed.to_string()
            }
        } else if let Some(after_dollar) = trimmed.strip_prefix('$') {
            after_dollar.to_string()
        } else {
            trimmed.to_string()
        };

        // Remove commas (thousand separators)
        let without_commas = without_sign.replace(',', "");

        let value = Decimal::from_str(&without_commas).map_err(AmountError::Unparseable)?;
        if value.is_sign_negative() {
            return Err(AmountError::Negative(value));
        }
        Ok(Amount { value })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, num) = if self.is_negative() {
            ("-", self.value().abs())
        } else {
            ("", self.value())
        };
        write!(
            f,
            "{sign}${}",
            format_num::format_num!(",.2", num.to_f64().unwrap_or_default())
        )
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialize as a bare two-digit string
        serializer.serialize_str(&self.to_price_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}
