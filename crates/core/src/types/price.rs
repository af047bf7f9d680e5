//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as [`Decimal`] so that cart totals never accumulate
//! binary floating point error. On the wire they are plain JSON numbers,
//! which keeps persisted carts readable by the page script that shares the
//! storage slot.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price is not a number: {0:?}")]
    NotANumber(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The amount exceeds [`Price::MAX`].
    #[error("price cannot exceed {max}")]
    TooLarge { max: Decimal },
    /// The amount carries more digits than a stored cart can hold.
    #[error("price has too many significant digits: {0}")]
    TooPrecise(Decimal),
}

/// A non-negative unit price.
///
/// ## Examples
///
/// ```
/// use trendbazar_core::Price;
///
/// assert!(Price::parse("19.99").is_ok());
/// assert!(Price::parse("abc").is_err());
/// assert!(Price::parse("-1").is_err());
/// assert!(Price::parse("1000000000.01").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted unit price.
    pub const MAX: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

    /// Create a price from a decimal amount.
    ///
    /// The amount must be exactly representable in the persisted cart,
    /// which stores prices as JSON (binary floating point) numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative, above [`Price::MAX`], or
    /// would change when written to and read back from storage.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        if amount > Self::MAX {
            return Err(PriceError::TooLarge { max: Self::MAX });
        }
        let amount = amount.normalize();
        if !survives_float(amount) {
            return Err(PriceError::TooPrecise(amount));
        }
        Ok(Self(amount))
    }

    /// Parse a price from user-supplied text.
    ///
    /// Surrounding whitespace is ignored. Anything else that is not a plain
    /// decimal number (`"12abc"`, `"NaN"`, `""`) is rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or not a number, or if
    /// [`Price::new`] rejects the amount.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }
        let amount =
            Decimal::from_str(trimmed).map_err(|_| PriceError::NotANumber(s.to_owned()))?;
        Self::new(amount)
    }

    /// Returns the amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

/// Whether `amount` reads back unchanged after a trip through `f64`.
fn survives_float(amount: Decimal) -> bool {
    amount
        .to_f64()
        .and_then(|float| Decimal::from_str(&float.to_string()).ok())
        .is_some_and(|back| back == amount)
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0.round_dp(2))
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

/// ISO 4217 currency codes supported for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Currency symbol used when formatting amounts.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }

    /// Format an amount for display (e.g., "$19.99").
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        format!("{}{:.2}", self.symbol(), amount.round_dp(2))
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            other => Err(format!("unsupported currency code: {other}")),
        }
    }
}
