//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are persisted as plain JSON numbers (`129.0`) so records written by
//! older versions of the site stay readable, but all arithmetic happens on
//! [`Decimal`] to avoid float drift in cart totals.
//!
//! Amounts are held to whole cents and capped at [`Price::MAX`], so every
//! price survives the trip through an `f64` unchanged.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The amount is above [`Price::MAX`].
    #[error("price cannot exceed {max} (got {got})")]
    TooLarge { max: Decimal, got: Decimal },
    /// The input could not be parsed as a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
}

/// A non-negative amount in euros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted amount, `9 999 999 999.99`.
    pub const MAX: Self = Self(Decimal::from_parts(3_567_587_327, 232, 0, false, 2));

    /// Create a new price, rounded half away from zero to whole cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero, or
    /// [`PriceError::TooLarge`] if it rounds above [`Price::MAX`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if cents > Self::MAX.0 {
            return Err(PriceError::TooLarge {
                max: Self::MAX.0,
                got: amount,
            });
        }
        Ok(Self(cents))
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// Parse a price as typed into a form, accepting `,` as decimal separator
    /// and an optional leading `€`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Invalid`] if the text is not a number, and
    /// otherwise whatever [`Price::new`] rejects.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let cleaned = s.trim().trim_start_matches('€').trim().replace(',', ".");
        let amount: Decimal = cleaned
            .parse()
            .map_err(|_| PriceError::Invalid(s.to_owned()))?;
        Self::new(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display (e.g., "€129.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!("€{:.2}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl std::str::FromStr for Price {
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

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
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
