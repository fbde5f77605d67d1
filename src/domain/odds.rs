//! American odds conversions.
//!
//! Converts between American odds, decimal odds and implied probability.
//! [`Price`] is the validated form used everywhere in the crate; the free
//! functions accept raw values and validate them first.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::OddsError;

/// A price in American-odds convention.
///
/// Negative values are favorites (stake needed to win 100), positive values
/// are underdogs (amount won on a 100 stake). Zero is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Price(i32);

impl Price {
    /// Create a price, rejecting zero.
    pub fn new(value: i32) -> Result<Self, OddsError> {
        if value == 0 {
            return Err(OddsError::InvalidPrice { price: value });
        }
        Ok(Self(value))
    }

    /// Raw American value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// True for negative (favorite) prices.
    #[must_use]
    pub const fn is_favorite(self) -> bool {
        self.0 < 0
    }

    /// Decimal odds, i.e. total return per unit staked.
    #[must_use]
    pub fn to_decimal(self) -> f64 {
        let price = f64::from(self.0);
        if self.0 > 0 {
            1.0 + price / 100.0
        } else {
            1.0 - 100.0 / price
        }
    }

    /// Implied probability, strictly inside (0, 1).
    #[must_use]
    pub fn implied_probability(self) -> f64 {
        let price = f64::from(self.0);
        if self.0 > 0 {
            100.0 / (price + 100.0)
        } else {
            price.abs() / (price.abs() + 100.0)
        }
    }

    /// Net profit per unit staked if the bet wins.
    #[must_use]
    pub fn profit_multiplier(self) -> f64 {
        let price = f64::from(self.0);
        if self.0 < 0 {
            (100.0 / price).abs()
        } else {
            price / 100.0
        }
    }
}

impl TryFrom<i32> for Price {
    type Error = OddsError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for i32 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

/// Convert American odds to decimal odds.
pub fn american_to_decimal(price: i32) -> Result<f64, OddsError> {
    Price::new(price).map(Price::to_decimal)
}

/// Implied probability of American odds.
pub fn implied_probability(price: i32) -> Result<f64, OddsError> {
    Price::new(price).map(Price::implied_probability)
}

/// Unrounded American odds for a probability.
///
/// Used where the fractional value matters (fair-value drift); display
/// paths go through [`probability_to_american`].
pub fn probability_to_american_exact(probability: f64) -> Result<f64, OddsError> {
    validate_probability(probability)?;
    if probability >= 0.5 {
        Ok(-100.0 * probability / (1.0 - probability))
    } else {
        Ok(100.0 * (1.0 - probability) / probability)
    }
}

/// Convert a probability to the nearest American price.
///
/// Probabilities at or above 0.5 map to favorites, the rest to underdogs.
/// Extreme probabilities saturate at the `i32` range.
pub fn probability_to_american(probability: f64) -> Result<Price, OddsError> {
    let exact = probability_to_american_exact(probability)?;
    // |exact| >= 100 for every valid probability, so rounding never yields 0.
    Price::new(exact.round() as i32)
}

/// Check that a probability lies strictly inside (0, 1).
pub fn validate_probability(probability: f64) -> Result<f64, OddsError> {
    if probability.is_nan() || probability <= 0.0 || probability >= 1.0 {
        return Err(OddsError::InvalidProbability { probability });
    }
    Ok(probability)
}
