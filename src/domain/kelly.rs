//! Kelly Criterion Bet Sizing
//!
//! Stake sizing for an accepted edge.
//!
//! The Kelly criterion formula:
//!     f* = (b*p - q) / b
//!
//! Where:
//!     b = decimal odds - 1 (net odds)
//!     p = probability of winning, recovered as `edge + implied(offered)`
//!     q = 1 - p
//!
//! The scaled fraction is clamped into `[min_unit_pct, max_unit_pct]` of
//! bankroll. The floor applies too: a bet that already passed the edge
//! filter is always sized at least one unit.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use super::odds::Price;

/// Bet sizing recommendation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BetSizing {
    pub win_probability: f64,
    pub full_kelly: f64,   // Unscaled Kelly fraction, may be negative
    pub scaled_kelly: f64, // After applying the Kelly multiplier
    pub stake_pct: f64,    // Clamped fraction of bankroll
    pub units: f64,        // stake_pct / min_unit_pct
    pub dollars: Decimal,
}

/// Full Kelly fraction for win probability `p` at decimal odds.
///
/// Returns 0 when the net odds are not positive.
///
/// # Examples
/// ```
/// use sharpedge::domain::kelly::kelly_fraction;
/// let f = kelly_fraction(0.25, 5.0); // EV = 1.25
/// assert!((f - 0.0625).abs() < 0.0001);
/// ```
#[must_use]
pub fn kelly_fraction(probability: f64, decimal_odds: f64) -> f64 {
    let b = decimal_odds - 1.0;
    if b <= 0.0 {
        return 0.0;
    }
    let q = 1.0 - probability;
    (b * probability - q) / b
}

/// Fractional Kelly sizer with bankroll guardrails.
#[derive(Debug, Clone, PartialEq)]
pub struct KellySizer {
    pub kelly_fraction: f64,
    pub bankroll: Decimal,
    pub min_unit_pct: f64,
    pub max_unit_pct: f64,
}

impl KellySizer {
    /// Create a sizer.
    ///
    /// # Arguments
    /// * `kelly_fraction` - Multiplier on full Kelly (0.25 = quarter Kelly)
    /// * `bankroll` - Bankroll in currency
    /// * `min_unit_pct` - Floor and unit size as a fraction of bankroll
    /// * `max_unit_pct` - Ceiling as a fraction of bankroll
    #[must_use]
    pub fn new(kelly_fraction: f64, bankroll: Decimal, min_unit_pct: f64, max_unit_pct: f64) -> Self {
        Self {
            kelly_fraction,
            bankroll,
            min_unit_pct,
            max_unit_pct,
        }
    }

    /// Currency value of one unit.
    #[must_use]
    pub fn unit_size(&self) -> Decimal {
        self.bankroll * decimal_from(self.min_unit_pct)
    }

    /// Size a bet with the given (accepted) edge at the offered price.
    #[must_use]
    pub fn size(&self, edge: f64, offered: Price) -> BetSizing {
        let win_probability = edge + offered.implied_probability();
        let full_kelly = kelly_fraction(win_probability, offered.to_decimal());
        let scaled_kelly = full_kelly * self.kelly_fraction;

        let stake_pct = scaled_kelly.min(self.max_unit_pct).max(self.min_unit_pct);
        let units = stake_pct / self.min_unit_pct;
        let dollars = (decimal_from(units) * self.unit_size()).round_dp(2);

        BetSizing {
            win_probability,
            full_kelly,
            scaled_kelly,
            stake_pct,
            units,
            dollars,
        }
    }
}

fn decimal_from(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        warn!(value, "Stake value not representable as a decimal, using zero");
        Decimal::ZERO
    })
}
