//! Edge and expected value of an offered price against a fair probability,
//! and the band filter deciding which edges are worth acting on.

use serde::{Deserialize, Serialize};

use super::error::OddsError;
use super::odds::{validate_probability, Price};

/// Descriptive edge/EV numbers for one offered price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeEstimate {
    /// Expected fractional profit per unit staked, capped in magnitude.
    pub edge: f64,
    /// Edge before the cap was applied.
    pub raw_edge: f64,
    /// Expected value in percent of stake.
    pub ev_pct: f64,
    /// Fair probability the estimate was computed against.
    pub fair_probability: f64,
}

impl EdgeEstimate {
    /// True when the cap altered the raw edge.
    #[must_use]
    pub fn is_capped(&self) -> bool {
        (self.edge - self.raw_edge).abs() > f64::EPSILON
    }
}

/// Computes capped edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCalculator {
    max_edge: f64,
}

impl EdgeCalculator {
    /// Create a calculator that caps `|edge|` at `max_edge`.
    #[must_use]
    pub fn new(max_edge: f64) -> Self {
        Self {
            max_edge: max_edge.abs(),
        }
    }

    #[must_use]
    pub const fn max_edge(&self) -> f64 {
        self.max_edge
    }

    /// Edge and EV of `offered` given the fair win probability.
    pub fn evaluate(&self, offered: Price, fair_probability: f64) -> Result<EdgeEstimate, OddsError> {
        let fair_probability = validate_probability(fair_probability)?;
        let raw_edge = offered.to_decimal() * fair_probability - 1.0;

        Ok(EdgeEstimate {
            edge: raw_edge.clamp(-self.max_edge, self.max_edge),
            raw_edge,
            ev_pct: expected_value_pct(offered, fair_probability),
            fair_probability,
        })
    }

    /// Same as [`Self::evaluate`], taking the fair side as an American price.
    pub fn evaluate_against_price(
        &self,
        offered: Price,
        fair_price: Price,
    ) -> Result<EdgeEstimate, OddsError> {
        self.evaluate(offered, fair_price.implied_probability())
    }
}

/// EV in percent: `(p * profit - (1 - p)) * 100`.
#[must_use]
pub fn expected_value_pct(offered: Price, fair_probability: f64) -> f64 {
    (fair_probability * offered.profit_multiplier() - (1.0 - fair_probability)) * 100.0
}

/// True iff `min_threshold < edge <= max_threshold`.
#[must_use]
pub fn is_plus_ev(edge: f64, min_threshold: f64, max_threshold: f64) -> bool {
    edge > min_threshold && edge <= max_threshold
}

/// Acceptable edge band.
///
/// Edges at or below `min_edge` are noise; above `max_edge` they are
/// treated as bad data rather than opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeBand {
    pub min_edge: f64,
    pub max_edge: f64,
}

impl EdgeBand {
    #[must_use]
    pub const fn new(min_edge: f64, max_edge: f64) -> Self {
        Self { min_edge, max_edge }
    }

    #[must_use]
    pub fn accepts(&self, edge: f64) -> bool {
        is_plus_ev(edge, self.min_edge, self.max_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(v: i32) -> Price {
        Price::new(v).unwrap()
    }

    #[test]
    fn test_edge_matches_decimal_formula() {
        let calc = EdgeCalculator::new(0.15);
        let est = calc.evaluate(price(110), 0.5).unwrap();
        // 2.10 * 0.5 - 1
        assert!((est.edge - 0.05).abs() < 1e-12);
        assert!(!est.is_capped());
    }

    #[test]
    fn test_edge_is_capped_at_max() {
        let calc = EdgeCalculator::new(0.15);
        let est = calc.evaluate(price(300), 0.5).unwrap();
        assert!(est.raw_edge > 0.15);
        assert_eq!(est.edge, 0.15);
        assert!(est.is_capped());
    }

    #[test]
    fn test_negative_edge_is_capped_in_magnitude() {
        let calc = EdgeCalculator::new(0.15);
        let est = calc.evaluate(price(-1000), 0.5).unwrap();
        assert_eq!(est.edge, -0.15);
    }

    #[test]
    fn test_ev_pct() {
        // +110 at 50%: 0.5 * 1.1 - 0.5 = 0.05 -> 5%
        assert!((expected_value_pct(price(110), 0.5) - 5.0).abs() < 1e-9);
        // -200 at 70%: 0.7 * 0.5 - 0.3 = 0.05 -> 5%
        assert!((expected_value_pct(price(-200), 0.7) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_evaluate_against_price() {
        let calc = EdgeCalculator::new(0.15);
        let est = calc.evaluate_against_price(price(120), price(100)).unwrap();
        assert!((est.fair_probability - 0.5).abs() < 1e-12);
        assert!((est.edge - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_rejects_bad_probability() {
        let calc = EdgeCalculator::new(0.15);
        assert!(calc.evaluate(price(110), 1.0).is_err());
    }

    #[test]
    fn test_is_plus_ev_band_edges() {
        assert!(!is_plus_ev(0.02, 0.02, 0.20));
        assert!(is_plus_ev(0.0201, 0.02, 0.20));
        assert!(is_plus_ev(0.20, 0.02, 0.20));
        assert!(!is_plus_ev(0.2001, 0.02, 0.20));
        assert!(!is_plus_ev(-0.05, 0.02, 0.20));

        let band = EdgeBand::new(0.02, 0.20);
        assert!(band.accepts(0.05));
    }
}
