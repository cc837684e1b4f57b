// src/market.rs
//! Market snapshot a single leg is priced against.

use crate::error::{validation::*, StrategyResult};
use serde::{Deserialize, Serialize};

/// Immutable Black-Scholes inputs for one leg.
///
/// Construction validates every field, so pricing functions that take a
/// `&MarketParameters` cannot fail. Each leg owns its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParameters {
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    volatility: f64,
}

impl MarketParameters {
    /// # Parameters
    /// - `spot`: Current underlying price (> 0)
    /// - `strike`: Strike price (> 0)
    /// - `time_to_expiry`: Years to expiry (≥ 0)
    /// - `risk_free_rate`: Continuously compounded annual rate (finite)
    /// - `volatility`: Annual volatility (≥ 0)
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> StrategyResult<Self> {
        validate_positive("spot", spot)?;
        validate_positive("strike", strike)?;
        validate_non_negative("time_to_expiry", time_to_expiry)?;
        validate_finite("risk_free_rate", risk_free_rate)?;
        validate_non_negative("volatility", volatility)?;

        Ok(MarketParameters {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
        })
    }

    /// Same market, different strike
    pub fn with_strike(&self, strike: f64) -> StrategyResult<Self> {
        validate_positive("strike", strike)?;
        Ok(MarketParameters { strike, ..*self })
    }

    /// Same market, different spot
    pub fn with_spot(&self, spot: f64) -> StrategyResult<Self> {
        validate_positive("spot", spot)?;
        Ok(MarketParameters { spot, ..*self })
    }

    /// Same market at a spot the caller has already validated
    pub(crate) fn at_spot(&self, spot: f64) -> Self {
        debug_assert!(spot.is_finite() && spot > 0.0);
        MarketParameters { spot, ..*self }
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// K·e^(−rT)
    pub fn discounted_strike(&self) -> f64 {
        self.strike * (-self.risk_free_rate * self.time_to_expiry).exp()
    }

    /// True when the Black-Scholes d1/d2 terms are undefined (σ√T = 0,
    /// including when the product underflows)
    pub fn is_degenerate(&self) -> bool {
        self.volatility * self.time_to_expiry.sqrt() == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StrategyError;

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(MarketParameters::new(0.0, 100.0, 0.25, 0.05, 0.2).is_err());
        assert!(MarketParameters::new(100.0, -1.0, 0.25, 0.05, 0.2).is_err());
        assert!(MarketParameters::new(100.0, 100.0, -0.1, 0.05, 0.2).is_err());
        assert!(MarketParameters::new(100.0, 100.0, 0.25, f64::NAN, 0.2).is_err());
        assert!(MarketParameters::new(100.0, 100.0, 0.25, 0.05, -0.2).is_err());
    }

    #[test]
    fn test_degenerate_inputs_are_valid() {
        let at_expiry = MarketParameters::new(100.0, 100.0, 0.0, 0.05, 0.2).unwrap();
        assert!(at_expiry.is_degenerate());
        let no_vol = MarketParameters::new(100.0, 100.0, 1.0, 0.05, 0.0).unwrap();
        assert!(no_vol.is_degenerate());
        let negative_rate = MarketParameters::new(100.0, 100.0, 1.0, -0.01, 0.2).unwrap();
        assert!(!negative_rate.is_degenerate());
        let underflow = MarketParameters::new(100.0, 100.0, 1e-310, 0.0, 1e-170).unwrap();
        assert!(underflow.is_degenerate());
    }

    #[test]
    fn test_with_strike_keeps_market() {
        let m = MarketParameters::new(100.0, 100.0, 0.25, 0.05, 0.2).unwrap();
        let m2 = m.with_strike(110.0).unwrap();
        assert_eq!(m2.strike(), 110.0);
        assert_eq!(m2.spot(), m.spot());
        assert_eq!(m2.time_to_expiry(), m.time_to_expiry());
        assert_eq!(m.strike(), 100.0);

        let err = m.with_strike(0.0).unwrap_err();
        assert!(matches!(err, StrategyError::InvalidParameter { ref parameter, .. } if parameter == "strike"));
    }
}
