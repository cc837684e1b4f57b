// src/strategy/bounds.rs
//! Maximum profit and loss of an expiry payoff
//!
//! Bounds come from the composition of the legs, never from sampling: a
//! finite grid cannot show that a payoff grows without limit.
//!
//! For an arbitrary leg set the expiry P&L is piecewise linear in S_T on
//! [0, ∞) with kinks only at option strikes. Its extremes are therefore
//! attained at S_T = 0, at a strike, or in the limit S_T → ∞, where the
//! slope is the signed quantity of calls plus stock.

use crate::payoff::{LegKind, OptionLeg};
use serde::{Serialize, Serializer};
use std::fmt;

/// Slopes smaller than this are treated as flat
const SLOPE_EPS: f64 = 1e-12;

/// Profit or loss extreme: a finite amount or unbounded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Finite(f64),
    Unbounded,
}

impl Bound {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Bound::Unbounded)
    }

    pub fn finite(&self) -> Option<f64> {
        match self {
            Bound::Finite(v) => Some(*v),
            Bound::Unbounded => None,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Finite(v) => write!(f, "{:.2}", v),
            Bound::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Serializes as a number, or the string `"unbounded"`
impl Serialize for Bound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Bound::Finite(v) => serializer.serialize_f64(*v),
            Bound::Unbounded => serializer.serialize_str("unbounded"),
        }
    }
}

/// Net P&L of all legs at terminal price `s`
pub fn net_pnl_at(legs: &[OptionLeg], s: f64) -> f64 {
    legs.iter().map(|leg| leg.pnl_at(s)).sum()
}

/// d(P&L)/dS_T for S_T above every strike
pub fn terminal_slope(legs: &[OptionLeg]) -> f64 {
    legs.iter()
        .filter(|leg| matches!(leg.kind(), LegKind::Call | LegKind::Stock))
        .map(OptionLeg::signed_quantity)
        .sum()
}

/// Points where a piecewise-linear expiry payoff can reach an extreme
pub fn critical_spots(legs: &[OptionLeg]) -> Vec<f64> {
    let mut spots: Vec<f64> = std::iter::once(0.0)
        .chain(
            legs.iter()
                .filter(|leg| leg.kind() != LegKind::Stock)
                .map(OptionLeg::strike),
        )
        .collect();
    spots.sort_by(|a, b| a.total_cmp(b));
    spots.dedup();
    spots
}

/// (max profit, max loss) of an arbitrary leg set
pub fn piecewise_bounds(legs: &[OptionLeg]) -> (Bound, Bound) {
    let (lo, hi) = critical_spots(legs)
        .into_iter()
        .map(|s| net_pnl_at(legs, s))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    let slope = terminal_slope(legs);
    let max_profit = if slope > SLOPE_EPS {
        Bound::Unbounded
    } else {
        Bound::Finite(hi)
    };
    let max_loss = if slope < -SLOPE_EPS {
        Bound::Unbounded
    } else {
        Bound::Finite(lo)
    };
    (max_profit, max_loss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::MarketParameters;
    use crate::payoff::Direction;
    use approx::assert_abs_diff_eq;

    fn market(strike: f64) -> MarketParameters {
        MarketParameters::new(100.0, strike, 0.25, 0.05, 0.2).unwrap()
    }

    #[test]
    fn test_naked_short_call_loses_without_limit() {
        let legs = vec![OptionLeg::short_call(market(100.0))];
        let (profit, loss) = piecewise_bounds(&legs);
        assert_abs_diff_eq!(profit.finite().unwrap(), legs[0].entry_price(), epsilon = 1e-12);
        assert!(loss.is_unbounded());
    }

    #[test]
    fn test_put_spread_is_capped_both_ways() {
        let long = OptionLeg::long_put(market(110.0));
        let short = OptionLeg::short_put(market(100.0));
        let net = long.entry_price() - short.entry_price();
        let (profit, loss) = piecewise_bounds(&[long, short]);
        assert_abs_diff_eq!(profit.finite().unwrap(), 10.0 - net, epsilon = 1e-12);
        assert_abs_diff_eq!(loss.finite().unwrap(), -net, epsilon = 1e-12);
    }

    #[test]
    fn test_long_put_floor_at_zero_spot() {
        let leg = OptionLeg::long_put(market(100.0));
        let (profit, _) = piecewise_bounds(std::slice::from_ref(&leg));
        assert_abs_diff_eq!(profit.finite().unwrap(), 100.0 - leg.entry_price(), epsilon = 1e-12);
    }

    #[test]
    fn test_stock_and_short_call_slope_cancels() {
        let legs = vec![
            OptionLeg::stock(Direction::Long, market(100.0)),
            OptionLeg::short_call(market(105.0)),
        ];
        assert_eq!(terminal_slope(&legs), 0.0);
        assert_eq!(critical_spots(&legs), vec![0.0, 105.0]);
        let (profit, loss) = piecewise_bounds(&legs);
        let c = legs[1].entry_price();
        assert_abs_diff_eq!(profit.finite().unwrap(), 5.0 + c, epsilon = 1e-12);
        assert_abs_diff_eq!(loss.finite().unwrap(), -100.0 + c, epsilon = 1e-12);
    }

    #[test]
    fn test_bound_serialization() {
        assert_eq!(serde_json::to_string(&Bound::Unbounded).unwrap(), "\"unbounded\"");
        assert_eq!(serde_json::to_string(&Bound::Finite(-4.5)).unwrap(), "-4.5");
        assert_eq!(Bound::Finite(-4.5).to_string(), "-4.50");
        assert_eq!(Bound::Unbounded.to_string(), "unbounded");
    }
}
