// src/payoff/leg.rs
//! Single strategy leg and its expiry payoff
//!
//! # Payoff at expiry
//!
//! With sign = +1 for long and -1 for short, and q the leg quantity:
//! - **Stock**: sign·q·(S_T − S_0)
//! - **Call**: sign·q·(max(S_T − K, 0) − premium)
//! - **Put**: sign·q·(max(K − S_T, 0) − premium)
//!
//! The premium is fixed when the leg is built (Black-Scholes price at the
//! leg's own time to expiry, or a quoted override). The spot grid varies
//! the terminal price only; nothing is re-priced per grid point.

use super::grid::SpotGrid;
use crate::analytics::bs_analytic::{option_greeks, option_price};
use crate::analytics::{Greeks, OptionKind};
use crate::error::{validation::*, StrategyResult};
use crate::market::MarketParameters;
use ndarray::{Array1, ArrayView1, Zip};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegKind {
    Call,
    Put,
    Stock,
}

impl LegKind {
    pub fn option_kind(&self) -> Option<OptionKind> {
        match self {
            LegKind::Call => Some(OptionKind::Call),
            LegKind::Put => Some(OptionKind::Put),
            LegKind::Stock => None,
        }
    }
}

impl From<OptionKind> for LegKind {
    fn from(kind: OptionKind) -> Self {
        match kind {
            OptionKind::Call => LegKind::Call,
            OptionKind::Put => LegKind::Put,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }
}

/// One position inside a strategy.
///
/// For stock legs the strike of the market snapshot is the entry spot and
/// the entry price equals the spot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionLeg {
    kind: LegKind,
    direction: Direction,
    quantity: f64,
    market: MarketParameters,
    entry_price: f64,
    premium_overridden: bool,
}

impl OptionLeg {
    /// Option leg priced with Black-Scholes at `market`
    pub fn option(kind: OptionKind, direction: Direction, market: MarketParameters) -> Self {
        OptionLeg {
            kind: kind.into(),
            direction,
            quantity: 1.0,
            market,
            entry_price: option_price(&market, kind),
            premium_overridden: false,
        }
    }

    /// Stock leg entered at the market spot
    pub fn stock(direction: Direction, market: MarketParameters) -> Self {
        let spot = market.spot();
        OptionLeg {
            kind: LegKind::Stock,
            direction,
            quantity: 1.0,
            // spot > 0 was validated with the snapshot, so it is a valid strike
            market: market.with_strike(spot).unwrap_or(market),
            entry_price: spot,
            premium_overridden: false,
        }
    }

    pub fn long_call(market: MarketParameters) -> Self {
        Self::option(OptionKind::Call, Direction::Long, market)
    }

    pub fn short_call(market: MarketParameters) -> Self {
        Self::option(OptionKind::Call, Direction::Short, market)
    }

    pub fn long_put(market: MarketParameters) -> Self {
        Self::option(OptionKind::Put, Direction::Long, market)
    }

    pub fn short_put(market: MarketParameters) -> Self {
        Self::option(OptionKind::Put, Direction::Short, market)
    }

    /// Scale the position; `quantity` must be finite and positive
    pub fn with_quantity(self, quantity: f64) -> StrategyResult<Self> {
        validate_positive("quantity", quantity)?;
        Ok(OptionLeg { quantity, ..self })
    }

    /// Replace the model premium with a quoted one. Stock legs keep their
    /// entry spot.
    pub fn with_premium(self, premium: f64) -> StrategyResult<Self> {
        validate_non_negative("premium", premium)?;
        if self.kind == LegKind::Stock {
            return Ok(self);
        }
        Ok(OptionLeg {
            entry_price: premium,
            premium_overridden: true,
            ..self
        })
    }

    pub fn kind(&self) -> LegKind {
        self.kind
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// direction·quantity
    pub fn signed_quantity(&self) -> f64 {
        self.direction.sign() * self.quantity
    }

    pub fn market(&self) -> &MarketParameters {
        &self.market
    }

    pub fn strike(&self) -> f64 {
        self.market.strike()
    }

    /// Premium per unit for options, entry spot for stock
    pub fn entry_price(&self) -> f64 {
        self.entry_price
    }

    pub fn premium_overridden(&self) -> bool {
        self.premium_overridden
    }

    /// Cash paid to open the leg (negative when received)
    pub fn entry_cost(&self) -> f64 {
        self.signed_quantity() * self.entry_price
    }

    /// Unsigned, unit-quantity Greeks of the instrument at the current spot
    pub fn unit_greeks(&self) -> Greeks {
        match self.kind.option_kind() {
            Some(kind) => option_greeks(&self.market, kind),
            None => Greeks::new(1.0, 0.0),
        }
    }

    /// Greeks of the position: unit Greeks times direction·quantity
    pub fn greeks(&self) -> Greeks {
        self.unit_greeks().scaled(self.signed_quantity())
    }

    /// Value of one unit at expiry for terminal price `s`, before premium
    pub fn terminal_value(&self, s: f64) -> f64 {
        let k = self.market.strike();
        match self.kind {
            LegKind::Call => (s - k).max(0.0),
            LegKind::Put => (k - s).max(0.0),
            LegKind::Stock => s,
        }
    }

    /// Position P&L at expiry for terminal price `s`
    pub fn pnl_at(&self, s: f64) -> f64 {
        self.signed_quantity() * (self.terminal_value(s) - self.entry_price)
    }
}

/// Expiry P&L of `leg` at every point of `spots`
pub fn payoff_view(spots: ArrayView1<'_, f64>, leg: &OptionLeg, parallel_threshold: usize) -> Array1<f64> {
    if spots.len() >= parallel_threshold {
        Zip::from(spots).par_map_collect(|&s| leg.pnl_at(s))
    } else {
        spots.map(|&s| leg.pnl_at(s))
    }
}

/// Expiry P&L of `leg` over a validated grid
pub fn payoff(spot_grid: &SpotGrid, leg: &OptionLeg) -> Array1<f64> {
    payoff_view(
        spot_grid.view(),
        leg,
        crate::analytics::bs_analytic::PARALLEL_GRID_THRESHOLD,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn market(strike: f64) -> MarketParameters {
        MarketParameters::new(100.0, strike, 0.25, 0.05, 0.20).unwrap()
    }

    #[test]
    fn test_long_call_payoff_shape() {
        let leg = OptionLeg::long_call(market(100.0));
        let grid = SpotGrid::new(vec![80.0, 100.0, 120.0]).unwrap();
        let pnl = payoff(&grid, &leg);
        let premium = leg.entry_price();
        assert_abs_diff_eq!(pnl[0], -premium);
        assert_abs_diff_eq!(pnl[1], -premium);
        assert_abs_diff_eq!(pnl[2], 20.0 - premium);
    }

    #[test]
    fn test_short_put_is_mirror_of_long_put() {
        let long = OptionLeg::long_put(market(100.0));
        let short = OptionLeg::short_put(market(100.0));
        let grid = SpotGrid::linspace(60.0, 140.0, 9).unwrap();
        let sum = payoff(&grid, &long) + payoff(&grid, &short);
        assert!(sum.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_stock_leg() {
        let leg = OptionLeg::stock(Direction::Long, market(105.0));
        assert_eq!(leg.strike(), 100.0);
        assert_eq!(leg.entry_price(), 100.0);
        assert_eq!(leg.pnl_at(110.0), 10.0);
        assert_eq!(leg.greeks(), Greeks::new(1.0, 0.0));
        // stock ignores premium overrides
        let same = leg.clone().with_premium(3.0).unwrap();
        assert_eq!(same, leg);
    }

    #[test]
    fn test_quantity_scales_pnl_and_greeks() {
        let one = OptionLeg::short_call(market(105.0));
        let three = one.clone().with_quantity(3.0).unwrap();
        assert_abs_diff_eq!(three.pnl_at(120.0), 3.0 * one.pnl_at(120.0), epsilon = 1e-12);
        assert_abs_diff_eq!(three.greeks().delta, 3.0 * one.greeks().delta, epsilon = 1e-12);
        assert!(three.greeks().vega < 0.0);
        assert!(one.clone().with_quantity(0.0).is_err());
        assert!(one.with_quantity(f64::NAN).is_err());
    }

    #[test]
    fn test_premium_override() {
        let leg = OptionLeg::long_call(market(100.0)).with_premium(5.0).unwrap();
        assert!(leg.premium_overridden());
        assert_eq!(leg.entry_cost(), 5.0);
        assert_eq!(leg.pnl_at(100.0), -5.0);
        assert!(OptionLeg::long_call(market(100.0)).with_premium(-1.0).is_err());
    }

    #[test]
    fn test_expired_leg_entry_is_intrinsic() {
        let m = MarketParameters::new(104.0, 100.0, 0.0, 0.05, 0.2).unwrap();
        let leg = OptionLeg::long_call(m);
        assert_eq!(leg.entry_price(), 4.0);
        assert_eq!(leg.pnl_at(104.0), 0.0);
    }
}
