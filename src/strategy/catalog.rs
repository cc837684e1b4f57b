// src/strategy/catalog.rs
//! Standard strategies and their closed-form metrics
//!
//! | Strategy | Legs (in order) |
//! |---|---|
//! | Long Call | +1 call @K |
//! | Long Put | +1 put @K |
//! | Covered Call | +1 stock, −1 call @K |
//! | Bull Call Spread | +1 call @K1, −1 call @K2 (K2 > K1) |
//! | Bear Put Spread | +1 put @K1, −1 put @K2 (K1 > K2) |
//! | Long Straddle | +1 call @K, +1 put @K |
//! | Long Strangle | +1 call @K2, +1 put @K1 (K1 < K2) |
//!
//! Max profit/loss conventions: a long option or stock position that is
//! not capped by a short leg is reported as unbounded on that side (the
//! long put's profit included, even though S_T ≥ 0 bounds it in theory).

use super::bounds::{net_pnl_at, piecewise_bounds, Bound};
use super::composer::Strategy;
use crate::error::{validation::validate_strike_order, StrategyResult};
use crate::market::MarketParameters;
use crate::payoff::{Direction, LegKind, OptionLeg};
use serde::Serialize;

/// Strategy shape; selects the closed-form bounds and breakevens.
///
/// Anything that is not one of the seven standard shapes is `Custom` and
/// falls back to the generic piecewise analysis and the grid scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyKind {
    LongCall { strike: f64 },
    LongPut { strike: f64 },
    CoveredCall { strike: f64 },
    BullCallSpread { lower_strike: f64, higher_strike: f64 },
    BearPutSpread { higher_strike: f64, lower_strike: f64 },
    LongStraddle { strike: f64 },
    LongStrangle { put_strike: f64, call_strike: f64 },
    Custom,
}

/// Entry price of leg `i`; catalog builders fix the leg order
fn entry(legs: &[OptionLeg], i: usize) -> f64 {
    legs.get(i).map_or(0.0, OptionLeg::entry_price)
}

impl StrategyKind {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::LongCall { .. } => "Long Call",
            StrategyKind::LongPut { .. } => "Long Put",
            StrategyKind::CoveredCall { .. } => "Covered Call",
            StrategyKind::BullCallSpread { .. } => "Bull Call Spread",
            StrategyKind::BearPutSpread { .. } => "Bear Put Spread",
            StrategyKind::LongStraddle { .. } => "Long Straddle",
            StrategyKind::LongStrangle { .. } => "Long Strangle",
            StrategyKind::Custom => "Custom",
        }
    }

    /// (max profit, max loss); losses are negative numbers
    pub fn profit_bounds(&self, legs: &[OptionLeg]) -> (Bound, Bound) {
        match *self {
            StrategyKind::LongCall { .. } | StrategyKind::LongPut { .. } => {
                (Bound::Unbounded, Bound::Finite(-entry(legs, 0)))
            }
            StrategyKind::CoveredCall { strike } => {
                let (s0, call) = (entry(legs, 0), entry(legs, 1));
                (Bound::Finite(strike - s0 + call), Bound::Unbounded)
            }
            StrategyKind::BullCallSpread {
                lower_strike,
                higher_strike,
            } => {
                let net = entry(legs, 0) - entry(legs, 1);
                (
                    Bound::Finite((higher_strike - lower_strike) - net),
                    Bound::Finite(-net),
                )
            }
            StrategyKind::BearPutSpread {
                higher_strike,
                lower_strike,
            } => {
                let net = entry(legs, 0) - entry(legs, 1);
                (
                    Bound::Finite((higher_strike - lower_strike) - net),
                    Bound::Finite(-net),
                )
            }
            StrategyKind::LongStraddle { .. } | StrategyKind::LongStrangle { .. } => {
                let total = entry(legs, 0) + entry(legs, 1);
                (Bound::Unbounded, Bound::Finite(-total))
            }
            StrategyKind::Custom => piecewise_bounds(legs),
        }
    }

    /// Exact expiry breakevens, or `None` when the shape has no closed form
    /// and the caller should scan the grid. Roots are ascending.
    pub fn analytic_breakevens(&self, legs: &[OptionLeg]) -> Option<Vec<f64>> {
        let roots = match *self {
            StrategyKind::LongCall { strike } => vec![strike + entry(legs, 0)],
            StrategyKind::LongPut { strike } => vec![strike - entry(legs, 0)],
            StrategyKind::CoveredCall { strike } => {
                let be = entry(legs, 0) - entry(legs, 1);
                if be <= strike {
                    vec![be]
                } else {
                    Vec::new()
                }
            }
            StrategyKind::BullCallSpread {
                lower_strike,
                higher_strike,
            } => {
                let net = entry(legs, 0) - entry(legs, 1);
                if (0.0..=higher_strike - lower_strike).contains(&net) {
                    vec![lower_strike + net]
                } else {
                    Vec::new()
                }
            }
            StrategyKind::BearPutSpread {
                higher_strike,
                lower_strike,
            } => {
                let net = entry(legs, 0) - entry(legs, 1);
                if (0.0..=higher_strike - lower_strike).contains(&net) {
                    vec![higher_strike - net]
                } else {
                    Vec::new()
                }
            }
            StrategyKind::LongStraddle { strike } => {
                let total = entry(legs, 0) + entry(legs, 1);
                vec![strike - total, strike + total]
            }
            StrategyKind::LongStrangle {
                put_strike,
                call_strike,
            } => {
                let total = entry(legs, 0) + entry(legs, 1);
                vec![put_strike - total, call_strike + total]
            }
            StrategyKind::Custom => return None,
        };

        let mut roots: Vec<f64> = roots.into_iter().filter(|r| *r > 0.0).collect();
        roots.dedup();
        Some(roots)
    }

    /// Plain-English summary of the position
    pub fn describe(&self, legs: &[OptionLeg]) -> String {
        match *self {
            StrategyKind::LongCall { strike } => {
                let c = entry(legs, 0);
                format!(
                    "Buy a call option with strike ${:.2}. Bullish strategy with limited downside \
                     (max loss = premium ${:.2}) and unlimited upside potential. Breakeven at ${:.2}.",
                    strike,
                    c,
                    strike + c
                )
            }
            StrategyKind::LongPut { strike } => {
                let p = entry(legs, 0);
                format!(
                    "Buy a put option with strike ${:.2}. Bearish strategy with limited downside \
                     (max loss = premium ${:.2}) and large upside potential if the underlying falls. \
                     Breakeven at ${:.2}.",
                    strike,
                    p,
                    strike - p
                )
            }
            StrategyKind::CoveredCall { strike } => {
                let (s0, c) = (entry(legs, 0), entry(legs, 1));
                format!(
                    "Own stock at ${:.2} and sell a call with strike ${:.2}. Income generation: \
                     collect ${:.2} premium but cap upside at the strike. Breakeven at ${:.2}.",
                    s0,
                    strike,
                    c,
                    s0 - c
                )
            }
            StrategyKind::BullCallSpread {
                lower_strike,
                higher_strike,
            } => {
                let net = entry(legs, 0) - entry(legs, 1);
                format!(
                    "Buy call at ${:.2}, sell call at ${:.2}. Moderately bullish with limited risk. \
                     Net cost: ${:.2}. Max profit: ${:.2} if the underlying finishes at or above ${:.2}.",
                    lower_strike,
                    higher_strike,
                    net,
                    (higher_strike - lower_strike) - net,
                    higher_strike
                )
            }
            StrategyKind::BearPutSpread {
                higher_strike,
                lower_strike,
            } => {
                let net = entry(legs, 0) - entry(legs, 1);
                format!(
                    "Buy put at ${:.2}, sell put at ${:.2}. Moderately bearish with limited risk. \
                     Net cost: ${:.2}. Max profit: ${:.2} if the underlying finishes at or below ${:.2}.",
                    higher_strike,
                    lower_strike,
                    net,
                    (higher_strike - lower_strike) - net,
                    lower_strike
                )
            }
            StrategyKind::LongStraddle { strike } => {
                let total = entry(legs, 0) + entry(legs, 1);
                format!(
                    "Buy call and put at strike ${:.2}. Volatility play: profits from large moves \
                     in either direction. Total cost: ${:.2}. Breakevens: ${:.2} (down) and ${:.2} (up).",
                    strike,
                    total,
                    strike - total,
                    strike + total
                )
            }
            StrategyKind::LongStrangle {
                put_strike,
                call_strike,
            } => {
                let total = entry(legs, 0) + entry(legs, 1);
                format!(
                    "Buy OTM call at ${:.2} and OTM put at ${:.2}. Cheaper volatility play than a \
                     straddle. Total cost: ${:.2}. Breakevens: ${:.2} (down) and ${:.2} (up).",
                    call_strike,
                    put_strike,
                    total,
                    put_strike - total,
                    call_strike + total
                )
            }
            StrategyKind::Custom => describe_custom(legs),
        }
    }
}

fn describe_custom(legs: &[OptionLeg]) -> String {
    let parts: Vec<String> = legs
        .iter()
        .map(|leg| {
            let side = match leg.direction() {
                Direction::Long => "long",
                Direction::Short => "short",
            };
            match leg.kind() {
                LegKind::Stock => format!("{} {} stock @{:.2}", side, leg.quantity(), leg.entry_price()),
                LegKind::Call => format!("{} {} call @{:.2}", side, leg.quantity(), leg.strike()),
                LegKind::Put => format!("{} {} put @{:.2}", side, leg.quantity(), leg.strike()),
            }
        })
        .collect();
    let net_premium: f64 = legs
        .iter()
        .filter(|leg| leg.kind() != LegKind::Stock)
        .map(OptionLeg::entry_cost)
        .sum();
    format!(
        "Custom strategy with {} legs: {}. Net premium: ${:.2}. P&L at zero: ${:.2}.",
        legs.len(),
        parts.join(", "),
        net_premium,
        net_pnl_at(legs, 0.0)
    )
}

/// Buy one call at `strike`
pub fn long_call(spot: f64, strike: f64, t: f64, r: f64, sigma: f64) -> StrategyResult<Strategy> {
    let market = MarketParameters::new(spot, strike, t, r, sigma)?;
    Strategy::from_parts(
        StrategyKind::LongCall { strike },
        vec![OptionLeg::long_call(market)],
    )
}

/// Buy one put at `strike`
pub fn long_put(spot: f64, strike: f64, t: f64, r: f64, sigma: f64) -> StrategyResult<Strategy> {
    let market = MarketParameters::new(spot, strike, t, r, sigma)?;
    Strategy::from_parts(
        StrategyKind::LongPut { strike },
        vec![OptionLeg::long_put(market)],
    )
}

/// Own the underlying at `spot`, sell one call at `strike`
pub fn covered_call(spot: f64, strike: f64, t: f64, r: f64, sigma: f64) -> StrategyResult<Strategy> {
    let market = MarketParameters::new(spot, strike, t, r, sigma)?;
    Strategy::from_parts(
        StrategyKind::CoveredCall { strike },
        vec![
            OptionLeg::stock(Direction::Long, market),
            OptionLeg::short_call(market),
        ],
    )
}

/// Buy a call at `lower_strike`, sell a call at `higher_strike`
pub fn bull_call_spread(
    spot: f64,
    lower_strike: f64,
    higher_strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> StrategyResult<Strategy> {
    let lower = MarketParameters::new(spot, lower_strike, t, r, sigma)?;
    let higher = lower.with_strike(higher_strike)?;
    validate_strike_order(
        "Bull Call Spread",
        "lower_strike",
        lower_strike,
        "higher_strike",
        higher_strike,
    )?;
    Strategy::from_parts(
        StrategyKind::BullCallSpread {
            lower_strike,
            higher_strike,
        },
        vec![OptionLeg::long_call(lower), OptionLeg::short_call(higher)],
    )
}

/// Buy a put at `higher_strike`, sell a put at `lower_strike`
pub fn bear_put_spread(
    spot: f64,
    higher_strike: f64,
    lower_strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> StrategyResult<Strategy> {
    let higher = MarketParameters::new(spot, higher_strike, t, r, sigma)?;
    let lower = higher.with_strike(lower_strike)?;
    validate_strike_order(
        "Bear Put Spread",
        "lower_strike",
        lower_strike,
        "higher_strike",
        higher_strike,
    )?;
    Strategy::from_parts(
        StrategyKind::BearPutSpread {
            higher_strike,
            lower_strike,
        },
        vec![OptionLeg::long_put(higher), OptionLeg::short_put(lower)],
    )
}

/// Buy a call and a put at the same `strike`
pub fn long_straddle(spot: f64, strike: f64, t: f64, r: f64, sigma: f64) -> StrategyResult<Strategy> {
    let market = MarketParameters::new(spot, strike, t, r, sigma)?;
    Strategy::from_parts(
        StrategyKind::LongStraddle { strike },
        vec![OptionLeg::long_call(market), OptionLeg::long_put(market)],
    )
}

/// Buy a put at `put_strike` and a call at the higher `call_strike`
pub fn long_strangle(
    spot: f64,
    put_strike: f64,
    call_strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> StrategyResult<Strategy> {
    let put_market = MarketParameters::new(spot, put_strike, t, r, sigma)?;
    let call_market = put_market.with_strike(call_strike)?;
    validate_strike_order(
        "Long Strangle",
        "put_strike",
        put_strike,
        "call_strike",
        call_strike,
    )?;
    Strategy::from_parts(
        StrategyKind::LongStrangle {
            put_strike,
            call_strike,
        },
        vec![
            OptionLeg::long_call(call_market),
            OptionLeg::long_put(put_market),
        ],
    )
}
