//! Expiry payoffs of individual legs over a spot grid

pub mod grid;
pub mod leg;

pub use grid::{PayoffCurve, SpotGrid};
pub use leg::{payoff, Direction, LegKind, OptionLeg};
