//! # options-sim: Black-Scholes Strategy Analysis
//!
//! A Rust library for pricing European options and analysing multi-leg
//! option strategies at expiry: payoff curves, breakevens, maximum
//! profit/loss, and the directional and volatility exposure of the position.
//!
//! ## Key Features
//!
//! - **Analytical Pricing**: Black-Scholes price, delta and vega, scalar or
//!   vectorized over a spot grid with Rayon
//! - **Defined Edge Cases**: at-expiry and zero-volatility inputs take
//!   closed-form branches instead of producing NaN
//! - **Strategy Catalog**: long call/put, covered call, bull call and bear
//!   put spreads, long straddle and strangle, plus custom leg sets
//! - **Exact Metrics**: closed-form breakevens and profit/loss bounds, with a
//!   grid scan as fallback and cross-check
//! - **Configurable Labels**: bullish/bearish/neutral and
//!   long/short-volatility classification from a threshold table
//!
//! ## Quick Start
//!
//! ```rust
//! use options_sim::payoff::SpotGrid;
//! use options_sim::strategy::long_straddle;
//!
//! // Spot 100, strike 100, 3 months, 5% rate, 20% volatility
//! let straddle = long_straddle(100.0, 100.0, 0.25, 0.05, 0.20).expect("Valid parameters");
//! let grid = SpotGrid::linspace(70.0, 130.0, 200).expect("Valid grid");
//!
//! let analysis = straddle.analyze(&grid);
//! println!("Breakevens: {:?}", analysis.breakevens());
//! println!("Max loss: {}", analysis.max_loss());
//! println!("{}", analysis.risk_interpretation());
//! ```
//!
//! ## Conventions
//!
//! Vega is reported per unit of volatility. Max loss is a negative number.
//! Greeks are evaluated at the current spot; only the payoff is swept
//! across the grid.

// Module declarations
pub mod error;
pub mod math_utils;
pub mod market;
pub mod analytics;
pub mod payoff;
pub mod strategy;
pub mod output;

// Re-export commonly used types for convenience
pub use analytics::{Greeks, OptionKind};
pub use error::{StrategyError, StrategyResult};
pub use market::MarketParameters;
pub use payoff::{Direction, LegKind, OptionLeg, PayoffCurve, SpotGrid};
pub use strategy::{AnalysisResult, Bound, ComposerConfig, Strategy, StrategyComposer};
