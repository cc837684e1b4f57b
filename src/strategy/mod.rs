//! Multi-leg strategies: composition, analysis and the standard catalog

pub mod bounds;
pub mod breakeven;
pub mod catalog;
pub mod composer;
pub mod labels;

pub use bounds::Bound;
pub use breakeven::BreakevenMethod;
pub use catalog::{
    bear_put_spread, bull_call_spread, covered_call, long_call, long_put, long_straddle,
    long_strangle, StrategyKind,
};
pub use composer::{AnalysisResult, ComposerConfig, Strategy, StrategyComposer};
pub use labels::{DirectionalLabel, RiskThresholds, ThresholdTable, VolatilityLabel};
