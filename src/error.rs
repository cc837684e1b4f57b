// src/error.rs
use thiserror::Error;

/// Errors raised while building legs, strategies and spot grids.
///
/// Every variant is produced eagerly at construction time; analysis of an
/// already-built strategy never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrategyError {
    /// Bad market input: non-positive spot/strike, negative time or
    /// volatility, non-finite values, malformed spot grid.
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameter {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Strike ordering precondition of a spread or strangle violated
    #[error("Invalid strikes for {strategy}: {reason}")]
    InvalidStrikes { strategy: String, reason: String },

    /// Empty or malformed leg set
    #[error("Invalid strategy '{strategy}': {reason}")]
    InvalidStrategy { strategy: String, reason: String },

    /// Legs of one strategy reference different market contexts
    #[error(
        "Inconsistent legs in '{strategy}': leg {leg} has {field} = {found}, expected {expected}"
    )]
    InconsistentLegs {
        strategy: String,
        leg: usize,
        field: String,
        expected: f64,
        found: f64,
    },

    /// Composer configuration document could not be parsed
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

/// Result type alias for options-sim operations
pub type StrategyResult<T> = Result<T, StrategyError>;

/// Validation utilities
pub mod validation {
    use super::{StrategyError, StrategyResult};

    /// Validate that a parameter is finite and strictly positive
    pub fn validate_positive(name: &str, value: f64) -> StrategyResult<()> {
        validate_finite(name, value)?;
        if value <= 0.0 {
            Err(StrategyError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is finite and non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> StrategyResult<()> {
        validate_finite(name, value)?;
        if value < 0.0 {
            Err(StrategyError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> StrategyResult<()> {
        if !value.is_finite() {
            Err(StrategyError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that `higher` is strictly above `lower` for a named strategy
    pub fn validate_strike_order(
        strategy: &str,
        lower_name: &str,
        lower: f64,
        higher_name: &str,
        higher: f64,
    ) -> StrategyResult<()> {
        if higher > lower {
            Ok(())
        } else {
            Err(StrategyError::InvalidStrikes {
                strategy: strategy.to_string(),
                reason: format!(
                    "{} ({}) must be strictly above {} ({})",
                    higher_name, higher, lower_name, lower
                ),
            })
        }
    }
}
