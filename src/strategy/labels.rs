// src/strategy/labels.rs
//! Qualitative exposure labels from net delta and net vega
//!
//! Classification is driven by [`ThresholdTable`]s rather than literals in
//! code, so callers can tune them through [`RiskThresholds`].
//!
//! # Defaults
//!
//! | signal | neutral when | moderate from | high from |
//! |---|---|---|---|
//! | net delta | \|Δ\| < 0.2 | 0.2 | 0.5 |
//! | net vega (per unit σ) | \|ν\| < 0.05 | 5.0 | 10.0 |

use crate::error::{validation::*, StrategyError, StrategyResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExposureGrade {
    Low,
    Moderate,
    High,
}

/// Magnitudes at or above `min_magnitude` get `grade`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeBand {
    pub min_magnitude: f64,
    pub grade: ExposureGrade,
}

/// Threshold table for one signal.
///
/// `bands` are checked in order; the first band whose `min_magnitude` the
/// absolute signal reaches wins, otherwise the grade is `Low`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub neutral_below: f64,
    pub bands: Vec<GradeBand>,
}

impl ThresholdTable {
    pub fn delta_default() -> Self {
        ThresholdTable {
            neutral_below: 0.2,
            bands: vec![
                GradeBand {
                    min_magnitude: 0.5,
                    grade: ExposureGrade::High,
                },
                GradeBand {
                    min_magnitude: 0.2,
                    grade: ExposureGrade::Moderate,
                },
            ],
        }
    }

    pub fn vega_default() -> Self {
        ThresholdTable {
            neutral_below: 0.05,
            bands: vec![
                GradeBand {
                    min_magnitude: 10.0,
                    grade: ExposureGrade::High,
                },
                GradeBand {
                    min_magnitude: 5.0,
                    grade: ExposureGrade::Moderate,
                },
            ],
        }
    }

    /// Thresholds must be finite, non-negative and strictly descending
    pub fn validate(&self, name: &str) -> StrategyResult<()> {
        validate_non_negative(&format!("{}.neutral_below", name), self.neutral_below)?;
        for (i, band) in self.bands.iter().enumerate() {
            validate_non_negative(&format!("{}.bands[{}].min_magnitude", name, i), band.min_magnitude)?;
        }
        if let Some(i) = self
            .bands
            .windows(2)
            .position(|w| w[1].min_magnitude >= w[0].min_magnitude)
        {
            return Err(StrategyError::InvalidParameter {
                parameter: format!("{}.bands[{}].min_magnitude", name, i + 1),
                value: self.bands[i + 1].min_magnitude,
                constraint: "bands must be listed in strictly descending order".to_string(),
            });
        }
        Ok(())
    }

    pub fn is_neutral(&self, value: f64) -> bool {
        value.abs() < self.neutral_below
    }

    pub fn grade(&self, value: f64) -> ExposureGrade {
        let magnitude = value.abs();
        self.bands
            .iter()
            .find(|b| magnitude >= b.min_magnitude)
            .map_or(ExposureGrade::Low, |b| b.grade)
    }
}

/// Label thresholds for both Greeks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub delta: ThresholdTable,
    pub vega: ThresholdTable,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        RiskThresholds {
            delta: ThresholdTable::delta_default(),
            vega: ThresholdTable::vega_default(),
        }
    }
}

impl RiskThresholds {
    pub fn validate(&self) -> StrategyResult<()> {
        self.delta.validate("thresholds.delta")?;
        self.vega.validate("thresholds.vega")
    }

    pub fn directional_label(&self, net_delta: f64) -> DirectionalLabel {
        if self.delta.is_neutral(net_delta) {
            DirectionalLabel::Neutral
        } else if net_delta > 0.0 {
            DirectionalLabel::Bullish
        } else {
            DirectionalLabel::Bearish
        }
    }

    pub fn volatility_label(&self, net_vega: f64) -> VolatilityLabel {
        if self.vega.is_neutral(net_vega) {
            VolatilityLabel::Neutral
        } else if net_vega > 0.0 {
            VolatilityLabel::LongVolatility
        } else {
            VolatilityLabel::ShortVolatility
        }
    }

    /// One-line reading of the exposure, e.g.
    /// "Moderately directional (bearish). High volatility sensitivity (benefits from volatility increases)"
    pub fn interpret(&self, net_delta: f64, net_vega: f64) -> String {
        let mut text = match self.directional_label(net_delta) {
            DirectionalLabel::Neutral => "Direction-neutral".to_string(),
            bias => {
                let strength = match self.delta.grade(net_delta) {
                    ExposureGrade::High => "Strongly",
                    ExposureGrade::Moderate => "Moderately",
                    ExposureGrade::Low => "Mildly",
                };
                format!("{} directional ({})", strength, bias)
            }
        };

        let grade = self.vega.grade(net_vega);
        let sensitivity = match grade {
            ExposureGrade::High => "High",
            ExposureGrade::Moderate => "Moderate",
            ExposureGrade::Low => "Low",
        };
        text.push_str(&format!(". {} volatility sensitivity", sensitivity));
        if grade == ExposureGrade::Low {
            return text;
        }
        match self.volatility_label(net_vega) {
            VolatilityLabel::LongVolatility => text.push_str(" (benefits from volatility increases)"),
            VolatilityLabel::ShortVolatility => text.push_str(" (hurt by volatility increases)"),
            VolatilityLabel::Neutral => {}
        }
        text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionalLabel {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for DirectionalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DirectionalLabel::Bullish => "bullish",
            DirectionalLabel::Bearish => "bearish",
            DirectionalLabel::Neutral => "neutral",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VolatilityLabel {
    LongVolatility,
    ShortVolatility,
    Neutral,
}

impl fmt::Display for VolatilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VolatilityLabel::LongVolatility => "long-volatility",
            VolatilityLabel::ShortVolatility => "short-volatility",
            VolatilityLabel::Neutral => "neutral",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_labels() {
        let t = RiskThresholds::default();
        assert_eq!(t.directional_label(0.57), DirectionalLabel::Bullish);
        assert_eq!(t.directional_label(-0.43), DirectionalLabel::Bearish);
        assert_eq!(t.directional_label(0.139), DirectionalLabel::Neutral);
        assert_eq!(t.directional_label(-0.199), DirectionalLabel::Neutral);
        assert_eq!(t.directional_label(0.2), DirectionalLabel::Bullish);
    }

    #[test]
    fn test_volatility_labels() {
        let t = RiskThresholds::default();
        assert_eq!(t.volatility_label(39.3), VolatilityLabel::LongVolatility);
        assert_eq!(t.volatility_label(-19.0), VolatilityLabel::ShortVolatility);
        assert_eq!(t.volatility_label(0.0), VolatilityLabel::Neutral);
        assert_eq!(t.volatility_label(-0.01), VolatilityLabel::Neutral);
    }

    #[test]
    fn test_grades_follow_table() {
        let t = ThresholdTable::delta_default();
        assert_eq!(t.grade(0.7), ExposureGrade::High);
        assert_eq!(t.grade(-0.3), ExposureGrade::Moderate);
        assert_eq!(t.grade(0.1), ExposureGrade::Low);
    }

    #[test]
    fn test_custom_table_changes_labels() {
        let mut t = RiskThresholds::default();
        t.delta.neutral_below = 0.05;
        assert!(t.validate().is_ok());
        assert_eq!(t.directional_label(0.139), DirectionalLabel::Bullish);
    }

    #[test]
    fn test_validate_rejects_unordered_bands() {
        let mut t = RiskThresholds::default();
        t.vega.bands.reverse();
        assert!(t.validate().is_err());
        let mut t = RiskThresholds::default();
        t.delta.neutral_below = f64::NAN;
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_interpretation_text() {
        let t = RiskThresholds::default();
        assert_eq!(
            t.interpret(0.57, 19.6),
            "Strongly directional (bullish). High volatility sensitivity (benefits from volatility increases)"
        );
        assert_eq!(
            t.interpret(0.139, 39.3),
            "Direction-neutral. High volatility sensitivity (benefits from volatility increases)"
        );
        assert_eq!(
            t.interpret(0.62, -19.0),
            "Strongly directional (bullish). High volatility sensitivity (hurt by volatility increases)"
        );
        assert_eq!(t.interpret(0.0, 0.0), "Direction-neutral. Low volatility sensitivity");
        // outside the neutral band but below every graded band: no bias text
        assert_eq!(t.interpret(0.05, 0.8), "Direction-neutral. Low volatility sensitivity");
        assert_eq!(t.volatility_label(0.8), VolatilityLabel::LongVolatility);
        assert_eq!(
            t.interpret(-0.3, -6.0),
            "Moderately directional (bearish). Moderate volatility sensitivity (hurt by volatility increases)"
        );
    }

    #[test]
    fn test_label_serialization() {
        assert_eq!(
            serde_json::to_string(&VolatilityLabel::LongVolatility).unwrap(),
            "\"long-volatility\""
        );
        assert_eq!(serde_json::to_string(&DirectionalLabel::Bearish).unwrap(), "\"bearish\"");
    }
}
