// src/payoff/grid.rs
use crate::error::{validation::*, StrategyError, StrategyResult};
use crate::math_utils::linspace;
use ndarray::{Array1, ArrayView1};
use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

/// Validated grid of underlying prices at expiry.
///
/// Strictly ascending, finite, non-negative, at least two points.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotGrid {
    spots: Array1<f64>,
}

impl SpotGrid {
    pub fn new(spots: Vec<f64>) -> StrategyResult<Self> {
        if spots.len() < 2 {
            return Err(StrategyError::InvalidParameter {
                parameter: "spot_grid".to_string(),
                value: spots.len() as f64,
                constraint: "needs at least 2 points".to_string(),
            });
        }
        for (i, &s) in spots.iter().enumerate() {
            validate_non_negative(&format!("spot_grid[{}]", i), s)?;
        }
        if let Some(i) = spots.windows(2).position(|w| w[1] <= w[0]) {
            return Err(StrategyError::InvalidParameter {
                parameter: format!("spot_grid[{}]", i + 1),
                value: spots[i + 1],
                constraint: format!("must be strictly above previous point {}", spots[i]),
            });
        }
        Ok(SpotGrid {
            spots: Array1::from(spots),
        })
    }

    /// `n` evenly spaced spots from `low` to `high` inclusive
    pub fn linspace(low: f64, high: f64, n: usize) -> StrategyResult<Self> {
        validate_non_negative("low", low)?;
        validate_finite("high", high)?;
        Self::new(linspace(low, high, n))
    }

    /// `n` spots covering `spot·(1 ± width)`, clipped at zero
    pub fn around(spot: f64, width: f64, n: usize) -> StrategyResult<Self> {
        validate_positive("spot", spot)?;
        validate_positive("width", width)?;
        Self::linspace((spot * (1.0 - width)).max(0.0), spot * (1.0 + width), n)
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.spots.view()
    }

    pub fn as_slice(&self) -> &[f64] {
        // Owned 1-D arrays built from a Vec are always contiguous
        self.spots.as_slice().unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    pub fn first(&self) -> f64 {
        self.spots[0]
    }

    pub fn last(&self) -> f64 {
        self.spots[self.spots.len() - 1]
    }

    /// Largest gap between neighbouring points
    pub fn max_step(&self) -> f64 {
        self.as_slice()
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold(0.0, f64::max)
    }

    pub fn contains(&self, spot: f64) -> bool {
        spot >= self.first() && spot <= self.last()
    }
}

impl Serialize for SpotGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for s in self.spots.iter() {
            seq.serialize_element(s)?;
        }
        seq.end()
    }
}

/// Profit/loss at expiry over a spot grid
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffCurve {
    spots: Array1<f64>,
    pnl: Array1<f64>,
}

impl PayoffCurve {
    pub(crate) fn new(grid: &SpotGrid, pnl: Array1<f64>) -> Self {
        debug_assert_eq!(grid.len(), pnl.len());
        PayoffCurve {
            spots: grid.spots.clone(),
            pnl,
        }
    }

    pub fn spots(&self) -> ArrayView1<'_, f64> {
        self.spots.view()
    }

    pub fn pnl(&self) -> ArrayView1<'_, f64> {
        self.pnl.view()
    }

    pub fn len(&self) -> usize {
        self.pnl.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pnl.is_empty()
    }

    /// (spot, pnl) pairs in grid order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.spots.iter().copied().zip(self.pnl.iter().copied())
    }

    /// Lowest and highest sampled P&L. Sampling only; use the analytic
    /// bounds on `AnalysisResult` for true extremes.
    pub fn sampled_range(&self) -> (f64, f64) {
        self.pnl.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
    }
}

impl Serialize for PayoffCurve {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Point(f64, f64);

        impl Serialize for Point {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut st = serializer.serialize_struct("PayoffPoint", 2)?;
                st.serialize_field("spot", &self.0)?;
                st.serialize_field("pnl", &self.1)?;
                st.end()
            }
        }

        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for (s, p) in self.points() {
            seq.serialize_element(&Point(s, p))?;
        }
        seq.end()
    }
}
