// src/strategy/composer.rs
//! Strategy composition and analysis
//!
//! A [`Strategy`] is a validated, ordered set of legs sharing one market
//! context (same spot, same time to expiry). [`StrategyComposer`] turns it
//! into an [`AnalysisResult`] over a caller-supplied [`SpotGrid`]:
//!
//! ```text
//! net P&L(S) = Σ_legs sign·q·(payoff_leg(S) − premium_leg)
//! net Δ      = Σ_legs sign·q·Δ_leg(S₀)
//! net ν      = Σ_legs sign·q·ν_leg(S₀)
//! ```
//!
//! Greeks are point-in-time sensitivities at the current spot S₀; only the
//! payoff curve is swept across the grid.

use super::bounds::Bound;
use super::breakeven::{cross_check, normalize_roots, scan_breakevens, BreakevenMethod};
use super::catalog::StrategyKind;
use super::labels::{DirectionalLabel, RiskThresholds, VolatilityLabel};
use crate::analytics::bs_analytic::PARALLEL_GRID_THRESHOLD;
use crate::analytics::Greeks;
use crate::error::{StrategyError, StrategyResult};
use crate::payoff::leg::payoff_view;
use crate::payoff::{LegKind, OptionLeg, PayoffCurve, SpotGrid};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Roots closer than this are the same breakeven
const ROOT_DEDUP_TOL: f64 = 1e-9;

/// Ordered legs plus the shape that selects closed-form metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strategy {
    name: String,
    kind: StrategyKind,
    legs: Vec<OptionLeg>,
}

impl Strategy {
    pub(crate) fn from_parts(kind: StrategyKind, legs: Vec<OptionLeg>) -> StrategyResult<Self> {
        Self::validated(kind.name().to_string(), kind, legs)
    }

    /// Arbitrary leg set; bounds and breakevens use the generic analysis
    ///
    /// # Errors
    /// - `InvalidStrategy` if `legs` is empty
    /// - `InconsistentLegs` if legs disagree on spot or time to expiry
    pub fn custom(name: impl Into<String>, legs: Vec<OptionLeg>) -> StrategyResult<Self> {
        Self::validated(name.into(), StrategyKind::Custom, legs)
    }

    fn validated(name: String, kind: StrategyKind, legs: Vec<OptionLeg>) -> StrategyResult<Self> {
        let first = match legs.first() {
            Some(leg) => *leg.market(),
            None => {
                return Err(StrategyError::InvalidStrategy {
                    strategy: name,
                    reason: "a strategy needs at least one leg".to_string(),
                })
            }
        };

        for (i, leg) in legs.iter().enumerate().skip(1) {
            let m = leg.market();
            let checks = [
                ("spot", first.spot(), m.spot()),
                ("time_to_expiry", first.time_to_expiry(), m.time_to_expiry()),
            ];
            if let Some((field, expected, found)) = checks.into_iter().find(|(_, e, f)| e != f) {
                return Err(StrategyError::InconsistentLegs {
                    strategy: name,
                    leg: i,
                    field: field.to_string(),
                    expected,
                    found,
                });
            }
        }

        Ok(Strategy { name, kind, legs })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &StrategyKind {
        &self.kind
    }

    pub fn legs(&self) -> &[OptionLeg] {
        &self.legs
    }

    /// Spot shared by every leg
    pub fn spot(&self) -> f64 {
        self.legs[0].market().spot()
    }

    /// Copy of this strategy with leg `leg`'s premium replaced by a quote
    pub fn with_premium(&self, leg: usize, premium: f64) -> StrategyResult<Self> {
        let mut legs = self.legs.clone();
        let slot = legs.get_mut(leg).ok_or_else(|| StrategyError::InvalidStrategy {
            strategy: self.name.clone(),
            reason: format!("no leg {} (strategy has {} legs)", leg, self.legs.len()),
        })?;
        *slot = slot.clone().with_premium(premium)?;
        Ok(Strategy {
            name: self.name.clone(),
            kind: self.kind,
            legs,
        })
    }

    /// Signed option premium paid to open (negative for a net credit).
    /// Stock purchases are excluded.
    pub fn net_premium(&self) -> f64 {
        self.legs
            .iter()
            .filter(|leg| leg.kind() != LegKind::Stock)
            .map(OptionLeg::entry_cost)
            .sum()
    }

    /// Net position Greeks at the current spot
    pub fn greeks(&self) -> Greeks {
        self.legs.iter().map(OptionLeg::greeks).sum()
    }

    pub fn description(&self) -> String {
        self.kind.describe(&self.legs)
    }

    /// Analyze with the default configuration
    pub fn analyze(&self, grid: &SpotGrid) -> AnalysisResult {
        StrategyComposer::default().analyze(self, grid)
    }

    /// Validate raw spots into a grid, then analyze
    pub fn analyze_spots(&self, spots: Vec<f64>) -> StrategyResult<AnalysisResult> {
        let grid = SpotGrid::new(spots)?;
        Ok(self.analyze(&grid))
    }
}

/// Composer settings. Every field has a default, so a partial JSON/TOML
/// document is enough to override one threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    pub thresholds: RiskThresholds,
    /// Grids with at least this many points are evaluated on the rayon pool
    pub parallel_threshold: usize,
    /// Re-derive analytic breakevens by grid scan and log disagreements
    pub verify_breakevens: bool,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        ComposerConfig {
            thresholds: RiskThresholds::default(),
            parallel_threshold: PARALLEL_GRID_THRESHOLD,
            verify_breakevens: true,
        }
    }
}

impl ComposerConfig {
    /// Parse and validate a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> StrategyResult<Self> {
        let config: ComposerConfig =
            serde_json::from_str(json).map_err(|e| StrategyError::InvalidConfig {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> StrategyResult<()> {
        self.thresholds.validate()?;
        if self.parallel_threshold == 0 {
            return Err(StrategyError::InvalidParameter {
                parameter: "parallel_threshold".to_string(),
                value: 0.0,
                constraint: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Turns strategies into analysis bundles
#[derive(Debug, Clone, Default)]
pub struct StrategyComposer {
    config: ComposerConfig,
}

impl StrategyComposer {
    pub fn new(config: ComposerConfig) -> StrategyResult<Self> {
        config.validate()?;
        Ok(StrategyComposer { config })
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Full analysis of `strategy` over `grid`.
    ///
    /// Pure: identical inputs give a bit-identical result.
    pub fn analyze(&self, strategy: &Strategy, grid: &SpotGrid) -> AnalysisResult {
        let legs = strategy.legs();
        tracing::debug!(
            strategy = strategy.name(),
            legs = legs.len(),
            grid_points = grid.len(),
            "analyzing strategy"
        );

        let leg_pnl: Vec<Array1<f64>> = legs
            .iter()
            .map(|leg| payoff_view(grid.view(), leg, self.config.parallel_threshold))
            .collect();
        // Legs are summed in order so the result does not depend on threading
        let net = leg_pnl
            .iter()
            .fold(Array1::<f64>::zeros(grid.len()), |acc, pnl| acc + pnl);

        let (breakevens, breakeven_method) = match strategy.kind().analytic_breakevens(legs) {
            Some(analytic) => {
                let analytic = normalize_roots(analytic, ROOT_DEDUP_TOL);
                if self.config.verify_breakevens {
                    let scanned = scan_breakevens(grid.view(), net.view());
                    let mismatched = cross_check(&analytic, &scanned, grid);
                    if !mismatched.is_empty() {
                        tracing::warn!(
                            strategy = strategy.name(),
                            ?analytic,
                            ?scanned,
                            ?mismatched,
                            "grid scan disagrees with analytic breakevens"
                        );
                    }
                }
                (analytic, BreakevenMethod::Analytic)
            }
            None => (
                normalize_roots(scan_breakevens(grid.view(), net.view()), ROOT_DEDUP_TOL),
                BreakevenMethod::GridScan,
            ),
        };

        let (max_profit, max_loss) = strategy.kind().profit_bounds(legs);
        let greeks = strategy.greeks();
        let thresholds = &self.config.thresholds;

        AnalysisResult {
            strategy_name: strategy.name().to_string(),
            kind: *strategy.kind(),
            description: strategy.description(),
            initial_spot: strategy.spot(),
            spot_grid: grid.clone(),
            net_payoff: PayoffCurve::new(grid, net),
            leg_payoffs: leg_pnl
                .into_iter()
                .map(|pnl| PayoffCurve::new(grid, pnl))
                .collect(),
            premiums: legs.iter().map(OptionLeg::entry_price).collect(),
            net_premium: strategy.net_premium(),
            breakevens,
            breakeven_method,
            max_profit,
            max_loss,
            greeks,
            directional_label: thresholds.directional_label(greeks.delta),
            volatility_label: thresholds.volatility_label(greeks.vega),
            risk_interpretation: thresholds.interpret(greeks.delta, greeks.vega),
        }
    }
}

/// Read-only result bundle handed to rendering and export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    strategy_name: String,
    kind: StrategyKind,
    description: String,
    initial_spot: f64,
    spot_grid: SpotGrid,
    net_payoff: PayoffCurve,
    leg_payoffs: Vec<PayoffCurve>,
    premiums: Vec<f64>,
    net_premium: f64,
    breakevens: Vec<f64>,
    breakeven_method: BreakevenMethod,
    max_profit: Bound,
    max_loss: Bound,
    greeks: Greeks,
    directional_label: DirectionalLabel,
    volatility_label: VolatilityLabel,
    risk_interpretation: String,
}

impl AnalysisResult {
    pub fn strategy_name(&self) -> &str {
        &self.strategy_name
    }

    pub fn kind(&self) -> &StrategyKind {
        &self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn initial_spot(&self) -> f64 {
        self.initial_spot
    }

    pub fn spot_grid(&self) -> &SpotGrid {
        &self.spot_grid
    }

    pub fn net_payoff(&self) -> &PayoffCurve {
        &self.net_payoff
    }

    /// One curve per leg, in leg order
    pub fn leg_payoffs(&self) -> &[PayoffCurve] {
        &self.leg_payoffs
    }

    /// Entry price per leg, in leg order
    pub fn premiums(&self) -> &[f64] {
        &self.premiums
    }

    pub fn net_premium(&self) -> f64 {
        self.net_premium
    }

    /// Ascending
    pub fn breakevens(&self) -> &[f64] {
        &self.breakevens
    }

    pub fn breakeven_method(&self) -> BreakevenMethod {
        self.breakeven_method
    }

    pub fn max_profit(&self) -> Bound {
        self.max_profit
    }

    pub fn max_loss(&self) -> Bound {
        self.max_loss
    }

    pub fn greeks(&self) -> Greeks {
        self.greeks
    }

    pub fn net_delta(&self) -> f64 {
        self.greeks.delta
    }

    /// Per unit volatility
    pub fn net_vega(&self) -> f64 {
        self.greeks.vega
    }

    pub fn directional_label(&self) -> DirectionalLabel {
        self.directional_label
    }

    pub fn volatility_label(&self) -> VolatilityLabel {
        self.volatility_label
    }

    pub fn risk_interpretation(&self) -> &str {
        &self.risk_interpretation
    }
}
