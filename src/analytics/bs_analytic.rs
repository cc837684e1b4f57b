// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas for European options and Greeks
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! For European options the risk-neutral price has a closed form in terms
//! of the cumulative normal distribution Φ(x):
//! ```text
//! d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
//! d₂ = d₁ - σ√T
//! ```
//!
//! # Degenerate inputs
//!
//! When σ√T = 0 (at expiry, or zero volatility) d₁ and d₂ are undefined.
//! Those inputs are not errors: the option value is the deterministic
//! payoff against the discounted strike K·e^(-rT) (which is K itself at
//! T = 0), delta is the step of that payoff and vega is zero.
//!
//! # Units
//!
//! Vega is reported per unit of volatility (σ moving from 0.20 to 1.20).
//! Divide by 100 for the change per volatility point.

use crate::error::{validation::*, StrategyResult};
use crate::market::MarketParameters;
use crate::math_utils::{norm_cdf, norm_pdf};
use ndarray::{Array1, ArrayView1, Zip};
use serde::{Deserialize, Serialize};

/// Spot vectors at least this long are evaluated on the rayon pool.
/// The evaluation is element-wise, so both paths give identical bits.
pub const PARALLEL_GRID_THRESHOLD: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Call,
    Put,
}

/// First-order sensitivities of one position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂V/∂σ per unit volatility
    pub vega: f64,
}

impl Greeks {
    pub fn new(delta: f64, vega: f64) -> Self {
        Greeks { delta, vega }
    }

    /// Vega per 1% volatility move
    pub fn vega_per_point(&self) -> f64 {
        self.vega / 100.0
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Greeks {
            delta: self.delta * factor,
            vega: self.vega * factor,
        }
    }
}

impl std::ops::Add for Greeks {
    type Output = Greeks;

    fn add(self, rhs: Greeks) -> Greeks {
        Greeks {
            delta: self.delta + rhs.delta,
            vega: self.vega + rhs.vega,
        }
    }
}

impl std::iter::Sum for Greeks {
    fn sum<I: Iterator<Item = Greeks>>(iter: I) -> Greeks {
        iter.fold(Greeks::default(), |acc, g| acc + g)
    }
}

fn d1_d2(m: &MarketParameters) -> (f64, f64) {
    let sigma = m.volatility();
    let t = m.time_to_expiry();
    let sig_sqrt_t = sigma * t.sqrt();
    let d1 = ((m.spot() / m.strike()).ln() + (m.risk_free_rate() + 0.5 * sigma * sigma) * t)
        / sig_sqrt_t;
    (d1, d1 - sig_sqrt_t)
}

/// Black-Scholes European option price
///
/// # Formula
/// ```text
/// C = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// P = K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)
/// ```
///
/// At expiry this is the intrinsic value; with zero volatility it is the
/// discounted deterministic payoff. The result is floored at zero to absorb
/// cancellation error for deep out-of-the-money options.
pub fn option_price(m: &MarketParameters, kind: OptionKind) -> f64 {
    let s = m.spot();
    let df_k = m.discounted_strike();

    if m.is_degenerate() {
        tracing::trace!(spot = s, strike = m.strike(), ?kind, "degenerate price branch");
        return match kind {
            OptionKind::Call => (s - df_k).max(0.0),
            OptionKind::Put => (df_k - s).max(0.0),
        };
    }

    let (d1, d2) = d1_d2(m);
    let price = match kind {
        OptionKind::Call => s * norm_cdf(d1) - df_k * norm_cdf(d2),
        OptionKind::Put => df_k * norm_cdf(-d2) - s * norm_cdf(-d1),
    };
    price.max(0.0)
}

/// Black-Scholes Delta (∂V/∂S)
///
/// # Formula
/// ```text
/// Δ_call = Φ(d₁)
/// Δ_put  = Φ(d₁) - 1
/// ```
///
/// # Interpretation
/// - Hedge ratio: shares per option
/// - Range: [0, 1] for calls, [-1, 0] for puts
/// - Degenerate inputs: 1{S > K·e^(-rT)} for calls, -1{S < K·e^(-rT)} for puts
pub fn option_delta(m: &MarketParameters, kind: OptionKind) -> f64 {
    if m.is_degenerate() {
        let s = m.spot();
        let df_k = m.discounted_strike();
        return match kind {
            OptionKind::Call => {
                if s > df_k {
                    1.0
                } else {
                    0.0
                }
            }
            OptionKind::Put => {
                if s < df_k {
                    -1.0
                } else {
                    0.0
                }
            }
        };
    }

    let (d1, _) = d1_d2(m);
    match kind {
        OptionKind::Call => norm_cdf(d1),
        OptionKind::Put => norm_cdf(d1) - 1.0,
    }
}

/// Black-Scholes Vega (∂V/∂σ), identical for calls and puts
///
/// # Formula
/// ```text
/// ν = S * φ(d₁) * √T
/// ```
///
/// # Interpretation
/// - Always non-negative for a long option
/// - Maximum near the money, grows with time to expiry
/// - Units: price change per unit volatility
pub fn option_vega(m: &MarketParameters) -> f64 {
    if m.is_degenerate() {
        return 0.0;
    }
    let (d1, _) = d1_d2(m);
    m.spot() * norm_pdf(d1) * m.time_to_expiry().sqrt()
}

/// Delta and vega in one call
pub fn option_greeks(m: &MarketParameters, kind: OptionKind) -> Greeks {
    Greeks {
        delta: option_delta(m, kind),
        vega: option_vega(m),
    }
}

/// Evaluate `f` at every spot of `spots`, everything else taken from `template`
fn map_spots<F>(
    spots: ArrayView1<'_, f64>,
    template: &MarketParameters,
    f: F,
) -> StrategyResult<Array1<f64>>
where
    F: Fn(&MarketParameters) -> f64 + Sync + Send,
{
    for (i, &s) in spots.iter().enumerate() {
        validate_positive(&format!("spot[{}]", i), s)?;
    }

    let out = if spots.len() >= PARALLEL_GRID_THRESHOLD {
        Zip::from(spots).par_map_collect(|&s| f(&template.at_spot(s)))
    } else {
        spots.map(|&s| f(&template.at_spot(s)))
    };
    Ok(out)
}

/// Option price at each spot of `spots`; strike, T, r and σ come from `template`
pub fn price_grid(
    spots: ArrayView1<'_, f64>,
    template: &MarketParameters,
    kind: OptionKind,
) -> StrategyResult<Array1<f64>> {
    map_spots(spots, template, |m| option_price(m, kind))
}

/// Option delta at each spot of `spots`
pub fn delta_grid(
    spots: ArrayView1<'_, f64>,
    template: &MarketParameters,
    kind: OptionKind,
) -> StrategyResult<Array1<f64>> {
    map_spots(spots, template, |m| option_delta(m, kind))
}

/// Option vega at each spot of `spots`
pub fn vega_grid(
    spots: ArrayView1<'_, f64>,
    template: &MarketParameters,
) -> StrategyResult<Array1<f64>> {
    map_spots(spots, template, option_vega)
}

/// Black-Scholes price from raw inputs
///
/// # Parameters
/// - `s`: Current stock price
/// - `k`: Strike price
/// - `t`: Time to expiration in years
/// - `r`: Risk-free rate
/// - `sigma`: Volatility
///
/// # Errors
/// `InvalidParameter` for S ≤ 0, K ≤ 0, T < 0, σ < 0 or non-finite input.
pub fn price(s: f64, k: f64, t: f64, r: f64, sigma: f64, kind: OptionKind) -> StrategyResult<f64> {
    let m = MarketParameters::new(s, k, t, r, sigma)?;
    Ok(option_price(&m, kind))
}

/// Black-Scholes delta from raw inputs
pub fn delta(s: f64, k: f64, t: f64, r: f64, sigma: f64, kind: OptionKind) -> StrategyResult<f64> {
    let m = MarketParameters::new(s, k, t, r, sigma)?;
    Ok(option_delta(&m, kind))
}

/// Black-Scholes vega from raw inputs; `kind` is accepted for symmetry
/// with [`price`] and [`delta`] but does not change the result
pub fn vega(s: f64, k: f64, t: f64, r: f64, sigma: f64, _kind: OptionKind) -> StrategyResult<f64> {
    let m = MarketParameters::new(s, k, t, r, sigma)?;
    Ok(option_vega(&m))
}

fn template_for(
    spots: ArrayView1<'_, f64>,
    k: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> StrategyResult<MarketParameters> {
    validate_positive("strike", k)?;
    // Any valid spot works as the template anchor; every entry is re-validated.
    let anchor = spots.iter().copied().find(|s| s.is_finite() && *s > 0.0).unwrap_or(k);
    MarketParameters::new(anchor, k, t, r, sigma)
}

/// Vectorized [`price`]: one price per entry of `spots`
pub fn price_vec(
    spots: ArrayView1<'_, f64>,
    k: f64,
    t: f64,
    r: f64,
    sigma: f64,
    kind: OptionKind,
) -> StrategyResult<Array1<f64>> {
    let template = template_for(spots, k, t, r, sigma)?;
    price_grid(spots, &template, kind)
}

/// Vectorized [`delta`]
pub fn delta_vec(
    spots: ArrayView1<'_, f64>,
    k: f64,
    t: f64,
    r: f64,
    sigma: f64,
    kind: OptionKind,
) -> StrategyResult<Array1<f64>> {
    let template = template_for(spots, k, t, r, sigma)?;
    delta_grid(spots, &template, kind)
}

/// Vectorized [`vega`]
pub fn vega_vec(
    spots: ArrayView1<'_, f64>,
    k: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> StrategyResult<Array1<f64>> {
    let template = template_for(spots, k, t, r, sigma)?;
    vega_grid(spots, &template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn atm() -> MarketParameters {
        MarketParameters::new(100.0, 100.0, 0.25, 0.05, 0.20).unwrap()
    }

    #[test]
    fn test_reference_call() {
        let m = atm();
        assert_abs_diff_eq!(option_price(&m, OptionKind::Call), 4.6150, epsilon = 1e-3);
        assert_abs_diff_eq!(option_delta(&m, OptionKind::Call), 0.5695, epsilon = 1e-3);
        assert_abs_diff_eq!(option_vega(&m), 19.644, epsilon = 1e-2);
    }

    #[test]
    fn test_put_delta_is_call_delta_minus_one() {
        let m = atm();
        let diff = option_delta(&m, OptionKind::Call) - option_delta(&m, OptionKind::Put);
        assert_abs_diff_eq!(diff, 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_expiry_branch() {
        let itm = MarketParameters::new(110.0, 100.0, 0.0, 0.05, 0.2).unwrap();
        assert_eq!(option_price(&itm, OptionKind::Call), 10.0);
        assert_eq!(option_price(&itm, OptionKind::Put), 0.0);
        assert_eq!(option_delta(&itm, OptionKind::Call), 1.0);
        assert_eq!(option_delta(&itm, OptionKind::Put), 0.0);
        assert_eq!(option_vega(&itm), 0.0);

        let at = MarketParameters::new(100.0, 100.0, 0.0, 0.05, 0.2).unwrap();
        assert_eq!(option_delta(&at, OptionKind::Call), 0.0);
        assert_eq!(option_delta(&at, OptionKind::Put), 0.0);
    }

    #[test]
    fn test_zero_volatility_branch() {
        let m = MarketParameters::new(100.0, 100.0, 1.0, 0.05, 0.0).unwrap();
        let df_k = 100.0 * (-0.05f64).exp();
        let call = option_price(&m, OptionKind::Call);
        assert!(call.is_finite());
        assert_abs_diff_eq!(call, 100.0 - df_k, epsilon = 1e-12);
        assert_eq!(option_price(&m, OptionKind::Put), 0.0);
        assert_eq!(option_delta(&m, OptionKind::Call), 1.0);
        assert_eq!(option_delta(&m, OptionKind::Put), 0.0);
        assert_eq!(option_vega(&m), 0.0);
    }

    #[test]
    fn test_vector_matches_scalar() {
        let spots = array![80.0, 95.0, 100.0, 105.0, 120.0];
        let m = atm();
        let prices = price_grid(spots.view(), &m, OptionKind::Put).unwrap();
        for (p, &s) in prices.iter().zip(spots.iter()) {
            let scalar = price(s, 100.0, 0.25, 0.05, 0.2, OptionKind::Put).unwrap();
            assert_eq!(*p, scalar);
        }
    }

    #[test]
    fn test_vector_rejects_bad_spot() {
        let spots = array![80.0, 0.0, 100.0];
        assert!(price_vec(spots.view(), 100.0, 0.25, 0.05, 0.2, OptionKind::Call).is_err());
        let spots = array![80.0, 100.0];
        assert!(delta_vec(spots.view(), -5.0, 0.25, 0.05, 0.2, OptionKind::Call).is_err());
    }

    #[test]
    fn test_parallel_path_is_bit_identical() {
        let n = PARALLEL_GRID_THRESHOLD + 17;
        let spots = Array1::linspace(50.0, 150.0, n);
        let m = atm();
        let par = vega_grid(spots.view(), &m).unwrap();
        let serial: Array1<f64> = spots.map(|&s| option_vega(&m.at_spot(s)));
        assert_eq!(par, serial);
    }

    #[test]
    fn test_greeks_sum() {
        let total: Greeks = vec![Greeks::new(0.5, 10.0), Greeks::new(-0.25, 4.0)]
            .into_iter()
            .sum();
        assert_abs_diff_eq!(total.delta, 0.25);
        assert_abs_diff_eq!(total.vega, 14.0);
        assert_abs_diff_eq!(total.scaled(-1.0).vega_per_point(), -0.14);
    }
}
