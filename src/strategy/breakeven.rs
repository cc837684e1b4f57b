// src/strategy/breakeven.rs
//! Breakeven detection on a sampled payoff curve
//!
//! The scan looks for sign changes between neighbouring grid points and
//! interpolates the zero linearly. Expiry payoffs are piecewise linear, so
//! the estimate is exact unless a strike sits inside the bracketing
//! interval; the error is bounded by the grid step. Finer grids give
//! tighter estimates. Strategies with closed-form roots report those
//! instead and use the scan only as a cross-check.

use crate::payoff::SpotGrid;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Where the reported breakevens came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakevenMethod {
    Analytic,
    GridScan,
}

/// Zero crossings of `pnl` sampled at `spots`, ascending.
///
/// Grid points where the P&L is exactly zero are reported once per run of
/// zeros.
pub fn scan_breakevens(spots: ArrayView1<'_, f64>, pnl: ArrayView1<'_, f64>) -> Vec<f64> {
    let mut roots = Vec::new();
    let n = spots.len().min(pnl.len());

    for i in 0..n {
        let y = pnl[i];
        if y == 0.0 {
            if i == 0 || pnl[i - 1] != 0.0 {
                roots.push(spots[i]);
            }
            continue;
        }
        if i == 0 {
            continue;
        }

        let y_prev = pnl[i - 1];
        if y_prev != 0.0 && (y_prev > 0.0) != (y > 0.0) {
            let (x_prev, x) = (spots[i - 1], spots[i]);
            roots.push(x_prev - y_prev * (x - x_prev) / (y - y_prev));
        }
    }
    roots
}

/// Sort ascending and drop duplicates closer than `tol`
pub fn normalize_roots(mut roots: Vec<f64>, tol: f64) -> Vec<f64> {
    roots.retain(|r| r.is_finite());
    roots.sort_by(|a, b| a.total_cmp(b));
    roots.dedup_by(|b, a| (*b - *a).abs() <= tol);
    roots
}

/// Analytic roots inside the grid that the scan failed to reproduce within
/// one grid step, plus scanned roots with no analytic counterpart.
pub fn cross_check(analytic: &[f64], scanned: &[f64], grid: &SpotGrid) -> Vec<f64> {
    let tol = grid.max_step();
    let inside: Vec<f64> = analytic
        .iter()
        .copied()
        .filter(|&r| r > grid.first() && r < grid.last())
        .collect();

    let unmatched_analytic = inside
        .iter()
        .copied()
        .filter(|a| !scanned.iter().any(|s| (s - a).abs() <= tol));
    let unmatched_scanned = scanned
        .iter()
        .copied()
        .filter(|s| !inside.iter().any(|a| (s - a).abs() <= tol));

    unmatched_analytic.chain(unmatched_scanned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_single_crossing_interpolated() {
        let spots = array![100.0, 110.0];
        let pnl = array![-4.0, 6.0];
        let roots = scan_breakevens(spots.view(), pnl.view());
        assert_eq!(roots.len(), 1);
        assert_abs_diff_eq!(roots[0], 104.0, epsilon = 1e-12);
    }

    #[test]
    fn test_v_shape_two_crossings() {
        let spots = array![80.0, 90.0, 100.0, 110.0, 120.0];
        let pnl = array![12.0, 2.0, -8.0, 2.0, 12.0];
        let roots = scan_breakevens(spots.view(), pnl.view());
        assert_eq!(roots.len(), 2);
        assert_abs_diff_eq!(roots[0], 92.0, epsilon = 1e-12);
        assert_abs_diff_eq!(roots[1], 108.0, epsilon = 1e-12);
    }

    #[test]
    fn test_exact_zero_reported_once() {
        let spots = array![90.0, 100.0, 110.0, 120.0];
        let pnl = array![-1.0, 0.0, 0.0, 3.0];
        let roots = scan_breakevens(spots.view(), pnl.view());
        assert_eq!(roots, vec![100.0]);
    }

    #[test]
    fn test_no_crossing() {
        let spots = array![90.0, 100.0, 110.0];
        let pnl = array![-1.0, -2.0, -0.5];
        assert!(scan_breakevens(spots.view(), pnl.view()).is_empty());
    }

    #[test]
    fn test_normalize_roots() {
        let roots = normalize_roots(vec![107.9, 92.0, 92.0 + 1e-13, f64::NAN], 1e-9);
        assert_eq!(roots, vec![92.0, 107.9]);
    }

    #[test]
    fn test_cross_check() {
        let grid = SpotGrid::linspace(70.0, 130.0, 61).unwrap();
        assert!(cross_check(&[92.01, 107.99], &[92.0, 108.0], &grid).is_empty());
        // outside the grid: nothing to compare
        assert!(cross_check(&[150.0], &[], &grid).is_empty());
        assert_eq!(cross_check(&[100.0], &[], &grid), vec![100.0]);
        assert_eq!(cross_check(&[], &[95.0], &grid), vec![95.0]);
    }
}
