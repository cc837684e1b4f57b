// tests/property_test.rs
use options_sim::analytics::bs_analytic::{delta, price, vega};
use options_sim::analytics::OptionKind;
use options_sim::strategy::{bull_call_spread, long_straddle};
use options_sim::SpotGrid;
use proptest::prelude::*;

fn spot_strategy() -> impl Strategy<Value = f64> {
    10.0..300.0
}

fn expiry_strategy() -> impl Strategy<Value = f64> {
    0.01..3.0
}

fn rate_strategy() -> impl Strategy<Value = f64> {
    0.0..0.10
}

fn vol_strategy() -> impl Strategy<Value = f64> {
    0.05..1.0
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_put_call_parity_holds(
        s in spot_strategy(),
        k in spot_strategy(),
        t in expiry_strategy(),
        r in rate_strategy(),
        sigma in vol_strategy()
    ) {
        let call = price(s, k, t, r, sigma, OptionKind::Call).unwrap();
        let put = price(s, k, t, r, sigma, OptionKind::Put).unwrap();
        let parity = s - k * (-r * t).exp();
        let tolerance = 1e-9 * (1.0 + s + k);
        prop_assert!(
            (call - put - parity).abs() < tolerance,
            "C - P = {} but S - K·e^(-rT) = {}", call - put, parity
        );
        prop_assert!(call >= 0.0 && put >= 0.0);
    }

    #[test]
    fn test_delta_ranges_and_vega_sign(
        s in spot_strategy(),
        k in spot_strategy(),
        t in expiry_strategy(),
        r in rate_strategy(),
        sigma in vol_strategy()
    ) {
        let call_delta = delta(s, k, t, r, sigma, OptionKind::Call).unwrap();
        let put_delta = delta(s, k, t, r, sigma, OptionKind::Put).unwrap();
        prop_assert!((0.0..=1.0).contains(&call_delta));
        prop_assert!((-1.0..=0.0).contains(&put_delta));
        prop_assert!((call_delta - put_delta - 1.0).abs() < 1e-12);

        let v = vega(s, k, t, r, sigma, OptionKind::Call).unwrap();
        prop_assert!(v >= 0.0 && v.is_finite());
    }

    #[test]
    fn test_straddle_breakevens_straddle_the_strike(
        s in 50.0..150.0,
        k in 50.0..150.0,
        t in 0.05..2.0,
        r in rate_strategy(),
        sigma in 0.05..0.8
    ) {
        let straddle = long_straddle(s, k, t, r, sigma).unwrap();
        let grid = SpotGrid::linspace(1.0, 400.0, 400).unwrap();
        let analysis = straddle.analyze(&grid);
        let total = analysis.premiums().iter().sum::<f64>();

        let breakevens = analysis.breakevens();
        let upper = breakevens[breakevens.len() - 1];
        prop_assert!((upper - (k + total)).abs() < 1e-9);
        if k - total > 0.0 {
            prop_assert_eq!(breakevens.len(), 2);
            prop_assert!((breakevens[0] - (k - total)).abs() < 1e-9);
        }

        let max_loss = analysis.max_loss().finite().unwrap();
        prop_assert!((max_loss + total).abs() < 1e-9);
        for (_, pnl) in analysis.net_payoff().points() {
            prop_assert!(pnl >= max_loss - 1e-9);
        }
    }

    #[test]
    fn test_spread_payoff_stays_within_bounds(
        s in 50.0..150.0,
        lower in 50.0..120.0,
        width in 1.0..40.0,
        t in 0.05..2.0,
        sigma in 0.05..0.8
    ) {
        let spread = bull_call_spread(s, lower, lower + width, t, 0.03, sigma).unwrap();
        let analysis = spread.analyze(&SpotGrid::linspace(1.0, 300.0, 300).unwrap());

        let profit = analysis.max_profit().finite().unwrap();
        let loss = analysis.max_loss().finite().unwrap();
        prop_assert!(loss <= 0.0 && profit >= 0.0);

        let (lo, hi) = analysis.net_payoff().sampled_range();
        prop_assert!(lo >= loss - 1e-9);
        prop_assert!(hi <= profit + 1e-9);
    }
}
