// demos/error_handling_demo.rs
use options_sim::analytics::bs_analytic;
use options_sim::analytics::OptionKind;
use options_sim::strategy::{bear_put_spread, bull_call_spread, long_call, long_strangle};
use options_sim::{
    ComposerConfig, MarketParameters, OptionLeg, SpotGrid, Strategy, StrategyComposer,
    StrategyError,
};

fn report<T>(result: Result<T, StrategyError>) {
    match result {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }
}

fn main() {
    println!("Error Handling Demo for options-sim");
    println!("===================================\n");

    // Test 1: Invalid market inputs
    println!("1. Testing negative spot price...");
    report(MarketParameters::new(-100.0, 100.0, 0.25, 0.05, 0.2));

    println!("\n2. Testing negative volatility...");
    report(bs_analytic::price(100.0, 100.0, 0.25, 0.05, -0.2, OptionKind::Call));

    println!("\n3. Testing non-finite rate...");
    report(long_call(100.0, 100.0, 0.25, f64::NAN, 0.2));

    // Test 2: Strike ordering
    println!("\n4. Testing bull call spread with inverted strikes...");
    report(bull_call_spread(100.0, 110.0, 95.0, 0.25, 0.05, 0.2));

    println!("\n5. Testing bear put spread with equal strikes...");
    report(bear_put_spread(100.0, 100.0, 100.0, 0.25, 0.05, 0.2));

    println!("\n6. Testing strangle with put strike above call strike...");
    report(long_strangle(100.0, 110.0, 90.0, 0.25, 0.05, 0.2));

    // Test 3: Strategy composition
    println!("\n7. Testing empty strategy...");
    report(Strategy::custom("Empty", Vec::new()));

    println!("\n8. Testing legs with different expiries...");
    let legs = MarketParameters::new(100.0, 100.0, 0.25, 0.05, 0.2)
        .and_then(|near| {
            let far = MarketParameters::new(100.0, 100.0, 0.5, 0.05, 0.2)?;
            Ok(vec![OptionLeg::long_call(near), OptionLeg::short_call(far)])
        });
    match legs {
        Ok(legs) => report(Strategy::custom("Calendar Spread", legs)),
        Err(e) => println!("   Error: {}", e),
    }

    // Test 4: Grids and configuration
    println!("\n9. Testing unsorted spot grid...");
    report(SpotGrid::new(vec![100.0, 90.0, 110.0]));

    println!("\n10. Testing composer config with zero parallel threshold...");
    report(StrategyComposer::new(ComposerConfig {
        parallel_threshold: 0,
        ..Default::default()
    }));

    println!("\n11. Testing malformed configuration document...");
    report(ComposerConfig::from_json(r#"{"parallel_threshold": "many"}"#));

    println!("\n12. Testing premium override on a missing leg...");
    match long_call(100.0, 100.0, 0.25, 0.05, 0.2) {
        Ok(strategy) => report(strategy.with_premium(5, 2.0)),
        Err(e) => println!("   Error: {}", e),
    }

    // Test 5: Edge cases that succeed
    println!("\n13. Testing at-expiry and zero-volatility pricing...");
    match bs_analytic::price(110.0, 100.0, 0.0, 0.05, 0.2, OptionKind::Call) {
        Ok(p) => println!("   ✓ Expired call priced at intrinsic value: {:.4}", p),
        Err(e) => println!("   Error: {}", e),
    }
    match bs_analytic::delta(100.0, 100.0, 1.0, 0.05, 0.0, OptionKind::Call) {
        Ok(d) => println!("   ✓ Zero-volatility delta is finite: {:.4}", d),
        Err(e) => println!("   Error: {}", e),
    }

    println!("\n14. Testing valid strategy...");
    let analysis = long_call(100.0, 100.0, 0.25, 0.05, 0.2)
        .and_then(|s| s.analyze_spots(vec![80.0, 90.0, 100.0, 110.0, 120.0]));
    match analysis {
        Ok(a) => println!("   ✓ Success! Breakevens: {:?}", a.breakevens()),
        Err(e) => println!("   Error: {}", e),
    }

    println!("\nError handling demo completed!");
}
