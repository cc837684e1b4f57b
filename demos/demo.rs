// demos/demo.rs
use options_sim::analytics::bs_analytic;
use options_sim::analytics::OptionKind;
use options_sim::math_utils::Timer;
use options_sim::output;
use options_sim::strategy::{
    bear_put_spread, bull_call_spread, covered_call, long_call, long_put, long_straddle,
    long_strangle,
};
use options_sim::{SpotGrid, Strategy, StrategyResult};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run_demo_mode() {
        eprintln!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

fn run_demo_mode() -> StrategyResult<()> {
    println!("Running options-sim Strategy Demo\n");

    let s0 = 100.0;
    let t = 0.25;
    let r = 0.05;
    let sigma = 0.20;

    // --- Single option pricing ---
    println!("--- Black-Scholes Reference (S=K={}, T={}, r={}, σ={}) ---", s0, t, r, sigma);
    for kind in [OptionKind::Call, OptionKind::Put] {
        let price = bs_analytic::price(s0, s0, t, r, sigma, kind)?;
        let delta = bs_analytic::delta(s0, s0, t, r, sigma, kind)?;
        let vega = bs_analytic::vega(s0, s0, t, r, sigma, kind)?;
        println!(
            "{:?}: price {:.4}, delta {:.4}, vega {:.4} ({:.4} per vol point)",
            kind,
            price,
            delta,
            vega,
            vega / 100.0
        );
    }
    println!();

    let strategies: Vec<Strategy> = vec![
        long_call(s0, 100.0, t, r, sigma)?,
        long_put(s0, 100.0, t, r, sigma)?,
        covered_call(s0, 105.0, t, r, sigma)?,
        bull_call_spread(s0, 95.0, 110.0, t, r, sigma)?,
        bear_put_spread(s0, 110.0, 100.0, t, r, sigma)?,
        long_straddle(s0, 100.0, t, r, sigma)?,
        long_strangle(s0, 90.0, 110.0, t, r, sigma)?,
    ];
    let grid = SpotGrid::around(s0, 0.3, 200)?;

    if let Err(e) = std::fs::create_dir_all("results") {
        eprintln!("Error creating results directory: {}", e);
    }

    for strategy in &strategies {
        let mut timer = Timer::new();
        timer.start();
        let analysis = strategy.analyze(&grid);
        let elapsed = timer.elapsed_ms();

        println!("--- {} ({:.3} ms) ---", analysis.strategy_name(), elapsed);
        println!("{}", analysis.description());
        println!("Premiums: {:?}", analysis.premiums());
        println!("Net premium: {:.4}", analysis.net_premium());
        let breakevens: Vec<String> = analysis.breakevens().iter().map(|b| format!("{:.2}", b)).collect();
        println!("Breakevens: [{}] ({:?})", breakevens.join(", "), analysis.breakeven_method());
        println!("Max profit: {}", analysis.max_profit());
        println!("Max loss: {}", analysis.max_loss());
        println!(
            "Net delta: {:.4} ({}), net vega: {:.4} ({})",
            analysis.net_delta(),
            analysis.directional_label(),
            analysis.net_vega(),
            analysis.volatility_label()
        );
        println!("Risk: {}\n", analysis.risk_interpretation());

        let stem = analysis.strategy_name().to_lowercase().replace(' ', "_");
        let payoff_file = format!("results/{}_payoff.csv", stem);
        match output::write_payoff_to_csv(&payoff_file, &analysis) {
            Ok(_) => println!("Payoff data written to {}", payoff_file),
            Err(e) => eprintln!("Error writing payoff data: {}", e),
        }
        let summary_file = format!("results/{}_summary.csv", stem);
        match output::write_summary_to_csv(&summary_file, &analysis) {
            Ok(_) => println!("Summary data written to {}", summary_file),
            Err(e) => eprintln!("Error writing summary data: {}", e),
        }
        let json_file = format!("results/{}.json", stem);
        match output::write_json(&json_file, &analysis) {
            Ok(_) => println!("Analysis written to {}\n", json_file),
            Err(e) => eprintln!("Error writing analysis: {}", e),
        }
    }

    Ok(())
}
