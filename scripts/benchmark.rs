// scripts/benchmark.rs
use ndarray::Array1;
use options_sim::analytics::bs_analytic;
use options_sim::analytics::OptionKind;
use options_sim::math_utils::Timer;
use options_sim::strategy::{bull_call_spread, long_straddle};
use options_sim::{ComposerConfig, SpotGrid, Strategy, StrategyComposer, StrategyResult};
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::Command;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_model: String,
    cpu_cores: usize,
    rust_version: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_model: Self::get_cpu_model(),
            cpu_cores: num_cpus::get(),
            rust_version: Self::get_rust_version(),
            rayon_threads: rayon::current_num_threads(),
        }
    }

    fn get_cpu_model() -> String {
        #[cfg(target_os = "linux")]
        {
            std::fs::read_to_string("/proc/cpuinfo")
                .ok()
                .and_then(|content| {
                    content
                        .lines()
                        .find(|line| line.starts_with("model name"))
                        .and_then(|line| line.split(':').nth(1))
                        .map(|s| s.trim().to_string())
                })
                .unwrap_or_else(|| "Unknown CPU".to_string())
        }

        #[cfg(target_os = "macos")]
        {
            Command::new("sysctl")
                .args(["-n", "machdep.cpu.brand_string"])
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .unwrap_or_else(|_| "Unknown CPU".to_string())
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            "Unknown CPU".to_string()
        }
    }

    fn get_rust_version() -> String {
        Command::new("rustc")
            .arg("--version")
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_else(|_| "Unknown Rust version".to_string())
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    grid_points: usize,
    time_ms: f64,
    throughput_points_per_sec: f64,
    checksum: f64,
}

impl BenchmarkResult {
    fn new(name: String, grid_points: usize, time_ms: f64, checksum: f64) -> Self {
        BenchmarkResult {
            name,
            grid_points,
            time_ms,
            throughput_points_per_sec: grid_points as f64 / (time_ms / 1000.0).max(f64::EPSILON),
            checksum,
        }
    }
}

const GRID_SIZES: [usize; 4] = [200, 10_000, 100_000, 1_000_000];

fn run_pricing_benchmarks() -> StrategyResult<Vec<BenchmarkResult>> {
    let mut results = Vec::new();

    for &n in &GRID_SIZES {
        println!("Pricing over {} spots...", n);
        let spots = Array1::linspace(50.0, 150.0, n);

        let mut timer = Timer::new();
        timer.start();
        let prices = bs_analytic::price_vec(spots.view(), 100.0, 0.25, 0.05, 0.2, OptionKind::Call)?;
        results.push(BenchmarkResult::new(
            format!("Call price_vec ({} pts)", n),
            n,
            timer.elapsed_ms(),
            prices.sum(),
        ));

        timer.start();
        let deltas = bs_analytic::delta_vec(spots.view(), 100.0, 0.25, 0.05, 0.2, OptionKind::Put)?;
        results.push(BenchmarkResult::new(
            format!("Put delta_vec ({} pts)", n),
            n,
            timer.elapsed_ms(),
            deltas.sum(),
        ));

        timer.start();
        let vegas = bs_analytic::vega_vec(spots.view(), 100.0, 0.25, 0.05, 0.2)?;
        results.push(BenchmarkResult::new(
            format!("vega_vec ({} pts)", n),
            n,
            timer.elapsed_ms(),
            vegas.sum(),
        ));
    }

    Ok(results)
}

fn run_strategy_benchmarks() -> StrategyResult<Vec<BenchmarkResult>> {
    let mut results = Vec::new();
    let strategies: Vec<Strategy> = vec![
        long_straddle(100.0, 100.0, 0.25, 0.05, 0.2)?,
        bull_call_spread(100.0, 95.0, 110.0, 0.25, 0.05, 0.2)?,
        Strategy::custom(
            "Custom Straddle",
            long_straddle(100.0, 100.0, 0.25, 0.05, 0.2)?.legs().to_vec(),
        )?,
    ];
    let serial = StrategyComposer::new(ComposerConfig {
        parallel_threshold: usize::MAX,
        ..Default::default()
    })?;
    let parallel = StrategyComposer::default();

    for &n in &GRID_SIZES {
        let grid = SpotGrid::linspace(1.0, 300.0, n)?;
        for strategy in &strategies {
            println!("Analyzing {} over {} spots...", strategy.name(), n);
            for (mode, composer) in [("serial", &serial), ("default", &parallel)] {
                let mut timer = Timer::new();
                timer.start();
                let analysis = composer.analyze(strategy, &grid);
                let checksum = analysis.net_payoff().pnl().sum();
                results.push(BenchmarkResult::new(
                    format!("{} analyze {} ({} pts)", strategy.name(), mode, n),
                    n,
                    timer.elapsed_ms(),
                    checksum,
                ));
            }
        }
    }

    Ok(results)
}

fn write_results_to_csv(results: &[BenchmarkResult], system_info: &SystemInfo, filename: &str) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);

    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU: {}", system_info.cpu_model)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(file, "# Benchmark Date: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(file, "#")?;

    writeln!(file, "Benchmark,Grid_Points,Time_ms,Throughput_points_per_sec,Checksum")?;
    for result in results {
        writeln!(
            file,
            "{},{},{:.3},{:.0},{:.6}",
            result.name, result.grid_points, result.time_ms, result.throughput_points_per_sec, result.checksum
        )?;
    }
    file.flush()?;

    println!("Results written to {}", filename);
    Ok(())
}

fn main() {
    println!("options-sim Benchmark Suite");
    println!("===========================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU: {}", system_info.cpu_model);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    let mut results = Vec::new();
    for suite in [run_pricing_benchmarks, run_strategy_benchmarks] {
        match suite() {
            Ok(mut r) => results.append(&mut r),
            Err(e) => {
                eprintln!("Benchmark failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    println!("\n{:<50} {:>10} {:>12} {:>16}", "Benchmark", "Points", "Time (ms)", "Points/sec");
    for r in &results {
        println!(
            "{:<50} {:>10} {:>12.3} {:>16.0}",
            r.name, r.grid_points, r.time_ms, r.throughput_points_per_sec
        );
    }
    println!();

    if let Err(e) = std::fs::create_dir_all("results") {
        eprintln!("Error creating results directory: {}", e);
    }
    let filename = format!("results/benchmark_{}.csv", chrono::Local::now().format("%Y%m%d_%H%M%S"));
    if let Err(e) = write_results_to_csv(&results, &system_info, &filename) {
        eprintln!("Error writing benchmark results: {}", e);
    }
}
