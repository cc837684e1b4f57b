// src/output.rs
//! Export of finished analyses. Nothing here recomputes or alters a result.

use crate::strategy::AnalysisResult;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// One row per grid point: spot, net P&L, then one column per leg
pub fn write_payoff_to_csv(filename: &str, result: &AnalysisResult) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);
    write!(file, "spot,net_pnl")?;
    for i in 0..result.leg_payoffs().len() {
        write!(file, ",leg_{}", i)?;
    }
    writeln!(file)?;

    let legs: Vec<_> = result.leg_payoffs().iter().map(|c| c.pnl()).collect();
    for (i, (spot, pnl)) in result.net_payoff().points().enumerate() {
        write!(file, "{},{}", spot, pnl)?;
        for leg in &legs {
            write!(file, ",{}", leg[i])?;
        }
        writeln!(file)?;
    }
    file.flush()
}

/// Key/value summary: metrics, breakevens and labels
pub fn write_summary_to_csv(filename: &str, result: &AnalysisResult) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);
    let breakevens: Vec<String> = result.breakevens().iter().map(|b| format!("{:.4}", b)).collect();
    let rows = [
        ("strategy", result.strategy_name().to_string()),
        ("initial_spot", result.initial_spot().to_string()),
        ("net_premium", result.net_premium().to_string()),
        ("max_profit", result.max_profit().to_string()),
        ("max_loss", result.max_loss().to_string()),
        ("breakevens", breakevens.join(";")),
        ("net_delta", result.net_delta().to_string()),
        ("net_vega", result.net_vega().to_string()),
        ("directional_label", result.directional_label().to_string()),
        ("volatility_label", result.volatility_label().to_string()),
    ];
    for (key, value) in rows {
        writeln!(file, "{},{}", key, value)?;
    }
    file.flush()
}

/// Pretty JSON of the whole bundle
pub fn to_json(result: &AnalysisResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

pub fn write_json(filename: &str, result: &AnalysisResult) -> io::Result<()> {
    let file = BufWriter::new(File::create(filename)?);
    serde_json::to_writer_pretty(file, result).map_err(io::Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payoff::SpotGrid;
    use crate::strategy::long_straddle;

    #[test]
    fn test_csv_round_trip_shape() {
        let result = long_straddle(100.0, 100.0, 0.25, 0.05, 0.2)
            .unwrap()
            .analyze(&SpotGrid::linspace(80.0, 120.0, 5).unwrap());
        let path = std::env::temp_dir().join(format!("options_sim_payoff_{}.csv", std::process::id()));
        let path = path.to_string_lossy().to_string();

        write_payoff_to_csv(&path, &result).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "spot,net_pnl,leg_0,leg_1");
        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("80,"));
    }

    #[test]
    fn test_json_has_rendering_fields() {
        let result = long_straddle(100.0, 100.0, 0.25, 0.05, 0.2)
            .unwrap()
            .analyze(&SpotGrid::linspace(80.0, 120.0, 5).unwrap());
        let value: serde_json::Value = serde_json::from_str(&to_json(&result).unwrap()).unwrap();
        assert_eq!(value["strategy_name"], "Long Straddle");
        assert_eq!(value["max_profit"], "unbounded");
        assert_eq!(value["volatility_label"], "long-volatility");
        assert_eq!(value["spot_grid"].as_array().unwrap().len(), 5);
        assert_eq!(value["net_payoff"][0]["spot"], 80.0);
        assert_eq!(value["breakeven_method"], "analytic");
    }
}
