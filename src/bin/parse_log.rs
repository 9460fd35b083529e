//! Command line check of a thermal log: parses the file and prints the
//! statistics and per-sensor point counts.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use rigtemp::pipeline::analyze_file;
use rigtemp::series::{format_count, format_stat};
use rigtemp::settings::AnalyzerSettings;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        bail!("usage: parse_log <temperature.log>");
    };

    let config = AnalyzerSettings::load().file_series_config();
    let log = analyze_file(&path, &config)
        .with_context(|| format!("failed to analyze {}", path.display()))?;

    let stats = log.data.stats;
    println!("File:    {}", log.name);
    println!("Max:     {} °C", format_stat(stats.map(|s| s.max_value)));
    println!("Min:     {} °C", format_stat(stats.map(|s| s.min_value)));
    println!("Sensors: {}", format_count(stats.map(|s| s.sensor_count)));
    println!("Points:  {}", format_count(stats.map(|s| s.sample_count)));
    println!();

    for series in &log.data.series {
        let marker = if series.default_visible { "*" } else { " " };
        match series.value_range() {
            Some((lo, hi)) => println!(
                "{} {:<24} {:>7} pts  {:>8.2} .. {:>8.2} °C",
                marker,
                series.name,
                series.points.len(),
                lo,
                hi
            ),
            None => println!("{} {:<24} {:>7} pts", marker, series.name, 0),
        }
    }

    Ok(())
}
