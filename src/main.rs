//! Net worth projection CLI
//!
//! Projects one or more scenario files and prints or writes the yearly series

use anyhow::{Context, Result};
use clap::Parser;
use networth_projection::events::{load_scenario, Scenario};
use networth_projection::{ProjectionResult, ScenarioRunner};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "networth", version, about = "Project net worth year by year from life events")]
struct Cli {
    /// Scenario JSON files
    #[arg(required = true)]
    scenarios: Vec<PathBuf>,

    /// Override the first simulated age
    #[arg(long)]
    start_age: Option<i32>,

    /// Override the last simulated age
    #[arg(long)]
    end_age: Option<i32>,

    /// Override the prevailing investment return (percent)
    #[arg(long)]
    investment_return: Option<f64>,

    /// Directory to write one <scenario>.csv per input
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print results as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply_overrides(&self, scenario: &mut Scenario) {
        if let Some(age) = self.start_age {
            scenario.simulation.start_age = age;
        }
        if let Some(age) = self.end_age {
            scenario.simulation.end_age = age;
        }
        if let Some(rate) = self.investment_return {
            scenario.simulation.investment_return = Some(rate);
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut scenarios = Vec::with_capacity(cli.scenarios.len());
    for path in &cli.scenarios {
        let mut scenario = load_scenario(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?;
        cli.apply_overrides(&mut scenario);
        scenarios.push(scenario);
    }

    let start = Instant::now();
    let runner = ScenarioRunner::new();
    let results = runner.run_batch(&scenarios);
    log::info!("projected {} scenarios in {:?}", results.len(), start.elapsed());

    for (path, result) in cli.scenarios.iter().zip(&results) {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(result)?);
        } else {
            print_table(path, result);
        }

        if let Some(dir) = &cli.output {
            let csv_path = csv_path_for(dir, path);
            let file = File::create(&csv_path)
                .with_context(|| format!("unable to create {}", csv_path.display()))?;
            result
                .write_csv(BufWriter::new(file))
                .with_context(|| format!("unable to write {}", csv_path.display()))?;
            println!("Results written to: {}", csv_path.display());
        }
    }

    Ok(())
}

/// `<dir>/<file stem>.csv`, keeping every dot in the stem
fn csv_path_for(dir: &Path, scenario: &Path) -> PathBuf {
    let stem = scenario.file_stem().unwrap_or(scenario.as_os_str());
    dir.join(format!("{}.csv", stem.to_string_lossy()))
}

fn print_table(path: &Path, result: &ProjectionResult) {
    println!("Scenario: {}", path.display());
    println!("{:>5} {:>16}", "Age", "Net Worth");
    println!("{}", "-".repeat(22));
    for point in &result.points {
        println!("{:>5} {:>16.2}", point.age, point.net_worth);
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Years: {}", summary.years);
    println!("  Final Net Worth: {:.2}", summary.final_net_worth);
    if let Some(peak) = summary.peak {
        println!("  Peak: {:.2} at age {}", peak.net_worth, peak.age);
    }
    if let Some(trough) = summary.trough {
        println!("  Trough: {:.2} at age {}", trough.net_worth, trough.age);
    }
    if let Some(age) = summary.first_negative_age {
        println!("  First negative at age {}", age);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_path_keeps_dotted_stems_apart() {
        let dir = Path::new("out");
        assert_eq!(csv_path_for(dir, Path::new("plans/plan.v1.json")), Path::new("out/plan.v1.csv"));
        assert_eq!(csv_path_for(dir, Path::new("plans/plan.v2.json")), Path::new("out/plan.v2.csv"));
        assert_eq!(csv_path_for(dir, Path::new("plan")), Path::new("out/plan.csv"));
    }
}
