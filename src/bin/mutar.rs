//! Mutar CLI - Coverage-Guided Data Mutation Harness
//!
//! Compare mutation strategies over a seed dataset.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use mutar::{
    dataset, ComparisonHarness, Metrics, MutationConfig, Record, Result, StrategyKind,
};

/// Mutar - Coverage-Guided Data Mutation Harness
#[derive(Parser)]
#[command(name = "mutar")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare mutation strategies over a seed dataset
    Compare {
        /// JSON file with raw records (defaults to the built-in demo seed)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Strategies to run (comma-separated: guided,random,boundary)
        #[arg(long, default_value = "guided,random,boundary")]
        strategies: String,

        /// Base random seed for reproducible mutation
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Number of trials (aggregates mean metrics when above 1)
        #[arg(short, long, default_value = "1")]
        trials: usize,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: String,
    },

    /// Print the built-in demo seed dataset
    Dataset {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare {
            input,
            strategies,
            seed,
            trials,
            output,
        } => run_compare(input.as_deref(), &strategies, seed, trials, &output),
        Commands::Dataset { output } => run_dataset(&output),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run_compare(
    input: Option<&std::path::Path>,
    strategies: &str,
    seed: u64,
    trials: usize,
    output: &str,
) -> Result<()> {
    let records = match input {
        Some(path) => dataset::load_json(path)?,
        None => dataset::demo_seed(),
    };
    let kinds = parse_strategies(strategies)?;

    let config = MutationConfig::default();
    let preserve_id = dataset::seed_fault_id(&records, &config.bounds);
    let harness = ComparisonHarness::new()
        .strategies(kinds)
        .config(MutationConfig {
            preserve_id,
            ..config
        })
        .seed(seed)
        .show_progress(trials > 1 && output != "json");

    if trials > 1 {
        let summaries = harness.run_trials(&records, trials)?;
        print_summaries(&summaries, trials, output)
    } else {
        let results = harness.compare(&records)?;
        print_metrics(&results, output)
    }
}

fn run_dataset(output: &str) -> Result<()> {
    let records = dataset::demo_seed();
    match output {
        "json" => println!("{}", to_json(&records)?),
        _ => {
            for record in &records {
                println!("{}", format_record(record));
            }
        }
    }
    Ok(())
}

fn parse_strategies(input: &str) -> Result<Vec<StrategyKind>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

fn print_metrics(results: &BTreeMap<String, Metrics>, output: &str) -> Result<()> {
    if output == "json" {
        println!("{}", to_json(results)?);
        return Ok(());
    }

    println!("\n=== Evaluation Metrics ===\n");
    println!("{}", "-".repeat(50));
    println!(
        "{:<12} | {:<8} | {:<6} | {:<12}",
        "Strategy", "Coverage", "Faults", "Naturalness"
    );
    println!("{}", "-".repeat(50));
    for (name, metrics) in results {
        println!(
            "{:<12} | {:<8} | {:<6} | {:.1}%",
            name, metrics.coverage, metrics.faults, metrics.naturalness
        );
    }

    println!("\n=== Sample Faults Detected ===");
    for (name, metrics) in results {
        println!("\n{name}:");
        if metrics.faulty_records.is_empty() {
            println!("  (none)");
        }
        for record in &metrics.faulty_records {
            println!("  {}", format_record(record));
        }
    }
    Ok(())
}

fn print_summaries(
    summaries: &BTreeMap<String, mutar::TrialSummary>,
    trials: usize,
    output: &str,
) -> Result<()> {
    if output == "json" {
        println!("{}", to_json(summaries)?);
        return Ok(());
    }

    println!("\n=== Mean Metrics over {trials} Trials ===\n");
    println!("{}", "-".repeat(56));
    println!(
        "{:<12} | {:<10} | {:<8} | {:<12}",
        "Strategy", "Coverage", "Faults", "Naturalness"
    );
    println!("{}", "-".repeat(56));
    for (name, summary) in summaries {
        println!(
            "{:<12} | {:<10.2} | {:<8.2} | {:.1}%",
            name, summary.mean_coverage, summary.mean_faults, summary.mean_naturalness
        );
    }
    Ok(())
}

fn format_record(record: &Record) -> String {
    format!(
        "id={} group={} amount={:.2} adjustment={:.2} timestamp={}",
        record.id, record.group_id, record.amount, record.adjustment, record.timestamp
    )
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| mutar::Error::Serialization(e.to_string()))
}
