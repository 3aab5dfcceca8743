//! Report command - summary statistics for an export.

use std::collections::BTreeMap;

use clap::Args;
use console::style;
use rust_decimal::Decimal;

use super::{run_pipeline, PipelineArgs};

/// Arguments for the report command.
#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pipeline: PipelineArgs,

    /// Sample lines to print (0 = none)
    #[arg(long, default_value = "5")]
    sample: usize,
}

pub fn run(args: ReportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let batch = run_pipeline(&args.pipeline, config_path)?;

    println!(
        "{} Extracted {} receipts",
        style("✓").green(),
        batch.len()
    );

    if args.sample > 0 {
        println!();
        for i in 0..batch.len().min(args.sample) {
            let date = batch.dates[i]
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {} | {} | {} {}",
                date,
                batch.passengers[i].as_deref().unwrap_or("-"),
                batch.costs[i],
                batch.currencies[i]
            );
        }
    }

    // Totals per currency
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for (cost, currency) in batch.costs.iter().zip(&batch.currencies) {
        *totals.entry(currency.as_str()).or_default() += *cost;
    }

    println!();
    println!("Totals:");
    for (currency, total) in &totals {
        println!("  {} {}", total.round_dp(2), currency);
    }

    // Rides per passenger
    let mut per_passenger: BTreeMap<&str, usize> = BTreeMap::new();
    for passenger in batch.passengers.iter().flatten() {
        *per_passenger.entry(passenger.as_str()).or_default() += 1;
    }

    if !per_passenger.is_empty() {
        println!();
        println!("Rides per passenger:");
        for (passenger, count) in &per_passenger {
            println!("  {}: {}", passenger, count);
        }
    }

    if batch.warnings.unattributed > 0 {
        println!();
        println!(
            "{} {} receipts without a passenger name",
            style("⚠").yellow(),
            batch.warnings.unattributed
        );
    }

    if !batch.warnings.unknown_names.is_empty() {
        println!(
            "{} Unknown passenger names: {}",
            style("⚠").yellow(),
            batch.warnings.unknown_names.join(", ")
        );
    }

    Ok(())
}
