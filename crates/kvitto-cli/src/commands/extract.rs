//! Extract command - emit receipt fields as parallel lists.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use kvitto_core::ReceiptBatch;
use tracing::debug;

use super::{run_pipeline, PipelineArgs};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pipeline: PipelineArgs,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text lines
    Text,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let batch = run_pipeline(&args.pipeline, config_path)?;

    debug!(accepted = batch.len(), "formatting output");

    let output = format_batch(&batch, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} receipts written to {}",
            style("✓").green(),
            batch.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_batch(batch: &ReceiptBatch, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(batch)?),
        OutputFormat::Csv => format_csv(batch),
        OutputFormat::Text => Ok(format_text(batch)),
    }
}

fn format_csv(batch: &ReceiptBatch) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["date", "passenger", "cost", "currency"])?;

    for i in 0..batch.len() {
        wtr.write_record([
            batch.dates[i]
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            batch.passengers[i].clone().unwrap_or_default(),
            batch.costs[i].to_string(),
            batch.currencies[i].clone(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(batch: &ReceiptBatch) -> String {
    let mut output = String::new();

    for i in 0..batch.len() {
        let date = batch.dates[i]
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let passenger = batch.passengers[i].as_deref().unwrap_or("-");

        output.push_str(&format!(
            "{} | {} | {} {}\n",
            date, passenger, batch.costs[i], batch.currencies[i]
        ));
    }

    output
}
