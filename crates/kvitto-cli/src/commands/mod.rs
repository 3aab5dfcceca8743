//! CLI subcommands.

pub mod extract;
pub mod report;

use std::io::Read;
use std::path::Path;

use kvitto_core::{
    BatchExtractor, ExtractMode, KvittoConfig, OnError, ReceiptBatch, ReceiptParser, Roster,
};

/// Shared flags for commands that run the extraction pipeline.
#[derive(clap::Args)]
pub struct PipelineArgs {
    /// Input file, or "-" for stdin
    #[arg(required = true)]
    pub input: String,

    /// Accept only the primary keyword-anchored patterns
    #[arg(long)]
    pub strict: bool,

    /// What to do with undecodable fragments and rejected records
    /// (default: the configured policy, normally skip)
    #[arg(long, value_enum)]
    pub on_error: Option<OnErrorArg>,

    /// Known passenger names, comma-separated, in priority order
    #[arg(long, value_delimiter = ',')]
    pub roster: Vec<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OnErrorArg {
    /// Drop and continue
    Skip,
    /// Abort the whole batch
    Fail,
}

impl From<OnErrorArg> for OnError {
    fn from(arg: OnErrorArg) -> Self {
        match arg {
            OnErrorArg::Skip => OnError::Skip,
            OnErrorArg::Fail => OnError::Fail,
        }
    }
}

/// Load config, apply command-line overrides, and run the pipeline.
pub fn run_pipeline(args: &PipelineArgs, config_path: Option<&str>) -> anyhow::Result<ReceiptBatch> {
    let config = if let Some(path) = config_path {
        KvittoConfig::from_file(Path::new(path))?
    } else {
        KvittoConfig::default()
    };

    let roster = if args.roster.is_empty() {
        Roster::new(config.roster.iter().cloned())
    } else {
        Roster::new(args.roster.iter().cloned())
    };

    let mode = if args.strict {
        ExtractMode::Strict
    } else {
        config.extraction.mode
    };

    let on_error = args
        .on_error
        .map(OnError::from)
        .unwrap_or(config.extraction.on_error);

    let parser = ReceiptParser::new(roster)
        .with_mode(mode)
        .with_max_body_len(config.extraction.max_body_len);

    let input = read_input(&args.input)?;

    let batch = BatchExtractor::new(parser)
        .with_on_error(on_error)
        .extract_from_str(&input)?;

    Ok(batch)
}

/// Read the input blob from a file or stdin ("-").
fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        let path = Path::new(input);
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        Ok(std::fs::read_to_string(path)?)
    }
}
