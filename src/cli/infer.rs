use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::alignment::snapshot::load_snapshot;
use crate::alignment::AlignmentIndex;
use crate::cli::OutputFormat;
use crate::core::chain::AncestorChain;
use crate::parsing::positions::parse_positions_file;
use crate::pipeline::{write_rows, Pipeline, RowFormat, RunConfig, Schedule};

#[derive(Args)]
pub struct InferArgs {
    /// Alignment snapshot (JSON)
    #[arg(required = true)]
    pub alignment: PathBuf,

    /// Name of the reference genome within the alignment
    #[arg(required = true)]
    pub reference: String,

    /// Ancestor genome name, or a comma-separated list tried in order (e.g. "Anc0,Anc1")
    #[arg(required = true)]
    pub ancestors: String,

    /// Positions file (chromosome, 0-based start, end; whitespace-separated).
    /// Use '-' for stdin
    #[arg(required = true)]
    pub positions: PathBuf,

    /// Output file. Use '-' for stdout
    #[arg(required = true)]
    pub output: PathBuf,

    /// Process positions in input order instead of sorting by chromosome and start
    #[arg(long)]
    pub no_sort: bool,

    /// Log progress every N positions (0 disables)
    #[arg(long, default_value = "0")]
    pub progress: usize,
}

impl InferArgs {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            schedule: if self.no_sort {
                Schedule::InputOrder
            } else {
                Schedule::Sorted
            },
            progress_interval: self.progress,
        }
    }
}

/// Execute infer subcommand
///
/// # Errors
///
/// Returns an error if the alignment, reference or ancestors cannot be
/// resolved, the positions file yields no valid positions, or output fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: InferArgs, format: OutputFormat) -> anyhow::Result<()> {
    let alignment = load_snapshot(&args.alignment)
        .with_context(|| format!("Failed to load alignment {}", args.alignment.display()))?;

    let reference = alignment
        .genome(&args.reference)
        .ok_or_else(|| anyhow::anyhow!("Reference genome {} not found", args.reference))?;

    let chain = AncestorChain::from_list(&args.ancestors, &alignment)?;
    if chain.is_multiple() {
        info!("Using ancestor chain: {}", chain.names().join(", "));
    }

    // An unreadable positions file must not truncate an existing output
    let records = parse_positions_file(&args.positions)?;

    // Opened before the run, so an empty batch still leaves an empty file behind
    let out = open_output(&args.output)?;

    let pipeline = Pipeline::new(&alignment, reference, &chain);
    let output = pipeline.run(&records, &args.run_config())?;

    let row_format = match format {
        OutputFormat::Json => RowFormat::JsonLines,
        OutputFormat::Text | OutputFormat::Tsv => RowFormat::Tsv,
    };
    write_rows(&output.rows, row_format, out)?;

    Ok(())
}

fn open_output(path: &Path) -> anyhow::Result<Box<dyn Write>> {
    if path.to_string_lossy() == "-" {
        return Ok(Box::new(BufWriter::new(std::io::stdout().lock())));
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}
