use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::alignment::snapshot::load_snapshot;
use crate::alignment::{AlignmentIndex, SequenceSummary};
use crate::cli::OutputFormat;

#[derive(Args)]
pub struct InspectArgs {
    /// Alignment snapshot (JSON)
    #[arg(required = true)]
    pub alignment: PathBuf,

    /// Only show this genome
    #[arg(long)]
    pub genome: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenomeListing {
    name: String,
    sequences: Vec<SequenceSummary>,
}

/// Execute inspect subcommand
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or `--genome` names an
/// unknown genome.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: InspectArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let alignment = load_snapshot(&args.alignment)
        .with_context(|| format!("Failed to load alignment {}", args.alignment.display()))?;

    let names: Vec<String> = match &args.genome {
        Some(name) => {
            if alignment.genome(name).is_none() {
                anyhow::bail!("Genome {name} not found");
            }
            vec![name.clone()]
        }
        None => alignment
            .genome_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    };

    let listings: Vec<GenomeListing> = names
        .into_iter()
        .filter_map(|name| {
            let genome = alignment.genome(&name)?;
            Some(GenomeListing {
                sequences: alignment.sequences(genome),
                name,
            })
        })
        .collect();

    match format {
        OutputFormat::Text => {
            println!(
                "Alignment {} ({} genomes, {} columns)\n",
                args.alignment.display(),
                listings.len(),
                alignment.column_count()
            );
            for listing in &listings {
                let total: u64 = listing.sequences.iter().map(|s| s.length).sum();
                println!(
                    "{} ({} sequences, {} bp)",
                    listing.name,
                    listing.sequences.len(),
                    total
                );
                for seq in &listing.sequences {
                    if verbose {
                        println!("  {:<25} {:>12}  @{}", seq.name, seq.length, seq.start);
                    } else {
                        println!("  {:<25} {:>12}", seq.name, seq.length);
                    }
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&listings)?);
        }
        OutputFormat::Tsv => {
            println!("genome\tsequence\tlength\tstart");
            for listing in &listings {
                for seq in &listing.sequences {
                    println!("{}\t{}\t{}\t{}", listing.name, seq.name, seq.length, seq.start);
                }
            }
        }
    }

    Ok(())
}
