//! Command-line interface for ancestral-allele.
//!
//! Available commands:
//!
//! - **infer**: Infer ancestral alleles at a list of reference positions
//! - **inspect**: List the genomes and sequences in an alignment snapshot
//!
//! ## Usage
//!
//! ```text
//! # Infer alleles using Anc0, falling back to Anc1
//! ancestral-allele infer alignment.json hg38 Anc0,Anc1 positions.bed calls.tsv
//!
//! # Keep input order while processing, report progress every 100000 positions
//! ancestral-allele infer alignment.json hg38 Anc0 positions.bed - --no-sort --progress 100000
//!
//! # Structured output
//! ancestral-allele --format json infer alignment.json hg38 Anc0 positions.bed calls.jsonl
//!
//! # Find genome and sequence names
//! ancestral-allele inspect alignment.json
//! ```

use clap::{Parser, Subcommand};

pub mod infer;
pub mod inspect;

#[derive(Parser)]
#[command(name = "ancestral-allele")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Infer ancestral alleles at reference positions from a multi-genome alignment")]
#[command(
    long_about = "ancestral-allele polarizes reference positions by looking up the aligned bases in a chain of ancestor genomes.\n\nFor each position it tries, in order:\n- the 1:1 column in each ancestor, then its duplicated copies\n- paralogous copies within the reference genome itself\n\nand reports the allele together with an evidence tag describing how it was called."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Infer ancestral alleles at reference positions
    Infer(infer::InferArgs),

    /// List genomes and sequences in an alignment snapshot
    Inspect(inspect::InspectArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
