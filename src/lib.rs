//! # ancestral-allele
//!
//! A library for inferring ancestral alleles at reference-genome positions
//! from a multi-genome alignment.
//!
//! Polarizing a variant means deciding which of its alleles is ancestral and
//! which is derived. Given an alignment that contains the reference genome
//! and one or more reconstructed ancestor genomes, `ancestral-allele` reads
//! the bases aligned to each reference position and calls the ancestral
//! state by majority vote.
//!
//! ## Features
//!
//! - **Ancestor chains**: several ancestors tried in priority order
//! - **Paralog fallback**: duplicated ancestor copies, then paralogs within the reference
//! - **Evidence tags**: every call records which tier and vote produced it
//! - **Stable output**: rows always follow input order, however positions are scheduled
//!
//! ## Example
//!
//! ```rust
//! use ancestral_allele::alignment::memory::BlockRow;
//! use ancestral_allele::{AlignmentIndex, AncestorChain, InMemoryAlignment, Pipeline, RunConfig};
//! use ancestral_allele::parsing::positions::parse_positions_text;
//!
//! let mut alignment = InMemoryAlignment::new();
//! let hg = alignment.add_genome("hg", [("chr1", "ACGT")]).unwrap();
//! let anc = alignment.add_genome("Anc0", [("s1", "GG")]).unwrap();
//! alignment
//!     .add_block(1, &[BlockRow::new(hg, "chr1", 0), BlockRow::new(anc, "s1", 0)])
//!     .unwrap();
//!
//! let chain = AncestorChain::from_list("Anc0", &alignment).unwrap();
//! let pipeline = Pipeline::new(&alignment, alignment.genome("hg").unwrap(), &chain);
//! let records = parse_positions_text("chr1\t0\t1\n");
//! let output = pipeline.run(&records, &RunConfig::default()).unwrap();
//!
//! assert_eq!(output.rows[0].to_tsv(), "chr1\t0\t1\tA\tAnc0\tG\tDirect");
//! ```
//!
//! ## Modules
//!
//! - [`alignment`]: Alignment index capability and the in-memory snapshot backend
//! - [`core`]: Coordinate records, ancestor chains, and base symbols
//! - [`parsing`]: Coordinate batch loading
//! - [`resolve`]: Voting, tiered allele resolution, and evidence tags
//! - [`pipeline`]: Scheduling, per-position processing, and ordered output
//! - [`cli`]: Command-line interface implementation

pub mod alignment;
pub mod cli;
pub mod core;
pub mod parsing;
pub mod pipeline;
pub mod resolve;

// Re-export commonly used types for convenience
pub use alignment::{AlignmentError, AlignmentIndex, GenomeId, InMemoryAlignment};
pub use core::chain::{Ancestor, AncestorChain, ChainError};
pub use core::position::CoordinateRecord;
pub use core::types::*;
pub use pipeline::{OutputRow, Pipeline, PipelineError, RunConfig, RunSummary, Schedule};
pub use resolve::{AlleleResolver, Resolution};
