//! Access to a multi-genome alignment.
//!
//! The resolver never looks inside an alignment; it only asks one question of
//! it: "which bases in these target genomes align to this locus?". That
//! question is the [`AlignmentIndex`] trait, so backends can be swapped freely.
//!
//! - [`AlignmentIndex`]: the capability used by the resolver and pipeline
//! - [`memory::InMemoryAlignment`]: a block-based backend held in memory
//! - [`snapshot`]: loads an [`memory::InMemoryAlignment`] from a JSON snapshot
//!
//! ## Coordinates
//!
//! Every genome is addressed with absolute coordinates: its sequences are laid
//! end to end in declaration order, and a sequence-relative offset is turned
//! into an absolute one by adding [`AlignmentIndex::sequence_start`].

use std::collections::BTreeSet;

use thiserror::Error;

pub mod memory;
pub mod snapshot;

pub use memory::InMemoryAlignment;

#[derive(Error, Debug)]
pub enum AlignmentError {
    #[error("Genome not found: {0}")]
    GenomeNotFound(String),

    #[error("Sequence '{sequence}' not found in genome '{genome}'")]
    SequenceNotFound { genome: String, sequence: String },

    #[error("Position {position} is outside genome '{genome}'")]
    PositionOutOfRange { genome: String, position: u64 },

    #[error("Column query failed: {0}")]
    Column(String),

    #[error("Duplicate genome name: {0}")]
    DuplicateGenome(String),

    #[error("Invalid alignment snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Failed to read alignment: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse alignment snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("noodles error: {0}")]
    Noodles(String),
}

/// Opaque handle to a genome within one alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenomeId(pub(crate) usize);

/// A base observed at one aligned locus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedBase {
    /// Genome the base was read from
    pub genome: GenomeId,

    /// Absolute coordinate of the base within its genome
    pub position: u64,

    /// Raw symbol as stored in the alignment
    pub base: u8,
}

/// A sequence within a genome, as exposed for listing
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SequenceSummary {
    pub name: String,
    pub start: u64,
    pub length: u64,
}

/// Column queries against a multi-genome alignment.
///
/// Implementations are queried once per tier attempt, so lookups should be
/// cheap; the pipeline orders positions to keep consecutive queries close.
pub trait AlignmentIndex {
    /// Resolve a genome name to a handle.
    fn genome(&self, name: &str) -> Option<GenomeId>;

    /// Name of a genome handle.
    fn genome_name(&self, genome: GenomeId) -> Option<&str>;

    /// All genome names, in declaration order.
    fn genome_names(&self) -> Vec<&str>;

    /// Sequences of a genome, in declaration order.
    fn sequences(&self, genome: GenomeId) -> Vec<SequenceSummary>;

    /// Look up a named sequence of a genome.
    ///
    /// # Errors
    ///
    /// Returns `AlignmentError::SequenceNotFound` if the genome has no such sequence.
    fn sequence(&self, genome: GenomeId, sequence: &str) -> Result<SequenceSummary, AlignmentError>;

    /// Absolute start coordinate of a named sequence.
    ///
    /// # Errors
    ///
    /// Returns `AlignmentError::SequenceNotFound` if the genome has no such sequence.
    fn sequence_start(&self, genome: GenomeId, sequence: &str) -> Result<u64, AlignmentError> {
        Ok(self.sequence(genome, sequence)?.start)
    }

    /// Base at an absolute coordinate.
    ///
    /// # Errors
    ///
    /// Returns `AlignmentError::PositionOutOfRange` past the end of the genome.
    fn base_at(&self, genome: GenomeId, position: u64) -> Result<u8, AlignmentError>;

    /// Bases in `targets` aligned to `position` of `query`.
    ///
    /// With `duplicates` disabled only the 1:1 aligned copy in each target is
    /// reported; enabled, paralogous copies are reported as well. When `query`
    /// is itself a target, the query locus is part of the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the query genome or position is unknown to the
    /// backend, or the column cannot be materialized.
    fn aligned_bases(
        &self,
        query: GenomeId,
        position: u64,
        targets: &BTreeSet<GenomeId>,
        duplicates: bool,
    ) -> Result<Vec<AlignedBase>, AlignmentError>;
}
