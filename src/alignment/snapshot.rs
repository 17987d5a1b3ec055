//! Loader for JSON alignment snapshots.
//!
//! A snapshot declares genomes, either with inline residues or as a FASTA
//! file, and the ungapped blocks that align them:
//!
//! ```json
//! {
//!   "genomes": [
//!     {"name": "hg38", "sequences": [{"name": "chr1", "residues": "ACGTACGT"}]},
//!     {"name": "Anc0", "fasta": "anc0.fa.gz"}
//!   ],
//!   "blocks": [
//!     {"length": 4, "rows": [
//!       {"genome": "hg38", "sequence": "chr1", "start": 2},
//!       {"genome": "Anc0", "sequence": "s1", "start": 0},
//!       {"genome": "Anc0", "sequence": "s7", "start": 10, "duplicate": true}
//!     ]}
//!   ]
//! }
//! ```
//!
//! FASTA paths are resolved relative to the snapshot file. Gzip and bgzip
//! compressed FASTA files are decompressed on the fly.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alignment::memory::{BlockRow, InMemoryAlignment};
use crate::alignment::{AlignmentError, AlignmentIndex};
use crate::parsing::is_gzipped;

/// Serializable snapshot format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotData {
    pub genomes: Vec<GenomeEntry>,

    #[serde(default)]
    pub blocks: Vec<BlockEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenomeEntry {
    pub name: String,

    /// Inline sequences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequences: Option<Vec<SequenceEntry>>,

    /// FASTA file holding the genome's sequences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fasta: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceEntry {
    pub name: String,
    pub residues: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockEntry {
    #[serde(default = "default_block_length")]
    pub length: u64,
    pub rows: Vec<RowEntry>,
}

fn default_block_length() -> u64 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowEntry {
    pub genome: String,
    pub sequence: String,
    pub start: u64,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub duplicate: bool,
}

/// Load an alignment snapshot from a JSON file
///
/// # Errors
///
/// Returns `AlignmentError::Io` if the file (or a FASTA it names) cannot be
/// read, `AlignmentError::Json` for malformed JSON, or
/// `AlignmentError::InvalidSnapshot` if the content is inconsistent.
pub fn load_snapshot(path: &Path) -> Result<InMemoryAlignment, AlignmentError> {
    let content = std::fs::read_to_string(path)?;
    let data: SnapshotData = serde_json::from_str(&content)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    build_alignment(&data, base_dir)
}

/// Parse a snapshot from a JSON string; FASTA paths resolve against `base_dir`
///
/// # Errors
///
/// See [`load_snapshot`].
pub fn from_json(json: &str, base_dir: &Path) -> Result<InMemoryAlignment, AlignmentError> {
    let data: SnapshotData = serde_json::from_str(json)?;
    build_alignment(&data, base_dir)
}

fn build_alignment(data: &SnapshotData, base_dir: &Path) -> Result<InMemoryAlignment, AlignmentError> {
    let mut alignment = InMemoryAlignment::new();

    for genome in &data.genomes {
        let sequences: Vec<(String, Vec<u8>)> = match (&genome.sequences, &genome.fasta) {
            (Some(sequences), None) => sequences
                .iter()
                .map(|s| (s.name.clone(), s.residues.clone().into_bytes()))
                .collect(),
            (None, Some(fasta)) => read_fasta_sequences(&base_dir.join(fasta))?,
            _ => {
                return Err(AlignmentError::InvalidSnapshot(format!(
                    "genome '{}' must declare exactly one of 'sequences' or 'fasta'",
                    genome.name
                )))
            }
        };
        alignment.add_genome(&genome.name, sequences)?;
    }

    for (i, block) in data.blocks.iter().enumerate() {
        let rows = block
            .rows
            .iter()
            .map(|row| {
                let genome = alignment
                    .genome(&row.genome)
                    .ok_or_else(|| AlignmentError::GenomeNotFound(row.genome.clone()))?;
                let mut block_row = BlockRow::new(genome, row.sequence.clone(), row.start);
                block_row.duplicate = row.duplicate;
                Ok(block_row)
            })
            .collect::<Result<Vec<_>, AlignmentError>>()
            .map_err(|e| AlignmentError::InvalidSnapshot(format!("block {i}: {e}")))?;

        alignment
            .add_block(block.length, &rows)
            .map_err(|e| AlignmentError::InvalidSnapshot(format!("block {i}: {e}")))?;
    }

    debug!(
        "Loaded alignment with {} genomes and {} columns",
        data.genomes.len(),
        alignment.column_count()
    );

    Ok(alignment)
}

/// Read every record of a FASTA file as (name, residues)
fn read_fasta_sequences(path: &Path) -> Result<Vec<(String, Vec<u8>)>, AlignmentError> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        let mut reader = fasta::io::Reader::new(BufReader::new(MultiGzDecoder::new(file)));
        read_fasta_records(&mut reader, path)
    } else {
        let mut reader = fasta::io::Reader::new(BufReader::new(file));
        read_fasta_records(&mut reader, path)
    }
}

fn read_fasta_records<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
    path: &Path,
) -> Result<Vec<(String, Vec<u8>)>, AlignmentError> {
    let mut sequences = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| AlignmentError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        let name = String::from_utf8_lossy(record.name()).to_string();
        let residues = record.sequence().as_ref().to_vec();
        sequences.push((name, residues));
    }

    if sequences.is_empty() {
        return Err(AlignmentError::InvalidSnapshot(format!(
            "no sequences found in FASTA file {}",
            path.display()
        )));
    }

    Ok(sequences)
}
