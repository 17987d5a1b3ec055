use std::io::Write;

use serde::Serialize;

use crate::pipeline::PipelineError;
use crate::resolve::evidence::EvidenceDetail;

/// One line of output, describing the call at one input position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub chromosome: String,
    pub start: u64,
    pub end: u64,
    pub reference_base: char,
    pub used_ancestor: String,
    pub ancestral_allele: char,
    pub evidence: String,

    /// Structured form of `evidence`; only written in JSON output
    #[serde(flatten)]
    pub detail: EvidenceDetail,
}

impl OutputRow {
    /// The seven tab-separated output fields, without a newline
    pub fn to_tsv(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chromosome,
            self.start,
            self.end,
            self.reference_base,
            self.used_ancestor,
            self.ancestral_allele,
            self.evidence,
        )
    }
}

/// How output rows are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowFormat {
    /// Seven tab-separated fields, no header
    #[default]
    Tsv,
    /// One JSON object per line, including the structured evidence fields
    JsonLines,
}

/// Collects rows by input index so output order never depends on processing order
#[derive(Debug)]
pub struct ResultSink {
    slots: Vec<Option<OutputRow>>,
}

impl ResultSink {
    /// Create a sink with one empty slot per input record
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Store the row for input record `index`; each slot is written once.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::SlotOutOfRange` or `PipelineError::SlotConflict`
    /// if `index` is past the end or already written.
    pub fn place(&mut self, index: usize, row: OutputRow) -> Result<(), PipelineError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(PipelineError::SlotOutOfRange(index))?;
        if slot.is_some() {
            return Err(PipelineError::SlotConflict(index));
        }
        *slot = Some(row);
        Ok(())
    }

    /// Number of slots written so far
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Rows in input order.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::SlotUnfilled` for the first slot never written.
    pub fn into_rows(self) -> Result<Vec<OutputRow>, PipelineError> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| slot.ok_or(PipelineError::SlotUnfilled(i)))
            .collect()
    }
}

/// Write rows in the requested format
///
/// # Errors
///
/// Returns `PipelineError::Io` if writing fails.
pub fn write_rows<W: Write>(rows: &[OutputRow], format: RowFormat, mut out: W) -> Result<(), PipelineError> {
    for row in rows {
        match format {
            RowFormat::Tsv => writeln!(out, "{}", row.to_tsv())?,
            RowFormat::JsonLines => {
                serde_json::to_writer(&mut out, row)?;
                writeln!(out)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
