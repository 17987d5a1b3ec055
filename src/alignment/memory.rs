use std::collections::{BTreeSet, HashMap};

use crate::alignment::{AlignedBase, AlignmentError, AlignmentIndex, GenomeId, SequenceSummary};

/// A named sequence laid out within its genome's absolute coordinates
#[derive(Debug, Clone)]
struct SequenceData {
    name: String,
    start: u64,
    length: u64,
}

#[derive(Debug, Clone)]
struct GenomeData {
    name: String,
    sequences: Vec<SequenceData>,
    sequence_index: HashMap<String, usize>,
    /// All sequences concatenated in declaration order
    residues: Vec<u8>,
}

impl GenomeData {
    fn residue(&self, position: u64) -> Option<u8> {
        usize::try_from(position)
            .ok()
            .and_then(|i| self.residues.get(i).copied())
    }
}

/// One locus within an alignment column
#[derive(Debug, Clone, Copy)]
struct AlignedLocus {
    genome: GenomeId,
    position: u64,
    duplicate: bool,
}

/// One row of an ungapped alignment block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRow {
    pub genome: GenomeId,
    pub sequence: String,
    /// 0-based offset within `sequence` of the block's first column
    pub start: u64,
    /// Paralogous copy, only visible with duplicate inclusion enabled
    pub duplicate: bool,
}

impl BlockRow {
    pub fn new(genome: GenomeId, sequence: impl Into<String>, start: u64) -> Self {
        Self {
            genome,
            sequence: sequence.into(),
            start,
            duplicate: false,
        }
    }

    #[must_use]
    pub fn as_duplicate(mut self) -> Self {
        self.duplicate = true;
        self
    }
}

/// An alignment held entirely in memory.
///
/// Built from genomes and ungapped blocks; every block column becomes one
/// alignment column, indexed by each locus it contains.
#[derive(Debug, Default)]
pub struct InMemoryAlignment {
    genomes: Vec<GenomeData>,

    /// Index: genome name -> handle
    genome_index: HashMap<String, GenomeId>,

    columns: Vec<Vec<AlignedLocus>>,

    /// Index: (genome, absolute position) -> columns containing that locus
    locus_columns: HashMap<(GenomeId, u64), Vec<usize>>,
}

impl InMemoryAlignment {
    /// Create an empty alignment
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a genome made of named sequences.
    ///
    /// # Errors
    ///
    /// Returns `AlignmentError::DuplicateGenome` if the name is taken, or
    /// `AlignmentError::InvalidSnapshot` if two sequences share a name.
    pub fn add_genome<I, S, R>(&mut self, name: &str, sequences: I) -> Result<GenomeId, AlignmentError>
    where
        I: IntoIterator<Item = (S, R)>,
        S: Into<String>,
        R: AsRef<[u8]>,
    {
        if self.genome_index.contains_key(name) {
            return Err(AlignmentError::DuplicateGenome(name.to_string()));
        }

        let mut genome = GenomeData {
            name: name.to_string(),
            sequences: Vec::new(),
            sequence_index: HashMap::new(),
            residues: Vec::new(),
        };

        for (seq_name, residues) in sequences {
            let seq_name = seq_name.into();
            let residues = residues.as_ref();
            if genome.sequence_index.contains_key(&seq_name) {
                return Err(AlignmentError::InvalidSnapshot(format!(
                    "sequence '{seq_name}' appears twice in genome '{name}'"
                )));
            }
            genome
                .sequence_index
                .insert(seq_name.clone(), genome.sequences.len());
            genome.sequences.push(SequenceData {
                name: seq_name,
                start: genome.residues.len() as u64,
                length: residues.len() as u64,
            });
            genome.residues.extend_from_slice(residues);
        }

        let id = GenomeId(self.genomes.len());
        self.genome_index.insert(name.to_string(), id);
        self.genomes.push(genome);
        Ok(id)
    }

    /// Add an ungapped block of `length` columns.
    ///
    /// # Errors
    ///
    /// Returns an error if a row names an unknown genome or sequence, or runs
    /// past the end of its sequence.
    pub fn add_block(&mut self, length: u64, rows: &[BlockRow]) -> Result<(), AlignmentError> {
        let mut starts = Vec::with_capacity(rows.len());
        for row in rows {
            let genome = self.genome_data(row.genome)?;
            let sequence = genome
                .sequence_index
                .get(&row.sequence)
                .map(|&i| &genome.sequences[i])
                .ok_or_else(|| AlignmentError::SequenceNotFound {
                    genome: genome.name.clone(),
                    sequence: row.sequence.clone(),
                })?;

            if row.start.saturating_add(length) > sequence.length {
                return Err(AlignmentError::InvalidSnapshot(format!(
                    "block row {}:{}+{} runs past the end of the sequence (length {})",
                    row.sequence, row.start, length, sequence.length
                )));
            }
            starts.push(sequence.start + row.start);
        }

        for offset in 0..length {
            let column_id = self.columns.len();
            let column: Vec<AlignedLocus> = rows
                .iter()
                .zip(&starts)
                .map(|(row, &start)| AlignedLocus {
                    genome: row.genome,
                    position: start + offset,
                    duplicate: row.duplicate,
                })
                .collect();

            for locus in &column {
                self.locus_columns
                    .entry((locus.genome, locus.position))
                    .or_default()
                    .push(column_id);
            }
            self.columns.push(column);
        }

        Ok(())
    }

    /// Number of alignment columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn genome_data(&self, genome: GenomeId) -> Result<&GenomeData, AlignmentError> {
        self.genomes
            .get(genome.0)
            .ok_or_else(|| AlignmentError::GenomeNotFound(format!("#{}", genome.0)))
    }
}

impl AlignmentIndex for InMemoryAlignment {
    fn genome(&self, name: &str) -> Option<GenomeId> {
        self.genome_index.get(name).copied()
    }

    fn genome_name(&self, genome: GenomeId) -> Option<&str> {
        self.genomes.get(genome.0).map(|g| g.name.as_str())
    }

    fn genome_names(&self) -> Vec<&str> {
        self.genomes.iter().map(|g| g.name.as_str()).collect()
    }

    fn sequences(&self, genome: GenomeId) -> Vec<SequenceSummary> {
        self.genomes
            .get(genome.0)
            .map(|g| {
                g.sequences
                    .iter()
                    .map(|s| SequenceSummary {
                        name: s.name.clone(),
                        start: s.start,
                        length: s.length,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn sequence(&self, genome: GenomeId, sequence: &str) -> Result<SequenceSummary, AlignmentError> {
        let data = self.genome_data(genome)?;
        data.sequence_index
            .get(sequence)
            .map(|&i| {
                let s = &data.sequences[i];
                SequenceSummary {
                    name: s.name.clone(),
                    start: s.start,
                    length: s.length,
                }
            })
            .ok_or_else(|| AlignmentError::SequenceNotFound {
                genome: data.name.clone(),
                sequence: sequence.to_string(),
            })
    }

    fn base_at(&self, genome: GenomeId, position: u64) -> Result<u8, AlignmentError> {
        let data = self.genome_data(genome)?;
        data.residue(position)
            .ok_or_else(|| AlignmentError::PositionOutOfRange {
                genome: data.name.clone(),
                position,
            })
    }

    fn aligned_bases(
        &self,
        query: GenomeId,
        position: u64,
        targets: &BTreeSet<GenomeId>,
        duplicates: bool,
    ) -> Result<Vec<AlignedBase>, AlignmentError> {
        let data = self.genome_data(query)?;
        if data.residue(position).is_none() {
            return Err(AlignmentError::PositionOutOfRange {
                genome: data.name.clone(),
                position,
            });
        }

        let Some(column_ids) = self.locus_columns.get(&(query, position)) else {
            return Ok(Vec::new());
        };

        let mut seen: BTreeSet<(GenomeId, u64)> = BTreeSet::new();
        let mut bases = Vec::new();

        for &column_id in column_ids {
            let column = &self.columns[column_id];

            // A duplicated copy of the query only links to its paralogs
            if !duplicates
                && column
                    .iter()
                    .any(|l| l.genome == query && l.position == position && l.duplicate)
            {
                continue;
            }

            for locus in column {
                if !targets.contains(&locus.genome) || (locus.duplicate && !duplicates) {
                    continue;
                }
                if !seen.insert((locus.genome, locus.position)) {
                    continue;
                }
                let genome = self.genome_data(locus.genome)?;
                let base = genome.residue(locus.position).ok_or_else(|| {
                    AlignmentError::PositionOutOfRange {
                        genome: genome.name.clone(),
                        position: locus.position,
                    }
                })?;
                bases.push(AlignedBase {
                    genome: locus.genome,
                    position: locus.position,
                    base,
                });
            }
        }

        Ok(bases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(ids: &[GenomeId]) -> BTreeSet<GenomeId> {
        ids.iter().copied().collect()
    }

    /// hg: chr1 = ACGTACGTAC, chr2 = TTTT
    /// anc: s1 = GGGGCCCC, s2 = AAAA
    fn make_alignment() -> (InMemoryAlignment, GenomeId, GenomeId) {
        let mut aln = InMemoryAlignment::new();
        let hg = aln
            .add_genome("hg", [("chr1", "ACGTACGTAC"), ("chr2", "TTTT")])
            .unwrap();
        let anc = aln
            .add_genome("anc", [("s1", "GGGGCCCC"), ("s2", "AAAA")])
            .unwrap();

        // chr1:2..5 <-> s1:0..3, with a paralogous copy at s2:0..3
        aln.add_block(
            3,
            &[
                BlockRow::new(hg, "chr1", 2),
                BlockRow::new(anc, "s1", 0),
                BlockRow::new(anc, "s2", 0).as_duplicate(),
            ],
        )
        .unwrap();

        // chr1:8 duplicated at chr2:1 within hg
        aln.add_block(
            1,
            &[
                BlockRow::new(hg, "chr1", 8),
                BlockRow::new(hg, "chr2", 1).as_duplicate(),
            ],
        )
        .unwrap();

        (aln, hg, anc)
    }

    #[test]
    fn test_absolute_coordinates() {
        let (aln, hg, anc) = make_alignment();
        assert_eq!(aln.sequence_start(hg, "chr1").unwrap(), 0);
        assert_eq!(aln.sequence_start(hg, "chr2").unwrap(), 10);
        assert_eq!(aln.sequence_start(anc, "s2").unwrap(), 8);
        assert_eq!(aln.sequence(hg, "chr2").unwrap().length, 4);
        assert_eq!(aln.base_at(hg, 11).unwrap(), b'T');
        assert!(matches!(
            aln.sequence_start(hg, "chrX"),
            Err(AlignmentError::SequenceNotFound { .. })
        ));
        assert!(matches!(
            aln.base_at(hg, 14),
            Err(AlignmentError::PositionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_direct_query_excludes_duplicates() {
        let (aln, hg, anc) = make_alignment();
        let bases = aln.aligned_bases(hg, 3, &targets(&[anc]), false).unwrap();
        assert_eq!(bases.len(), 1);
        assert_eq!(bases[0].base, b'G');
        assert_eq!(bases[0].position, 1);
    }

    #[test]
    fn test_duplicate_query_includes_paralogs() {
        let (aln, hg, anc) = make_alignment();
        let bases = aln.aligned_bases(hg, 3, &targets(&[anc]), true).unwrap();
        let mut observed: Vec<u8> = bases.iter().map(|b| b.base).collect();
        observed.sort_unstable();
        assert_eq!(observed, vec![b'A', b'G']);
    }

    #[test]
    fn test_unaligned_locus_is_empty() {
        let (aln, hg, anc) = make_alignment();
        let bases = aln.aligned_bases(hg, 0, &targets(&[anc]), true).unwrap();
        assert!(bases.is_empty());
    }

    #[test]
    fn test_self_query_reports_query_locus() {
        let (aln, hg, _) = make_alignment();
        let bases = aln.aligned_bases(hg, 8, &targets(&[hg]), true).unwrap();
        let positions: BTreeSet<u64> = bases.iter().map(|b| b.position).collect();
        assert_eq!(positions, [8, 11].into_iter().collect());
    }

    #[test]
    fn test_duplicate_query_locus_hidden_without_duplicates() {
        let (aln, hg, _) = make_alignment();
        // chr2:1 (absolute 11) is only a duplicated copy of chr1:8
        let bases = aln.aligned_bases(hg, 11, &targets(&[hg]), false).unwrap();
        assert!(bases.is_empty());
    }

    #[test]
    fn test_add_block_validates_rows() {
        let (mut aln, hg, anc) = make_alignment();
        let past_end = aln.add_block(5, &[BlockRow::new(hg, "chr2", 1), BlockRow::new(anc, "s2", 0)]);
        assert!(matches!(past_end, Err(AlignmentError::InvalidSnapshot(_))));

        let unknown = aln.add_block(1, &[BlockRow::new(anc, "s9", 0)]);
        assert!(matches!(unknown, Err(AlignmentError::SequenceNotFound { .. })));
    }

    #[test]
    fn test_duplicate_genome_rejected() {
        let (mut aln, _, _) = make_alignment();
        let result = aln.add_genome("hg", [("chr1", "A")]);
        assert!(matches!(result, Err(AlignmentError::DuplicateGenome(_))));
    }

    #[test]
    fn test_genome_lookup() {
        let (aln, hg, _) = make_alignment();
        assert_eq!(aln.genome("hg"), Some(hg));
        assert_eq!(aln.genome_name(hg), Some("hg"));
        assert_eq!(aln.genome("missing"), None);
        assert_eq!(aln.genome_names(), vec!["hg", "anc"]);
        assert_eq!(aln.column_count(), 4);
    }
}
