use tracing::{debug, info};

use crate::alignment::{AlignmentError, AlignmentIndex, GenomeId};
use crate::core::chain::AncestorChain;
use crate::core::position::CoordinateRecord;
use crate::core::types::{Tier, UNKNOWN_BASE};
use crate::pipeline::progress::{LogProgress, ProgressReporter};
use crate::pipeline::scheduler::{processing_order, Schedule};
use crate::pipeline::sink::{OutputRow, ResultSink};
use crate::pipeline::PipelineError;
use crate::resolve::evidence::{self, EvidenceDetail, MISSING_REFERENCE};
use crate::resolve::AlleleResolver;

/// Options for one inference run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunConfig {
    pub schedule: Schedule,

    /// Log progress every this many positions; 0 disables
    pub progress_interval: usize,
}

/// Count of positions per resolution tier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub ancestor: usize,
    pub within_species: usize,
    pub exhausted: usize,
    pub no_reference: usize,
}

impl RunSummary {
    fn record(&mut self, tier: Tier) {
        self.total += 1;
        match tier {
            Tier::Ancestor => self.ancestor += 1,
            Tier::WithinSpecies => self.within_species += 1,
            Tier::Exhausted => self.exhausted += 1,
            Tier::NoReference => self.no_reference += 1,
        }
    }
}

/// Rows in input order plus per-tier counts
#[derive(Debug)]
pub struct RunOutput {
    pub rows: Vec<OutputRow>,
    pub summary: RunSummary,
}

/// Resolves a batch of reference positions against one alignment
pub struct Pipeline<'a, A: AlignmentIndex + ?Sized> {
    index: &'a A,
    reference: GenomeId,
    chain: &'a AncestorChain,
}

impl<'a, A: AlignmentIndex + ?Sized> Pipeline<'a, A> {
    pub fn new(index: &'a A, reference: GenomeId, chain: &'a AncestorChain) -> Self {
        Self {
            index,
            reference,
            chain,
        }
    }

    /// Run with progress logged through `tracing`
    ///
    /// # Errors
    ///
    /// See [`Pipeline::run_with_progress`].
    pub fn run(&self, records: &[CoordinateRecord], config: &RunConfig) -> Result<RunOutput, PipelineError> {
        let mut progress = LogProgress::new(config.progress_interval);
        self.run_with_progress(records, config.schedule, &mut progress)
    }

    /// Resolve every record, returning rows in input order
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::NoValidPositions` if `records` is empty.
    pub fn run_with_progress<P: ProgressReporter + ?Sized>(
        &self,
        records: &[CoordinateRecord],
        schedule: Schedule,
        progress: &mut P,
    ) -> Result<RunOutput, PipelineError> {
        if records.is_empty() {
            return Err(PipelineError::NoValidPositions);
        }
        info!("Loaded {} positions", records.len());

        let order = processing_order(records, schedule)?;
        if schedule == Schedule::Sorted {
            info!("Sorted {} positions for optimal processing", order.len());
        }

        let resolver = AlleleResolver::new(self.index, self.reference, self.chain);
        let mut sink = ResultSink::new(records.len());
        let mut summary = RunSummary::default();

        for (i, &idx) in order.iter().enumerate() {
            let record = &records[idx];
            let row = self.process(&resolver, record);
            summary.record(row.detail.tier);
            sink.place(record.original_index, row)?;
            progress.processed(i + 1, records.len());
        }

        progress.finished(&summary);

        Ok(RunOutput {
            rows: sink.into_rows()?,
            summary,
        })
    }

    /// Resolve a single record into its output row
    pub fn process(&self, resolver: &AlleleResolver<'_, A>, record: &CoordinateRecord) -> OutputRow {
        let (position, reference_base) = match self.reference_locus(record) {
            Ok(locus) => locus,
            Err(e) => {
                debug!(
                    "No reference base for {}:{}: {e}",
                    record.chromosome, record.start
                );
                return self.missing_reference_row(record);
            }
        };

        let resolution = resolver.resolve(position);

        OutputRow {
            chromosome: record.chromosome.clone(),
            start: record.start,
            end: record.end,
            reference_base: char::from(reference_base.to_ascii_uppercase()),
            used_ancestor: resolution.used_ancestor(self.chain).to_string(),
            ancestral_allele: char::from(resolution.allele()),
            evidence: evidence::encode(&resolution, self.chain),
            detail: EvidenceDetail::from_resolution(&resolution),
        }
    }

    /// Absolute coordinate and base of a record's start in the reference
    fn reference_locus(&self, record: &CoordinateRecord) -> Result<(u64, u8), AlignmentError> {
        let sequence = self.index.sequence(self.reference, &record.chromosome)?;
        if record.start >= sequence.length {
            return Err(AlignmentError::PositionOutOfRange {
                genome: record.chromosome.clone(),
                position: record.start,
            });
        }
        let position = sequence.start + record.start;
        let base = self.index.base_at(self.reference, position)?;
        Ok((position, base))
    }

    fn missing_reference_row(&self, record: &CoordinateRecord) -> OutputRow {
        OutputRow {
            chromosome: record.chromosome.clone(),
            start: record.start,
            end: record.end,
            reference_base: char::from(UNKNOWN_BASE),
            used_ancestor: self.chain.primary_name().to_string(),
            ancestral_allele: char::from(UNKNOWN_BASE),
            evidence: MISSING_REFERENCE.to_string(),
            detail: EvidenceDetail::no_reference(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::memory::BlockRow;
    use crate::alignment::InMemoryAlignment;
    use crate::parsing::positions::parse_positions_text;
    use crate::pipeline::progress::NoProgress;

    /// hg chr1 = ACGTACGT, chr2 = TTTT
    fn make_alignment() -> InMemoryAlignment {
        let mut aln = InMemoryAlignment::new();
        let hg = aln
            .add_genome("hg", [("chr1", "ACGTACGT"), ("chr2", "TTTT")])
            .unwrap();
        let anc1 = aln.add_genome("Anc1", [("s1", "CCGA")]).unwrap();
        let anc2 = aln.add_genome("Anc2", [("s1", "GGTT")]).unwrap();

        // chr1:0 <-> Anc1 C,C,G
        aln.add_block(
            1,
            &[
                BlockRow::new(hg, "chr1", 0),
                BlockRow::new(anc1, "s1", 0),
                BlockRow::new(anc1, "s1", 1),
                BlockRow::new(anc1, "s1", 2),
            ],
        )
        .unwrap();
        // chr2:1 <-> Anc2 G only
        aln.add_block(1, &[BlockRow::new(hg, "chr2", 1), BlockRow::new(anc2, "s1", 0)])
            .unwrap();
        // chr1:5 duplicated at chr2:3
        aln.add_block(
            1,
            &[
                BlockRow::new(hg, "chr1", 5),
                BlockRow::new(hg, "chr2", 3).as_duplicate(),
            ],
        )
        .unwrap();
        aln
    }

    fn run(aln: &InMemoryAlignment, ancestors: &str, input: &str, schedule: Schedule) -> RunOutput {
        let chain = AncestorChain::from_list(ancestors, aln).unwrap();
        let pipeline = Pipeline::new(aln, aln.genome("hg").unwrap(), &chain);
        let records = parse_positions_text(input);
        pipeline
            .run_with_progress(&records, schedule, &mut NoProgress)
            .unwrap()
    }

    #[test]
    fn test_majority_row() {
        let aln = make_alignment();
        let output = run(&aln, "Anc1", "chr1 0 1\n", Schedule::Sorted);
        assert_eq!(
            output.rows[0].to_tsv(),
            "chr1\t0\t1\tA\tAnc1\tC\tMajorityVote:C=2,G=1"
        );
    }

    #[test]
    fn test_rows_follow_input_order() {
        let aln = make_alignment();
        let input = "chr2\t1\t2\nchr1\t5\t6\nchrX\t1\t2\nchr1\t0\t1\nchr1\t2\t3\n";
        let sorted = run(&aln, "Anc1,Anc2", input, Schedule::Sorted);
        let unsorted = run(&aln, "Anc1,Anc2", input, Schedule::InputOrder);

        assert_eq!(sorted.rows, unsorted.rows);
        let tsv: Vec<String> = sorted.rows.iter().map(OutputRow::to_tsv).collect();
        assert_eq!(
            tsv,
            vec![
                "chr2\t1\t2\tT\tAnc2\tG\tDirect@Anc2(fallback:1)",
                "chr1\t5\t6\tC\tWithinSpecies\tT\tWithinSpeciesParalog",
                "chrX\t1\t2\tN\tAnc1\tN\tMissing",
                "chr1\t0\t1\tA\tAnc1\tC\tMajorityVote:C=2,G=1@Anc1",
                "chr1\t2\t3\tG\tAnc1\tN\tMissing(tried:2+self)",
            ]
        );
    }

    #[test]
    fn test_summary_counts_tiers() {
        let aln = make_alignment();
        let input = "chr2\t1\t2\nchr1\t5\t6\nchrX\t1\t2\nchr1\t0\t1\nchr1\t2\t3\n";
        let output = run(&aln, "Anc1,Anc2", input, Schedule::Sorted);
        assert_eq!(
            output.summary,
            RunSummary {
                total: 5,
                ancestor: 2,
                within_species: 1,
                exhausted: 1,
                no_reference: 1,
            }
        );
    }

    #[test]
    fn test_single_ancestor_missing_tag() {
        let aln = make_alignment();
        let output = run(&aln, "Anc1", "chr1 2 3\n", Schedule::Sorted);
        assert_eq!(output.rows[0].evidence, "Missing(+self)");
        assert_eq!(output.rows[0].ancestral_allele, 'N');
    }

    #[test]
    fn test_offset_past_sequence_end_is_missing() {
        let aln = make_alignment();
        // chr1 has 8 bases; offset 9 must not read into chr2
        let output = run(&aln, "Anc1", "chr1 9 10\n", Schedule::Sorted);
        assert_eq!(output.rows[0].to_tsv(), "chr1\t9\t10\tN\tAnc1\tN\tMissing");
        assert_eq!(output.summary.no_reference, 1);
    }

    #[test]
    fn test_ambiguity_code_is_reported_as_allele() {
        let mut aln = InMemoryAlignment::new();
        let hg = aln.add_genome("hg", [("chr1", "ACGT")]).unwrap();
        let anc = aln.add_genome("Anc", [("s1", "r")]).unwrap();
        aln.add_block(1, &[BlockRow::new(hg, "chr1", 0), BlockRow::new(anc, "s1", 0)])
            .unwrap();

        let output = run(&aln, "Anc", "chr1 0 1\n", Schedule::Sorted);
        assert_eq!(output.rows[0].to_tsv(), "chr1\t0\t1\tA\tAnc\tR\tDirect");
    }

    #[test]
    fn test_empty_batch_is_fatal() {
        let aln = make_alignment();
        let chain = AncestorChain::from_list("Anc1", &aln).unwrap();
        let pipeline = Pipeline::new(&aln, aln.genome("hg").unwrap(), &chain);
        let result = pipeline.run(&[], &RunConfig::default());
        assert!(matches!(result, Err(PipelineError::NoValidPositions)));
    }

    #[test]
    fn test_progress_reporter_sees_every_position() {
        struct Recorder(Vec<(usize, usize)>, bool);
        impl ProgressReporter for Recorder {
            fn processed(&mut self, done: usize, total: usize) {
                self.0.push((done, total));
            }
            fn finished(&mut self, _summary: &RunSummary) {
                self.1 = true;
            }
        }

        let aln = make_alignment();
        let chain = AncestorChain::from_list("Anc1", &aln).unwrap();
        let pipeline = Pipeline::new(&aln, aln.genome("hg").unwrap(), &chain);
        let records = parse_positions_text("chr1 0 1\nchr1 1 2\nchr1 2 3\n");
        let mut recorder = Recorder(Vec::new(), false);
        pipeline
            .run_with_progress(&records, Schedule::InputOrder, &mut recorder)
            .unwrap();

        assert_eq!(recorder.0, vec![(1, 3), (2, 3), (3, 3)]);
        assert!(recorder.1);
    }
}
