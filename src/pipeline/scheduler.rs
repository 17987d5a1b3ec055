use crate::core::position::CoordinateRecord;
use crate::pipeline::PipelineError;

/// Order in which positions are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// Chromosome then start ascending, for locality of column queries
    #[default]
    Sorted,
    /// Input order
    InputOrder,
}

/// Produce the processing order as indices into `records`.
///
/// Output is always restored to input order by the result sink, so the
/// schedule only affects how column queries are ordered.
///
/// # Errors
///
/// Returns `PipelineError::NoValidPositions` if `records` is empty.
pub fn processing_order(
    records: &[CoordinateRecord],
    schedule: Schedule,
) -> Result<Vec<usize>, PipelineError> {
    if records.is_empty() {
        return Err(PipelineError::NoValidPositions);
    }

    let mut order: Vec<usize> = (0..records.len()).collect();

    if schedule == Schedule::Sorted {
        // Stable: records sharing (chromosome, start) keep input order
        order.sort_by(|&a, &b| {
            let (a, b) = (&records[a], &records[b]);
            a.chromosome
                .cmp(&b.chromosome)
                .then_with(|| a.start.cmp(&b.start))
        });
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::positions::parse_positions_text;

    const POSITIONS: &str = "chr2\t5\t6\nchr1\t10\t11\nchr10\t1\t2\nchr1\t3\t4\nchr1\t10\t12\n";

    #[test]
    fn test_sorted_order() {
        let records = parse_positions_text(POSITIONS);
        let order = processing_order(&records, Schedule::Sorted).unwrap();
        // chr1 < chr10 < chr2 lexicographically; duplicates keep input order
        assert_eq!(order, vec![3, 1, 4, 2, 0]);
    }

    #[test]
    fn test_input_order() {
        let records = parse_positions_text(POSITIONS);
        let order = processing_order(&records, Schedule::InputOrder).unwrap();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_order_is_permutation() {
        let records = parse_positions_text(POSITIONS);
        let mut order = processing_order(&records, Schedule::Sorted).unwrap();
        order.sort_unstable();
        assert_eq!(order, (0..records.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_batch() {
        for schedule in [Schedule::Sorted, Schedule::InputOrder] {
            assert!(matches!(
                processing_order(&[], schedule),
                Err(PipelineError::NoValidPositions)
            ));
        }
    }
}
