use serde::Serialize;

/// A reference coordinate to polarize, as read from a BED/GFF-style line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoordinateRecord {
    /// Reference sequence (chromosome) name
    pub chromosome: String,

    /// 0-based inclusive start
    pub start: u64,

    /// Exclusive end; only echoed to the output
    pub end: u64,

    /// Position of this record among accepted input records
    pub original_index: usize,
}

impl CoordinateRecord {
    pub fn new(chromosome: impl Into<String>, start: u64, end: u64, original_index: usize) -> Self {
        Self {
            chromosome: chromosome.into(),
            start,
            end,
            original_index,
        }
    }
}
