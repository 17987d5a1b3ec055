use serde::Serialize;

/// Allele reported when no call can be made
pub const UNKNOWN_BASE: u8 = b'N';

/// Gap symbol in alignment columns
pub const GAP: u8 = b'-';

/// Used-ancestor name reported when the chain is empty
pub const UNKNOWN_ANCESTOR: &str = "Unknown";

/// Used-ancestor name reported for calls made from paralogs in the reference itself
pub const WITHIN_SPECIES: &str = "WithinSpecies";

/// Normalize an observed base for counting.
///
/// Returns the uppercase symbol, or `None` for symbols that carry no
/// information (`N`, gap, NUL).
#[must_use]
pub fn countable_base(base: u8) -> Option<u8> {
    match base.to_ascii_uppercase() {
        UNKNOWN_BASE | GAP | 0 => None,
        b => Some(b),
    }
}

/// Which tier of the search produced a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// An ancestor genome from the chain
    Ancestor,
    /// Paralogous copies within the reference genome
    WithinSpecies,
    /// Every tier was tried without usable bases
    Exhausted,
    /// The reference base itself could not be resolved
    NoReference,
}

/// Sub-step of the per-ancestor search that produced the bases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMethod {
    /// 1:1 orthologous column, duplicates excluded
    Direct,
    /// Column re-queried with duplicated copies included
    Paralog,
}
