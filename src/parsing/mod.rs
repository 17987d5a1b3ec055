//! Parsers for coordinate input.
//!
//! - **Position files**: BED/GFF-style lines, `chromosome start end [...]`,
//!   plain or gzip compressed, or read from stdin
//!
//! ## Example
//!
//! ```rust
//! use ancestral_allele::parsing::positions::parse_positions_text;
//!
//! let records = parse_positions_text("# comment\nchr1\t100\t101\nchr2 5 6\n");
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].original_index, 1);
//! ```

use std::path::Path;

pub mod positions;

/// Check if the path is a gzip or bgzip compressed file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub(crate) fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}
