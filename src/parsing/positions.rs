//! Coordinate batch loader for BED/GFF-style position files.
//!
//! Only the first three whitespace-separated fields are read:
//! `chromosome start end`. Blank lines, `#` comments, and lines whose first
//! three fields do not parse are skipped without being reported.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

use crate::core::position::CoordinateRecord;
use crate::parsing::is_gzipped;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unable to open positions file {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse a single coordinate line into `(chromosome, start, end)`.
///
/// Extra trailing fields (names, scores, strands) are ignored.
#[must_use]
pub fn parse_line(line: &str) -> Option<(&str, u64, u64)> {
    let line = line.trim_start();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut fields = line.split_whitespace();
    let chromosome = fields.next()?;
    let start = fields.next()?.parse().ok()?;
    let end = fields.next()?.parse().ok()?;
    Some((chromosome, start, end))
}

/// Read coordinate records from any buffered reader.
///
/// `original_index` counts accepted records only, starting at 0.
///
/// # Errors
///
/// Returns `ParseError::Io` if reading fails. Lines that are not valid UTF-8
/// are skipped like any other malformed line.
pub fn read_positions<R: BufRead>(reader: R) -> Result<Vec<CoordinateRecord>, ParseError> {
    let mut records = Vec::new();

    for line in reader.split(b'\n') {
        let line = line?;
        let Ok(text) = std::str::from_utf8(&line) else {
            continue;
        };
        if let Some((chromosome, start, end)) = parse_line(text) {
            records.push(CoordinateRecord::new(chromosome, start, end, records.len()));
        }
    }

    Ok(records)
}

/// Parse coordinate records from in-memory text
#[must_use]
pub fn parse_positions_text(text: &str) -> Vec<CoordinateRecord> {
    let mut records = Vec::new();
    for (chromosome, start, end) in text.lines().filter_map(parse_line) {
        records.push(CoordinateRecord::new(chromosome, start, end, records.len()));
    }
    records
}

/// Read coordinate records from a file, `-` meaning stdin.
///
/// Files ending in `.gz` or `.bgz` are decompressed.
///
/// # Errors
///
/// Returns `ParseError::Open` if the file cannot be opened, or
/// `ParseError::Io` if reading fails.
pub fn parse_positions_file(path: &Path) -> Result<Vec<CoordinateRecord>, ParseError> {
    if path.to_string_lossy() == "-" {
        return read_positions(std::io::stdin().lock());
    }

    let file = std::fs::File::open(path).map_err(|source| ParseError::Open {
        path: path.display().to_string(),
        source,
    })?;

    let reader: Box<dyn Read> = if is_gzipped(path) {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };

    read_positions(BufReader::new(reader))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("chr1\t100\t101"), Some(("chr1", 100, 101)));
        assert_eq!(parse_line("chr1 100   101 name 0 +"), Some(("chr1", 100, 101)));
    }

    #[test]
    fn test_parse_line_rejects_malformed() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("# chr1 1 2"), None);
        assert_eq!(parse_line("chr1 100"), None);
        assert_eq!(parse_line("chr1 abc 101"), None);
        assert_eq!(parse_line("chr1 -5 101"), None);
        assert_eq!(parse_line("track name=foo"), None);
    }

    #[test]
    fn test_parse_positions_text_indexes_accepted_records() {
        let text = "# header\nchr2\t5\t6\n\nbad line\nchr1\t10\t11\nchr1 3 4\n";
        let records = parse_positions_text(text);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], CoordinateRecord::new("chr2", 5, 6, 0));
        assert_eq!(records[1], CoordinateRecord::new("chr1", 10, 11, 1));
        assert_eq!(records[2], CoordinateRecord::new("chr1", 3, 4, 2));
    }

    #[test]
    fn test_parse_positions_text_empty() {
        assert!(parse_positions_text("").is_empty());
        assert!(parse_positions_text("# only comments\n\n").is_empty());
    }

    #[test]
    fn test_read_positions_skips_invalid_utf8() {
        let data: &[u8] = b"chr1\t1\t2\n\xff\xfe 3 4\nchr1\t5\t6\n";
        let records = read_positions(data).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].start, 5);
        assert_eq!(records[1].original_index, 1);
    }

    #[test]
    fn test_read_positions_crlf() {
        let data: &[u8] = b"chr1\t1\t2\r\nchr1\t7\t8\r\n";
        let records = read_positions(data).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].end, 8);
    }

    #[test]
    fn test_parse_positions_file_gzipped() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("positions.bed.gz");
        let mut encoder = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"chr1\t100\t101\nchr2\t5\t6\n").unwrap();
        encoder.finish().unwrap();

        let records = parse_positions_file(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].chromosome, "chr2");
    }

    #[test]
    fn test_parse_positions_file_missing() {
        let result = parse_positions_file(Path::new("/nonexistent/positions.bed"));
        assert!(matches!(result, Err(ParseError::Open { .. })));
    }
}
