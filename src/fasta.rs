//! Sequence file reader.
//!
//! Reads either a plain sequence (one or more lines of bases) or FASTA
//! records and returns normalized records ready for indexing: uppercase,
//! with all whitespace and line breaks removed.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ACGTACGTACGT...
//! >another_sequence
//! TGCATGCATGCA...
//! ```
//!
//! Lines before the first header belong to a record named after the file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::alphabet::normalize;

/// Errors that can occur while reading a sequence file.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("File contains no sequence")]
    EmptyFile,

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),
}

/// Result type for file reading operations.
pub type ReadResult<T> = Result<T, ReadError>;

/// One normalized sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Identifier (FASTA header up to the first space, or the file stem)
    pub id: String,
    /// Uppercased bases, whitespace removed
    pub data: Vec<u8>,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, data: Vec<u8>) -> Self {
        Self { id: id.into(), data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Reads a sequence file and returns its records.
///
/// # Examples
///
/// ```no_run
/// use genetrie::fasta::read_sequence_file;
///
/// let records = read_sequence_file("genome.txt").unwrap();
/// println!("Loaded {} records", records.len());
/// ```
pub fn read_sequence_file<P: AsRef<Path>>(path: P) -> ReadResult<Vec<SequenceRecord>> {
    let path = path.as_ref();
    let default_id = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sequence".to_string());
    let file = File::open(path)?;
    let reader = BufReader::with_capacity(1024 * 1024, file);
    parse_sequences(reader, &default_id)
}

/// Parses plain or FASTA content from a reader.
pub fn parse_sequences<R: BufRead>(reader: R, default_id: &str) -> ReadResult<Vec<SequenceRecord>> {
    let mut records = Vec::new();
    let mut current_id = default_id.to_string();
    let mut current_seq: Vec<u8> = Vec::new();

    for (line_number, line_result) in reader.split(b'\n').enumerate() {
        let line = line_result?;

        if let Some(header) = line.strip_prefix(b">") {
            if !current_seq.is_empty() {
                records.push(SequenceRecord::new(
                    std::mem::take(&mut current_id),
                    std::mem::take(&mut current_seq),
                ));
            }

            let header = String::from_utf8_lossy(header);
            let id = header.split_whitespace().next().unwrap_or_default();
            if id.is_empty() {
                return Err(ReadError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    line_number + 1
                )));
            }
            current_id = id.to_string();
        } else {
            current_seq.extend(normalize(&line));
        }
    }

    if !current_seq.is_empty() {
        records.push(SequenceRecord::new(current_id, current_seq));
    }

    if records.is_empty() {
        return Err(ReadError::EmptyFile);
    }

    debug!(
        "Read {} record(s), {} bases",
        records.len(),
        records.iter().map(SequenceRecord::len).sum::<usize>()
    );
    Ok(records)
}

/// Parses content from a string.
///
/// Useful for testing or processing in-memory data.
pub fn parse_sequences_str(content: &str, default_id: &str) -> ReadResult<Vec<SequenceRecord>> {
    parse_sequences(content.as_bytes(), default_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_plain_sequence() {
        let records = parse_sequences_str("acgt\nACGT\n", "genome").unwrap();
        assert_eq!(records, vec![SequenceRecord::new("genome", b"ACGTACGT".to_vec())]);
    }

    #[test]
    fn test_windows_line_endings() {
        let records = parse_sequences_str("AC\r\nGT\r\n", "s").unwrap();
        assert_eq!(records[0].data, b"ACGT".to_vec());
    }

    #[test]
    fn test_fasta_records() {
        let content = ">seq1 first\nACGT\nTT\n>seq2\n\nggcc\n";
        let records = parse_sequences_str(content, "file").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "seq1");
        assert_eq!(records[0].data, b"ACGTTT".to_vec());
        assert_eq!(records[1].id, "seq2");
        assert_eq!(records[1].data, b"GGCC".to_vec());
    }

    #[test]
    fn test_text_before_first_header() {
        let records = parse_sequences_str("AAA\n>x\nCCC\n", "file").unwrap();
        assert_eq!(records[0].id, "file");
        assert_eq!(records[1].id, "x");
    }

    #[test]
    fn test_non_bases_are_kept() {
        let records = parse_sequences_str("ACNNGT\n", "s").unwrap();
        assert_eq!(records[0].data, b"ACNNGT".to_vec());
    }

    #[test]
    fn test_empty_content() {
        assert!(matches!(parse_sequences_str("", "s"), Err(ReadError::EmptyFile)));
        assert!(matches!(parse_sequences_str("\n \n", "s"), Err(ReadError::EmptyFile)));
        assert!(matches!(parse_sequences_str(">only\n", "s"), Err(ReadError::EmptyFile)));
    }

    #[test]
    fn test_empty_identifier() {
        let result = parse_sequences_str("> \nACGT\n", "s");
        assert!(matches!(result, Err(ReadError::InvalidFormat(_))));
    }

    #[test]
    fn test_read_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "ACGTACGT").unwrap();
        file.flush().unwrap();

        let records = read_sequence_file(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data, b"ACGTACGT".to_vec());
        let stem = file.path().file_stem().unwrap().to_string_lossy().into_owned();
        assert_eq!(records[0].id, stem);
    }

    #[test]
    fn test_missing_file() {
        let result = read_sequence_file("/definitely/not/here.txt");
        assert!(matches!(result, Err(ReadError::IoError(_))));
    }
}
