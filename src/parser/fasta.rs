use std::io::BufRead;

use bstr::{BString, ByteSlice};
use lazy_static::lazy_static;
use regex::bytes::Regex;

use crate::gfa::SequenceTable;

use super::{
    error::tolerate, for_each_line, open_buffered, GFAResult, ParseError,
    ParseFieldError, ParserTolerance,
};

fn is_gfa_sequence(seq: &[u8]) -> bool {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"(?-u)\A(?:\*|[A-Za-z=.]+)\z").unwrap();
    }
    RE.is_match(seq)
}

fn parse_label(header: &[u8]) -> Result<i64, ParseFieldError> {
    let label = header.trim().to_str()?.parse::<i64>()?;
    Ok(label)
}

/// Parse a FASTA-like file where each `>` header holds an integer
/// label and the line after it holds the sequence.
pub fn parse_sequences<P: AsRef<std::path::Path>>(
    path: P,
    tolerance: ParserTolerance,
) -> GFAResult<SequenceTable> {
    let reader = open_buffered(path)?;
    parse_sequences_reader(reader, tolerance)
}

/// Parse sequences from any buffered reader.
///
/// A sequence line replaces whatever sequence the current label
/// already had. Blank lines are skipped. The first sequence read sets
/// the expected length; other lengths, as well as sequences that
/// aren't valid GFA segment sequences, are reported according to
/// `tolerance`.
pub fn parse_sequences_reader<R: BufRead>(
    reader: R,
    tolerance: ParserTolerance,
) -> GFAResult<SequenceTable> {
    let mut table = SequenceTable::new();
    let mut current: Option<i64> = None;

    for_each_line(reader, |num, line| {
        if let Some(header) = line.strip_prefix(b">") {
            let label = parse_label(header)
                .map_err(|err| ParseError::invalid_line(err, num, line))?;
            current = Some(label);
            return Ok(());
        }

        let sequence = line.trim();
        if sequence.is_empty() {
            return Ok(());
        }

        let label = current.ok_or(ParseError::SequenceWithoutHeader(num))?;
        table.insert(label, BString::from(sequence));
        Ok(())
    })?;

    let expected = table.submer_size().ok_or(ParseError::EmptySequenceTable)?;

    for (label, seq) in table.iter() {
        if !is_gfa_sequence(seq) {
            tolerate(ParseError::InvalidSequence(label), &tolerance)?;
        }
        if seq.len() != expected {
            let err = ParseError::UnequalSequenceLength {
                label,
                expected,
                found: seq.len(),
            };
            tolerate(err, &tolerance)?;
        }
    }

    log::debug!(
        "read {} sequences of length {}",
        table.len(),
        expected
    );

    Ok(table)
}
