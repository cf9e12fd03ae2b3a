pub mod error;
pub mod fasta;
pub mod graph;
pub mod paths;

pub use self::error::*;
pub use self::fasta::{parse_sequences, parse_sequences_reader};
pub use self::graph::{parse_graph, parse_graph_reader};
pub use self::paths::{parse_paths, parse_paths_reader};

use std::fs::File;
use std::io::{BufRead, BufReader};

use bstr::{io::BufReadExt, ByteSlice};
use nom::{
    character::complete::{digit1, one_of},
    combinator::{all_consuming, map, opt},
    sequence::pair,
    IResult,
};

use crate::gfa::Orientation;

/// Open a file for line-by-line parsing
pub(crate) fn open_buffered<P: AsRef<std::path::Path>>(
    path: P,
) -> GFAResult<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

/// Feed every line of the reader, without its terminator, to `f`
/// together with its 1-based line number. Stops at the first error.
pub(crate) fn for_each_line<R, F>(reader: R, mut f: F) -> GFAResult<()>
where
    R: BufRead,
    F: FnMut(usize, &[u8]) -> GFAResult<()>,
{
    for (ix, line) in reader.byte_lines().enumerate() {
        let line = line?;
        f(ix + 1, &line)?;
    }
    Ok(())
}

/// Get the next whitespace-separated field, or fail with MissingFields
pub(crate) fn next_field<'a, I>(fields: &mut I) -> GFAFieldResult<&'a [u8]>
where
    I: Iterator<Item = &'a [u8]>,
{
    fields.next().ok_or(ParseFieldError::MissingFields)
}

pub(crate) fn parse_int(field: &[u8]) -> GFAFieldResult<i64> {
    let val = field.to_str()?.parse::<i64>()?;
    Ok(val)
}

fn signed_digits(input: &[u8]) -> IResult<&[u8], (Orientation, &[u8])> {
    let sign = map(opt(one_of("+-")), |s| Orientation::from_sign(s == Some('-')));
    pair(sign, digit1)(input)
}

/// Parse a node reference such as `12`, `+12`, or `-12` into the node
/// id and the orientation given by the sign.
pub(crate) fn parse_signed_id(
    field: &[u8],
) -> GFAFieldResult<(usize, Orientation)> {
    let (_, (orient, digits)) = all_consuming(signed_digits)(field)
        .map_err(|_| ParseFieldError::OrientedIdError)?;
    let id = digits.to_str()?.parse::<usize>()?;
    Ok((id, orient))
}
