use crate::gfa::{Graph, Link, Path, Segment, SequenceTable};
use crate::parser::GFAResult;

use bstr::ByteSlice;

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Written in place of the sequence of a segment with no entry in the
/// sequence table
pub const MISSING_SEQUENCE: &[u8] = b"*";

pub fn header_string() -> String {
    "H\tVN:Z:1.0".to_string()
}

/// Links are written with the overlap as a match-only CIGAR, e.g.
/// `L\t2\t+\t1\t-\t3M`
impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L\t{}\t{}\t{}\t{}\t{}M",
            self.from_segment,
            self.from_orient,
            self.to_segment,
            self.to_orient,
            self.overlap
        )
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P\t{}\t", self.id)?;
        for (i, step) in self.steps.iter().enumerate() {
            if i != 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", step)?;
        }
        write!(f, "\t")?;
        for (i, offset) in self.offsets.iter().enumerate() {
            if i != 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", offset)?;
        }
        Ok(())
    }
}

/// Segments only carry their id, so the sequence comes from the
/// table. Sequence bytes are written as-is.
pub fn write_segment<W: Write>(
    seg: &Segment,
    sequences: &SequenceTable,
    stream: &mut W,
) -> io::Result<()> {
    write!(stream, "S\t{}\t", seg.id)?;
    let seq: &[u8] = match sequences.get_segment(seg.id) {
        Some(seq) => seq.as_bytes(),
        None => MISSING_SEQUENCE,
    };
    stream.write_all(seq)
}

pub fn segment_string(seg: &Segment, sequences: &SequenceTable) -> String {
    let mut result = Vec::new();
    write_segment(seg, sequences, &mut result)
        .expect("Writing to a Vec can't fail");
    String::from_utf8_lossy(&result).into_owned()
}

pub fn link_string(link: &Link) -> String {
    link.to_string()
}

pub fn path_string(path: &Path) -> String {
    path.to_string()
}

/// Write the header, then all segments, links, and paths, each in the
/// order they're stored.
pub fn write_gfa<W: Write>(
    mut stream: W,
    graph: &Graph,
    paths: &[Path],
    sequences: &SequenceTable,
) -> io::Result<()> {
    writeln!(stream, "{}", header_string())?;
    for seg in graph.segments.iter() {
        write_segment(seg, sequences, &mut stream)?;
        writeln!(stream)?;
    }
    for link in graph.links.iter() {
        writeln!(stream, "{}", link)?;
    }
    for path in paths.iter() {
        writeln!(stream, "{}", path)?;
    }
    Ok(())
}

/// Create or truncate the file at `path` and write the GFA to it.
pub fn write_gfa_file<P: AsRef<std::path::Path>>(
    path: P,
    graph: &Graph,
    paths: &[Path],
    sequences: &SequenceTable,
) -> GFAResult<()> {
    let file = File::create(path)?;
    let mut stream = BufWriter::new(file);
    write_gfa(&mut stream, graph, paths, sequences)?;
    stream.flush()?;
    Ok(())
}
