//! The records the parsers produce and the writer consumes. Segment
//! and path ids are the 1-based integers assigned while parsing.

pub mod orientation;

pub use self::orientation::*;

use std::convert::TryFrom;

use bstr::{BStr, BString, ByteSlice};
use fnv::FnvHashMap;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Mapping from integer label to sequence, as read from a FASTA-like
/// file. Keeps the order in which labels were first seen, since the
/// first entry determines the submer size.
#[derive(Default, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct SequenceTable {
    sequences: FnvHashMap<i64, BString>,
    labels: Vec<i64>,
}

impl SequenceTable {
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the sequence for a label, replacing any previous sequence.
    /// A replaced label keeps its original position.
    pub fn insert(&mut self, label: i64, sequence: BString) {
        if self.sequences.insert(label, sequence).is_none() {
            self.labels.push(label);
        }
    }

    pub fn get(&self, label: i64) -> Option<&BStr> {
        self.sequences.get(&label).map(|s| s.as_bstr())
    }

    /// The sequence of a segment. Segment ids are positive, so entries
    /// with negative labels never match.
    pub fn get_segment(&self, id: usize) -> Option<&BStr> {
        i64::try_from(id).ok().and_then(|label| self.get(label))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate over the entries in the order their labels were first
    /// inserted
    pub fn iter(&self) -> impl Iterator<Item = (i64, &'_ BStr)> + '_ {
        self.labels
            .iter()
            .map(move |&l| (l, self.sequences[&l].as_bstr()))
    }

    /// Length of the first inserted sequence, or None if the table is
    /// empty. All sequences are expected to share this length.
    pub fn submer_size(&self) -> Option<usize> {
        self.iter().next().map(|(_, seq)| seq.len())
    }
}

/// A segment in the output graph. Only the id is stored; the sequence
/// is looked up in the SequenceTable when writing.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Segment {
    pub id: usize,
}

impl Segment {
    pub fn new(id: usize) -> Self {
        Segment { id }
    }
}

/// A directed overlap between two oriented segments. The overlap is
/// the number of matching bases, and may be negative if the input
/// overlap exceeded the submer size.
#[derive(Default, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Link {
    pub from_segment: usize,
    pub from_orient: Orientation,
    pub to_segment: usize,
    pub to_orient: Orientation,
    pub overlap: i64,
}

impl Link {
    pub fn new(
        from_segment: usize,
        from_orient: Orientation,
        to_segment: usize,
        to_orient: Orientation,
        overlap: i64,
    ) -> Self {
        Link {
            from_segment,
            from_orient,
            to_segment,
            to_orient,
            overlap,
        }
    }
}

/// One oriented segment reference in a path, displayed as `12+` or
/// `12-`. The segment is kept as the text of the input token, without
/// its sign, so it's written back exactly as it was read.
#[derive(Default, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct PathStep {
    pub segment: BString,
    pub orient: Orientation,
}

impl PathStep {
    pub fn new<S: Into<BString>>(segment: S, orient: Orientation) -> Self {
        PathStep {
            segment: segment.into(),
            orient,
        }
    }

    /// Read a step from a node token, where a leading `-` marks the
    /// reverse strand and anything else is taken as a forward node.
    pub fn from_signed_token(token: &[u8]) -> Self {
        match token.strip_prefix(b"-") {
            Some(segment) => PathStep::new(segment, Orientation::Backward),
            None => PathStep::new(token, Orientation::Forward),
        }
    }
}

impl std::fmt::Display for PathStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.segment, self.orient)
    }
}

/// The offsets are kept exactly as they appeared in the input.
#[derive(Default, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Path {
    pub id: usize,
    pub steps: Vec<PathStep>,
    pub offsets: Vec<BString>,
}

impl Path {
    pub fn new(id: usize, steps: Vec<PathStep>, offsets: Vec<BString>) -> Self {
        Path { id, steps, offsets }
    }
}

/// Segments and links in the order they were created
#[derive(Default, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Graph {
    pub segments: Vec<Segment>,
    pub links: Vec<Link>,
}

impl Graph {
    pub fn new() -> Self {
        Default::default()
    }
}

/// Output of the path parser. Paths that were opened by a `P` line
/// but never closed by an `o` line aren't included in `paths`; their
/// ids are listed in `dangling`.
#[derive(Default, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct ParsedPaths {
    pub paths: Vec<Path>,
    pub dangling: Vec<usize>,
}
