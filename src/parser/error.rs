use std::{error, fmt};

use bstr::ByteSlice;

pub type GFAFieldResult<T> = Result<T, ParseFieldError>;
pub type GFAResult<T> = Result<T, ParseError>;

/// How the parsers react to input that can be read, but is probably
/// not what the producer meant, e.g. a path that's never closed by an
/// `o` line. Malformed fields and I/O errors are always fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserTolerance {
    /// Skip anomalies silently
    IgnoreAll,
    /// Log anomalies as warnings and keep going
    Safe,
    /// Fail on the first anomaly
    Pedantic,
}

impl Default for ParserTolerance {
    fn default() -> Self {
        Self::Safe
    }
}

impl std::str::FromStr for ParserTolerance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore-all" => Ok(Self::IgnoreAll),
            "safe" => Ok(Self::Safe),
            "pedantic" => Ok(Self::Pedantic),
            _ => Err(format!(
                "unknown tolerance `{}`, expected one of ignore-all, safe, pedantic",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFieldError {
    /// A bytestring couldn't be parsed as a bytestring, can happen
    /// when the contents aren't UTF8.
    Utf8Error,
    /// A field couldn't be parsed as an integer
    ParseFromStringError,
    /// A node reference wasn't an optionally signed unsigned integer
    OrientedIdError,
    MissingFields,
}

macro_rules! impl_many_from {
    ($to:ty, ($from:ty, $out:expr)) => (
        impl From<$from> for $to {
            fn from(_: $from) -> Self {
                $out
            }
        }
    );
    ($to:ty, ($from:ty, $out:expr), $(($f:ty, $o:expr)),* $(,)?) => (
        impl_many_from!($to, ($from, $out));
        impl_many_from!($to, $(($f, $o)),*);
    );
}

impl_many_from!(
    ParseFieldError,
    (std::str::Utf8Error, ParseFieldError::Utf8Error),
    (bstr::Utf8Error, ParseFieldError::Utf8Error),
    (
        std::num::ParseIntError,
        ParseFieldError::ParseFromStringError
    ),
);

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseFieldError as PFE;
        match self {
            PFE::Utf8Error => {
                write!(f, "Failed to parse a bytestring as a UTF-8 string")
            }
            PFE::ParseFromStringError => {
                write!(f, "Failed to parse a field as an integer")
            }
            PFE::OrientedIdError => {
                write!(f, "Failed to parse a signed node reference")
            }
            PFE::MissingFields => write!(f, "Line is missing required fields"),
        }
    }
}

impl error::Error for ParseFieldError {}

/// Type encapsulating the different ways reading the input files can
/// fail. Line numbers are 1-based.
#[derive(Debug)]
pub enum ParseError {
    /// A line couldn't be parsed. Includes the line number, the
    /// problem line, and a variant describing the error.
    InvalidLine(ParseFieldError, usize, String),
    /// A sequence line appeared before any `>` header
    SequenceWithoutHeader(usize),
    /// The sequence file had no entries, so there's no submer size
    EmptySequenceTable,
    /// An `E` or `e` line appeared before any `V` line
    EdgeBeforeSegment(usize),
    /// A sequence differed in length from the first sequence
    UnequalSequenceLength {
        label: i64,
        expected: usize,
        found: usize,
    },
    /// A sequence contained characters not allowed in a GFA segment
    InvalidSequence(i64),
    /// An edge overlap was larger than the submer size
    NegativeOverlap { line: usize, overlap: i64 },
    /// A path was opened but its `o` line never came
    DanglingPath(usize),
    /// A `z` or `o` line appeared while no path was open
    OrphanPathLine(usize),
    /// Wrapper for an IO error.
    IOError(std::io::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseError as PE;
        match self {
            PE::InvalidLine(field_err, num, line) => write!(
                f,
                "Failed to parse line {} `{}`, error: {}",
                num, line, field_err
            ),
            PE::SequenceWithoutHeader(num) => {
                write!(f, "Sequence on line {} has no preceding header", num)
            }
            PE::EmptySequenceTable => {
                write!(f, "Sequence file contained no sequences")
            }
            PE::EdgeBeforeSegment(num) => {
                write!(f, "Edge on line {} appears before any node", num)
            }
            PE::UnequalSequenceLength {
                label,
                expected,
                found,
            } => write!(
                f,
                "Sequence {} has length {}, expected {}",
                label, found, expected
            ),
            PE::InvalidSequence(label) => {
                write!(f, "Sequence {} is not a valid GFA sequence", label)
            }
            PE::NegativeOverlap { line, overlap } => write!(
                f,
                "Edge on line {} has negative overlap {}",
                line, overlap
            ),
            PE::DanglingPath(id) => {
                write!(f, "Path {} has no offsets line and was dropped", id)
            }
            PE::OrphanPathLine(num) => {
                write!(f, "Path data on line {} outside of any path", num)
            }
            PE::IOError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl From<std::io::Error> for ParseError {
    #[inline]
    fn from(err: std::io::Error) -> Self {
        Self::IOError(err)
    }
}

impl error::Error for ParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ParseError::InvalidLine(err, _, _) => Some(err),
            ParseError::IOError(err) => Some(err),
            _ => None,
        }
    }
}

impl ParseError {
    #[inline]
    pub(crate) fn invalid_line(
        error: ParseFieldError,
        num: usize,
        line: &[u8],
    ) -> Self {
        let mut dest = String::new();
        line.to_str_lossy_into(&mut dest);
        Self::InvalidLine(error, num, dest)
    }

    /// Whether the error describes suspicious but readable input
    /// rather than input that can't be parsed at all
    pub fn is_anomaly(&self) -> bool {
        use ParseError as PE;
        matches!(
            self,
            PE::UnequalSequenceLength { .. }
                | PE::InvalidSequence(_)
                | PE::NegativeOverlap { .. }
                | PE::DanglingPath(_)
                | PE::OrphanPathLine(_)
        )
    }

    #[inline]
    pub fn can_safely_continue(&self, tol: &ParserTolerance) -> bool {
        use ParserTolerance as Tol;
        match tol {
            Tol::IgnoreAll | Tol::Safe => self.is_anomaly(),
            Tol::Pedantic => false,
        }
    }
}

/// Either swallow an anomaly, logging it if the tolerance asks for
/// that, or return it as an error.
pub(crate) fn tolerate(err: ParseError, tol: &ParserTolerance) -> GFAResult<()> {
    if err.can_safely_continue(tol) {
        if *tol == ParserTolerance::Safe {
            log::warn!("{}", err);
        }
        Ok(())
    } else {
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_decides_anomalies() {
        use ParserTolerance as Tol;
        let dangling = ParseError::DanglingPath(3);
        assert!(dangling.can_safely_continue(&Tol::Safe));
        assert!(dangling.can_safely_continue(&Tol::IgnoreAll));
        assert!(!dangling.can_safely_continue(&Tol::Pedantic));

        let hard = ParseError::EdgeBeforeSegment(1);
        assert!(!hard.can_safely_continue(&Tol::IgnoreAll));
        assert!(tolerate(hard, &Tol::Safe).is_err());
        assert!(tolerate(ParseError::OrphanPathLine(2), &Tol::Safe).is_ok());
    }

    #[test]
    fn parse_tolerance_names() {
        assert_eq!("pedantic".parse(), Ok(ParserTolerance::Pedantic));
        assert_eq!("ignore-all".parse(), Ok(ParserTolerance::IgnoreAll));
        assert!("loose".parse::<ParserTolerance>().is_err());
        assert_eq!(ParserTolerance::default(), ParserTolerance::Safe);
    }

    #[test]
    fn invalid_line_display() {
        let err = ParseError::invalid_line(
            ParseFieldError::MissingFields,
            4,
            b"E 12",
        );
        assert_eq!(
            err.to_string(),
            "Failed to parse line 4 `E 12`, error: Line is missing required fields"
        );
    }
}
