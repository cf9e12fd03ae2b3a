//! Conversion of GBWT-style graph dumps to GFA 1.0.
//!
//! Three inputs are read: a FASTA-like sequence table keyed by
//! integer labels, a graph file of `V`/`E`/`e` records, and a path
//! file of `P`/`z`/`o` record groups. The `writer` module serializes
//! the parsed records as GFA.

pub mod convert;
pub mod gfa;
pub mod parser;
pub mod writer;

pub use convert::{convert, convert_with, ConversionSummary, ConvertConfig};
