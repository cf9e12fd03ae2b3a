use std::path::PathBuf;

use crate::parser::{
    parse_graph, parse_paths, parse_sequences, GFAResult, ParseError,
    ParserTolerance,
};
use crate::writer::write_gfa_file;

/// Input and output locations for one conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertConfig {
    pub graph: PathBuf,
    pub paths: PathBuf,
    pub sequences: PathBuf,
    pub output: PathBuf,
    pub tolerance: ParserTolerance,
}

impl ConvertConfig {
    pub fn new<P: Into<PathBuf>>(
        graph: P,
        paths: P,
        sequences: P,
        output: P,
    ) -> Self {
        ConvertConfig {
            graph: graph.into(),
            paths: paths.into(),
            sequences: sequences.into(),
            output: output.into(),
            tolerance: Default::default(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: ParserTolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Describe the stage that runs after `last`, i.e. the one that
    /// was in progress when a conversion reporting `last` failed.
    pub fn next_stage(&self, last: Option<Progress>) -> String {
        match last {
            None => {
                format!("reading sequences from {}", self.sequences.display())
            }
            Some(Progress::SequencesLoaded { .. }) => {
                format!("reading graph from {}", self.graph.display())
            }
            Some(Progress::GraphParsed { .. }) => {
                format!("reading paths from {}", self.paths.display())
            }
            Some(Progress::PathsParsed { .. }) | Some(Progress::Written) => {
                format!("writing GFA to {}", self.output.display())
            }
        }
    }
}

/// Reported after each stage of `convert_with`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    SequencesLoaded { count: usize, submer_size: usize },
    GraphParsed { segments: usize, links: usize },
    PathsParsed { paths: usize, dangling: usize },
    Written,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    pub sequences: usize,
    pub submer_size: usize,
    pub segments: usize,
    pub links: usize,
    pub paths: usize,
    pub dangling_paths: usize,
}

pub fn convert(config: &ConvertConfig) -> GFAResult<ConversionSummary> {
    convert_with(config, |_| ())
}

/// Load the sequences, parse the graph and the paths, and write the
/// GFA, calling `progress` after each step. The files are read one at
/// a time, in that order.
pub fn convert_with<F>(
    config: &ConvertConfig,
    mut progress: F,
) -> GFAResult<ConversionSummary>
where
    F: FnMut(Progress),
{
    let tolerance = config.tolerance;
    let mut summary = ConversionSummary::default();

    log::info!("{}", config.next_stage(None));
    let sequences = parse_sequences(&config.sequences, tolerance)?;
    let submer_size =
        sequences.submer_size().ok_or(ParseError::EmptySequenceTable)?;
    summary.sequences = sequences.len();
    summary.submer_size = submer_size;
    progress(Progress::SequencesLoaded {
        count: summary.sequences,
        submer_size,
    });

    log::info!("reading graph from {}", config.graph.display());
    let graph = parse_graph(&config.graph, submer_size, tolerance)?;
    summary.segments = graph.segments.len();
    summary.links = graph.links.len();
    progress(Progress::GraphParsed {
        segments: summary.segments,
        links: summary.links,
    });

    log::info!("reading paths from {}", config.paths.display());
    let parsed = parse_paths(&config.paths, tolerance)?;
    summary.paths = parsed.paths.len();
    summary.dangling_paths = parsed.dangling.len();
    progress(Progress::PathsParsed {
        paths: summary.paths,
        dangling: summary.dangling_paths,
    });

    log::info!("writing GFA to {}", config.output.display());
    write_gfa_file(&config.output, &graph, &parsed.paths, &sequences)?;
    progress(Progress::Written);

    Ok(summary)
}
