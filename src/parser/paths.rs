use std::io::BufRead;

use bstr::{BString, ByteSlice};

use crate::gfa::{ParsedPaths, Path, PathStep};

use super::{
    error::tolerate, for_each_line, open_buffered, GFAResult, ParseError,
    ParserTolerance,
};

/// Where the parser is within the `P`, `z`, `o` record group of a
/// path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathState {
    /// No path is open; only a `P` line is expected
    Idle,
    /// A `P` line opened the path, the `z` line hasn't been seen yet
    AwaitingSteps { id: usize },
    /// The steps are buffered, waiting for the `o` line to commit
    AwaitingOffsets { id: usize, steps: Vec<PathStep> },
}

impl PathState {
    fn open_id(&self) -> Option<usize> {
        match self {
            PathState::Idle => None,
            PathState::AwaitingSteps { id } => Some(*id),
            PathState::AwaitingOffsets { id, .. } => Some(*id),
        }
    }
}

/// Tracks the open path and collects the committed ones.
struct PathCollector {
    state: PathState,
    next_id: usize,
    parsed: ParsedPaths,
    tolerance: ParserTolerance,
}

impl PathCollector {
    fn new(tolerance: ParserTolerance) -> Self {
        PathCollector {
            state: PathState::Idle,
            next_id: 1,
            parsed: Default::default(),
            tolerance,
        }
    }

    /// Any path still open when a new one starts, or when the input
    /// ends, never gets its offsets.
    fn drop_open_path(&mut self) -> GFAResult<()> {
        let state = std::mem::replace(&mut self.state, PathState::Idle);
        if let Some(id) = state.open_id() {
            self.parsed.dangling.push(id);
            tolerate(ParseError::DanglingPath(id), &self.tolerance)?;
        }
        Ok(())
    }

    fn start_path(&mut self) -> GFAResult<()> {
        self.drop_open_path()?;
        let id = self.next_id;
        self.next_id += 1;
        self.state = PathState::AwaitingSteps { id };
        Ok(())
    }

    fn set_steps(&mut self, num: usize, steps: Vec<PathStep>) -> GFAResult<()> {
        match self.state.open_id() {
            Some(id) => {
                self.state = PathState::AwaitingOffsets { id, steps };
                Ok(())
            }
            None => tolerate(ParseError::OrphanPathLine(num), &self.tolerance),
        }
    }

    fn commit(&mut self, num: usize, offsets: Vec<BString>) -> GFAResult<()> {
        let (id, steps) =
            match std::mem::replace(&mut self.state, PathState::Idle) {
                PathState::Idle => {
                    return tolerate(
                        ParseError::OrphanPathLine(num),
                        &self.tolerance,
                    )
                }
                PathState::AwaitingSteps { id } => (id, Vec::new()),
                PathState::AwaitingOffsets { id, steps } => (id, steps),
            };
        self.parsed.paths.push(Path::new(id, steps, offsets));
        Ok(())
    }

    fn finish(mut self) -> GFAResult<ParsedPaths> {
        self.drop_open_path()?;
        Ok(self.parsed)
    }
}

/// Parse the path records of a path file.
pub fn parse_paths<P: AsRef<std::path::Path>>(
    path: P,
    tolerance: ParserTolerance,
) -> GFAResult<ParsedPaths> {
    let reader = open_buffered(path)?;
    parse_paths_reader(reader, tolerance)
}

/// Parse path records from any buffered reader.
///
/// A path is a `P` line, then a `z` line holding the signed node
/// references, then an `o` line holding the offsets. After the type
/// tag, the first two fields of `z` and `o` lines are skipped. Paths
/// are numbered from 1 in the order of their `P` lines, and the `o`
/// line is what adds the path to the output. Step tokens keep their
/// text, only a leading `-` is turned into the orientation. A path
/// without an `o` line is left out and its id listed in
/// `ParsedPaths::dangling`.
pub fn parse_paths_reader<R: BufRead>(
    reader: R,
    tolerance: ParserTolerance,
) -> GFAResult<ParsedPaths> {
    let mut collector = PathCollector::new(tolerance);

    for_each_line(reader, |num, line| match line.first() {
        Some(b'P') => collector.start_path(),
        Some(b'z') => {
            let steps = line
                .fields()
                .skip(3)
                .map(PathStep::from_signed_token)
                .collect();
            collector.set_steps(num, steps)
        }
        Some(b'o') => {
            let offsets = line.fields().skip(3).map(BString::from).collect();
            collector.commit(num, offsets)
        }
        _ => Ok(()),
    })?;

    let parsed = collector.finish()?;

    log::debug!(
        "read {} paths, {} without offsets",
        parsed.paths.len(),
        parsed.dangling.len()
    );

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfa::Orientation::*;

    fn parse(input: &str) -> GFAResult<ParsedPaths> {
        parse_paths_reader(input.as_bytes(), ParserTolerance::Safe)
    }

    fn offsets(tokens: &[&str]) -> Vec<BString> {
        tokens.iter().map(|t| BString::from(*t)).collect()
    }

    #[test]
    fn path_triple() {
        let parsed = parse("P 0 x\nz 0 3 1 -4 12\no 0 3 0 5 17 40\n").unwrap();
        assert!(parsed.dangling.is_empty());
        assert_eq!(
            parsed.paths,
            vec![Path::new(
                1,
                vec![
                    PathStep::new("1", Forward),
                    PathStep::new("4", Backward),
                    PathStep::new("12", Forward),
                ],
                offsets(&["0", "5", "17", "40"]),
            )]
        );
    }

    #[test]
    fn paths_numbered_by_p_lines() {
        let input = "P a\nz a 0 1\no a 0 0\nP b\nz b 0 -2\no b 0 3\n";
        let parsed = parse(input).unwrap();
        let ids: Vec<_> = parsed.paths.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(parsed.paths[1].steps, vec![PathStep::new("2", Backward)]);
    }

    #[test]
    fn path_without_offsets_is_dangling() {
        let input = "P a\nz a 0 1 2\nP b\nz b 0 3\no b 0 7\nP c\nz c 0 4\n";
        let parsed = parse(input).unwrap();
        assert_eq!(parsed.paths.len(), 1);
        assert_eq!(parsed.paths[0].id, 2);
        assert_eq!(parsed.dangling, vec![1, 3]);

        let strict =
            parse_paths_reader(input.as_bytes(), ParserTolerance::Pedantic);
        assert!(matches!(strict, Err(ParseError::DanglingPath(1))));
    }

    #[test]
    fn later_steps_line_overwrites() {
        let parsed = parse("P\nz 0 0 1\nz 0 0 -9\no 0 0 1\n").unwrap();
        assert_eq!(parsed.paths[0].steps, vec![PathStep::new("9", Backward)]);
    }

    #[test]
    fn offsets_without_steps_commit_empty_path() {
        let parsed = parse("P\no 0 0 1 2\n").unwrap();
        assert_eq!(parsed.paths, vec![Path::new(1, vec![], offsets(&["1", "2"]))]);
    }

    #[test]
    fn orphan_lines_skipped_unless_pedantic() {
        let input = "z 0 0 1\no 0 0 1\nP\nz 0 0 2\no 0 0 3\no 0 0 4\n";
        let parsed = parse(input).unwrap();
        assert_eq!(parsed.paths.len(), 1);
        assert_eq!(parsed.paths[0].offsets, offsets(&["3"]));

        let strict =
            parse_paths_reader(input.as_bytes(), ParserTolerance::Pedantic);
        assert!(matches!(strict, Err(ParseError::OrphanPathLine(1))));
    }

    #[test]
    fn tag_and_two_fields_skipped() {
        let parsed = parse("P x x\nz x x 1\no x x 5\n").unwrap();
        assert_eq!(
            parsed.paths,
            vec![Path::new(1, vec![PathStep::new("1", Forward)], offsets(&["5"]))]
        );
    }

    #[test]
    fn step_tokens_kept_verbatim() {
        let parsed = parse("P\nz 0 0 007 -010 x\no 0 0 00 1\n").unwrap();
        assert_eq!(
            parsed.paths[0].steps,
            vec![
                PathStep::new("007", Forward),
                PathStep::new("010", Backward),
                PathStep::new("x", Forward),
            ]
        );
        assert_eq!(parsed.paths[0].offsets, offsets(&["00", "1"]));
    }
}
