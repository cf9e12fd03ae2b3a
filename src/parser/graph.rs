use std::io::BufRead;

use bstr::ByteSlice;

use crate::gfa::{Graph, Link, Orientation, Segment};

use super::{
    error::tolerate, for_each_line, next_field, open_buffered, parse_int,
    parse_signed_id, GFAFieldResult, GFAResult, ParseError, ParserTolerance,
};

/// The direction an edge line points relative to the current node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeKind {
    /// `E`: the referenced node is the source, the current node the
    /// destination
    Incoming,
    /// `e`: the current node is the source
    Outgoing,
}

/// Build the link for an edge line. `fields` starts after the type tag.
fn parse_edge<'a, I>(
    kind: EdgeKind,
    current: usize,
    submer_size: usize,
    mut fields: I,
) -> GFAFieldResult<Link>
where
    I: Iterator<Item = &'a [u8]>,
{
    let (target, orient) = parse_signed_id(next_field(&mut fields)?)?;
    let overlap = submer_size as i64 - parse_int(next_field(&mut fields)?)?;

    let link = match kind {
        EdgeKind::Incoming => {
            Link::new(target, orient, current, Orientation::Forward, overlap)
        }
        EdgeKind::Outgoing => {
            Link::new(current, Orientation::Forward, target, orient, overlap)
        }
    };
    Ok(link)
}

/// Parse the node and edge records of a graph file.
pub fn parse_graph<P: AsRef<std::path::Path>>(
    path: P,
    submer_size: usize,
    tolerance: ParserTolerance,
) -> GFAResult<Graph> {
    let reader = open_buffered(path)?;
    parse_graph_reader(reader, submer_size, tolerance)
}

/// Parse node and edge records from any buffered reader.
///
/// Each `V` line creates the next segment, numbered from 1, and makes
/// it the current segment. `E <node> <overlap>` links the signed node
/// into the current segment, `e <node> <overlap>` links the current
/// segment to the signed node. A negative node reference means the
/// node is traversed in reverse. The stored overlap is `submer_size`
/// minus the overlap field. Lines with any other tag are ignored.
pub fn parse_graph_reader<R: BufRead>(
    reader: R,
    submer_size: usize,
    tolerance: ParserTolerance,
) -> GFAResult<Graph> {
    let mut graph = Graph::new();
    let mut current: Option<usize> = None;

    for_each_line(reader, |num, line| {
        let kind = match line.first() {
            Some(b'V') => {
                let id = graph.segments.len() + 1;
                graph.segments.push(Segment::new(id));
                current = Some(id);
                return Ok(());
            }
            Some(b'E') => EdgeKind::Incoming,
            Some(b'e') => EdgeKind::Outgoing,
            _ => return Ok(()),
        };

        let node = current.ok_or(ParseError::EdgeBeforeSegment(num))?;
        let fields = line.fields().skip(1);
        let link = parse_edge(kind, node, submer_size, fields)
            .map_err(|err| ParseError::invalid_line(err, num, line))?;

        if link.overlap < 0 {
            let err = ParseError::NegativeOverlap {
                line: num,
                overlap: link.overlap,
            };
            tolerate(err, &tolerance)?;
        }

        graph.links.push(link);
        Ok(())
    })?;

    log::debug!(
        "read {} segments and {} links",
        graph.segments.len(),
        graph.links.len()
    );

    Ok(graph)
}
