use crate::converter::geometry::{Point2D, ResolvedArc};
use std::collections::BTreeSet;

/// A board-outline edge in footprint coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeSegment {
    Line { start: Point2D, end: Point2D },
    Arc { start: Point2D, mid: Point2D, end: Point2D },
}

impl EdgeSegment {
    pub fn start(&self) -> Point2D {
        match self {
            EdgeSegment::Line { start, .. } | EdgeSegment::Arc { start, .. } => *start,
        }
    }

    pub fn end(&self) -> Point2D {
        match self {
            EdgeSegment::Line { end, .. } | EdgeSegment::Arc { end, .. } => *end,
        }
    }

    /// Same edge walked the other way. An arc keeps its midpoint, which is what fixes its side.
    pub fn reversed(&self) -> EdgeSegment {
        match *self {
            EdgeSegment::Line { start, end } => EdgeSegment::Line { start: end, end: start },
            EdgeSegment::Arc { start, mid, end } => EdgeSegment::Arc { start: end, mid, end: start },
        }
    }
}

/// Result of stitching edge segments together.
#[derive(Debug, Clone, Default)]
pub struct ClosedPolygons {
    /// Each loop is chained start to end, with segments reoriented as needed.
    pub loops: Vec<Vec<EdgeSegment>>,
    /// Indices of input segments that ended up in no loop.
    pub unclosed: Vec<usize>,
}

/// Greedily chains segments by matching endpoints until each chain returns to its first point.
///
/// Chains that dead-end are abandoned and all of their segments go back to the worklist, so a
/// later starting segment can still use them.
pub fn find_closed_polygons(segments: &[EdgeSegment]) -> ClosedPolygons {
    let mut unused: BTreeSet<usize> = (0..segments.len()).collect();
    let mut loops = Vec::new();

    for first in 0..segments.len() {
        if !unused.remove(&first) {
            continue;
        }

        let mut chain_indices = vec![first];
        let mut chain = vec![segments[first]];
        let mut trailing = segments[first].end();

        loop {
            if chain.len() > 1 && trailing.approx_eq(&chain[0].start()) {
                loops.push(chain);
                break;
            }

            let next = unused.iter().copied().find_map(|j| {
                let candidate = segments[j];
                if trailing.approx_eq(&candidate.start()) {
                    Some((j, candidate))
                } else if trailing.approx_eq(&candidate.end()) {
                    Some((j, candidate.reversed()))
                } else {
                    None
                }
            });

            match next {
                Some((j, segment)) => {
                    unused.remove(&j);
                    chain_indices.push(j);
                    trailing = segment.end();
                    chain.push(segment);
                }
                None => {
                    unused.extend(chain_indices);
                    break;
                }
            }
        }
    }

    ClosedPolygons { loops, unclosed: unused.into_iter().collect() }
}

/// Flattens a loop into its vertices. Each segment contributes everything but its end point,
/// which the following segment supplies.
pub fn polygon_to_points(polygon: &[EdgeSegment]) -> Vec<Point2D> {
    let mut points = Vec::new();
    for segment in polygon {
        match *segment {
            EdgeSegment::Line { start, .. } => points.push(start),
            EdgeSegment::Arc { start, mid, end } => match ResolvedArc::from_points(start, mid, end) {
                Some(arc) => {
                    let segments = (arc.length().ceil() as usize).max(3);
                    let mut arc_points = arc.tessellate(segments);
                    arc_points.pop();
                    points.extend(arc_points);
                }
                None => {
                    points.push(start);
                    if !mid.approx_eq(&start) && !mid.approx_eq(&end) {
                        points.push(mid);
                    }
                }
            },
        }
    }
    points
}
