//! Splitting a span into cells at division centre positions.
//!
//! The partitioner works on division centres. Cell extents, which exclude the
//! bar material on each side, come from [`Partition::cells`].

use tracing::{debug, warn};
use window_types::Segment;

/// Manual positions closer than this to an already accepted one collapse.
pub const MANUAL_EPSILON: f64 = 1.0;

/// Ordered segments between division centres over `[0, span]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub span: f64,
    pub thickness: f64,
    pub positions: Vec<f64>,
    pub segments: Vec<Segment>,
}

/// Partitions `[0, total_span]` at the given sorted division centres.
///
/// Degenerate segments are dropped and logged. Surviving segments keep the
/// index they had in the full sequence.
pub fn partition(total_span: f64, positions: &[f64], thickness: f64) -> Partition {
    let mut bounds = Vec::with_capacity(positions.len() + 2);
    bounds.push(0.0);
    bounds.extend_from_slice(positions);
    bounds.push(total_span);

    let segments = bounds
        .windows(2)
        .enumerate()
        .map(|(index, pair)| Segment::new(index, pair[0], pair[1]))
        .filter(|segment| keep(segment, "segment"))
        .collect();

    Partition {
        span: total_span,
        thickness,
        positions: positions.to_vec(),
        segments,
    }
}

impl Partition {
    /// Number of cells the span was split into, including dropped ones.
    pub fn cell_count(&self) -> usize {
        self.positions.len() + 1
    }

    /// Segments shrunk by half the division thickness on every interior edge.
    /// The outer edges stay at `0` and `span`.
    pub fn cells(&self) -> Vec<Segment> {
        let half = self.thickness / 2.0;
        let last = self.positions.len();
        self.segments
            .iter()
            .map(|s| {
                let start = if s.index == 0 { s.start } else { s.start + half };
                let end = if s.index == last { s.end } else { s.end - half };
                Segment::new(s.index, start, end)
            })
            .filter(|cell| keep(cell, "cell"))
            .collect()
    }

    /// Sum of cell lengths plus the division material between them.
    pub fn covered_span(&self) -> f64 {
        let cells: f64 = self.cells().iter().map(Segment::length).sum();
        cells + self.thickness * self.positions.len() as f64
    }
}

fn keep(segment: &Segment, what: &str) -> bool {
    if segment.is_degenerate() {
        warn!(
            index = segment.index,
            start = segment.start,
            end = segment.end,
            "dropping degenerate {what}"
        );
        false
    } else {
        true
    }
}

/// Centres for `count` divisions of `thickness` such that every cell between
/// them has the same clear length.
pub fn even_positions(span: f64, count: usize, thickness: f64) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let cell = (span - count as f64 * thickness) / (count as f64 + 1.0);
    (1..=count)
        .map(|i| i as f64 * cell + (i as f64 - 0.5) * thickness)
        .collect()
}

/// Validates manual offsets against `(0, span)` and collapses near-duplicates.
///
/// Input is expected sorted. Positions outside the span are dropped and
/// logged; a position within [`MANUAL_EPSILON`] of the previous accepted one
/// is folded into it.
pub fn manual_positions(span: f64, manual: &[f64]) -> Vec<f64> {
    let mut accepted: Vec<f64> = Vec::with_capacity(manual.len());
    for &p in manual {
        if !(p > 0.0 && p < span) {
            warn!(position = p, span, "manual division outside span, ignoring");
            continue;
        }
        if let Some(&prev) = accepted.last() {
            if (p - prev).abs() < MANUAL_EPSILON {
                debug!(position = p, kept = prev, "collapsing coincident manual division");
                continue;
            }
        }
        accepted.push(p);
    }
    accepted
}
