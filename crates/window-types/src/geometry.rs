use serde::{Deserialize, Serialize};

/// Direction a division runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Which leaf of the window an element belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Wing {
    /// Single-sash windows have no wing qualifier.
    #[default]
    None,
    Left,
    Right,
    Main,
    Second,
}

impl Wing {
    pub fn is_none(&self) -> bool {
        matches!(self, Wing::None)
    }

    /// Stable lowercase key used in panel ids and member names.
    pub fn key(self) -> &'static str {
        match self {
            Wing::None => "none",
            Wing::Left => "left",
            Wing::Right => "right",
            Wing::Main => "main",
            Wing::Second => "second",
        }
    }

    /// Human-readable qualifier for BOM member names.
    pub fn label(self) -> &'static str {
        match self {
            Wing::None => "",
            Wing::Left => "left wing",
            Wing::Right => "right wing",
            Wing::Main => "main wing",
            Wing::Second => "second wing",
        }
    }
}

/// Interval `[start, end)` along one axis. The unit depends on the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Position in the undropped sequence, so dropping a degenerate segment
    /// does not renumber its neighbours.
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn new(index: usize, start: f64, end: f64) -> Self {
        Self { index, start, end }
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.end > self.start)
    }
}

/// A structural bar splitting a span at a fixed centre position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Division {
    /// Centre of the bar along the partitioned span.
    pub position: f64,
    pub thickness: f64,
    pub axis: Axis,
    pub wing: Wing,
}

impl Division {
    pub fn leading_edge(&self) -> f64 {
        self.position - self.thickness / 2.0
    }

    pub fn trailing_edge(&self) -> f64 {
        self.position + self.thickness / 2.0
    }
}
