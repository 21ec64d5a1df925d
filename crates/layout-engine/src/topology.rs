//! Shared grid topology for both projections.
//!
//! Everything that depends on the window type is decided here, once, in mm:
//! division placement and which cells survive. The pixel projection maps the
//! resulting bounds linearly onto the canvas and never re-partitions.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use window_types::{Axis, Division, Segment, Wing, WindowParameters, WindowType};

use crate::partition::{even_positions, manual_positions, partition, Partition};

/// Rebate overlap between the two sashes of a double window, in mm.
pub const WING_OVERLAP_MM: f64 = 26.0;

/// Sash arrangement after resolving `window_type` against `is_asymmetric`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SashTopology {
    Single,
    DoubleSymmetric,
    /// `ratio` is the main wing share of the sash width, in (0, 1).
    DoubleAsymmetric { ratio: f64 },
    MullionSplit,
}

impl SashTopology {
    pub fn resolve(params: &WindowParameters) -> Self {
        match params.window_type {
            WindowType::Single => SashTopology::Single,
            WindowType::DoubleAsymmetric => SashTopology::DoubleAsymmetric {
                ratio: params.main_wing_fraction(),
            },
            WindowType::DoubleSymmetric if params.is_asymmetric => {
                SashTopology::DoubleAsymmetric {
                    ratio: params.main_wing_fraction(),
                }
            }
            WindowType::DoubleSymmetric => SashTopology::DoubleSymmetric,
            WindowType::MullionSplit => SashTopology::MullionSplit,
        }
    }

    pub fn is_double(&self) -> bool {
        !matches!(self, SashTopology::Single)
    }

    /// Position of the wing split as a fraction of the frame width.
    pub fn split_fraction(&self) -> Option<f64> {
        match self {
            SashTopology::Single => None,
            SashTopology::DoubleSymmetric | SashTopology::MullionSplit => Some(0.5),
            SashTopology::DoubleAsymmetric { ratio } => Some(*ratio),
        }
    }

    /// Width of the bar between the two wings on the preview, in mm.
    pub fn mid_member_width(&self, params: &WindowParameters) -> f64 {
        match self {
            SashTopology::MullionSplit => params.frame_wood_width,
            _ => params.middle_division_width,
        }
    }

    /// Outer wing widths and vertical division counts for this topology.
    fn wing_split(&self, params: &WindowParameters, sash_width: f64) -> Vec<WingShare> {
        match *self {
            SashTopology::Single => single_wings(params, sash_width),
            SashTopology::DoubleSymmetric => double_symmetric_wings(params, sash_width),
            SashTopology::DoubleAsymmetric { ratio } => {
                double_asymmetric_wings(params, sash_width, ratio)
            }
            SashTopology::MullionSplit => mullion_split_wings(params, sash_width),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct WingShare {
    wing: Wing,
    outer_width: f64,
    vertical_divisions: usize,
    /// Vertical divisions switched off, manual positions included.
    suppressed: bool,
}

fn single_wings(params: &WindowParameters, sash_width: f64) -> Vec<WingShare> {
    vec![WingShare {
        wing: Wing::None,
        outer_width: sash_width,
        vertical_divisions: params.vertical_divisions as usize,
        suppressed: false,
    }]
}

fn double_symmetric_wings(params: &WindowParameters, sash_width: f64) -> Vec<WingShare> {
    let half = (sash_width + WING_OVERLAP_MM) / 2.0;
    let (left, right) = distribute_evenly(params.vertical_divisions as usize);
    vec![
        WingShare {
            wing: Wing::Left,
            outer_width: half,
            vertical_divisions: left,
            suppressed: false,
        },
        WingShare {
            wing: Wing::Right,
            outer_width: half,
            vertical_divisions: right,
            suppressed: false,
        },
    ]
}

fn double_asymmetric_wings(params: &WindowParameters, sash_width: f64, ratio: f64) -> Vec<WingShare> {
    let half_overlap = WING_OVERLAP_MM / 2.0;
    let total = params.vertical_divisions as usize;
    let (mut main, mut second) = if total > 1 {
        let main = (total as f64 * ratio).round() as usize;
        (main.max(1), total.saturating_sub(main).max(1))
    } else {
        distribute_evenly(total)
    };

    // At an even split neither wing is narrow.
    let suppress = params.disable_narrow_wing_vertical_divisions && ratio != 0.5;
    let main_is_narrow = ratio < 0.5;
    if suppress {
        debug!(main_is_narrow, "suppressing vertical divisions of the narrow wing");
        if main_is_narrow {
            main = 0;
        } else {
            second = 0;
        }
    }

    vec![
        WingShare {
            wing: Wing::Main,
            outer_width: sash_width * ratio + half_overlap,
            vertical_divisions: main,
            suppressed: suppress && main_is_narrow,
        },
        WingShare {
            wing: Wing::Second,
            outer_width: sash_width * (1.0 - ratio) + half_overlap,
            vertical_divisions: second,
            suppressed: suppress && !main_is_narrow,
        },
    ]
}

fn mullion_split_wings(params: &WindowParameters, sash_width: f64) -> Vec<WingShare> {
    let half = (sash_width - params.sash_double_deduction) / 2.0;
    let (left, right) = distribute_evenly(params.vertical_divisions as usize);
    vec![
        WingShare {
            wing: Wing::Left,
            outer_width: half,
            vertical_divisions: left,
            suppressed: false,
        },
        WingShare {
            wing: Wing::Right,
            outer_width: half,
            vertical_divisions: right,
            suppressed: false,
        },
    ]
}

/// Splits a window-wide division count over two wings: one each as soon as
/// any are requested, the rest shared with the odd one going left.
fn distribute_evenly(total: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    let extra = total.saturating_sub(2);
    (1 + extra.div_ceil(2), 1 + extra / 2)
}

/// Division centres along one axis, in mm from the leading edge of `span`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisPlan {
    pub axis: Axis,
    /// `Wing::None` for the rows, which every wing shares.
    pub wing: Wing,
    pub span: f64,
    pub thickness: f64,
    pub positions: Vec<f64>,
}

impl AxisPlan {
    fn new(
        axis: Axis,
        wing: Wing,
        span: f64,
        thickness: f64,
        count: usize,
        manual: Option<&[f64]>,
    ) -> Self {
        let positions = match manual {
            Some(list) => manual_positions(span, list),
            None => even_positions(span, count, thickness),
        };
        Self {
            axis,
            wing,
            span,
            thickness,
            positions,
        }
    }

    pub fn division_count(&self) -> usize {
        self.positions.len()
    }

    pub fn cell_count(&self) -> usize {
        self.positions.len() + 1
    }

    /// The bars of this axis, in order.
    pub fn divisions(&self) -> Vec<Division> {
        self.positions
            .iter()
            .map(|&position| Division {
                position,
                thickness: self.thickness,
                axis: self.axis,
                wing: self.wing,
            })
            .collect()
    }

    pub fn partition(&self) -> Partition {
        partition(self.span, &self.positions, self.thickness)
    }

    /// Clear cells that survive in mm. Both projections build panels from
    /// exactly this list.
    pub fn cells(&self) -> Vec<Segment> {
        self.partition().cells()
    }
}

/// One wing with its true sizes and column plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WingPlan {
    pub wing: Wing,
    pub outer_width: f64,
    /// Glazing width between the wing's friezes.
    pub inner_width: f64,
    pub columns: AxisPlan,
}

/// Resolved grid shared by the pixel layout and the mm calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowTopology {
    pub sash: SashTopology,
    pub sash_width: f64,
    pub sash_height: f64,
    /// Glazing height between the top and bottom friezes.
    pub inner_height: f64,
    pub rows: AxisPlan,
    pub wings: Vec<WingPlan>,
}

impl WindowTopology {
    /// Resolves the topology. `params` should already be sanitized.
    pub fn plan(params: &WindowParameters) -> Self {
        let sash = SashTopology::resolve(params);
        let sash_width = params.frame_width - params.sash_width_deduction;
        let sash_height = params.frame_height - params.sash_height_deduction;
        let inner_height = sash_height - 2.0 * params.frieze_width;

        let rows = AxisPlan::new(
            Axis::Horizontal,
            Wing::None,
            inner_height,
            params.division_wood_width,
            params.horizontal_divisions as usize,
            params.manual_horizontal_positions.as_deref(),
        );

        let wings = sash
            .wing_split(params, sash_width)
            .into_iter()
            .map(|share| {
                let inner_width = share.outer_width - 2.0 * params.frieze_width;
                let manual = if share.suppressed {
                    None
                } else {
                    params.manual_vertical_positions.as_deref()
                };
                WingPlan {
                    wing: share.wing,
                    outer_width: share.outer_width,
                    inner_width,
                    columns: AxisPlan::new(
                        Axis::Vertical,
                        share.wing,
                        inner_width,
                        params.vertical_division_width,
                        share.vertical_divisions,
                        manual,
                    ),
                }
            })
            .collect::<Vec<_>>();

        info!(
            topology = ?sash,
            rows = rows.cell_count(),
            wings = wings.len(),
            "planned window topology"
        );

        Self {
            sash,
            sash_width,
            sash_height,
            inner_height,
            rows,
            wings,
        }
    }

    pub fn is_double(&self) -> bool {
        self.sash.is_double()
    }

    pub fn wing(&self, wing: Wing) -> Option<&WingPlan> {
        self.wings.iter().find(|w| w.wing == wing)
    }

    /// Cells the grid would contain before degenerate ones are dropped.
    pub fn expected_panel_count(&self) -> usize {
        let columns: usize = self.wings.iter().map(|w| w.columns.cell_count()).sum();
        self.rows.cell_count() * columns
    }

    /// Every sash and glazing span is positive. Neither projection makes
    /// panels for a window that fails this.
    pub fn is_buildable(&self) -> bool {
        [self.sash_width, self.sash_height, self.inner_height]
            .into_iter()
            .chain(self.wings.iter().map(|w| w.inner_width))
            .all(|span| span > 0.0)
    }

    /// Cells that survive in mm, which is the number of panels either
    /// projection produces.
    pub fn panel_count(&self) -> usize {
        if !self.is_buildable() {
            return 0;
        }
        let columns: usize = self.wings.iter().map(|w| w.columns.cells().len()).sum();
        self.rows.cells().len() * columns
    }
}
