use serde::{Deserialize, Serialize};

use crate::geometry::Wing;

/// Material filling a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfillType {
    #[default]
    Glass,
    Wood,
}

impl InfillType {
    pub fn label(self) -> &'static str {
        match self {
            InfillType::Glass => "Glass",
            InfillType::Wood => "Wood",
        }
    }
}

/// Thickness and rebate overlap applied to panels of one infill type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    pub thickness: f64,
    pub overlap: f64,
}

/// Global per-material defaults, re-applied whenever a panel changes type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialDefaults {
    pub glass: MaterialSpec,
    pub wood: MaterialSpec,
}

impl Default for MaterialDefaults {
    fn default() -> Self {
        Self {
            glass: MaterialSpec {
                thickness: 4.0,
                overlap: 5.0,
            },
            wood: MaterialSpec {
                thickness: 20.0,
                overlap: 5.0,
            },
        }
    }
}

impl MaterialDefaults {
    pub fn from_params(params: &crate::WindowParameters) -> Self {
        Self {
            glass: MaterialSpec {
                thickness: params.glass_thickness,
                overlap: params.glass_overlap,
            },
            wood: MaterialSpec {
                thickness: params.wood_thickness,
                overlap: params.wood_overlap,
            },
        }
    }

    pub fn for_type(&self, infill: InfillType) -> MaterialSpec {
        match infill {
            InfillType::Glass => self.glass,
            InfillType::Wood => self.wood,
        }
    }
}

/// One grid cell. Geometry comes from the pixel layout; infill state is owned
/// by the panel registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub id: String,
    pub row: usize,
    pub col: usize,
    pub wing: Wing,
    pub infill_type: InfillType,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
    pub overlap: f64,
    /// Belongs to a two-wing window.
    pub is_double: bool,
}

/// Builds the deterministic id for a cell. Single-sash ids carry no wing.
pub fn panel_id(wing: Wing, row: usize, col: usize) -> String {
    if wing.is_none() {
        format!("window_{row}_{col}")
    } else {
        format!("window_{}_{row}_{col}", wing.key())
    }
}

/// Serialized form of a panel for persistence and the fabrication host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelRecord {
    pub id: String,
    pub row: usize,
    pub col: usize,
    pub wing: Option<Wing>,
    #[serde(rename = "type")]
    pub infill_type: InfillType,
    pub thickness: f64,
    pub overlap: f64,
    pub is_double: bool,
}

impl From<&Panel> for PanelRecord {
    fn from(panel: &Panel) -> Self {
        Self {
            id: panel.id.clone(),
            row: panel.row,
            col: panel.col,
            wing: (!panel.wing.is_none()).then_some(panel.wing),
            infill_type: panel.infill_type,
            thickness: panel.thickness,
            overlap: panel.overlap,
            is_double: panel.is_double,
        }
    }
}

/// True mm size of a panel, overlap included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelSize {
    pub width_mm: f64,
    pub height_mm: f64,
}
