use layout_engine::dimensions::{calculate_member_dimensions, calculate_panel_dimensions};
use layout_engine::registry::PanelRegistry;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use window_types::{StructuralMember, WindowParameters};

use crate::errors::SaveError;

/// Element kind reported to the fabrication host.
pub const ELEMENT_TYPE: &str = "window";

/// One fabrication part with whole-millimetre dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomLine {
    pub name: String,
    pub length: i64,
    pub width: i64,
    pub thickness: i64,
}

impl BomLine {
    /// Tuple form expected by the host's part generator.
    pub fn as_tuple(&self) -> (&str, i64, i64, i64) {
        (&self.name, self.length, self.width, self.thickness)
    }
}

/// Rounds to the nearest mm, halves away from zero.
pub fn round_mm(value: f64) -> i64 {
    value.round() as i64
}

/// Flattens members and panels into BOM lines, in generation order.
///
/// Members come first, as generated. Panels follow in layout order and use
/// the mm size attached to their registry entry; panels without one are
/// skipped and logged.
pub fn assemble(members: &[StructuralMember], registry: &PanelRegistry) -> Vec<BomLine> {
    let mut lines: Vec<BomLine> = members
        .iter()
        .map(|m| BomLine {
            name: m.name.clone(),
            length: round_mm(m.length_mm),
            width: round_mm(m.width_mm),
            thickness: round_mm(m.thickness_mm),
        })
        .collect();

    for entry in registry.entries() {
        let panel = &entry.panel;
        let Some(size) = entry.size_mm else {
            warn!(id = %panel.id, "panel has no mm size, leaving it out of the BOM");
            continue;
        };
        lines.push(BomLine {
            name: format!("{} panel {}", panel.infill_type.label(), panel.id),
            length: round_mm(size.height_mm),
            width: round_mm(size.width_mm),
            thickness: round_mm(panel.thickness),
        });
    }
    lines
}

/// Everything the host needs to generate the parts for one window type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomDocument {
    pub element_type: String,
    pub window_type: String,
    /// e.g. `"900mm x 1500mm"`.
    pub frame_size: String,
    /// Identical windows to produce.
    pub count: u32,
    pub lines: Vec<BomLine>,
}

impl BomDocument {
    /// Computes members and panel sizes for `params` and assembles them with
    /// the registry's infill state.
    pub fn build(params: &WindowParameters, registry: &PanelRegistry) -> Self {
        let mut sized = registry.clone();
        sized.attach_sizes(&calculate_panel_dimensions(params, registry));
        Self::from_sized(params, &sized)
    }

    /// Like [`BomDocument::build`], but trusts the mm sizes already attached
    /// to the registry, e.g. by an external dimension provider.
    pub fn from_sized(params: &WindowParameters, registry: &PanelRegistry) -> Self {
        let params = params.sanitized();
        let members = calculate_member_dimensions(&params);
        let lines = assemble(&members, registry);
        info!(
            lines = lines.len(),
            count = params.count,
            "assembled bill of materials"
        );
        Self {
            element_type: ELEMENT_TYPE.to_string(),
            window_type: params.window_type.label().to_string(),
            frame_size: format!(
                "{}mm x {}mm",
                round_mm(params.frame_width),
                round_mm(params.frame_height)
            ),
            count: params.count,
            lines,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line list repeated once per window.
    pub fn sink_tuples(&self) -> Vec<(&str, i64, i64, i64)> {
        (0..self.count)
            .flat_map(|_| self.lines.iter().map(BomLine::as_tuple))
            .collect()
    }

    /// Flat JSON array of `[name, length, width, thickness]` entries.
    pub fn to_sink_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(&self.sink_tuples())?)
    }
}
