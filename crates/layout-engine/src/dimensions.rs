//! True millimetre sizes of every timber member and panel.
//!
//! Values stay in floating point here; rounding happens once, when the BOM is
//! assembled.

use std::collections::BTreeMap;

use tracing::{debug, error, instrument};
use window_types::{
    panel_id, MemberKind, PanelSize, StructuralMember, WindowParameters, Wing,
};

use crate::error::{finite, LayoutError};
use crate::registry::PanelRegistry;
use crate::topology::{SashTopology, WindowTopology, WingPlan};

/// Ordered member list for fabrication. Empty when the parameters describe
/// no buildable window; the cause is logged.
#[instrument(skip_all, fields(window_type = ?params.window_type))]
pub fn calculate_member_dimensions(params: &WindowParameters) -> Vec<StructuralMember> {
    match try_member_dimensions(params) {
        Ok(members) => members,
        Err(err) => {
            error!(%err, "member calculation failed, returning no members");
            Vec::new()
        }
    }
}

/// Panel id to true size, overlap included when the registry sets one.
/// Empty on failure; the cause is logged.
#[instrument(skip_all, fields(window_type = ?params.window_type))]
pub fn calculate_panel_dimensions(
    params: &WindowParameters,
    registry: &PanelRegistry,
) -> BTreeMap<String, PanelSize> {
    match try_panel_dimensions(params, registry) {
        Ok(sizes) => sizes,
        Err(err) => {
            error!(%err, "panel calculation failed, returning no panels");
            BTreeMap::new()
        }
    }
}

pub fn try_member_dimensions(
    params: &WindowParameters,
) -> Result<Vec<StructuralMember>, LayoutError> {
    let params = params.sanitized();
    let topology = WindowTopology::plan(&params);
    check_spans(&topology)?;
    members_for(&params, &topology)
}

pub fn try_panel_dimensions(
    params: &WindowParameters,
    registry: &PanelRegistry,
) -> Result<BTreeMap<String, PanelSize>, LayoutError> {
    let params = params.sanitized();
    let topology = WindowTopology::plan(&params);
    check_spans(&topology)?;
    panels_for(&topology, registry)
}

fn check_spans(topology: &WindowTopology) -> Result<(), LayoutError> {
    let positive = |what: String, value: f64| {
        if value > 0.0 {
            Ok(())
        } else {
            Err(LayoutError::DegenerateSpan { what, value })
        }
    };
    positive("sash width".into(), finite("sash width", topology.sash_width)?)?;
    positive("sash height".into(), finite("sash height", topology.sash_height)?)?;
    positive("glazing height".into(), finite("glazing height", topology.inner_height)?)?;
    for wing in &topology.wings {
        let inner = finite("wing glazing width", wing.inner_width)?;
        positive(format!("{} glazing width", wing_name(wing.wing)), inner)?;
    }
    Ok(())
}

fn wing_name(wing: Wing) -> &'static str {
    if wing.is_none() {
        "sash"
    } else {
        wing.label()
    }
}

/// Appends the wing qualifier used in member names.
fn qualified(base: String, wing: Wing) -> String {
    if wing.is_none() {
        base
    } else {
        format!("{base} ({})", wing.label())
    }
}

pub fn members_for(
    params: &WindowParameters,
    topology: &WindowTopology,
) -> Result<Vec<StructuralMember>, LayoutError> {
    let mut members = Vec::new();
    let frame = |name: &str, length: f64| {
        StructuralMember::new(
            MemberKind::Frame,
            name,
            length,
            params.frame_wood_width,
            params.frame_wood_thickness,
        )
    };
    members.push(frame("Frame bottom rail", params.frame_width));
    members.push(frame("Frame top rail", params.frame_width));
    members.push(frame("Frame left stile", params.frame_height));
    members.push(frame("Frame right stile", params.frame_height));

    for wing in &topology.wings {
        push_sash(&mut members, params, topology, wing);
    }

    if matches!(topology.sash, SashTopology::MullionSplit) {
        let length = finite(
            "mullion length",
            params.frame_height - 2.0 * params.frame_wood_width,
        )?;
        members.push(StructuralMember::new(
            MemberKind::Mullion,
            "Frame mullion",
            length,
            params.frame_wood_width,
            params.frame_wood_thickness,
        ));
    }

    let tenons = 2.0 * params.tenon_length;

    for i in 1..=topology.rows.division_count() {
        for wing in &topology.wings {
            members.push(StructuralMember::new(
                MemberKind::HorizontalDivision,
                qualified(format!("Horizontal division {i}"), wing.wing),
                wing.inner_width + tenons,
                params.division_wood_width,
                params.division_wood_thickness,
            ));
        }
    }

    let sections = topology.rows.cells();
    let sectioned = topology.rows.division_count() > 0;
    for wing in &topology.wings {
        for j in 1..=wing.columns.division_count() {
            for section in &sections {
                let base = if sectioned {
                    format!("Vertical division {j} section {}", section.index + 1)
                } else {
                    format!("Vertical division {j}")
                };
                members.push(StructuralMember::new(
                    MemberKind::VerticalDivision,
                    qualified(base, wing.wing),
                    finite("vertical division length", section.length() + tenons)?,
                    params.vertical_division_width,
                    params.vertical_division_thickness,
                ));
            }
        }
    }

    for wing in &topology.wings {
        if wing.columns.division_count() == 0 && topology.rows.division_count() == 0 {
            continue;
        }
        let length = wing.inner_width + tenons;
        members.push(StructuralMember::new(
            MemberKind::TenonedRail,
            qualified("Upper tenoned rail".to_string(), wing.wing),
            length,
            params.upper_tenoned_width,
            params.upper_tenoned_thickness,
        ));
        members.push(StructuralMember::new(
            MemberKind::TenonedRail,
            qualified("Lower tenoned rail".to_string(), wing.wing),
            length,
            params.lower_tenoned_width,
            params.lower_tenoned_thickness,
        ));
    }

    debug!(count = members.len(), "computed structural members");
    Ok(members)
}

fn push_sash(
    members: &mut Vec<StructuralMember>,
    params: &WindowParameters,
    topology: &WindowTopology,
    wing: &WingPlan,
) {
    let rail = |name: &str, length: f64| {
        StructuralMember::new(
            MemberKind::Sash,
            qualified(name.to_string(), wing.wing),
            length,
            params.frieze_width,
            params.frieze_thickness,
        )
    };
    members.push(rail("Sash bottom rail", wing.outer_width));
    members.push(rail("Sash top rail", wing.outer_width));
    members.push(rail("Sash left stile", topology.sash_height));
    members.push(rail("Sash right stile", topology.sash_height));
}

pub fn panels_for(
    topology: &WindowTopology,
    registry: &PanelRegistry,
) -> Result<BTreeMap<String, PanelSize>, LayoutError> {
    let rows = topology.rows.cells();
    let mut sizes = BTreeMap::new();
    for wing in &topology.wings {
        let cols = wing.columns.cells();
        for row in &rows {
            for col in &cols {
                let id = panel_id(wing.wing, row.index, col.index);
                let overlap = registry.overlap_for(&id).unwrap_or(0.0);
                let grow = if overlap > 0.0 { 2.0 * overlap } else { 0.0 };
                sizes.insert(
                    id,
                    PanelSize {
                        width_mm: finite("panel width", col.length() + grow)?,
                        height_mm: finite("panel height", row.length() + grow)?,
                    },
                );
            }
        }
    }
    debug!(count = sizes.len(), "computed panel sizes");
    Ok(sizes)
}
