//! Assertion helpers with diagnostic output.
//!
//! Every failure says what was expected, what was found and where.

use std::collections::BTreeMap;

use bom_format::BomDocument;
use layout_engine::PixelLayout;
use window_types::{DrawRole, InfillType, PanelSize, StructuralMember};

use crate::helpers::HarnessError;

fn failed(detail: String) -> Result<(), HarnessError> {
    Err(HarnessError::AssertionFailed { detail })
}

/// Assert the number of panels in a layout.
pub fn assert_panel_count(layout: &PixelLayout, expected: usize, ctx: &str) -> Result<(), HarnessError> {
    let actual = layout.panels.len();
    if actual == expected {
        return Ok(());
    }
    let ids: Vec<&str> = layout.panels.iter().map(|p| p.id.as_str()).collect();
    failed(format!(
        "[{ctx}] expected {expected} panels, got {actual}: {ids:?}"
    ))
}

/// Assert how many drawables carry `role`.
pub fn assert_role_count(
    layout: &PixelLayout,
    role: DrawRole,
    expected: usize,
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual = layout.drawables.iter().filter(|d| d.role == role).count();
    if actual == expected {
        Ok(())
    } else {
        failed(format!("[{ctx}] expected {expected} {role:?} drawables, got {actual}"))
    }
}

/// Assert a panel's true size within `tol` mm.
pub fn assert_panel_size(
    sizes: &BTreeMap<String, PanelSize>,
    id: &str,
    width_mm: f64,
    height_mm: f64,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let Some(size) = sizes.get(id) else {
        let known: Vec<&String> = sizes.keys().collect();
        return failed(format!("[{ctx}] no size for {id}; known: {known:?}"));
    };
    if (size.width_mm - width_mm).abs() > tol || (size.height_mm - height_mm).abs() > tol {
        return failed(format!(
            "[{ctx}] {id}: expected {width_mm:.3} x {height_mm:.3}mm, got {:.3} x {:.3}mm (tol={tol})",
            size.width_mm, size.height_mm,
        ));
    }
    Ok(())
}

/// Assert a named member exists with the given length.
pub fn assert_member_length(
    members: &[StructuralMember],
    name: &str,
    length_mm: f64,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    match members.iter().find(|m| m.name == name) {
        Some(m) if (m.length_mm - length_mm).abs() <= tol => Ok(()),
        Some(m) => failed(format!(
            "[{ctx}] {name}: expected length {length_mm:.3}, got {:.3}",
            m.length_mm
        )),
        None => {
            let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
            failed(format!("[{ctx}] no member named {name:?}; have {names:?}"))
        }
    }
}

/// Assert a BOM line by name and rounded dimensions.
pub fn assert_bom_line(
    document: &BomDocument,
    name: &str,
    expected: (i64, i64, i64),
    ctx: &str,
) -> Result<(), HarnessError> {
    let Some(line) = document.lines.iter().find(|l| l.name == name) else {
        return failed(format!(
            "[{ctx}] BOM has no line {name:?} ({} lines)",
            document.lines.len()
        ));
    };
    let actual = (line.length, line.width, line.thickness);
    if actual == expected {
        Ok(())
    } else {
        failed(format!("[{ctx}] {name}: expected {expected:?}, got {actual:?}"))
    }
}

/// Assert the infill of one panel in a layout.
pub fn assert_infill(
    layout: &PixelLayout,
    id: &str,
    expected: InfillType,
    ctx: &str,
) -> Result<(), HarnessError> {
    match layout.panels.iter().find(|p| p.id == id) {
        Some(p) if p.infill_type == expected => Ok(()),
        Some(p) => failed(format!(
            "[{ctx}] {id}: expected {expected:?}, got {:?}",
            p.infill_type
        )),
        None => Err(HarnessError::UnknownPanel { id: id.to_string() }),
    }
}
