//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics.
//! This lets a scenario collect all failures in one pass.

use std::collections::BTreeMap;

use bom_format::BomDocument;
use serde::Serialize;
use layout_engine::{PixelLayout, WindowTopology};
use window_types::{DrawRole, PanelSize, ZOrder};

/// The result of a single oracle check.
#[derive(Debug, Clone, Serialize)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            value: Some(value),
            ..Self::pass(name, detail)
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            value: Some(value),
            ..Self::fail(name, detail)
        }
    }
}

// ── Grid Oracles ────────────────────────────────────────────────────────────

/// The layout holds exactly the cells that survive in the topology.
pub fn check_panel_count(topology: &WindowTopology, layout: &PixelLayout) -> OracleVerdict {
    let expected = topology.panel_count();
    let actual = layout.panels.len();
    if expected == actual {
        OracleVerdict::pass_val(
            "panel_count",
            format!("{actual} panels as planned"),
            actual as f64,
        )
    } else {
        OracleVerdict::fail_val(
            "panel_count",
            format!("planned {expected} panels, layout has {actual}"),
            actual as f64,
        )
    }
}

/// Cells plus division material cover every span, rows and each wing's
/// columns, within `tol` mm.
pub fn check_span_coverage(topology: &WindowTopology, tol: f64) -> OracleVerdict {
    let mut worst = 0.0_f64;
    let mut failures = Vec::new();

    let rows = topology.rows.partition().covered_span() - topology.inner_height;
    worst = worst.max(rows.abs());
    if rows.abs() > tol {
        failures.push(format!("rows off by {rows:.3}mm"));
    }
    for wing in &topology.wings {
        let diff = wing.columns.partition().covered_span() - wing.inner_width;
        worst = worst.max(diff.abs());
        if diff.abs() > tol {
            failures.push(format!("{:?} columns off by {diff:.3}mm", wing.wing));
        }
    }

    if failures.is_empty() {
        OracleVerdict::pass_val(
            "span_coverage",
            format!("all spans covered, worst error {worst:.6}mm"),
            worst,
        )
    } else {
        OracleVerdict::fail_val("span_coverage", failures.join("; "), worst)
    }
}

/// Pixel panels and mm sizes describe the same set of panel ids.
pub fn check_projection_ids(
    layout: &PixelLayout,
    sizes: &BTreeMap<String, PanelSize>,
) -> OracleVerdict {
    let mut pixel: Vec<&str> = layout.panels.iter().map(|p| p.id.as_str()).collect();
    pixel.sort_unstable();
    let mm: Vec<&str> = sizes.keys().map(String::as_str).collect();

    if pixel == mm {
        OracleVerdict::pass(
            "projection_ids",
            format!("{} panel ids agree", pixel.len()),
        )
    } else {
        let only_pixel: Vec<&str> = pixel
            .iter()
            .copied()
            .filter(|id| !sizes.contains_key(*id))
            .collect();
        let only_mm: Vec<&str> = mm.iter().copied().filter(|id| !pixel.contains(id)).collect();
        OracleVerdict::fail(
            "projection_ids",
            format!("pixel only: {only_pixel:?}, mm only: {only_mm:?}"),
        )
    }
}

/// Every panel has a positive pixel and mm size.
pub fn check_positive_panels(
    layout: &PixelLayout,
    sizes: &BTreeMap<String, PanelSize>,
) -> OracleVerdict {
    let bad: Vec<&str> = layout
        .panels
        .iter()
        .filter(|p| {
            let mm_ok = sizes
                .get(&p.id)
                .is_some_and(|s| s.width_mm > 0.0 && s.height_mm > 0.0);
            !(p.width > 0.0 && p.height > 0.0 && mm_ok)
        })
        .map(|p| p.id.as_str())
        .collect();

    if bad.is_empty() {
        OracleVerdict::pass("positive_panels", "all panels have positive size".into())
    } else {
        OracleVerdict::fail("positive_panels", format!("degenerate panels: {bad:?}"))
    }
}

// ── Drawing Oracles ─────────────────────────────────────────────────────────

/// Panels come last in draw order and carry the highest z tag.
pub fn check_panels_topmost(layout: &PixelLayout) -> OracleVerdict {
    let Some(first) = layout
        .drawables
        .iter()
        .position(|d| d.role == DrawRole::Panel)
    else {
        return OracleVerdict::pass("panels_topmost", "no panels drawn".into());
    };

    let structural_after = layout.drawables[first..]
        .iter()
        .filter(|d| d.role != DrawRole::Panel)
        .count();
    let max_structural = layout.drawables[..first]
        .iter()
        .map(|d| d.z)
        .max()
        .unwrap_or(ZOrder::BACKGROUND);
    let low_panels = layout.drawables[first..]
        .iter()
        .filter(|d| d.z <= max_structural)
        .count();

    if structural_after == 0 && low_panels == 0 {
        OracleVerdict::pass(
            "panels_topmost",
            format!("panels above z {max_structural}"),
        )
    } else {
        OracleVerdict::fail(
            "panels_topmost",
            format!(
                "{structural_after} structural drawables after the first panel, \
                 {low_panels} panels at or below z {max_structural}"
            ),
        )
    }
}

/// Double layouts draw two glazing cavities that do not touch.
pub fn check_separate_cavities(topology: &WindowTopology, layout: &PixelLayout) -> OracleVerdict {
    let cavities: Vec<_> = layout
        .drawables
        .iter()
        .filter(|d| d.role == DrawRole::GlazingCavity)
        .collect();
    let expected = topology.wings.len();
    if cavities.len() != expected {
        return OracleVerdict::fail(
            "separate_cavities",
            format!("expected {expected} cavities, found {}", cavities.len()),
        );
    }
    if let [left, right] = cavities.as_slice() {
        let gap = right.x - left.right();
        if gap <= 0.0 {
            return OracleVerdict::fail_val(
                "separate_cavities",
                format!("cavities overlap or share an edge (gap {gap:.3}px)"),
                gap,
            );
        }
        return OracleVerdict::pass_val("separate_cavities", format!("gap {gap:.3}px"), gap);
    }
    OracleVerdict::pass("separate_cavities", "single cavity".into())
}

// ── BOM Oracles ─────────────────────────────────────────────────────────────

/// Member lines precede panel lines and every dimension is positive.
pub fn check_bom_order(document: &BomDocument) -> OracleVerdict {
    let is_panel = |name: &str| name.contains(" panel ");
    let first_panel = document.lines.iter().position(|l| is_panel(&l.name));
    let misplaced = first_panel.map_or(0, |i| {
        document.lines[i..]
            .iter()
            .filter(|l| !is_panel(&l.name))
            .count()
    });
    let non_positive: Vec<&str> = document
        .lines
        .iter()
        .filter(|l| l.length <= 0 || l.width <= 0 || l.thickness <= 0)
        .map(|l| l.name.as_str())
        .collect();

    if misplaced == 0 && non_positive.is_empty() {
        OracleVerdict::pass_val(
            "bom_order",
            format!("{} lines in order", document.lines.len()),
            document.lines.len() as f64,
        )
    } else {
        OracleVerdict::fail(
            "bom_order",
            format!("{misplaced} members after panels, non-positive lines: {non_positive:?}"),
        )
    }
}

/// Runs every layout oracle for one state.
pub fn run_all(
    topology: &WindowTopology,
    layout: &PixelLayout,
    sizes: &BTreeMap<String, PanelSize>,
) -> Vec<OracleVerdict> {
    vec![
        check_panel_count(topology, layout),
        check_span_coverage(topology, 1.0),
        check_projection_ids(layout, sizes),
        check_positive_panels(layout, sizes),
        check_panels_topmost(layout),
        check_separate_cavities(topology, layout),
    ]
}
