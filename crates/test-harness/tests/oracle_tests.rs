//! Tests for verification oracles.

use layout_engine::dimensions::calculate_panel_dimensions;
use layout_engine::{layout, PanelRegistry, PixelLayout, WindowTopology};
use test_harness::helpers::*;
use test_harness::oracle::*;
use window_types::{DrawRole, Drawable, WindowParameters, ZOrder};

fn build(params: &WindowParameters) -> (WindowTopology, PixelLayout) {
    let topology = WindowTopology::plan(&params.sanitized());
    (topology, layout(params, 600.0, 600.0, 60.0))
}

fn double_with_divisions() -> WindowParameters {
    WindowParameters {
        horizontal_divisions: 2,
        vertical_divisions: 3,
        ..double_symmetric(1400.0, 1600.0)
    }
}

// ── Grid Oracle Tests ───────────────────────────────────────────────────

#[test]
fn panel_count_passes_for_fresh_layout() {
    let (topology, layout) = build(&double_with_divisions());
    let result = check_panel_count(&topology, &layout);
    assert!(result.passed, "{}", result.detail);
    assert_eq!(result.value, Some(15.0));
}

#[test]
fn panel_count_detects_missing_panel() {
    let (topology, mut layout) = build(&double_with_divisions());
    layout.panels.pop();
    let result = check_panel_count(&topology, &layout);
    assert!(!result.passed);
    assert!(result.detail.contains("planned 15"), "{}", result.detail);
}

#[test]
fn span_coverage_passes() {
    let (topology, _) = build(&double_with_divisions());
    let result = check_span_coverage(&topology, 1.0);
    assert!(result.passed, "{}", result.detail);
    assert!(result.value.unwrap() < 1e-9);
}

#[test]
fn projection_ids_detect_mismatch() {
    let params = double_with_divisions();
    let (_, layout) = build(&params);
    let mut sizes = calculate_panel_dimensions(&params, &PanelRegistry::default());
    assert!(check_projection_ids(&layout, &sizes).passed);

    sizes.remove("window_left_0_0");
    let result = check_projection_ids(&layout, &sizes);
    assert!(!result.passed);
    assert!(result.detail.contains("window_left_0_0"), "{}", result.detail);
}

#[test]
fn positive_panels_pass() {
    let params = double_with_divisions();
    let (_, layout) = build(&params);
    let sizes = calculate_panel_dimensions(&params, &PanelRegistry::default());
    let result = check_positive_panels(&layout, &sizes);
    assert!(result.passed, "{}", result.detail);
}

// ── Drawing Oracle Tests ────────────────────────────────────────────────

#[test]
fn panels_topmost_detects_late_structure() {
    let (_, mut layout) = build(&double_with_divisions());
    assert!(check_panels_topmost(&layout).passed);

    layout.drawables.push(Drawable::rect(
        DrawRole::Frame,
        0.0,
        0.0,
        10.0,
        10.0,
        ZOrder::FRAME,
    ));
    assert!(!check_panels_topmost(&layout).passed);
}

#[test]
fn cavities_are_separate_for_two_wings() {
    let (topology, layout) = build(&double_with_divisions());
    let result = check_separate_cavities(&topology, &layout);
    assert!(result.passed, "{}", result.detail);
    assert!(result.value.unwrap() > 0.0);

    let (topology, layout) = build(&single(900.0, 1500.0));
    assert!(check_separate_cavities(&topology, &layout).passed);
}

// ── BOM Oracle Tests ────────────────────────────────────────────────────

#[test]
fn bom_order_passes_for_built_document() {
    let params = double_with_divisions();
    let mut registry = PanelRegistry::default();
    registry.initialize(layout(&params, 600.0, 600.0, 60.0).panels);
    let document = bom_format::BomDocument::build(&params, &registry);
    let result = check_bom_order(&document);
    assert!(result.passed, "{}", result.detail);
}

#[test]
fn bom_order_detects_member_after_panel() {
    let params = single(900.0, 1500.0);
    let mut registry = PanelRegistry::default();
    registry.initialize(layout(&params, 600.0, 600.0, 60.0).panels);
    let mut document = bom_format::BomDocument::build(&params, &registry);
    let first = document.lines.remove(0);
    document.lines.push(first);
    assert!(!check_bom_order(&document).passed);
}

#[test]
fn run_all_reports_every_oracle() {
    let params = double_with_divisions();
    let (topology, layout) = build(&params);
    let sizes = calculate_panel_dimensions(&params, &PanelRegistry::default());
    let verdicts = run_all(&topology, &layout, &sizes);
    assert_eq!(verdicts.len(), 6);
    assert!(verdicts.iter().all(|v| v.passed));
}
