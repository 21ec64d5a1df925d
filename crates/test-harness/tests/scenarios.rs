//! End-to-end window scenarios through the host dispatch path.
//!
//! Each scenario drives a `WindowScenario`, then checks layout, member list,
//! panel sizes and BOM output against hand-computed values.

use test_harness::assertions::*;
use test_harness::helpers::*;
use test_harness::WindowScenario;
use window_types::{DrawRole, InfillType, MemberKind, WindowType, Wing};

// ── Scenario 1: Plain single sash ───────────────────────────────────────

#[test]
fn plain_single_sash() {
    let mut s = WindowScenario::new(single(900.0, 1500.0)).with_auto_check();
    let layout = s.recompute().unwrap();
    assert_panel_count(layout, 1, "single").unwrap();
    assert_eq!(layout.panels[0].id, "window_0_0");

    // 900 - 50 deduction - 2 * 60 frieze, plus 2 * 5 glass overlap
    assert_panel_size(&s.panel_sizes(), "window_0_0", 740.0, 1340.0, 1e-9, "single").unwrap();

    let members = s.members();
    assert_eq!(members.len(), 8, "4 frame rails + 4 sash rails");
    assert_member_length(&members, "Frame top rail", 900.0, 1e-9, "single").unwrap();
    assert_member_length(&members, "Sash left stile", 1450.0, 1e-9, "single").unwrap();
    s.assert_no_errors().unwrap();
}

// ── Scenario 2: Double symmetric with divisions ─────────────────────────

#[test]
fn double_symmetric_with_divisions() {
    let mut s = WindowScenario::new(double_symmetric(1200.0, 1500.0))
        .divisions(1, 2)
        .with_auto_check();
    let layout = s.recompute().unwrap();

    assert_panel_count(layout, 8, "double").unwrap();
    assert_role_count(layout, DrawRole::MidMullion, 1, "double").unwrap();
    assert_role_count(layout, DrawRole::GlazingCavity, 2, "double").unwrap();
    assert_role_count(layout, DrawRole::CenterLine, 1, "double").unwrap();

    // wing outer (1150 + 26) / 2 = 588, glazing 468, two columns of 214
    let sizes = s.panel_sizes();
    assert_panel_size(&sizes, "window_left_0_0", 224.0, 655.0, 1e-9, "double").unwrap();
    assert_panel_size(&sizes, "window_right_1_1", 224.0, 655.0, 1e-9, "double").unwrap();

    let members = s.members();
    assert_member_length(&members, "Sash top rail (left wing)", 588.0, 1e-9, "double").unwrap();
    assert_member_length(
        &members,
        "Horizontal division 1 (right wing)",
        488.0,
        1e-9,
        "double",
    )
    .unwrap();
}

// ── Scenario 3: Manual vertical positions ───────────────────────────────

#[test]
fn manual_vertical_positions() {
    // 1170 - 50 deduction - 120 frieze = 1000mm glazing
    let mut s = WindowScenario::new(single(1170.0, 1500.0))
        .manual_vertical(&[300.0, 700.0])
        .with_auto_check();
    let layout = s.recompute().unwrap();
    assert_panel_count(layout, 3, "manual").unwrap();

    let sizes = s.panel_sizes();
    assert_panel_size(&sizes, "window_0_0", 290.0, 1340.0, 1e-9, "manual").unwrap();
    assert_panel_size(&sizes, "window_0_1", 370.0, 1340.0, 1e-9, "manual").unwrap();
    assert_panel_size(&sizes, "window_0_2", 290.0, 1340.0, 1e-9, "manual").unwrap();
}

#[test]
fn manual_positions_outside_the_span_are_ignored() {
    let mut s = WindowScenario::new(single(1170.0, 1500.0))
        .manual_vertical(&[-5.0, 500.0, 500.4, 1200.0])
        .with_auto_check();
    assert_panel_count(s.recompute().unwrap(), 2, "filtered manual").unwrap();
}

// ── Scenario 4: Asymmetric wings ────────────────────────────────────────

#[test]
fn asymmetric_wings_follow_ratio() {
    let mut s = WindowScenario::new(double_asymmetric(1500.0, 1500.0, 70.0))
        .divisions(0, 4)
        .with_auto_check();
    let layout = s.recompute().unwrap();

    let main = layout.panels.iter().filter(|p| p.wing == Wing::Main).count();
    let second = layout.panels.iter().filter(|p| p.wing == Wing::Second).count();
    // round(4 * 0.7) = 3 divisions in the main wing, 1 in the second
    assert_eq!((main, second), (4, 2));

    let topo = s.topology();
    let main_plan = topo.wing(Wing::Main).unwrap();
    let second_plan = topo.wing(Wing::Second).unwrap();
    assert!((main_plan.outer_width - (1450.0 * 0.7 + 13.0)).abs() < 1e-9);
    assert!((second_plan.outer_width - (1450.0 * 0.3 + 13.0)).abs() < 1e-9);
}

#[test]
fn narrow_wing_divisions_can_be_disabled() {
    let mut s = WindowScenario::new(double_asymmetric(1500.0, 1500.0, 70.0))
        .divisions(0, 4)
        .edit(|p| p.disable_narrow_wing_vertical_divisions = true)
        .with_auto_check();
    let layout = s.recompute().unwrap();
    let second = layout.panels.iter().filter(|p| p.wing == Wing::Second).count();
    assert_eq!(second, 1);
}

// ── Scenario 5: Mullion split ───────────────────────────────────────────

#[test]
fn mullion_split_has_frame_mullion() {
    let mut s = WindowScenario::new(mullion_split(1400.0, 1500.0))
        .divisions(2, 3)
        .with_auto_check();
    s.recompute().unwrap();

    let members = s.members();
    let mullions: Vec<_> = members
        .iter()
        .filter(|m| m.kind == MemberKind::Mullion)
        .collect();
    assert_eq!(mullions.len(), 1);
    assert!((mullions[0].length_mm - 1380.0).abs() < 1e-9);
}

// ── Scenario 6: Infill and BOM export ───────────────────────────────────

#[test]
fn wood_panel_reaches_the_host() {
    let mut s = WindowScenario::new(double_symmetric(1200.0, 1500.0))
        .divisions(1, 2)
        .count(2);
    s.recompute().unwrap();
    s.set_infill("window_left_0_0", InfillType::Wood).unwrap();
    assert_infill(s.layout().unwrap(), "window_left_0_0", InfillType::Wood, "wood").unwrap();

    let document = s.export_bom().unwrap();
    assert_eq!(document.count, 2);
    assert_eq!(document.frame_size, "1200mm x 1500mm");
    assert_bom_line(&document, "Wood panel window_left_0_0", (655, 224, 20), "wood").unwrap();
    assert_bom_line(&document, "Glass panel window_right_0_0", (655, 224, 4), "wood").unwrap();
    assert_eq!(s.delivered().len(), 1);
    assert_eq!(document.sink_tuples().len(), document.lines.len() * 2);
}

#[test]
fn export_without_host_is_blocking_notification() {
    let mut s = WindowScenario::new(single(900.0, 1500.0)).without_host();
    s.recompute().unwrap();
    let err = s.export_bom().unwrap_err();
    assert!(matches!(err, test_harness::HarnessError::Notification { .. }));
    assert!(s.delivered().is_empty());
}

// ── Scenario 7: Save and reload ─────────────────────────────────────────

#[test]
fn settings_round_trip_between_windows() {
    let mut first = WindowScenario::new(mullion_split(1400.0, 1500.0)).divisions(1, 2);
    first.recompute().unwrap();
    first.set_infill("window_right_1_0", InfillType::Wood).unwrap();
    let saved = first.save("Workshop").unwrap();

    let mut second = WindowScenario::new(single(900.0, 1500.0)).with_auto_check();
    second.recompute().unwrap();
    second.load(&saved).unwrap();

    assert_eq!(second.params().window_type, WindowType::MullionSplit);
    assert_eq!(second.panels().unwrap(), first.panels().unwrap());
    second.assert_oracles().unwrap();
}

// ── Scenario 8: Invariants across configurations ────────────────────────

#[test]
fn oracles_hold_across_configurations() {
    let shapes = [
        single(900.0, 1500.0),
        double_symmetric(1200.0, 1500.0),
        double_asymmetric(1600.0, 1400.0, 65.0),
        mullion_split(1400.0, 1600.0),
    ];
    for params in shapes {
        for h in 0..3 {
            for v in 0..4 {
                let mut s = WindowScenario::new(params.clone()).divisions(h, v);
                s.recompute().unwrap();
                let report = s.report();
                assert!(report.all_passed(), "{}", report);
            }
        }
    }
}
