use std::collections::BTreeMap;

use bom_format::BomDocument;
use layout_engine::PanelRegistry;
use window_bridge::messages::*;
use window_bridge::*;
use window_types::*;

// ── Helper Functions ─────────────────────────────────────────────────────

fn double_params() -> WindowParameters {
    WindowParameters {
        window_type: WindowType::DoubleSymmetric,
        frame_width: 1200.0,
        horizontal_divisions: 1,
        vertical_divisions: 2,
        ..WindowParameters::default()
    }
}

fn send(ctx: &mut WindowContext, msg: HostToEngine) -> EngineToHost {
    dispatch(ctx, msg, &mut HostServices::default())
}

fn recomputed(params: WindowParameters) -> WindowContext {
    let mut ctx = WindowContext::new();
    send(&mut ctx, HostToEngine::Recompute { params });
    ctx
}

#[derive(Default)]
struct RecordingHost {
    received: Vec<BomDocument>,
}

impl ComponentHost for RecordingHost {
    fn generate_parts(&mut self, document: &BomDocument) -> Result<(), HostError> {
        self.received.push(document.clone());
        Ok(())
    }
}

struct RejectingHost;

impl ComponentHost for RejectingHost {
    fn generate_parts(&mut self, _: &BomDocument) -> Result<(), HostError> {
        Err(HostError::Rejected {
            reason: "part library locked".to_string(),
        })
    }
}

/// Answers every panel with a fixed size.
struct FixedProvider;

impl DimensionProvider for FixedProvider {
    fn panel_dimensions(
        &self,
        _: &WindowParameters,
        registry: &PanelRegistry,
    ) -> Result<BTreeMap<String, PanelSize>, ProviderError> {
        Ok(registry
            .entries()
            .iter()
            .map(|e| {
                let size = PanelSize {
                    width_mm: 500.0,
                    height_mm: 600.0,
                };
                (e.panel.id.clone(), size)
            })
            .collect())
    }
}

struct DownProvider;

impl DimensionProvider for DownProvider {
    fn panel_dimensions(
        &self,
        _: &WindowParameters,
        _: &PanelRegistry,
    ) -> Result<BTreeMap<String, PanelSize>, ProviderError> {
        Err(ProviderError::Failed {
            reason: "timeout".to_string(),
        })
    }
}

// ── Serde Round-Trip Tests ───────────────────────────────────────────────

#[test]
fn recompute_parses_flat_parameter_object() {
    let json = r#"{"type":"Recompute","params":{"window_type":"double","width":1200,"horizontal_divisions":1}}"#;
    let msg: HostToEngine = serde_json::from_str(json).unwrap();
    match msg {
        HostToEngine::Recompute { params } => {
            assert_eq!(params.window_type, WindowType::DoubleSymmetric);
            assert_eq!(params.frame_width, 1200.0);
            assert_eq!(params.frame_height, 1500.0);
            assert_eq!(params.horizontal_divisions, 1);
        }
        other => panic!("unexpected message {other:?}"),
    }
}

#[test]
fn set_infill_uses_type_tag() {
    let msg = HostToEngine::SetInfillType {
        panel_id: "window_0_0".to_string(),
        infill: InfillType::Wood,
    };
    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"type\":\"SetInfillType\""));
    let back: HostToEngine = serde_json::from_str(&json).unwrap();
    assert!(matches!(
        back,
        HostToEngine::SetInfillType { infill: InfillType::Wood, .. }
    ));
}

#[test]
fn engine_error_round_trips() {
    let msg = EngineToHost::Error {
        message: "something went wrong".to_string(),
    };
    let json = serde_json::to_string(&msg).unwrap();
    let back: EngineToHost = serde_json::from_str(&json).unwrap();
    assert!(matches!(back, EngineToHost::Error { message } if message == "something went wrong"));
}

// ── Dispatch ─────────────────────────────────────────────────────────────

#[test]
fn recompute_returns_layout() {
    let mut ctx = WindowContext::new();
    let response = send(&mut ctx, HostToEngine::Recompute { params: double_params() });
    match response {
        EngineToHost::LayoutUpdated {
            scale,
            drawables,
            panels,
            ..
        } => {
            assert!(scale > 0.0);
            assert_eq!(panels.len(), 8);
            assert_eq!(drawables.last().unwrap().role, DrawRole::Panel);
        }
        other => panic!("expected LayoutUpdated, got {other:?}"),
    }
}

#[test]
fn canvas_change_rescales() {
    let mut ctx = recomputed(WindowParameters::default());
    let small = ctx.layout.as_ref().unwrap().scale;
    let response = send(
        &mut ctx,
        HostToEngine::SetCanvas {
            width: 1200.0,
            height: 1200.0,
        },
    );
    let EngineToHost::LayoutUpdated { scale, .. } = response else {
        panic!("expected LayoutUpdated");
    };
    assert!(scale > small);
}

#[test]
fn infill_change_reports_panels() {
    let mut ctx = recomputed(double_params());
    let response = send(
        &mut ctx,
        HostToEngine::SetInfillType {
            panel_id: "window_right_1_1".to_string(),
            infill: InfillType::Wood,
        },
    );
    let EngineToHost::PanelsUpdated { panels } = response else {
        panic!("expected PanelsUpdated");
    };
    let wood: Vec<&PanelRecord> = panels
        .iter()
        .filter(|p| p.infill_type == InfillType::Wood)
        .collect();
    assert_eq!(wood.len(), 1);
    assert_eq!(wood[0].id, "window_right_1_1");
    assert_eq!(wood[0].wing, Some(Wing::Right));
    assert_eq!(wood[0].thickness, 20.0);
}

#[test]
fn unknown_panel_is_not_an_error() {
    let mut ctx = recomputed(WindowParameters::default());
    let response = send(
        &mut ctx,
        HostToEngine::SetInfillType {
            panel_id: "window_left_0_0".to_string(),
            infill: InfillType::Wood,
        },
    );
    let EngineToHost::PanelsUpdated { panels } = response else {
        panic!("expected PanelsUpdated");
    };
    assert!(panels.iter().all(|p| p.infill_type == InfillType::Glass));
}

#[test]
fn get_panels_before_recompute_is_empty() {
    let mut ctx = WindowContext::new();
    assert!(matches!(
        send(&mut ctx, HostToEngine::GetPanels),
        EngineToHost::PanelsUpdated { panels } if panels.is_empty()
    ));
}

// ── Settings ─────────────────────────────────────────────────────────────

#[test]
fn save_then_load_restores_window() {
    let mut ctx = recomputed(double_params());
    send(
        &mut ctx,
        HostToEngine::SetInfillType {
            panel_id: "window_left_0_1".to_string(),
            infill: InfillType::Wood,
        },
    );
    let EngineToHost::SettingsReady { json_data } = send(
        &mut ctx,
        HostToEngine::SaveSettings {
            name: "Hall".to_string(),
        },
    ) else {
        panic!("expected SettingsReady");
    };

    let mut other = WindowContext::new();
    let response = send(&mut other, HostToEngine::LoadSettings { data: json_data });
    assert!(matches!(response, EngineToHost::LayoutUpdated { .. }));
    assert_eq!(other.metadata.name, "Hall");
    assert_eq!(other.params, ctx.params);
    assert_eq!(
        other.registry.get("window_left_0_1").unwrap().infill_type,
        InfillType::Wood
    );
    assert_eq!(other.panel_records(), ctx.panel_records());
}

#[test]
fn bad_settings_become_error_message() {
    let mut ctx = WindowContext::new();
    let response = send(
        &mut ctx,
        HostToEngine::LoadSettings {
            data: r#"{"format":"door-layout","version":1}"#.to_string(),
        },
    );
    assert!(matches!(response, EngineToHost::Error { .. }));
}

// ── BOM export ───────────────────────────────────────────────────────────

#[test]
fn export_without_host_blocks() {
    let mut ctx = recomputed(WindowParameters::default());
    assert!(matches!(
        send(&mut ctx, HostToEngine::ExportBom),
        EngineToHost::Notification { blocking: true, .. }
    ));
}

#[test]
fn export_hands_document_to_host() {
    let mut ctx = recomputed(WindowParameters {
        count: 3,
        ..double_params()
    });
    let mut host = RecordingHost::default();
    let response = {
        let mut services = HostServices {
            provider: None,
            host: Some(&mut host),
        };
        dispatch(&mut ctx, HostToEngine::ExportBom, &mut services)
    };
    let EngineToHost::BomReady { document } = response else {
        panic!("expected BomReady");
    };
    assert_eq!(document.count, 3);
    assert_eq!(document.window_type, "double_symmetric");
    assert_eq!(host.received, vec![document]);
}

#[test]
fn host_rejection_becomes_error() {
    let mut ctx = recomputed(WindowParameters::default());
    let mut host = RejectingHost;
    let mut services = HostServices {
        provider: None,
        host: Some(&mut host),
    };
    let response = dispatch(&mut ctx, HostToEngine::ExportBom, &mut services);
    assert!(matches!(
        response,
        EngineToHost::Error { message } if message.contains("part library locked")
    ));
}

#[test]
fn empty_bom_is_reported() {
    let mut ctx = recomputed(WindowParameters::single(100.0, 1500.0));
    let mut host = RecordingHost::default();
    let mut services = HostServices {
        provider: None,
        host: Some(&mut host),
    };
    let response = dispatch(&mut ctx, HostToEngine::ExportBom, &mut services);
    assert!(matches!(response, EngineToHost::Error { .. }));
}

// ── Dimension provider ───────────────────────────────────────────────────

#[test]
fn provider_sizes_reach_the_bom() {
    let mut ctx = WindowContext::new();
    let mut host = RecordingHost::default();
    let mut services = HostServices {
        provider: Some(&FixedProvider),
        host: Some(&mut host),
    };
    dispatch(
        &mut ctx,
        HostToEngine::Recompute {
            params: WindowParameters::default(),
        },
        &mut services,
    );
    let EngineToHost::BomReady { document } =
        dispatch(&mut ctx, HostToEngine::ExportBom, &mut services)
    else {
        panic!("expected BomReady");
    };
    let panel = document.lines.last().unwrap();
    assert_eq!(panel.as_tuple(), ("Glass panel window_0_0", 600, 500, 4));
}

#[test]
fn failing_provider_is_invisible_to_host() {
    let mut ctx = WindowContext::new();
    let mut services = HostServices {
        provider: Some(&DownProvider),
        host: None,
    };
    let response = dispatch(
        &mut ctx,
        HostToEngine::Recompute {
            params: WindowParameters::default(),
        },
        &mut services,
    );
    assert!(matches!(response, EngineToHost::LayoutUpdated { .. }));
    let size = ctx.registry.entry("window_0_0").unwrap().size_mm.unwrap();
    assert_eq!(size.width_mm, 740.0);
    assert_eq!(size.height_mm, 1340.0);
}
