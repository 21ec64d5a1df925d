//! WindowScenario: fluent API for scripting window sessions in tests.
//!
//! Wraps `window_bridge::dispatch()` to test the real host path, not a
//! simulation. Parameters are edited on the builder and sent with
//! [`WindowScenario::recompute`].

use std::collections::BTreeMap;

use bom_format::BomDocument;
use layout_engine::dimensions::{calculate_member_dimensions, calculate_panel_dimensions};
use layout_engine::{PixelLayout, WindowTopology};
use tracing::debug;
use window_bridge::{
    dispatch, ComponentHost, EngineToHost, HostError, HostServices, HostToEngine, WindowContext,
};
use window_types::{InfillType, PanelRecord, PanelSize, StructuralMember, WindowParameters};

use crate::helpers::{response_kind, HarnessError};
use crate::oracle::{self, OracleVerdict};
use crate::report::WindowReport;
use crate::svg;

/// Component host that keeps every document it is given.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub documents: Vec<BomDocument>,
}

impl ComponentHost for RecordingHost {
    fn generate_parts(&mut self, document: &BomDocument) -> Result<(), HostError> {
        self.documents.push(document.clone());
        Ok(())
    }
}

/// A fluent builder for driving and verifying one window instance.
pub struct WindowScenario {
    pub ctx: WindowContext,
    params: WindowParameters,
    host: RecordingHost,
    host_connected: bool,
    history: Vec<(String, String)>,
    errors: Vec<String>,
    auto_check: bool,
}

impl WindowScenario {
    /// Start from `params`; nothing is computed until [`Self::recompute`].
    pub fn new(params: WindowParameters) -> Self {
        Self {
            ctx: WindowContext::new(),
            params,
            host: RecordingHost::default(),
            host_connected: true,
            history: Vec::new(),
            errors: Vec::new(),
            auto_check: false,
        }
    }

    /// Enable auto-checking: after every recompute, run all layout oracles
    /// and fail on the first broken one.
    pub fn with_auto_check(mut self) -> Self {
        self.auto_check = true;
        self
    }

    /// Export without a component host attached.
    pub fn without_host(mut self) -> Self {
        self.host_connected = false;
        self
    }

    // ── Parameter Edits ─────────────────────────────────────────────────

    pub fn divisions(mut self, horizontal: u32, vertical: u32) -> Self {
        self.params.horizontal_divisions = horizontal;
        self.params.vertical_divisions = vertical;
        self
    }

    pub fn manual_vertical(mut self, positions: &[f64]) -> Self {
        self.params.manual_vertical_positions = Some(positions.to_vec());
        self
    }

    pub fn manual_horizontal(mut self, positions: &[f64]) -> Self {
        self.params.manual_horizontal_positions = Some(positions.to_vec());
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.params.count = count;
        self
    }

    /// Arbitrary edit for fields without a shortcut.
    pub fn edit(mut self, f: impl FnOnce(&mut WindowParameters)) -> Self {
        f(&mut self.params);
        self
    }

    pub fn params(&self) -> &WindowParameters {
        &self.params
    }

    // ── Host Messages ───────────────────────────────────────────────────

    fn send(&mut self, msg: HostToEngine) -> EngineToHost {
        let label = format!("{msg:?}");
        let mut services = HostServices {
            provider: None,
            host: if self.host_connected {
                Some(&mut self.host as &mut dyn ComponentHost)
            } else {
                None
            },
        };
        let response = dispatch(&mut self.ctx, msg, &mut services);
        let kind = response_kind(&response);
        debug!(message = %label, response = kind, "scenario step");
        if let EngineToHost::Error { message } = &response {
            self.errors.push(message.clone());
        }
        self.history.push((label, kind.to_string()));
        response
    }

    fn unexpected(expected: &str, response: &EngineToHost) -> HarnessError {
        match response {
            EngineToHost::Error { message } => HarnessError::DispatchError {
                message: message.clone(),
            },
            EngineToHost::Notification { message, .. } => HarnessError::Notification {
                message: message.clone(),
            },
            other => HarnessError::UnexpectedResponse {
                expected: expected.to_string(),
                got: response_kind(other).to_string(),
            },
        }
    }

    /// Send the current parameters and return the new layout.
    pub fn recompute(&mut self) -> Result<&PixelLayout, HarnessError> {
        let response = self.send(HostToEngine::Recompute {
            params: self.params.clone(),
        });
        if !matches!(response, EngineToHost::LayoutUpdated { .. }) {
            return Err(Self::unexpected("LayoutUpdated", &response));
        }
        if self.auto_check {
            self.assert_oracles()?;
        }
        self.layout()
    }

    pub fn set_canvas(&mut self, width: f64, height: f64) -> Result<&PixelLayout, HarnessError> {
        let response = self.send(HostToEngine::SetCanvas { width, height });
        if !matches!(response, EngineToHost::LayoutUpdated { .. }) {
            return Err(Self::unexpected("LayoutUpdated", &response));
        }
        self.layout()
    }

    /// Change one panel's infill. Unknown ids are an error here, although the
    /// engine itself ignores them.
    pub fn set_infill(&mut self, panel_id: &str, infill: InfillType) -> Result<(), HarnessError> {
        if self.ctx.registry.entry(panel_id).is_none() {
            return Err(HarnessError::UnknownPanel {
                id: panel_id.to_string(),
            });
        }
        let response = self.send(HostToEngine::SetInfillType {
            panel_id: panel_id.to_string(),
            infill,
        });
        match response {
            EngineToHost::PanelsUpdated { .. } => Ok(()),
            other => Err(Self::unexpected("PanelsUpdated", &other)),
        }
    }

    pub fn panels(&mut self) -> Result<Vec<PanelRecord>, HarnessError> {
        match self.send(HostToEngine::GetPanels) {
            EngineToHost::PanelsUpdated { panels } => Ok(panels),
            other => Err(Self::unexpected("PanelsUpdated", &other)),
        }
    }

    pub fn save(&mut self, name: &str) -> Result<String, HarnessError> {
        match self.send(HostToEngine::SaveSettings {
            name: name.to_string(),
        }) {
            EngineToHost::SettingsReady { json_data } => Ok(json_data),
            other => Err(Self::unexpected("SettingsReady", &other)),
        }
    }

    /// Load saved settings; the scenario's parameters follow the document.
    pub fn load(&mut self, data: &str) -> Result<&PixelLayout, HarnessError> {
        let response = self.send(HostToEngine::LoadSettings {
            data: data.to_string(),
        });
        if !matches!(response, EngineToHost::LayoutUpdated { .. }) {
            return Err(Self::unexpected("LayoutUpdated", &response));
        }
        self.params = self.ctx.params.clone();
        self.layout()
    }

    pub fn export_bom(&mut self) -> Result<BomDocument, HarnessError> {
        match self.send(HostToEngine::ExportBom) {
            EngineToHost::BomReady { document } => Ok(document),
            other => Err(Self::unexpected("BomReady", &other)),
        }
    }

    // ── Inspection ──────────────────────────────────────────────────────

    pub fn layout(&self) -> Result<&PixelLayout, HarnessError> {
        self.ctx.layout.as_ref().ok_or(HarnessError::NoLayout)
    }

    /// Topology of the parameters last sent to the engine.
    pub fn topology(&self) -> WindowTopology {
        WindowTopology::plan(&self.ctx.params)
    }

    pub fn members(&self) -> Vec<StructuralMember> {
        calculate_member_dimensions(&self.ctx.params)
    }

    pub fn panel_sizes(&self) -> BTreeMap<String, PanelSize> {
        calculate_panel_dimensions(&self.ctx.params, &self.ctx.registry)
    }

    /// Documents received by the component host so far.
    pub fn delivered(&self) -> &[BomDocument] {
        &self.host.documents
    }

    /// Error messages returned by the engine so far.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// `(message, response kind)` for every step.
    pub fn history(&self) -> &[(String, String)] {
        &self.history
    }

    // ── Verification ────────────────────────────────────────────────────

    pub fn assert_no_errors(&self) -> Result<(), HarnessError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(HarnessError::AssertionFailed {
                detail: format!("engine errors: {:?}", self.errors),
            })
        }
    }

    /// Run every layout oracle against the current state.
    pub fn check_all(&self) -> Vec<OracleVerdict> {
        match self.layout() {
            Ok(layout) => oracle::run_all(&self.topology(), layout, &self.panel_sizes()),
            Err(_) => Vec::new(),
        }
    }

    /// Fail on the first broken oracle.
    pub fn assert_oracles(&self) -> Result<(), HarnessError> {
        match self.check_all().into_iter().find(|v| !v.passed) {
            Some(v) => Err(HarnessError::OracleFailure {
                oracle: v.oracle_name,
                detail: v.detail,
            }),
            None => Ok(()),
        }
    }

    pub fn report(&self) -> WindowReport {
        WindowReport::build(self)
    }

    pub fn svg(&self) -> Result<String, HarnessError> {
        Ok(svg::to_svg(self.layout()?))
    }
}
