//! Structured text reports of a window.
//!
//! Reports are read as plain text when a scenario fails; `to_json` gives the
//! same content for tooling.

use std::fmt;

use serde::Serialize;

use crate::oracle::OracleVerdict;
use crate::workflow::WindowScenario;

/// A complete window report with all sections.
#[derive(Debug, Serialize)]
pub struct WindowReport {
    pub window_type: String,
    pub frame: (f64, f64),
    pub rows: usize,
    pub wings: Vec<WingEntry>,
    pub members: Vec<MemberEntry>,
    pub panels: Vec<PanelEntry>,
    pub oracle_results: Vec<OracleVerdict>,
    pub errors: Vec<String>,
}

/// One wing of the topology.
#[derive(Debug, Serialize)]
pub struct WingEntry {
    pub name: String,
    pub outer_width: f64,
    pub inner_width: f64,
    pub columns: usize,
}

#[derive(Debug, Serialize)]
pub struct MemberEntry {
    pub name: String,
    pub length: f64,
    pub width: f64,
    pub thickness: f64,
}

#[derive(Debug, Serialize)]
pub struct PanelEntry {
    pub id: String,
    pub infill: String,
    pub size: Option<(f64, f64)>,
}

impl WindowReport {
    pub(crate) fn build(scenario: &WindowScenario) -> Self {
        let params = &scenario.ctx.params;
        let topology = scenario.topology();
        let sizes = scenario.panel_sizes();

        let wings = topology
            .wings
            .iter()
            .map(|w| WingEntry {
                name: if w.wing.is_none() {
                    "sash".to_string()
                } else {
                    w.wing.label().to_string()
                },
                outer_width: w.outer_width,
                inner_width: w.inner_width,
                columns: w.columns.cell_count(),
            })
            .collect();

        let members = scenario
            .members()
            .into_iter()
            .map(|m| MemberEntry {
                name: m.name,
                length: m.length_mm,
                width: m.width_mm,
                thickness: m.thickness_mm,
            })
            .collect();

        let panels = scenario
            .ctx
            .registry
            .entries()
            .iter()
            .map(|e| PanelEntry {
                id: e.panel.id.clone(),
                infill: e.panel.infill_type.label().to_string(),
                size: sizes.get(&e.panel.id).map(|s| (s.width_mm, s.height_mm)),
            })
            .collect();

        Self {
            window_type: params.window_type.label().to_string(),
            frame: (params.frame_width, params.frame_height),
            rows: topology.rows.cell_count(),
            wings,
            members,
            panels,
            oracle_results: scenario.check_all(),
            errors: scenario.errors().to_vec(),
        }
    }

    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Window Layout Report ===\n\n");
        out.push_str(&format!(
            "Window: {} {:.0} x {:.0}mm, {} rows\n",
            self.window_type, self.frame.0, self.frame.1, self.rows,
        ));
        for wing in &self.wings {
            out.push_str(&format!(
                "  {}: outer {:.1}mm, glazing {:.1}mm, {} columns\n",
                wing.name, wing.outer_width, wing.inner_width, wing.columns,
            ));
        }

        out.push_str(&format!("\nMembers ({}):\n", self.members.len()));
        for m in &self.members {
            out.push_str(&format!(
                "  {}: {:.1} x {:.1} x {:.1}\n",
                m.name, m.length, m.width, m.thickness,
            ));
        }

        out.push_str(&format!("\nPanels ({}):\n", self.panels.len()));
        for p in &self.panels {
            match p.size {
                Some((w, h)) => out.push_str(&format!(
                    "  {} [{}] {:.1} x {:.1}mm\n",
                    p.id, p.infill, w, h
                )),
                None => out.push_str(&format!("  {} [{}] no size\n", p.id, p.infill)),
            }
        }

        if !self.oracle_results.is_empty() {
            out.push_str(&format!(
                "\nOracle Results ({} checks):\n",
                self.oracle_results.len()
            ));
            for v in &self.oracle_results {
                let status = if v.passed { "PASS" } else { "FAIL" };
                out.push_str(&format!("  [{}] {}: {}\n", status, v.oracle_name, v.detail));
            }
        }

        if self.errors.is_empty() {
            out.push_str("\nErrors: none\n");
        } else {
            out.push_str(&format!("\nErrors ({}):\n", self.errors.len()));
            for msg in &self.errors {
                out.push_str(&format!("  {msg}\n"));
            }
        }

        out
    }

    /// Machine-readable form, for diffing reports between runs.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn all_passed(&self) -> bool {
        self.oracle_results.iter().all(|v| v.passed)
    }
}

impl fmt::Display for WindowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}
