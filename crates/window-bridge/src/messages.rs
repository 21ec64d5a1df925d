use bom_format::BomDocument;
use serde::{Deserialize, Serialize};
use window_types::{Drawable, InfillType, Panel, PanelRecord, WindowParameters};

/// Messages from the host (the parameter form and preview) to the engine.
/// Serialized as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostToEngine {
    /// Latest parameter snapshot; replaces the previous one.
    Recompute {
        #[serde(default)]
        params: WindowParameters,
    },
    /// Preview canvas resized.
    SetCanvas { width: f64, height: f64 },
    /// User picked an infill for one panel.
    SetInfillType {
        panel_id: String,
        infill: InfillType,
    },
    GetPanels,

    // -- Persistence --
    SaveSettings { name: String },
    LoadSettings { data: String },

    // -- Fabrication --
    ExportBom,
}

/// Messages from the engine back to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineToHost {
    /// A fresh preview frame.
    LayoutUpdated {
        scale: f64,
        offset_x: f64,
        offset_y: f64,
        drawables: Vec<Drawable>,
        panels: Vec<Panel>,
    },

    /// Panel infill state, in persisted form.
    PanelsUpdated { panels: Vec<PanelRecord> },

    /// Saved settings are ready to store.
    SettingsReady { json_data: String },

    /// The BOM was handed to the component host.
    BomReady { document: BomDocument },

    /// Something the user must see. Blocking notifications need a dismissal.
    Notification { message: String, blocking: bool },

    /// An error occurred in the engine.
    Error { message: String },
}
