use bom_format::{load_settings, save_settings, BomDocument, LoadError, SaveError, SettingsMetadata};
use layout_engine::{layout_with, LayoutConfig, PanelRegistry, PixelLayout};
use tracing::{debug, info, instrument};
use uuid::Uuid;
use window_types::{InfillType, MaterialDefaults, PanelRecord, WindowParameters};

use crate::host::HostError;
use crate::provider::{resolve_panel_sizes, DimensionProvider};

/// State of one window instance: the latest parameter snapshot, its panel
/// registry and the last preview. Every engine call goes through one of
/// these; nothing is shared between windows.
pub struct WindowContext {
    pub id: Uuid,
    pub params: WindowParameters,
    pub config: LayoutConfig,
    pub registry: PanelRegistry,
    /// `None` until the first recompute.
    pub layout: Option<PixelLayout>,
    pub metadata: SettingsMetadata,
}

impl WindowContext {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(id: Uuid) -> Self {
        let params = WindowParameters::default();
        Self {
            id,
            registry: PanelRegistry::new(MaterialDefaults::from_params(&params)),
            params,
            config: LayoutConfig::default(),
            layout: None,
            metadata: SettingsMetadata::new(id, "Untitled"),
        }
    }

    /// Replaces the parameters and recomputes everything from them. The
    /// previous computation is discarded; panels that keep their id keep
    /// their infill type.
    #[instrument(skip_all, fields(window = %self.id))]
    pub fn recompute(&mut self, params: WindowParameters, provider: Option<&dyn DimensionProvider>) {
        self.params = params.sanitized();
        self.relayout(provider);
    }

    pub fn set_canvas(&mut self, width: f64, height: f64, provider: Option<&dyn DimensionProvider>) {
        self.config = LayoutConfig {
            canvas_width: width,
            canvas_height: height,
            ..self.config
        };
        self.relayout(provider);
    }

    fn relayout(&mut self, provider: Option<&dyn DimensionProvider>) {
        let carried: Vec<(String, InfillType)> = self
            .registry
            .entries()
            .iter()
            .filter(|e| e.assigned)
            .map(|e| (e.panel.id.clone(), e.panel.infill_type))
            .collect();

        let layout = layout_with(&self.params, &self.config);
        self.registry
            .set_materials(MaterialDefaults::from_params(&self.params));
        self.registry.initialize(layout.panels.clone());
        for (id, infill) in carried {
            if self.registry.entry(&id).is_some() {
                self.registry.set_infill_type(&id, infill);
            }
        }
        self.layout = Some(layout);
        self.refresh(provider);
        info!(
            panels = self.registry.len(),
            window_type = ?self.params.window_type,
            "window recomputed"
        );
    }

    /// Re-derives mm sizes and the panel drawables from the registry.
    fn refresh(&mut self, provider: Option<&dyn DimensionProvider>) {
        let sizes = resolve_panel_sizes(provider, &self.params, &self.registry);
        self.registry.attach_sizes(&sizes);
        if let Some(layout) = self.layout.as_mut() {
            layout.restyle(&self.registry);
            layout.panels = self.registry.get_all();
        }
    }

    /// Changes one panel's infill. Unknown ids are a logged no-op.
    pub fn set_infill_type(
        &mut self,
        panel_id: &str,
        infill: InfillType,
        provider: Option<&dyn DimensionProvider>,
    ) -> bool {
        let changed = self.registry.set_infill_type(panel_id, infill);
        if changed {
            self.refresh(provider);
        }
        changed
    }

    pub fn panel_records(&self) -> Vec<PanelRecord> {
        self.registry.to_serializable()
    }

    pub fn save_settings(&mut self, name: String) -> Result<String, BridgeError> {
        self.metadata.name = name;
        self.metadata.touch();
        Ok(save_settings(
            &self.params,
            &self.registry.to_serializable(),
            &self.metadata,
        )?)
    }

    /// Restores parameters and panel infill from a saved settings document.
    /// Nothing changes if the document is rejected.
    pub fn load_settings(
        &mut self,
        data: &str,
        provider: Option<&dyn DimensionProvider>,
    ) -> Result<(), BridgeError> {
        let settings = load_settings(data)?;
        self.metadata = SettingsMetadata {
            window_id: self.id,
            ..settings.metadata
        };
        self.params = settings.params.sanitized();
        self.registry.initialize(Vec::new());
        self.relayout(provider);
        let applied = self.registry.apply_records(&settings.panels);
        self.refresh(provider);
        debug!(applied, "saved panel state restored");
        Ok(())
    }

    /// Bill of materials for the current state, using the panel sizes
    /// attached at the last refresh.
    pub fn bom(&self) -> Result<BomDocument, BridgeError> {
        let document = BomDocument::from_sized(&self.params, &self.registry);
        if document.is_empty() {
            return Err(BridgeError::EmptyBom);
        }
        Ok(document)
    }
}

impl Default for WindowContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from the bridge layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BridgeError {
    #[error("no layout has been computed yet")]
    NotComputed,

    #[error("the current parameters describe no buildable window")]
    EmptyBom,

    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("save error: {0}")]
    Save(#[from] SaveError),

    #[error("host error: {0}")]
    Host(#[from] HostError),
}
