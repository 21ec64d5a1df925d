use std::collections::BTreeMap;

use layout_engine::{calculate_panel_dimensions, PanelRegistry};
use tracing::warn;
use window_types::{PanelSize, WindowParameters};

/// Failures of an external millimetre-dimension source.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("dimension provider unavailable")]
    Unavailable,

    #[error("dimension provider failed: {reason}")]
    Failed { reason: String },

    #[error("dimension provider returned no size for {missing} of {expected} panels")]
    Incomplete { missing: usize, expected: usize },
}

/// Source of true panel sizes, usually the fabrication host.
pub trait DimensionProvider {
    fn panel_dimensions(
        &self,
        params: &WindowParameters,
        registry: &PanelRegistry,
    ) -> Result<BTreeMap<String, PanelSize>, ProviderError>;
}

/// The in-process calculator. Never fails; an impossible window simply has
/// no panel sizes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalCalculator;

impl DimensionProvider for LocalCalculator {
    fn panel_dimensions(
        &self,
        params: &WindowParameters,
        registry: &PanelRegistry,
    ) -> Result<BTreeMap<String, PanelSize>, ProviderError> {
        Ok(calculate_panel_dimensions(params, registry))
    }
}

/// Asks `provider` for panel sizes and falls back to the local calculator on
/// any failure, including an answer that leaves registry panels unsized.
pub fn resolve_panel_sizes(
    provider: Option<&dyn DimensionProvider>,
    params: &WindowParameters,
    registry: &PanelRegistry,
) -> BTreeMap<String, PanelSize> {
    let local = || calculate_panel_dimensions(params, registry);
    let Some(provider) = provider else {
        return local();
    };

    match provider
        .panel_dimensions(params, registry)
        .and_then(|sizes| check_complete(sizes, registry))
    {
        Ok(sizes) => sizes,
        Err(err) => {
            warn!(%err, "external panel dimensions failed, using local calculator");
            local()
        }
    }
}

fn check_complete(
    sizes: BTreeMap<String, PanelSize>,
    registry: &PanelRegistry,
) -> Result<BTreeMap<String, PanelSize>, ProviderError> {
    let missing = registry
        .entries()
        .iter()
        .filter(|e| !sizes.contains_key(&e.panel.id))
        .count();
    if missing > 0 {
        return Err(ProviderError::Incomplete {
            missing,
            expected: registry.len(),
        });
    }
    Ok(sizes)
}
