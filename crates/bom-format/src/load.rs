use std::collections::BTreeSet;

use serde::Deserialize;
use window_types::{PanelRecord, WindowParameters};

use crate::errors::LoadError;
use crate::metadata::SettingsMetadata;
use crate::save::{FORMAT_ID, FORMAT_VERSION};

/// The top-level settings structure for deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsFileRaw {
    pub format: String,
    pub version: u32,
    pub project: SettingsMetadata,
    pub params: WindowParameters,
    #[serde(default)]
    pub panels: Vec<PanelRecord>,
}

/// Settings restored from a file, at the current version.
#[derive(Debug, Clone)]
pub struct WindowSettings {
    pub metadata: SettingsMetadata,
    pub params: WindowParameters,
    pub panels: Vec<PanelRecord>,
}

/// Deserializes window settings from a JSON string.
///
/// Validates the format identifier, version and panel ids, then migrates
/// older files.
pub fn load_settings(json: &str) -> Result<WindowSettings, LoadError> {
    let raw: SettingsFileRaw =
        serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;

    if raw.format != FORMAT_ID {
        return Err(LoadError::UnknownFormat(raw.format));
    }

    if raw.version > FORMAT_VERSION {
        return Err(LoadError::FutureVersion {
            file_version: raw.version,
            supported_version: FORMAT_VERSION,
        });
    }

    let mut seen = BTreeSet::new();
    if let Some(dup) = raw.panels.iter().find(|p| !seen.insert(p.id.as_str())) {
        return Err(LoadError::DuplicatePanel { id: dup.id.clone() });
    }

    let settings = WindowSettings {
        metadata: raw.project,
        params: raw.params,
        panels: raw.panels,
    };

    if raw.version < FORMAT_VERSION {
        crate::migrate::migrate(settings, raw.version, FORMAT_VERSION)
    } else {
        Ok(settings)
    }
}
