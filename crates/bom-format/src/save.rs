use serde::Serialize;
use window_types::{PanelRecord, WindowParameters};

use crate::errors::SaveError;
use crate::metadata::SettingsMetadata;

/// Format identifier written into every settings file.
pub const FORMAT_ID: &str = "window-layout";

/// Current settings format version.
pub const FORMAT_VERSION: u32 = 1;

/// The top-level settings file structure.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsFile<'a> {
    pub format: &'a str,
    pub version: u32,
    pub project: &'a SettingsMetadata,
    /// Parameter snapshot the panels were laid out from.
    pub params: &'a WindowParameters,
    pub panels: &'a [PanelRecord],
}

/// Serializes window settings to a pretty-printed JSON string.
pub fn save_settings(
    params: &WindowParameters,
    panels: &[PanelRecord],
    metadata: &SettingsMetadata,
) -> Result<String, SaveError> {
    let file = SettingsFile {
        format: FORMAT_ID,
        version: FORMAT_VERSION,
        project: metadata,
        params,
        panels,
    };
    Ok(serde_json::to_string_pretty(&file)?)
}
