//! Persisted panel data exchanged with the fabrication host.

use serde::{Deserialize, Serialize};
use window_types::PanelRecord;

use crate::errors::{LoadError, SaveError};

/// Panel list as carried inside the host's parameter payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelData {
    pub window_panels: Vec<PanelRecord>,
}

pub fn panels_to_json(records: &[PanelRecord]) -> Result<String, SaveError> {
    Ok(serde_json::to_string(records)?)
}

/// Accepts either a bare array of records or a `{"window_panels": [...]}`
/// wrapper.
pub fn panels_from_json(json: &str) -> Result<Vec<PanelRecord>, LoadError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Payload {
        Bare(Vec<PanelRecord>),
        Wrapped(PanelData),
    }

    match serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))? {
        Payload::Bare(records) => Ok(records),
        Payload::Wrapped(data) => Ok(data.window_panels),
    }
}
