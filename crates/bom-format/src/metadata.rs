use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bookkeeping stored alongside saved window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsMetadata {
    /// Window instance the settings were taken from.
    pub window_id: Uuid,
    /// Human-readable name, e.g. the element label in the host.
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl SettingsMetadata {
    /// Metadata for `window_id` stamped with the current time.
    pub fn new(window_id: Uuid, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            window_id,
            name: name.into(),
            created: now,
            modified: now,
        }
    }

    /// Bumps the modification time, keeping the creation time.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}
