/// Errors while loading saved window settings or panel data.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    #[error("malformed settings: {0}")]
    ParseError(String),

    #[error("not window settings: format {0:?}")]
    UnknownFormat(String),

    #[error("settings version {file_version} is newer than {supported_version}")]
    FutureVersion {
        file_version: u32,
        supported_version: u32,
    },

    #[error("cannot migrate settings from v{from} to v{to}: {reason}")]
    MigrationFailed { from: u32, to: u32, reason: String },

    #[error("panel {id} listed more than once")]
    DuplicatePanel { id: String },
}

/// Errors while serializing output for the host.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SaveError {
    #[error("serialization failed: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for SaveError {
    fn from(err: serde_json::Error) -> Self {
        SaveError::Serialize(err.to_string())
    }
}
