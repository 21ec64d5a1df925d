use crate::errors::LoadError;
use crate::load::WindowSettings;

/// Applies format migrations from `from_version` to `to_version`, one step
/// at a time. Version 1 is the only version so far.
pub fn migrate(
    settings: WindowSettings,
    from_version: u32,
    to_version: u32,
) -> Result<WindowSettings, LoadError> {
    if from_version != to_version {
        return Err(LoadError::MigrationFailed {
            from: from_version,
            to: to_version,
            reason: format!("no migration path from v{from_version} to v{to_version}"),
        });
    }
    Ok(settings)
}
