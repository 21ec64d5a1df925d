pub mod bom;
pub mod errors;
pub mod load;
pub mod metadata;
pub mod migrate;
pub mod panels;
pub mod save;

pub use bom::{assemble, round_mm, BomDocument, BomLine};
pub use errors::{LoadError, SaveError};
pub use load::{load_settings, WindowSettings};
pub use metadata::SettingsMetadata;
pub use panels::{panels_from_json, panels_to_json};
pub use save::{save_settings, FORMAT_ID, FORMAT_VERSION};
