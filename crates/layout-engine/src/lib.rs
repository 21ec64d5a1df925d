pub mod config;
pub mod dimensions;
pub mod error;
pub mod partition;
pub mod pixel;
pub mod registry;
pub mod style;
pub mod topology;

pub use config::LayoutConfig;
pub use dimensions::{calculate_member_dimensions, calculate_panel_dimensions};
pub use error::LayoutError;
pub use partition::{partition, Partition};
pub use pixel::{layout, layout_with, PixelLayout};
pub use registry::{PanelRegistry, RegistryEntry};
pub use topology::{AxisPlan, SashTopology, WindowTopology, WingPlan};
