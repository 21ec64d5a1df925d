pub mod drawable;
pub mod geometry;
pub mod member;
pub mod panel;
pub mod params;

pub use drawable::*;
pub use geometry::*;
pub use member::*;
pub use panel::*;
pub use params::*;
