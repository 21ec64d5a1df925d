//! Preview colours.

use window_types::InfillType;

pub const BACKGROUND_FILL: &str = "#3f3f3f";
pub const BACKGROUND_STROKE: &str = "#888888";
pub const WOOD_FILL: &str = "#a88e6c";
pub const WOOD_STROKE: &str = "#805533";
pub const CAVITY_FILL: &str = "#202530";
pub const CAVITY_STROKE: &str = "#777777";
pub const TENONED_FILL: &str = "#b0b0b0";
pub const TENONED_STROKE: &str = "#ffffff";
pub const VERTICAL_DIVISION_FILL: &str = "#ff8800";
pub const CENTER_LINE_STROKE: &str = "#ffffff";

pub const GLASS_PANEL_FILL: &str = "#a5d1e1";
pub const GLASS_PANEL_STROKE: &str = "#85a5b1";
pub const WOOD_PANEL_FILL: &str = "#a86d3b";
pub const WOOD_PANEL_STROKE: &str = "#805533";
pub const GLASS_PANEL_OPACITY: f64 = 0.7;

pub fn panel_colors(infill: InfillType) -> (&'static str, &'static str, f64) {
    match infill {
        InfillType::Glass => (GLASS_PANEL_FILL, GLASS_PANEL_STROKE, GLASS_PANEL_OPACITY),
        InfillType::Wood => (WOOD_PANEL_FILL, WOOD_PANEL_STROKE, 1.0),
    }
}
