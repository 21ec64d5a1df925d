use serde::{Deserialize, Serialize};
use tracing::warn;

/// Fallback frame width when the supplied value is unusable.
pub const DEFAULT_FRAME_WIDTH: f64 = 900.0;
/// Fallback frame height when the supplied value is unusable.
pub const DEFAULT_FRAME_HEIGHT: f64 = 1500.0;
/// Fallback main wing share for asymmetric double sashes, in percent.
pub const DEFAULT_MAIN_WING_RATIO: f64 = 60.0;

/// Sash arrangement selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowType {
    #[default]
    Single,
    #[serde(alias = "double")]
    DoubleSymmetric,
    DoubleAsymmetric,
    /// Two wings separated by a fixed frame mullion instead of a meeting rail.
    MullionSplit,
}

impl WindowType {
    pub fn label(self) -> &'static str {
        match self {
            WindowType::Single => "single",
            WindowType::DoubleSymmetric => "double_symmetric",
            WindowType::DoubleAsymmetric => "double_asymmetric",
            WindowType::MullionSplit => "mullion_split",
        }
    }
}

/// Flat parameter snapshot describing one window, all lengths in mm.
///
/// Every field is optional on the wire; missing keys take the values of
/// [`WindowParameters::default`]. Use [`WindowParameters::sanitized`] before
/// computing anything so invalid values are replaced by their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowParameters {
    pub window_type: WindowType,
    #[serde(alias = "width")]
    pub frame_width: f64,
    #[serde(alias = "height")]
    pub frame_height: f64,
    pub frame_wood_width: f64,
    #[serde(alias = "frame_wood_depth")]
    pub frame_wood_thickness: f64,
    pub frieze_width: f64,
    #[serde(alias = "frieze_depth")]
    pub frieze_thickness: f64,
    pub tenon_length: f64,
    pub upper_tenoned_width: f64,
    #[serde(alias = "upper_tenoned_depth")]
    pub upper_tenoned_thickness: f64,
    pub lower_tenoned_width: f64,
    #[serde(alias = "lower_tenoned_depth")]
    pub lower_tenoned_thickness: f64,
    pub division_wood_width: f64,
    #[serde(alias = "division_wood_depth")]
    pub division_wood_thickness: f64,
    pub vertical_division_width: f64,
    #[serde(alias = "vertical_division_depth")]
    pub vertical_division_thickness: f64,
    /// Width of the meeting mullion between the wings of a double sash.
    pub middle_division_width: f64,
    pub horizontal_divisions: u32,
    /// Total vertical divisions for the whole window, distributed over wings.
    pub vertical_divisions: u32,
    pub is_asymmetric: bool,
    pub main_wing_ratio: f64,
    pub sash_width_deduction: f64,
    pub sash_height_deduction: f64,
    pub sash_double_deduction: f64,
    /// Offsets from the top edge of the glazing area.
    pub manual_horizontal_positions: Option<Vec<f64>>,
    /// Offsets from the left edge of each wing's glazing area.
    pub manual_vertical_positions: Option<Vec<f64>>,
    pub glass_thickness: f64,
    pub glass_overlap: f64,
    pub wood_thickness: f64,
    pub wood_overlap: f64,
    /// Number of identical windows to fabricate.
    pub count: u32,
    pub disable_narrow_wing_vertical_divisions: bool,
}

impl Default for WindowParameters {
    fn default() -> Self {
        Self {
            window_type: WindowType::Single,
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            frame_wood_width: 60.0,
            frame_wood_thickness: 70.0,
            frieze_width: 60.0,
            frieze_thickness: 40.0,
            tenon_length: 10.0,
            upper_tenoned_width: 60.0,
            upper_tenoned_thickness: 40.0,
            lower_tenoned_width: 60.0,
            lower_tenoned_thickness: 40.0,
            division_wood_width: 40.0,
            division_wood_thickness: 70.0,
            vertical_division_width: 40.0,
            vertical_division_thickness: 70.0,
            middle_division_width: 60.0,
            horizontal_divisions: 0,
            vertical_divisions: 0,
            is_asymmetric: false,
            main_wing_ratio: DEFAULT_MAIN_WING_RATIO,
            sash_width_deduction: 50.0,
            sash_height_deduction: 50.0,
            sash_double_deduction: 0.0,
            manual_horizontal_positions: None,
            manual_vertical_positions: None,
            glass_thickness: 4.0,
            glass_overlap: 5.0,
            wood_thickness: 20.0,
            wood_overlap: 5.0,
            count: 1,
            disable_narrow_wing_vertical_divisions: false,
        }
    }
}

impl WindowParameters {
    /// Single-sash parameters for the given frame size, everything else default.
    pub fn single(frame_width: f64, frame_height: f64) -> Self {
        Self {
            frame_width,
            frame_height,
            ..Self::default()
        }
    }

    /// Main wing share as a fraction in (0, 1).
    pub fn main_wing_fraction(&self) -> f64 {
        self.main_wing_ratio / 100.0
    }

    /// Returns a copy where every unusable value has been replaced by its
    /// documented default. Never fails.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut out = self.clone();

        positive_or(&mut out.frame_width, defaults.frame_width, "frame_width");
        positive_or(&mut out.frame_height, defaults.frame_height, "frame_height");

        if !(out.main_wing_ratio.is_finite()
            && out.main_wing_ratio > 0.0
            && out.main_wing_ratio < 100.0)
        {
            warn!(
                value = out.main_wing_ratio,
                fallback = defaults.main_wing_ratio,
                "main_wing_ratio outside (0, 100), using default"
            );
            out.main_wing_ratio = defaults.main_wing_ratio;
        }

        for (value, fallback, name) in [
            (&mut out.frame_wood_width, defaults.frame_wood_width, "frame_wood_width"),
            (&mut out.frame_wood_thickness, defaults.frame_wood_thickness, "frame_wood_thickness"),
            (&mut out.frieze_width, defaults.frieze_width, "frieze_width"),
            (&mut out.frieze_thickness, defaults.frieze_thickness, "frieze_thickness"),
            (&mut out.tenon_length, defaults.tenon_length, "tenon_length"),
            (&mut out.upper_tenoned_width, defaults.upper_tenoned_width, "upper_tenoned_width"),
            (&mut out.upper_tenoned_thickness, defaults.upper_tenoned_thickness, "upper_tenoned_thickness"),
            (&mut out.lower_tenoned_width, defaults.lower_tenoned_width, "lower_tenoned_width"),
            (&mut out.lower_tenoned_thickness, defaults.lower_tenoned_thickness, "lower_tenoned_thickness"),
            (&mut out.division_wood_width, defaults.division_wood_width, "division_wood_width"),
            (&mut out.division_wood_thickness, defaults.division_wood_thickness, "division_wood_thickness"),
            (&mut out.vertical_division_width, defaults.vertical_division_width, "vertical_division_width"),
            (&mut out.vertical_division_thickness, defaults.vertical_division_thickness, "vertical_division_thickness"),
            (&mut out.middle_division_width, defaults.middle_division_width, "middle_division_width"),
            (&mut out.sash_width_deduction, defaults.sash_width_deduction, "sash_width_deduction"),
            (&mut out.sash_height_deduction, defaults.sash_height_deduction, "sash_height_deduction"),
            (&mut out.sash_double_deduction, defaults.sash_double_deduction, "sash_double_deduction"),
            (&mut out.glass_thickness, defaults.glass_thickness, "glass_thickness"),
            (&mut out.glass_overlap, defaults.glass_overlap, "glass_overlap"),
            (&mut out.wood_thickness, defaults.wood_thickness, "wood_thickness"),
            (&mut out.wood_overlap, defaults.wood_overlap, "wood_overlap"),
        ] {
            non_negative_or(value, fallback, name);
        }

        if out.count == 0 {
            warn!("count is zero, using 1");
            out.count = 1;
        }

        out.manual_horizontal_positions = clean_positions(out.manual_horizontal_positions.take());
        out.manual_vertical_positions = clean_positions(out.manual_vertical_positions.take());
        out
    }
}

fn positive_or(value: &mut f64, fallback: f64, name: &str) {
    if !(value.is_finite() && *value > 0.0) {
        warn!(field = name, value = *value, fallback, "non-positive parameter, using default");
        *value = fallback;
    }
}

fn non_negative_or(value: &mut f64, fallback: f64, name: &str) {
    if !(value.is_finite() && *value >= 0.0) {
        warn!(field = name, value = *value, fallback, "negative parameter, using default");
        *value = fallback;
    }
}

/// Drops non-finite entries and sorts ascending. An empty list stays `Some`
/// so "manual with no positions" remains distinguishable from "not manual".
fn clean_positions(positions: Option<Vec<f64>>) -> Option<Vec<f64>> {
    positions.map(|list| {
        let mut cleaned: Vec<f64> = list.into_iter().filter(|p| p.is_finite()).collect();
        cleaned.sort_by(|a, b| a.total_cmp(b));
        cleaned
    })
}
