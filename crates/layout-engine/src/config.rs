use serde::{Deserialize, Serialize};

/// Preview canvas settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Total margin, split evenly on both sides of each axis.
    pub margin: f64,
    /// Pixel distance under which a vertical division is treated as touching
    /// the wing split or a meeting frieze.
    pub snap_tolerance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 600.0,
            canvas_height: 600.0,
            margin: 60.0,
            snap_tolerance: 5.0,
        }
    }
}

impl LayoutConfig {
    /// Replaces a missing or unusable canvas size with the defaults.
    pub fn resolved(&self) -> Self {
        let defaults = Self::default();
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if usable(self.canvas_width) && usable(self.canvas_height) {
            *self
        } else {
            tracing::debug!(
                width = self.canvas_width,
                height = self.canvas_height,
                "canvas size unavailable, using 600x600"
            );
            Self {
                canvas_width: defaults.canvas_width,
                canvas_height: defaults.canvas_height,
                ..*self
            }
        }
    }
}
