use serde::{Deserialize, Serialize};

/// Stacking tags carried by every drawable. Higher draws on top.
pub struct ZOrder;

impl ZOrder {
    pub const BACKGROUND: i32 = 0;
    pub const GLAZING_CAVITY: i32 = 2;
    pub const FRIEZE: i32 = 3;
    pub const FRAME: i32 = 10;
    pub const SASH: i32 = 20;
    pub const DIVISION: i32 = 30;
    pub const TENONED_RAIL: i32 = 40;
    /// Above the rails they cross.
    pub const VERTICAL_DIVISION: i32 = 45;
    pub const PANEL: i32 = 1000;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Rect,
    /// Segment from `(x, y)` to `(x + w, y + h)`.
    Line,
}

/// What a drawable represents, for tests and hit-testing hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawRole {
    Background,
    Frame,
    GlazingCavity,
    MidMullion,
    CenterLine,
    HorizontalDivision,
    Frieze,
    TenonedRail,
    VerticalDivision,
    Panel,
}

/// Render-sink primitive in canvas pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub shape: Shape,
    pub role: DrawRole,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub z: i32,
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_id: Option<String>,
}

impl Drawable {
    pub fn rect(role: DrawRole, x: f64, y: f64, w: f64, h: f64, z: i32) -> Self {
        Self {
            shape: Shape::Rect,
            role,
            x,
            y,
            w,
            h,
            fill: String::new(),
            stroke: String::new(),
            stroke_width: 1.0,
            z,
            opacity: 1.0,
            dash: None,
            panel_id: None,
        }
    }

    pub fn line(role: DrawRole, x1: f64, y1: f64, x2: f64, y2: f64, z: i32) -> Self {
        Self {
            shape: Shape::Line,
            ..Self::rect(role, x1, y1, x2 - x1, y2 - y1, z)
        }
    }

    pub fn styled(mut self, fill: &str, stroke: &str) -> Self {
        self.fill = fill.to_string();
        self.stroke = stroke.to_string();
        self
    }

    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_dash(mut self, dash: Vec<f64>) -> Self {
        self.dash = Some(dash);
        self
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}
