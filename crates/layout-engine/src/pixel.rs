//! Projection of the window topology onto the preview canvas.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use window_types::{panel_id, DrawRole, Division, Drawable, MaterialDefaults, Panel, WindowParameters, ZOrder};

use crate::config::LayoutConfig;
use crate::registry::PanelRegistry;
use crate::style;
use crate::topology::{AxisPlan, WindowTopology, WingPlan};

/// Everything the render sink needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelLayout {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub drawables: Vec<Drawable>,
    pub panels: Vec<Panel>,
}

/// Lays the window out on a `canvas_width` x `canvas_height` canvas.
///
/// Never fails: an unusable canvas size falls back to 600x600 and invalid
/// parameters fall back to their defaults.
pub fn layout(
    params: &WindowParameters,
    canvas_width: f64,
    canvas_height: f64,
    margin: f64,
) -> PixelLayout {
    let config = LayoutConfig {
        canvas_width,
        canvas_height,
        margin,
        ..LayoutConfig::default()
    };
    layout_with(params, &config)
}

#[instrument(skip_all, fields(window_type = ?params.window_type))]
pub fn layout_with(params: &WindowParameters, config: &LayoutConfig) -> PixelLayout {
    let params = params.sanitized();
    let topology = WindowTopology::plan(&params);
    project(&params, &topology, &config.resolved())
}

/// Horizontal extents of one wing on the canvas.
struct WingColumns<'a> {
    plan: &'a WingPlan,
    /// Between the wing's friezes; divisions and panels are spaced here.
    inner_left: f64,
    inner_right: f64,
    /// Dark glazing rectangle, which runs up to the mid-mullion.
    cavity_left: f64,
    cavity_right: f64,
}

impl WingColumns<'_> {
    fn inner_width(&self) -> f64 {
        self.inner_right - self.inner_left
    }

    fn map(&self) -> AxisMap {
        AxisMap::new(&self.plan.columns, self.inner_left, self.inner_width())
    }

    fn cavity_width(&self) -> f64 {
        self.cavity_right - self.cavity_left
    }
}

/// Frame metrics in canvas pixels.
struct Canvas {
    scale: f64,
    ox: f64,
    oy: f64,
    w: f64,
    h: f64,
    frieze: f64,
    upper: f64,
    lower: f64,
    tenon: f64,
    snap: f64,
}

impl Canvas {
    fn new(params: &WindowParameters, config: &LayoutConfig) -> Self {
        let fit = |margin: f64| {
            ((config.canvas_width - margin) / params.frame_width)
                .min((config.canvas_height - margin) / params.frame_height)
        };
        let mut scale = fit(config.margin);
        if !(scale.is_finite() && scale > 0.0) {
            warn!(margin = config.margin, "margin leaves no room, ignoring it");
            scale = fit(0.0);
        }
        let w = params.frame_width * scale;
        let h = params.frame_height * scale;
        Self {
            scale,
            ox: (config.canvas_width - w) / 2.0,
            oy: (config.canvas_height - h) / 2.0,
            w,
            h,
            frieze: params.frieze_width * scale,
            upper: params.upper_tenoned_width * scale,
            lower: params.lower_tenoned_width * scale,
            tenon: params.tenon_length * scale,
            snap: config.snap_tolerance,
        }
    }

    fn glazing_top(&self) -> f64 {
        self.oy + self.upper
    }

    fn glazing_bottom(&self) -> f64 {
        self.oy + self.h - self.lower
    }

    fn glazing_height(&self) -> f64 {
        self.glazing_bottom() - self.glazing_top()
    }
}

/// Linear map from mm along an axis plan onto a pixel interval.
struct AxisMap {
    origin: f64,
    k: f64,
}

impl AxisMap {
    fn new(plan: &AxisPlan, origin: f64, pixels: f64) -> Self {
        let k = if plan.span > 0.0 && pixels > 0.0 {
            pixels / plan.span
        } else {
            0.0
        };
        Self { origin, k }
    }

    fn at(&self, mm: f64) -> f64 {
        self.origin + mm * self.k
    }

    /// Pixel `(start, end)` of a bar.
    fn bar(&self, division: &Division) -> (f64, f64) {
        (self.at(division.leading_edge()), self.at(division.trailing_edge()))
    }
}

fn wood(role: DrawRole, x: f64, y: f64, w: f64, h: f64, z: i32) -> Drawable {
    Drawable::rect(role, x, y, w, h, z).styled(style::WOOD_FILL, style::WOOD_STROKE)
}

/// Projects a planned topology. `params` must be the sanitized set the
/// topology was planned from.
pub fn project(
    params: &WindowParameters,
    topology: &WindowTopology,
    config: &LayoutConfig,
) -> PixelLayout {
    let c = Canvas::new(params, config);
    let split = topology.sash.split_fraction().map(|f| c.ox + c.w * f);
    let mid = topology.sash.mid_member_width(params) * c.scale;

    let wings: Vec<WingColumns> = topology
        .wings
        .iter()
        .enumerate()
        .map(|(i, plan)| match split {
            None => WingColumns {
                plan,
                inner_left: c.ox + c.frieze,
                inner_right: c.ox + c.w - c.frieze,
                cavity_left: c.ox + c.frieze,
                cavity_right: c.ox + c.w - c.frieze,
            },
            Some(xs) if i == 0 => WingColumns {
                plan,
                inner_left: c.ox + c.frieze,
                inner_right: xs - c.frieze,
                cavity_left: c.ox + c.frieze,
                cavity_right: xs - mid / 2.0,
            },
            Some(xs) => WingColumns {
                plan,
                inner_left: xs + c.frieze,
                inner_right: c.ox + c.w - c.frieze,
                cavity_left: xs + mid / 2.0,
                cavity_right: c.ox + c.w - c.frieze,
            },
        })
        .collect();

    let mut drawables = Vec::new();

    drawables.push(
        Drawable::rect(DrawRole::Background, c.ox, c.oy, c.w, c.h, ZOrder::BACKGROUND)
            .styled(style::BACKGROUND_FILL, style::BACKGROUND_STROKE)
            .with_stroke_width(2.0),
    );
    drawables.push(wood(DrawRole::Frame, c.ox, c.oy, c.w, c.h, ZOrder::FRAME));

    for wing in &wings {
        drawables.push(
            Drawable::rect(
                DrawRole::GlazingCavity,
                wing.cavity_left,
                c.glazing_top(),
                wing.cavity_width(),
                c.glazing_height(),
                ZOrder::GLAZING_CAVITY,
            )
            .styled(style::CAVITY_FILL, style::CAVITY_STROKE),
        );
    }

    if let Some(xs) = split {
        drawables.push(wood(
            DrawRole::MidMullion,
            xs - mid / 2.0,
            c.glazing_top(),
            mid,
            c.glazing_height(),
            ZOrder::DIVISION,
        ));
        drawables.push(
            Drawable::line(DrawRole::CenterLine, xs, c.oy, xs, c.oy + c.h, ZOrder::DIVISION)
                .styled("", style::CENTER_LINE_STROKE)
                .with_dash(vec![5.0, 5.0]),
        );
    }

    // Horizontal bars as (top, bottom) edges, shared by every wing.
    let row_map = AxisMap::new(&topology.rows, c.glazing_top(), c.glazing_height());
    let bars: Vec<(f64, f64)> = topology
        .rows
        .divisions()
        .iter()
        .map(|d| row_map.bar(d))
        .collect();

    for &(top, bottom) in &bars {
        for wing in &wings {
            drawables.push(wood(
                DrawRole::HorizontalDivision,
                wing.cavity_left,
                top,
                wing.cavity_width(),
                bottom - top,
                ZOrder::DIVISION,
            ));
        }
    }

    let mut frieze_xs = vec![c.ox];
    if let Some(xs) = split {
        frieze_xs.push(xs - c.frieze);
        frieze_xs.push(xs);
    }
    frieze_xs.push(c.ox + c.w - c.frieze);
    for x in frieze_xs {
        drawables.push(wood(DrawRole::Frieze, x, c.oy, c.frieze, c.h, ZOrder::FRIEZE));
    }

    for (y, height) in [(c.oy, c.upper), (c.glazing_bottom(), c.lower)] {
        for wing in &wings {
            drawables.push(
                Drawable::rect(
                    DrawRole::TenonedRail,
                    wing.inner_left - c.tenon,
                    y,
                    wing.inner_width() + 2.0 * c.tenon,
                    height,
                    ZOrder::TENONED_RAIL,
                )
                .styled(style::TENONED_FILL, style::TENONED_STROKE),
            );
        }
    }

    for (i, wing) in wings.iter().enumerate() {
        let map = wing.map();
        for division in wing.plan.columns.divisions() {
            let center = map.at(division.position);
            if let Some(xs) = split {
                if (center - xs).abs() <= c.snap {
                    debug!(center, "vertical division on the wing split, skipping");
                    continue;
                }
            }
            let (left, right) = map.bar(&division);
            let width = right - left;
            let x = snap_to_meeting_frieze(&c, split, i, left, width);
            push_vertical_sections(&mut drawables, &c, &bars, x, width);
        }
    }

    let panels = build_panels(params, topology, &row_map, &wings);
    drawables.extend(panels.iter().map(plain_panel_drawable));

    PixelLayout {
        scale: c.scale,
        offset_x: c.ox,
        offset_y: c.oy,
        drawables,
        panels,
    }
}

/// Re-anchors a division that touches the frieze at the wing split so its
/// tenon reaches into that frieze.
fn snap_to_meeting_frieze(
    c: &Canvas,
    split: Option<f64>,
    wing_index: usize,
    x: f64,
    vd: f64,
) -> f64 {
    let Some(xs) = split else {
        return x;
    };
    if wing_index == 0 {
        let frieze_edge = xs - c.frieze;
        if ((x + vd) - frieze_edge).abs() < c.snap {
            return frieze_edge - c.tenon;
        }
    } else {
        let frieze_edge = xs + c.frieze;
        if (x - frieze_edge).abs() < c.snap {
            return frieze_edge - vd + c.tenon;
        }
    }
    x
}

/// One vertical bar per horizontal section, each lengthened by a tenon at
/// both ends so it overlaps the rail or bar it joins.
fn push_vertical_sections(
    drawables: &mut Vec<Drawable>,
    c: &Canvas,
    bars: &[(f64, f64)],
    x: f64,
    width: f64,
) {
    let mut start = c.glazing_top() - c.tenon;
    let ends = bars
        .iter()
        .map(|&(top, bottom)| (top + c.tenon, bottom - c.tenon))
        .chain(std::iter::once((c.glazing_bottom() + c.tenon, f64::NAN)));

    for (end, next_start) in ends {
        if end > start {
            drawables.push(
                Drawable::rect(
                    DrawRole::VerticalDivision,
                    x,
                    start,
                    width,
                    end - start,
                    ZOrder::VERTICAL_DIVISION,
                )
                .styled(style::VERTICAL_DIVISION_FILL, style::WOOD_STROKE),
            );
        } else {
            debug!(start, end, "degenerate vertical division section, skipping");
        }
        start = next_start;
    }
}

/// One panel per cell that survives in mm, placed by mapping the mm cell
/// bounds onto the canvas.
fn build_panels(
    params: &WindowParameters,
    topology: &WindowTopology,
    row_map: &AxisMap,
    wings: &[WingColumns],
) -> Vec<Panel> {
    if !topology.is_buildable() {
        warn!("window has no glazing area, no panels");
        return Vec::new();
    }
    let glass = MaterialDefaults::from_params(params).glass;
    let rows = topology.rows.cells();
    let columns: Vec<_> = wings
        .iter()
        .map(|wing| (wing.map(), wing.plan.columns.cells()))
        .collect();

    let mut panels = Vec::new();
    for row in &rows {
        let top = row_map.at(row.start);
        let height = row_map.at(row.end) - top;
        for (wing, (col_map, cols)) in wings.iter().zip(&columns) {
            for col in cols {
                let left = col_map.at(col.start);
                let width = col_map.at(col.end) - left;
                if !(width > 0.0 && height > 0.0) {
                    warn!(
                        row = row.index,
                        col = col.index,
                        width,
                        height,
                        "panel has no room on the canvas"
                    );
                }
                panels.push(Panel {
                    id: panel_id(wing.plan.wing, row.index, col.index),
                    row: row.index,
                    col: col.index,
                    wing: wing.plan.wing,
                    infill_type: Default::default(),
                    left,
                    top,
                    width,
                    height,
                    thickness: glass.thickness,
                    overlap: glass.overlap,
                    is_double: topology.is_double(),
                });
            }
        }
    }
    debug!(count = panels.len(), "created panels");
    panels
}

fn tag_panel(drawable: Drawable, panel: &Panel) -> Drawable {
    Drawable {
        panel_id: Some(panel.id.clone()),
        ..drawable
    }
}

/// Default look of a freshly created panel.
pub fn plain_panel_drawable(panel: &Panel) -> Drawable {
    let d = Drawable::rect(
        DrawRole::Panel,
        panel.left,
        panel.top,
        panel.width,
        panel.height,
        ZOrder::PANEL,
    )
    .styled(style::GLASS_PANEL_FILL, style::GLASS_PANEL_STROKE);
    tag_panel(d, panel)
}

/// Look of a panel after its infill was chosen: material colour, grown by the
/// rebate overlap on every side.
pub fn styled_panel_drawable(panel: &Panel, scale: f64) -> Drawable {
    let grow = panel.overlap * scale;
    let (fill, stroke, opacity) = style::panel_colors(panel.infill_type);
    let d = Drawable::rect(
        DrawRole::Panel,
        panel.left - grow,
        panel.top - grow,
        panel.width + 2.0 * grow,
        panel.height + 2.0 * grow,
        ZOrder::PANEL,
    )
    .styled(fill, stroke)
    .with_opacity(opacity);
    tag_panel(d, panel)
}

impl PixelLayout {
    /// Redraws panels from the registry's current infill state. Panels never
    /// assigned explicitly keep their default look.
    pub fn restyle(&mut self, registry: &PanelRegistry) {
        let scale = self.scale;
        for drawable in &mut self.drawables {
            let Some(id) = drawable.panel_id.as_deref() else {
                continue;
            };
            if let Some(entry) = registry.entry(id) {
                *drawable = if entry.assigned {
                    styled_panel_drawable(&entry.panel, scale)
                } else {
                    plain_panel_drawable(&entry.panel)
                };
            }
        }
    }

    pub fn panel_drawables(&self) -> impl Iterator<Item = &Drawable> {
        self.drawables.iter().filter(|d| d.panel_id.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use window_types::WindowType;

    fn roles(layout: &PixelLayout) -> Vec<DrawRole> {
        layout.drawables.iter().map(|d| d.role).collect()
    }

    #[test]
    fn scale_and_offsets_center_the_frame() {
        let out = layout(&WindowParameters::default(), 600.0, 600.0, 60.0);
        // min(540 / 900, 540 / 1500) = 0.36
        assert!((out.scale - 0.36).abs() < 1e-12);
        assert!((out.offset_x - (600.0 - 324.0) / 2.0).abs() < 1e-9);
        assert!((out.offset_y - 30.0).abs() < 1e-9);
    }

    #[test]
    fn missing_canvas_uses_defaults() {
        let a = layout(&WindowParameters::default(), 0.0, f64::NAN, 60.0);
        let b = layout(&WindowParameters::default(), 600.0, 600.0, 60.0);
        assert_eq!(a, b);
    }

    #[test]
    fn single_draw_order() {
        let params = WindowParameters {
            horizontal_divisions: 1,
            vertical_divisions: 1,
            ..WindowParameters::default()
        };
        let out = layout(&params, 600.0, 600.0, 60.0);
        let order = roles(&out);
        let first = |role| order.iter().position(|r| *r == role).unwrap();
        assert_eq!(order[0], DrawRole::Background);
        assert_eq!(order[1], DrawRole::Frame);
        assert!(first(DrawRole::GlazingCavity) < first(DrawRole::HorizontalDivision));
        assert!(first(DrawRole::HorizontalDivision) < first(DrawRole::Frieze));
        assert!(first(DrawRole::Frieze) < first(DrawRole::TenonedRail));
        assert!(first(DrawRole::TenonedRail) < first(DrawRole::VerticalDivision));
        assert!(first(DrawRole::VerticalDivision) < first(DrawRole::Panel));
        assert!(!order.contains(&DrawRole::MidMullion));
        // one vertical division, two horizontal sections
        assert_eq!(order.iter().filter(|r| **r == DrawRole::VerticalDivision).count(), 2);
    }

    #[test]
    fn panels_sit_on_top() {
        let params = WindowParameters {
            window_type: WindowType::DoubleSymmetric,
            frame_width: 1200.0,
            vertical_divisions: 2,
            ..WindowParameters::default()
        };
        let out = layout(&params, 600.0, 600.0, 60.0);
        let max_structural = out
            .drawables
            .iter()
            .filter(|d| d.panel_id.is_none())
            .map(|d| d.z)
            .max()
            .unwrap();
        assert!(out.panel_drawables().all(|d| d.z > max_structural));
        assert_eq!(out.panel_drawables().count(), out.panels.len());
    }

    #[test]
    fn double_has_mullion_and_two_cavities() {
        let params = WindowParameters {
            window_type: WindowType::DoubleSymmetric,
            frame_width: 1200.0,
            ..WindowParameters::default()
        };
        let out = layout(&params, 600.0, 600.0, 60.0);
        let cavities: Vec<&Drawable> = out
            .drawables
            .iter()
            .filter(|d| d.role == DrawRole::GlazingCavity)
            .collect();
        assert_eq!(cavities.len(), 2);
        assert!(cavities[0].right() < cavities[1].x);
        assert_eq!(roles(&out).iter().filter(|r| **r == DrawRole::MidMullion).count(), 1);
        let line = out.drawables.iter().find(|d| d.role == DrawRole::CenterLine).unwrap();
        assert_eq!(line.dash, Some(vec![5.0, 5.0]));
    }

    #[test]
    fn panel_ids_are_wing_qualified() {
        let params = WindowParameters {
            window_type: WindowType::DoubleAsymmetric,
            frame_width: 1200.0,
            ..WindowParameters::default()
        };
        let out = layout(&params, 600.0, 600.0, 60.0);
        let ids: Vec<&str> = out.panels.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["window_main_0_0", "window_second_0_0"]);
        assert!(out.panels.iter().all(|p| p.is_double));
    }

    #[test]
    fn horizontal_divisions_split_at_mullion() {
        let params = WindowParameters {
            window_type: WindowType::DoubleSymmetric,
            frame_width: 1200.0,
            horizontal_divisions: 1,
            ..WindowParameters::default()
        };
        let out = layout(&params, 600.0, 600.0, 60.0);
        let bars: Vec<&Drawable> = out
            .drawables
            .iter()
            .filter(|d| d.role == DrawRole::HorizontalDivision)
            .collect();
        assert_eq!(bars.len(), 2);
        let mullion = out.drawables.iter().find(|d| d.role == DrawRole::MidMullion).unwrap();
        assert!(bars[0].right() <= mullion.x + 1e-9);
        assert!(bars[1].x >= mullion.right() - 1e-9);
    }

    #[test]
    fn styled_panel_grows_by_overlap() {
        let out = layout(&WindowParameters::default(), 600.0, 600.0, 60.0);
        let panel = &out.panels[0];
        let d = styled_panel_drawable(panel, out.scale);
        let grow = panel.overlap * out.scale;
        assert!((d.x - (panel.left - grow)).abs() < 1e-12);
        assert!((d.w - (panel.width + 2.0 * grow)).abs() < 1e-12);
        assert_eq!(d.opacity, style::GLASS_PANEL_OPACITY);
    }
}
