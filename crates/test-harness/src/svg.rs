//! SVG dump of a drawable list, for looking at a layout outside the host.

use std::fmt::Write;

use layout_engine::PixelLayout;
use window_types::{Drawable, Shape};

/// Renders the drawables in stacking order: by z tag, then by list order.
pub fn to_svg(layout: &PixelLayout) -> String {
    let (width, height) = extent(&layout.drawables);
    let mut ordered: Vec<&Drawable> = layout.drawables.iter().collect();
    ordered.sort_by_key(|d| d.z);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.2} {height:.2}">"#,
    );
    for d in ordered {
        let style = style_attrs(d);
        let _ = match d.shape {
            Shape::Rect => writeln!(
                svg,
                r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" {style}/>"#,
                d.x, d.y, d.w, d.h,
            ),
            Shape::Line => writeln!(
                svg,
                r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {style}/>"#,
                d.x,
                d.y,
                d.right(),
                d.bottom(),
            ),
        };
    }
    svg.push_str("</svg>\n");
    svg
}

/// Canvas size that holds every drawable.
fn extent(drawables: &[Drawable]) -> (f64, f64) {
    drawables.iter().fold((0.0_f64, 0.0_f64), |(w, h), d| {
        (w.max(d.x.max(d.right())), h.max(d.y.max(d.bottom())))
    })
}

fn style_attrs(d: &Drawable) -> String {
    let mut out = String::new();
    let fill = if d.fill.is_empty() || d.shape == Shape::Line {
        "none"
    } else {
        d.fill.as_str()
    };
    out.push_str("fill=\"");
    escape_into(&mut out, fill);
    out.push_str("\" stroke=\"");
    escape_into(&mut out, if d.stroke.is_empty() { "none" } else { &d.stroke });
    let _ = write!(out, "\" stroke-width=\"{:.2}\"", d.stroke_width);
    if d.opacity < 1.0 {
        let _ = write!(out, " opacity=\"{:.2}\"", d.opacity);
    }
    if let Some(dash) = &d.dash {
        let pattern: Vec<String> = dash.iter().map(|v| format!("{v}")).collect();
        let _ = write!(out, " stroke-dasharray=\"{}\"", pattern.join(","));
    }
    if let Some(id) = &d.panel_id {
        out.push_str(" data-panel-id=\"");
        escape_into(&mut out, id);
        out.push('"');
    }
    out
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
