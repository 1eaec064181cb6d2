//! Per-shape painting onto the raster surface.
//!
//! Every shape first maps its coordinates through the view transform, then
//! paints with tiny-skia paths: fill first when a background color is set,
//! stroke on top. Elements with missing geometry are skipped outright, and
//! malformed geometry (negative extents and the like) is handed to the
//! surface as-is, where path construction rejects it.

use std::f32::consts::PI;

use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::canvas::bounds::ViewTransform;
use crate::canvas::text::draw_text;
use crate::element::{DiagramElement, ElementKind};

/// Arrowhead segment length in native units, scaled with the diagram.
const ARROWHEAD_LENGTH: f32 = 10.0;
/// Arrowhead half-angle off the reversed shaft direction.
const ARROWHEAD_ANGLE: f32 = PI / 6.0;
/// Base font size when a text element does not carry one.
const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Parse a `#rrggbb` color; `transparent` and anything unrecognized fall
/// back to the given default.
fn parse_color(value: &str, fallback: Color) -> Color {
    if value == "transparent" || value.is_empty() {
        return Color::TRANSPARENT;
    }
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16);
            let g = u8::from_str_radix(&hex[2..4], 16);
            let b = u8::from_str_radix(&hex[4..6], 16);
            if let (Ok(r), Ok(g), Ok(b)) = (r, g, b) {
                return Color::from_rgba8(r, g, b, 255);
            }
        }
    }
    fallback
}

/// Stroke color of an element; opaque black when unset.
fn stroke_color(element: &DiagramElement) -> Color {
    element
        .stroke_color
        .as_deref()
        .map_or(Color::BLACK, |value| parse_color(value, Color::BLACK))
}

/// Fill color of an element; `None` means no fill pass at all.
fn fill_color(element: &DiagramElement) -> Option<Color> {
    let color = parse_color(element.background_color.as_deref()?, Color::TRANSPARENT);
    (color.alpha() > 0.0).then_some(color)
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

/// The two arrowhead barbs for a shaft ending at `tip`, arriving from
/// `from`. Each segment runs from the tip back along the reversed shaft
/// direction, rotated by the arrowhead half-angle, with length scaled by
/// the view transform's scale factor.
pub(crate) fn arrowhead_segments(
    tip: (f32, f32),
    from: (f32, f32),
    scale: f32,
) -> [((f32, f32), (f32, f32)); 2] {
    let angle = (tip.1 - from.1).atan2(tip.0 - from.0);
    let length = ARROWHEAD_LENGTH * scale;
    let barb = |delta: f32| {
        (
            tip.0 - length * (angle + delta).cos(),
            tip.1 - length * (angle + delta).sin(),
        )
    };
    [(tip, barb(-ARROWHEAD_ANGLE)), (tip, barb(ARROWHEAD_ANGLE))]
}

/// Paint one element through the view transform.
///
/// Never fails: elements whose skip condition holds are a no-op, and
/// rejected geometry simply leaves the surface untouched.
pub(crate) fn paint_element(pixmap: &mut Pixmap, element: &DiagramElement, view: &ViewTransform) {
    let (x, y) = view.apply(element.x, element.y);
    let stroke = Stroke {
        width: view.length(element.stroke_width.unwrap_or(1.0)),
        ..Stroke::default()
    };

    match element.kind {
        ElementKind::Rectangle => {
            let Some(rect) = element_rect(element, view, x, y) else {
                return;
            };
            let path = PathBuilder::from_rect(rect);
            if let Some(fill) = fill_color(element) {
                pixmap.fill_path(
                    &path,
                    &solid_paint(fill),
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
            pixmap.stroke_path(
                &path,
                &solid_paint(stroke_color(element)),
                &stroke,
                Transform::identity(),
                None,
            );
        }
        ElementKind::Ellipse => {
            let Some(rect) = element_rect(element, view, x, y) else {
                return;
            };
            let Some(path) = PathBuilder::from_oval(rect) else {
                return;
            };
            if let Some(fill) = fill_color(element) {
                pixmap.fill_path(
                    &path,
                    &solid_paint(fill),
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
            pixmap.stroke_path(
                &path,
                &solid_paint(stroke_color(element)),
                &stroke,
                Transform::identity(),
                None,
            );
        }
        ElementKind::Line | ElementKind::Arrow => {
            let Some(points) = element.points.as_deref().filter(|p| !p.is_empty()) else {
                return;
            };
            let paint = solid_paint(stroke_color(element));

            let mut pb = PathBuilder::new();
            pb.move_to(x, y);
            for [dx, dy] in points {
                pb.line_to(x + view.length(*dx), y + view.length(*dy));
            }
            if let Some(path) = pb.finish() {
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }

            if element.kind == ElementKind::Arrow {
                let last = points[points.len() - 1];
                let prev = if points.len() > 1 {
                    points[points.len() - 2]
                } else {
                    [0.0, 0.0]
                };
                let tip = (x + view.length(last[0]), y + view.length(last[1]));
                let from = (x + view.length(prev[0]), y + view.length(prev[1]));
                for (start, end) in arrowhead_segments(tip, from, view.scale as f32) {
                    let mut pb = PathBuilder::new();
                    pb.move_to(start.0, start.1);
                    pb.line_to(end.0, end.1);
                    if let Some(path) = pb.finish() {
                        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
                    }
                }
            }
        }
        ElementKind::Text => {
            let Some(text) = element.text.as_deref().filter(|t| !t.is_empty()) else {
                return;
            };
            // Text fills with the stroke color, never the background.
            draw_text(
                pixmap,
                text,
                x,
                y,
                view.length(element.font_size.unwrap_or(DEFAULT_FONT_SIZE)),
                element.font_family,
                stroke_color(element),
            );
        }
    }
}

/// Surface-space rect for a box-shaped element, or `None` when the skip
/// condition (absent or zero extents) holds or the geometry is rejected.
fn element_rect(
    element: &DiagramElement,
    view: &ViewTransform,
    x: f32,
    y: f32,
) -> Option<Rect> {
    let width = element.width.filter(|w| *w != 0.0)?;
    let height = element.height.filter(|h| *h != 0.0)?;
    Rect::from_xywh(x, y, view.length(width), view.length(height))
}
