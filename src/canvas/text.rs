//! Glyph rendering via the system font database.
//!
//! Resolves the payload's numeric font-family code against `fontdb`,
//! outlines glyphs with `ttf-parser`, and fills them as tiny-skia paths.
//! Anything that goes wrong (no matching face, unparsable font data)
//! skips the text element with a log line; text never fails a render.

use once_cell::sync::Lazy;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Transform};
use ttf_parser::OutlineBuilder;

static FONT_DB: Lazy<fontdb::Database> = Lazy::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    db
});

/// Map the payload's font-family code to a generic family.
///
/// 1 is the sans-serif face, 2 the fixed-width face, 3 the serif face;
/// any other value (or none) falls back to sans-serif.
pub(crate) fn resolve_family(code: Option<i64>) -> fontdb::Family<'static> {
    match code {
        Some(2) => fontdb::Family::Monospace,
        Some(3) => fontdb::Family::Serif,
        _ => fontdb::Family::SansSerif,
    }
}

/// Emits ttf-parser glyph outlines into a tiny-skia path, flipping the
/// font's y-up coordinates into surface space.
struct GlyphPen {
    builder: PathBuilder,
    origin_x: f32,
    baseline_y: f32,
    scale: f32,
}

impl OutlineBuilder for GlyphPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder
            .move_to(self.origin_x + x * self.scale, self.baseline_y - y * self.scale);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder
            .line_to(self.origin_x + x * self.scale, self.baseline_y - y * self.scale);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(
            self.origin_x + x1 * self.scale,
            self.baseline_y - y1 * self.scale,
            self.origin_x + x * self.scale,
            self.baseline_y - y * self.scale,
        );
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.origin_x + x1 * self.scale,
            self.baseline_y - y1 * self.scale,
            self.origin_x + x2 * self.scale,
            self.baseline_y - y2 * self.scale,
            self.origin_x + x * self.scale,
            self.baseline_y - y * self.scale,
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Draw `text` top-aligned at (`x`, `y`) in surface coordinates.
pub(crate) fn draw_text(
    pixmap: &mut Pixmap,
    text: &str,
    x: f32,
    y: f32,
    font_size: f32,
    family_code: Option<i64>,
    color: Color,
) {
    if font_size <= 0.0 {
        return;
    }
    let family = resolve_family(family_code);
    let query = fontdb::Query {
        families: &[family],
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    let Some(face_id) = FONT_DB.query(&query) else {
        tracing::debug!(?family, "no system font face matches; skipping text element");
        return;
    };

    let drawn = FONT_DB.with_face_data(face_id, |data, face_index| {
        let Ok(face) = ttf_parser::Face::parse(data, face_index) else {
            return false;
        };
        let units_per_em = f32::from(face.units_per_em());
        if units_per_em <= 0.0 {
            return false;
        }
        let scale = font_size / units_per_em;
        // Top-aligned: the baseline sits one ascender below the anchor.
        let baseline_y = y + f32::from(face.ascender()) * scale;

        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;

        let mut cursor_x = x;
        for ch in text.chars() {
            let Some(glyph) = face.glyph_index(ch) else {
                continue;
            };
            let mut pen = GlyphPen {
                builder: PathBuilder::new(),
                origin_x: cursor_x,
                baseline_y,
                scale,
            };
            if face.outline_glyph(glyph, &mut pen).is_some() {
                if let Some(path) = pen.builder.finish() {
                    pixmap.fill_path(
                        &path,
                        &paint,
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }
            }
            if let Some(advance) = face.glyph_hor_advance(glyph) {
                cursor_x += f32::from(advance) * scale;
            }
        }
        true
    });

    if !matches!(drawn, Some(true)) {
        tracing::debug!("font face data unavailable; skipping text element");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_codes_map_to_generic_families() {
        assert_eq!(resolve_family(Some(1)), fontdb::Family::SansSerif);
        assert_eq!(resolve_family(Some(2)), fontdb::Family::Monospace);
        assert_eq!(resolve_family(Some(3)), fontdb::Family::Serif);
    }

    #[test]
    fn test_unknown_or_absent_code_falls_back_to_sans_serif() {
        assert_eq!(resolve_family(None), fontdb::Family::SansSerif);
        assert_eq!(resolve_family(Some(0)), fontdb::Family::SansSerif);
        assert_eq!(resolve_family(Some(42)), fontdb::Family::SansSerif);
        assert_eq!(resolve_family(Some(-1)), fontdb::Family::SansSerif);
    }

    #[test]
    fn test_draw_text_never_panics_without_fonts() {
        // Whether or not the host has fonts installed, drawing must be a
        // soft no-op at worst.
        let mut pixmap = Pixmap::new(100, 40).unwrap();
        draw_text(&mut pixmap, "hello", 2.0, 2.0, 16.0, None, Color::BLACK);
        draw_text(&mut pixmap, "mono", 2.0, 20.0, 0.0, Some(2), Color::BLACK);
    }
}
