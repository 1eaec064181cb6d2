//! Content bounds and the scale-and-center view transform.

use crate::element::{DiagramElement, ElementKind};

/// Total margin (both sides combined, per axis) kept between content and
/// the surface edge when fitting.
pub const FIT_MARGIN: f64 = 40.0;

/// Minimal axis-aligned box enclosing all element geometry in native
/// (untransformed) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl ContentBounds {
    /// Compute bounds over a flat element list.
    ///
    /// Line/arrow geometry is the union of its vertices; every other kind
    /// contributes its origin box, with absent extents treated as zero.
    pub fn of_elements(elements: &[DiagramElement]) -> Self {
        let mut bounds = Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for element in elements {
            match element.kind {
                ElementKind::Line | ElementKind::Arrow => {
                    for [dx, dy] in element.points.iter().flatten() {
                        bounds.extend(element.x + dx, element.y + dy);
                    }
                }
                ElementKind::Rectangle | ElementKind::Ellipse | ElementKind::Text => {
                    bounds.extend(element.x, element.y);
                    bounds.extend(
                        element.x + element.width.unwrap_or(0.0),
                        element.y + element.height.unwrap_or(0.0),
                    );
                }
            }
        }
        bounds
    }

    fn extend(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when no geometry extended the bounds (empty list, or lines
    /// with no points).
    pub fn is_degenerate(&self) -> bool {
        !(self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite())
    }
}

/// Uniform scale plus translation mapping native element coordinates to
/// surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ViewTransform {
    /// Fit `bounds` inside a surface of the given pixel dimensions,
    /// centered, with [`FIT_MARGIN`] of breathing room.
    ///
    /// Diagrams are only ever shrunk to fit: the scale is capped at 1 so
    /// content smaller than the surface renders at native size.
    ///
    /// Degenerate bounds (no geometry at all) fall back to scale 1 with
    /// the zero-size content block centered on the surface, so downstream
    /// arithmetic never sees NaN.
    pub fn fit(bounds: &ContentBounds, surface_width: u32, surface_height: u32) -> Self {
        let bounds = if bounds.is_degenerate() {
            ContentBounds {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 0.0,
                max_y: 0.0,
            }
        } else {
            *bounds
        };

        let surface_width = f64::from(surface_width);
        let surface_height = f64::from(surface_height);
        let content_width = bounds.width();
        let content_height = bounds.height();

        // Zero-size content divides to infinity here, which the cap at 1
        // absorbs; no NaN is possible once bounds are finite.
        let scale = ((surface_width - FIT_MARGIN) / content_width)
            .min((surface_height - FIT_MARGIN) / content_height)
            .min(1.0);

        Self {
            scale,
            offset_x: (surface_width - content_width * scale) / 2.0 - bounds.min_x * scale,
            offset_y: (surface_height - content_height * scale) / 2.0 - bounds.min_y * scale,
        }
    }

    /// Map a native point to surface pixel coordinates.
    pub fn apply(&self, x: f64, y: f64) -> (f32, f32) {
        (
            (x * self.scale + self.offset_x) as f32,
            (y * self.scale + self.offset_y) as f32,
        )
    }

    /// Scale a native length to surface pixels.
    pub fn length(&self, len: f64) -> f32 {
        (len * self.scale) as f32
    }
}
