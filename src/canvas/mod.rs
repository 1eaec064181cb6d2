//! Canvas renderer: owns the raster surface and the full pipeline of
//! clear, flatten, fit, and paint.
//!
//! Rendering is synchronous and stateless across calls: every render
//! recomputes the transform from the current element list, so the canvas
//! can be reused freely. `render` itself never fails; the worst case for
//! malformed input is a partially painted (or just cleared) surface.

pub mod bounds;
mod paint;
mod text;

use std::path::Path;

use image::RgbaImage;
use thiserror::Error;
use tiny_skia::{Color, Pixmap};

use crate::element::{DiagramElement, ElementInput};
use self::bounds::{ContentBounds, ViewTransform};

/// Default surface width in pixels.
pub const DEFAULT_WIDTH: u32 = 500;
/// Default surface height in pixels.
pub const DEFAULT_HEIGHT: u32 = 400;

/// Surface-level failures. Painting itself never errors; these cover
/// construction and export only.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("failed to export canvas image")]
    Image(#[from] image::ImageError),
    #[error("canvas pixel data is not a valid {width}x{height} RGBA buffer")]
    PixelBuffer { width: u32, height: u32 },
}

/// A fixed-size raster drawing target for diagram elements.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Create a canvas of the given pixel dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidDimensions`] when either dimension
    /// is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(CanvasError::InvalidDimensions { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Render an element list, flat or grouped, replacing the previous
    /// surface contents.
    pub fn render(&mut self, input: &ElementInput) {
        self.render_elements(&input.flatten());
    }

    /// Render an already-flat element list.
    ///
    /// Clears the whole surface first (stale pixels from the previous
    /// render must never survive), fits the content, then paints in list
    /// order so later elements draw over earlier ones.
    pub fn render_elements(&mut self, elements: &[DiagramElement]) {
        self.pixmap.fill(Color::TRANSPARENT);

        let content = ContentBounds::of_elements(elements);
        let view = ViewTransform::fit(&content, self.width(), self.height());
        tracing::debug!(
            elements = elements.len(),
            scale = view.scale,
            "rendering element list"
        );

        for element in elements {
            paint::paint_element(&mut self.pixmap, element, &view);
        }
    }

    /// Raw premultiplied RGBA pixel data, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Copy the surface into an `image` RGBA buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::PixelBuffer`] if the pixel data does not
    /// form a buffer of the canvas dimensions.
    pub fn to_image(&self) -> Result<RgbaImage, CanvasError> {
        let (width, height) = (self.width(), self.height());
        RgbaImage::from_raw(width, height, self.pixmap.data().to_vec())
            .ok_or(CanvasError::PixelBuffer { width, height })
    }

    /// Write the surface to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error when the image cannot be encoded or written.
    pub fn save_png(&self, path: &Path) -> Result<(), CanvasError> {
        self.to_image()?.save(path)?;
        Ok(())
    }
}
