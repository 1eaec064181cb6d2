// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference
    clippy::module_name_repetitions
)]

//! # Scrawl
//!
//! Extracts embedded freehand-diagram payloads from text blobs and renders
//! them onto a raster surface.
//!
//! A payload is a JSON array of drawing primitives (rectangles, ellipses,
//! lines, arrows, text) dropped inline into prose by a diagram-producing
//! tool. Scrawl locates the payload, separates it from the surrounding
//! text, and paints it to a PNG: content bounds are computed over the
//! element list, a uniform scale-and-center transform fits everything
//! inside the surface with a margin, and each element paints with
//! shape-specific rules (arrows grow synthesized arrowheads).
//!
//! ## Modules
//!
//! - [`element`]: the element data model and flat/nested input handling
//! - [`extract`]: locating and stripping payloads inside text
//! - [`canvas`]: the raster renderer (bounds, transform, painting)
//! - [`editor`]: read-only composition over an embeddable rich editor
//! - [`config`]: persisted CLI flag defaults

pub mod canvas;
pub mod config;
pub mod editor;
pub mod element;
pub mod extract;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::canvas::Canvas;
    pub use crate::element::{DiagramElement, ElementInput, ElementKind};
    pub use crate::extract::{extract_diagram, split_text_and_diagram, strip_diagram};
}
