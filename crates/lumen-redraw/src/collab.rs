//! Collaborators the redraw pass calls out to.
//!
//! Fonts, embedded content and highlights live outside the box tree. The
//! pass reaches them through the traits here so that a front end can plug
//! in its own font engine and image cache.

use serde::{Deserialize, Serialize};

use lumen_types::color::Color;
use lumen_types::error::Result;
use lumen_types::geom::Rect;
use lumen_types::plotter::{FontStyle, Plotter};

use crate::boxes::BoxId;

/// Handle to an embedded object (image, plugin, nested document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

/// Handle to a decoded background image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(pub u64);

// ------------------------------------------------------------------
// Fonts
// ------------------------------------------------------------------

/// Text measurement.
pub trait FontMetrics {
    /// Width of `text` in unscaled CSS pixels, or `None` if the font
    /// cannot be measured.
    fn width(&self, font: &FontStyle, text: &str) -> Option<i32>;
}

/// Every character has the same advance. Useful for tests and for
/// dumping scenes without a real font engine.
#[derive(Debug, Clone, Copy)]
pub struct FixedWidthFonts {
    pub advance: i32,
}

impl Default for FixedWidthFonts {
    fn default() -> Self {
        Self { advance: 8 }
    }
}

impl FontMetrics for FixedWidthFonts {
    fn width(&self, _font: &FontStyle, text: &str) -> Option<i32> {
        let chars = i32::try_from(text.chars().count()).ok()?;
        chars.checked_mul(self.advance)
    }
}

// ------------------------------------------------------------------
// Embedded content
// ------------------------------------------------------------------

/// Paints content the box tree only refers to by handle.
pub trait ContentDelegate {
    /// Draw an embedded object into the area `(x, y, width, height)`.
    #[allow(clippy::too_many_arguments)]
    fn redraw_object(
        &mut self,
        plotter: &mut dyn Plotter,
        object: ObjectId,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        clip: &Rect,
        scale: f32,
        background: Color,
    ) -> Result<()>;

    /// Draw `image` with its top-left at `(x, y)`, scaled to
    /// `tile_width` x `tile_height` and repeated along the enabled axes
    /// to fill `clip`.
    #[allow(clippy::too_many_arguments)]
    fn redraw_tiled(
        &mut self,
        plotter: &mut dyn Plotter,
        image: ImageId,
        x: i32,
        y: i32,
        tile_width: i32,
        tile_height: i32,
        clip: &Rect,
        scale: f32,
        background: Color,
        repeat_x: bool,
        repeat_y: bool,
    ) -> Result<()>;

    /// The image covers every pixel it is drawn over.
    fn is_opaque(&self, image: ImageId) -> bool;
}

/// A delegate for documents with no embedded content.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl ContentDelegate for NoContent {
    fn redraw_object(
        &mut self,
        _plotter: &mut dyn Plotter,
        _object: ObjectId,
        _x: i32,
        _y: i32,
        _width: i32,
        _height: i32,
        _clip: &Rect,
        _scale: f32,
        _background: Color,
    ) -> Result<()> {
        Ok(())
    }

    fn redraw_tiled(
        &mut self,
        _plotter: &mut dyn Plotter,
        _image: ImageId,
        _x: i32,
        _y: i32,
        _tile_width: i32,
        _tile_height: i32,
        _clip: &Rect,
        _scale: f32,
        _background: Color,
        _repeat_x: bool,
        _repeat_y: bool,
    ) -> Result<()> {
        Ok(())
    }

    fn is_opaque(&self, _image: ImageId) -> bool {
        false
    }
}

// ------------------------------------------------------------------
// Highlights
// ------------------------------------------------------------------

/// Answers which part of a text span is highlighted.
pub trait HighlightProvider {
    /// For the document byte span `[start, end)`, return the highlighted
    /// sub-range relative to `start`, or `None` if none of it is.
    fn highlighted(&self, start: usize, end: usize) -> Option<(usize, usize)>;
}

/// A single highlighted byte range of the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeHighlight {
    pub start: usize,
    pub end: usize,
}

impl RangeHighlight {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl HighlightProvider for RangeHighlight {
    fn highlighted(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        if self.end <= start || self.start >= end || self.start >= self.end {
            return None;
        }
        let s = self.start.max(start) - start;
        let e = self.end.min(end) - start;
        Some((s, e))
    }
}

/// Text caret to draw after the text box it sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    pub text_box: BoxId,
    /// Unscaled document coordinates of the caret's top.
    pub x: i32,
    pub y: i32,
    pub height: i32,
}
