//! Recording collaborators.
//!
//! [`RecordingPlotter`] keeps every plot call as a [`PlotCall`] instead of
//! drawing it. It backs the unit tests and the benchmark, and the
//! `lumen-dump` binary prints its recording as JSON.
//! [`RecordingContent`] does the same for embedded objects and tiled
//! background images.

use std::collections::HashSet;

use serde::Serialize;

use lumen_types::color::Color;
use lumen_types::error::{RedrawError, Result};
use lumen_types::geom::{Point, Rect};
use lumen_types::plotter::{FontStyle, PlotStyle, Plotter};

use crate::collab::{ContentDelegate, ImageId, ObjectId};

/// A recorded plot call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PlotCall {
    Clip(Rect),
    Rectangle {
        rect: Rect,
        style: PlotStyle,
    },
    Line {
        from: Point,
        to: Point,
        style: PlotStyle,
    },
    Polygon {
        points: Vec<Point>,
        style: PlotStyle,
    },
    Disc {
        cx: i32,
        cy: i32,
        radius: i32,
        style: PlotStyle,
    },
    Arc {
        cx: i32,
        cy: i32,
        radius: i32,
        angle1: i32,
        angle2: i32,
        style: PlotStyle,
    },
    Text {
        x: i32,
        y: i32,
        font: FontStyle,
        text: String,
        background: Color,
        foreground: Color,
    },
    GroupStart {
        name: String,
    },
    GroupEnd,
}

impl PlotCall {
    /// Clip changes and groups, which put nothing on the page.
    pub fn is_bookkeeping(&self) -> bool {
        matches!(self, Self::Clip(_) | Self::GroupStart { .. } | Self::GroupEnd)
    }
}

/// A plotter that records all calls for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingPlotter {
    pub calls: Vec<PlotCall>,
    /// Fail every call once this many calls have been recorded.
    pub fail_after: Option<usize>,
    /// Calls turned away by `fail_after`.
    pub refused: usize,
}

impl RecordingPlotter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A plotter that accepts `n` calls and fails from then on.
    pub fn failing_after(n: usize) -> Self {
        Self {
            calls: Vec::new(),
            fail_after: Some(n),
            refused: 0,
        }
    }

    fn record(&mut self, call: PlotCall) -> Result<()> {
        if self.fail_after.is_some_and(|n| self.calls.len() >= n) {
            self.refused += 1;
            return Err(RedrawError::Plotter(format!(
                "recording plotter refused call {}",
                self.calls.len() + 1
            )));
        }
        self.calls.push(call);
        Ok(())
    }

    /// Calls that put something on the page.
    pub fn drawing_calls(&self) -> Vec<&PlotCall> {
        self.calls.iter().filter(|c| !c.is_bookkeeping()).collect()
    }

    pub fn rectangles(&self) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PlotCall::Rectangle { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn rectangle_fills(&self) -> Vec<Color> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PlotCall::Rectangle { style, .. } => Some(style.fill_color),
                _ => None,
            })
            .collect()
    }

    pub fn polygons(&self) -> Vec<Vec<Point>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PlotCall::Polygon { points, .. } => Some(points.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn polygon_fills(&self) -> Vec<Color> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PlotCall::Polygon { style, .. } => Some(style.fill_color),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<(Point, Point)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PlotCall::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn line_styles(&self) -> Vec<PlotStyle> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PlotCall::Line { style, .. } => Some(*style),
                _ => None,
            })
            .collect()
    }

    /// `(x, y, text)` of every text call.
    pub fn texts(&self) -> Vec<(i32, i32, String)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PlotCall::Text { x, y, text, .. } => Some((*x, *y, text.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn clips(&self) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PlotCall::Clip(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    /// Group names in the order they were opened.
    pub fn groups(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PlotCall::GroupStart { name } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&PlotCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Plotter for RecordingPlotter {
    fn clip(&mut self, clip: &Rect) -> Result<()> {
        self.record(PlotCall::Clip(*clip))
    }

    fn rectangle(&mut self, rect: &Rect, style: &PlotStyle) -> Result<()> {
        self.record(PlotCall::Rectangle {
            rect: *rect,
            style: *style,
        })
    }

    fn line(&mut self, from: Point, to: Point, style: &PlotStyle) -> Result<()> {
        self.record(PlotCall::Line {
            from,
            to,
            style: *style,
        })
    }

    fn polygon(&mut self, points: &[Point], style: &PlotStyle) -> Result<()> {
        self.record(PlotCall::Polygon {
            points: points.to_vec(),
            style: *style,
        })
    }

    fn text(
        &mut self,
        x: i32,
        y: i32,
        font: &FontStyle,
        text: &str,
        background: Color,
        foreground: Color,
    ) -> Result<()> {
        self.record(PlotCall::Text {
            x,
            y,
            font: *font,
            text: text.to_string(),
            background,
            foreground,
        })
    }

    fn disc(&mut self, cx: i32, cy: i32, radius: i32, style: &PlotStyle) -> Result<()> {
        self.record(PlotCall::Disc {
            cx,
            cy,
            radius,
            style: *style,
        })
    }

    fn arc(
        &mut self,
        cx: i32,
        cy: i32,
        radius: i32,
        angle1: i32,
        angle2: i32,
        style: &PlotStyle,
    ) -> Result<()> {
        self.record(PlotCall::Arc {
            cx,
            cy,
            radius,
            angle1,
            angle2,
            style: *style,
        })
    }

    fn group_start(&mut self, name: &str) -> Result<()> {
        self.record(PlotCall::GroupStart {
            name: name.to_string(),
        })
    }

    fn group_end(&mut self) -> Result<()> {
        self.record(PlotCall::GroupEnd)
    }
}

// ------------------------------------------------------------------
// Content
// ------------------------------------------------------------------

/// A recorded embedded-object redraw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectCall {
    pub object: ObjectId,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub clip: Rect,
    pub background: Color,
}

/// A recorded tiled-image redraw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileCall {
    pub image: ImageId,
    pub x: i32,
    pub y: i32,
    pub tile_width: i32,
    pub tile_height: i32,
    pub clip: Rect,
    pub background: Color,
    pub repeat_x: bool,
    pub repeat_y: bool,
}

/// A content delegate that records requests instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingContent {
    pub objects: Vec<ObjectCall>,
    pub tiles: Vec<TileCall>,
    /// Images reported as opaque.
    pub opaque: HashSet<ImageId>,
}

impl ContentDelegate for RecordingContent {
    fn redraw_object(
        &mut self,
        _plotter: &mut dyn Plotter,
        object: ObjectId,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        clip: &Rect,
        _scale: f32,
        background: Color,
    ) -> Result<()> {
        self.objects.push(ObjectCall {
            object,
            x,
            y,
            width,
            height,
            clip: *clip,
            background,
        });
        Ok(())
    }

    fn redraw_tiled(
        &mut self,
        _plotter: &mut dyn Plotter,
        image: ImageId,
        x: i32,
        y: i32,
        tile_width: i32,
        tile_height: i32,
        clip: &Rect,
        _scale: f32,
        background: Color,
        repeat_x: bool,
        repeat_y: bool,
    ) -> Result<()> {
        self.tiles.push(TileCall {
            image,
            x,
            y,
            tile_width,
            tile_height,
            clip: *clip,
            background,
            repeat_x,
            repeat_y,
        });
        Ok(())
    }

    fn is_opaque(&self, image: ImageId) -> bool {
        self.opaque.contains(&image)
    }
}
