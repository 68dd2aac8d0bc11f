//! Scrollbar geometry and chrome for scrolling boxes.
//!
//! Colours and thickness come from the [`RedrawTheme`] of the pass.

use lumen_types::color::{self, Color};
use lumen_types::config::RedrawTheme;
use lumen_types::error::Result;
use lumen_types::geom::{Point, Rect};
use lumen_types::plotter::{PlotStyle, Plotter};

use crate::boxes::BoxNode;

/// Scrollbar presence and the wells and thumbs inside them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollbarGeometry {
    pub vertical: bool,
    pub horizontal: bool,
    /// Vertical well length between the arrow buttons.
    pub well_height: i32,
    /// Thumb offset from the top of the well.
    pub bar_top: i32,
    pub bar_height: i32,
    pub well_width: i32,
    pub bar_left: i32,
    pub bar_width: i32,
}

/// Content reaches past the top or bottom border edge.
pub fn has_vertical_scrollbar(node: &BoxNode) -> bool {
    node.descendant.y0 < -node.border.top
        || node.padding_height() + node.border.bottom < node.descendant.y1
}

/// Content reaches past the left or right border edge.
pub fn has_horizontal_scrollbar(node: &BoxNode) -> bool {
    node.descendant.x0 < -node.border.left
        || node.padding_width() + node.border.right < node.descendant.x1
}

/// Compute scrollbar geometry for `node`. `padding_width`,
/// `padding_height` and the bar thickness `w` are in device pixels.
///
/// A box with zero descendant extent along an axis gets a thumb that
/// fills the whole well.
pub fn scrollbar_geometry(
    node: &BoxNode,
    padding_width: i32,
    padding_height: i32,
    w: i32,
) -> ScrollbarGeometry {
    let vertical = has_vertical_scrollbar(node);
    let horizontal = has_horizontal_scrollbar(node);
    let d = node.descendant;

    let well_height = padding_height - w - w;
    let (mut bar_top, mut bar_height) = (0, well_height);
    let span_y = d.y1 - d.y0;
    if span_y != 0 {
        bar_top = (well_height as f32 * node.scroll_y as f32 / span_y as f32) as i32;
        bar_height = (well_height as f32 * node.height as f32 / span_y as f32) as i32;
    }

    let well_width = padding_width - w - w - if vertical { w } else { 0 };
    let (mut bar_left, mut bar_width) = (0, well_width);
    let span_x = d.x1 - d.x0;
    if span_x != 0 {
        bar_left = (well_width as f32 * node.scroll_x as f32 / span_x as f32) as i32;
        bar_width = (well_width as f32 * node.width as f32 / span_x as f32) as i32;
    }

    ScrollbarGeometry {
        vertical,
        horizontal,
        well_height,
        bar_top,
        bar_height,
        well_width,
        bar_left,
        bar_width,
    }
}

/// Six-line bevelled outline. Inset boxes are dark on the top-left.
fn bevel(plotter: &mut dyn Plotter, r: Rect, c: Color, inset: bool) -> Result<()> {
    let (c0, c1) = if inset {
        (color::darken(c), color::lighten(c))
    } else {
        (color::lighten(c), color::darken(c))
    };
    let c2 = color::blend(c0, c1);
    let (s0, s1, s2) = (
        PlotStyle::solid_line(c0),
        PlotStyle::solid_line(c1),
        PlotStyle::solid_line(c2),
    );
    let Rect { x0, y0, x1, y1 } = r;
    plotter.line(Point::new(x0, y0), Point::new(x1, y0), &s0)?;
    plotter.line(Point::new(x1, y0), Point::new(x1, y1 + 1), &s1)?;
    plotter.line(Point::new(x1, y0), Point::new(x1, y0 + 1), &s2)?;
    plotter.line(Point::new(x1, y1), Point::new(x0, y1), &s1)?;
    plotter.line(Point::new(x0, y1), Point::new(x0, y0), &s0)?;
    plotter.line(Point::new(x0, y1), Point::new(x0, y1 + 1), &s2)
}

fn triangle(plotter: &mut dyn Plotter, v: [(i32, i32); 3], c: Color) -> Result<()> {
    let pts = v.map(|(x, y)| Point::new(x, y));
    plotter.polygon(&pts, &PlotStyle::fill(c))
}

/// Draw the scrollbars of `node`, whose padding box is at `(x, y)` with
/// device size `padding_width` x `padding_height`.
#[allow(clippy::too_many_arguments)]
pub fn paint_scrollbars(
    plotter: &mut dyn Plotter,
    theme: &RedrawTheme,
    node: &BoxNode,
    scale: f32,
    x: i32,
    y: i32,
    padding_width: i32,
    padding_height: i32,
) -> Result<()> {
    let w = (theme.scrollbar_width as f32 * scale) as i32;
    let g = scrollbar_geometry(node, padding_width, padding_height, w);
    let (fg, bg, arrow) = (theme.scrollbar_fg, theme.scrollbar_bg, theme.scrollbar_arrow);
    let (pw, ph) = (padding_width, padding_height);
    let v1 = i32::from(g.vertical);
    let v2 = if g.vertical { 1 } else { 2 };

    if g.horizontal {
        let top = y + ph - w;
        bevel(plotter, Rect::new(x, top, x + pw - 1, y + ph - 1), bg, true)?;
        // left arrow button
        bevel(plotter, Rect::new(x + 1, top + 1, x + w - 2, y + ph - 2), fg, false)?;
        plotter.rectangle(
            &Rect::new(x + 2, top + 2, x + w - 2, y + ph - 2),
            &PlotStyle::fill(fg),
        )?;
        triangle(
            plotter,
            [
                (x + w / 4, y + ph - w / 2),
                (x + w * 3 / 4, y + ph - w * 3 / 4),
                (x + w * 3 / 4, y + ph - w / 4),
            ],
            arrow,
        )?;
        // well
        plotter.rectangle(
            &Rect::new(x + w - 1, top + 1, x + w + g.well_width + 1 + v1, y + ph - 1),
            &PlotStyle::fill(bg),
        )?;
        // thumb
        let bar_x = x + w + g.bar_left;
        bevel(
            plotter,
            Rect::new(bar_x, top + 1, bar_x + g.bar_width + v1, y + ph - 2),
            fg,
            false,
        )?;
        plotter.rectangle(
            &Rect::new(bar_x + 1, top + 2, bar_x + g.bar_width + v1, y + ph - 2),
            &PlotStyle::fill(fg),
        )?;
        // right arrow button
        let right = x + w + g.well_width;
        bevel(
            plotter,
            Rect::new(right + 2, top + 1, right + w - v2, y + ph - 2),
            fg,
            false,
        )?;
        plotter.rectangle(
            &Rect::new(right + 3, top + 2, right + w - v2, y + ph - 2),
            &PlotStyle::fill(fg),
        )?;
        triangle(
            plotter,
            [
                (right + w * 3 / 4 + v1, y + ph - w / 2),
                (right + w / 4 + v1, y + ph - w * 3 / 4),
                (right + w / 4 + v1, y + ph - w / 4),
            ],
            arrow,
        )?;
    }

    if g.vertical {
        let left = x + pw - w;
        bevel(plotter, Rect::new(left, y, x + pw - 1, y + ph - 1), bg, true)?;
        // up arrow button
        bevel(plotter, Rect::new(left + 1, y + 1, x + pw - 2, y + w - 2), fg, false)?;
        plotter.rectangle(
            &Rect::new(left + 2, y + 2, x + pw - 2, y + w - 2),
            &PlotStyle::fill(fg),
        )?;
        triangle(
            plotter,
            [
                (x + pw - w / 2, y + w / 4),
                (x + pw - w * 3 / 4, y + w * 3 / 4),
                (x + pw - w / 4, y + w * 3 / 4),
            ],
            arrow,
        )?;
        // well
        plotter.rectangle(
            &Rect::new(left + 1, y + w - 1, x + pw - 1, y + ph - w + 1),
            &PlotStyle::fill(bg),
        )?;
        // thumb
        let bar_y = y + w + g.bar_top;
        bevel(
            plotter,
            Rect::new(left + 1, bar_y, x + pw - 2, bar_y + g.bar_height),
            fg,
            false,
        )?;
        plotter.rectangle(
            &Rect::new(left + 2, bar_y + 1, x + pw - 2, bar_y + g.bar_height),
            &PlotStyle::fill(fg),
        )?;
        // down arrow button
        bevel(
            plotter,
            Rect::new(left + 1, y + ph - w + 1, x + pw - 2, y + ph - 2),
            fg,
            false,
        )?;
        plotter.rectangle(
            &Rect::new(left + 2, y + ph - w + 2, x + pw - 2, y + ph - 2),
            &PlotStyle::fill(fg),
        )?;
        let bottom = y + w + g.well_height;
        triangle(
            plotter,
            [
                (x + pw - w / 2, bottom + w * 3 / 4),
                (x + pw - w * 3 / 4, bottom + w / 4),
                (x + pw - w / 4, bottom + w / 4),
            ],
            arrow,
        )?;
    }
    Ok(())
}
