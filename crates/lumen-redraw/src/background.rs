//! Background colour and image painting.
//!
//! The root and body boxes share one background: CSS propagates the body
//! background to the canvas when the root has none. Which box owns the
//! background is decided by [`resolve_background_owner`] before anything
//! is painted.

use lumen_types::color::Color;
use lumen_types::error::Result;
use lumen_types::geom::Rect;
use lumen_types::plotter::{PlotStyle, Plotter};

use crate::boxes::{BackgroundImage, BoxId, BoxNode, BoxTree, BoxType};
use crate::collab::ContentDelegate;
use crate::geometry::{BoxGeometry, scale_len};
use crate::inline_run::InlineSegment;
use crate::style::{BoxStyle, PositionValue};

/// Where a box's background comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundSource {
    /// The box paints its own background.
    Own,
    /// The root has no background of its own and paints its first
    /// child's (the body's) instead.
    BorrowFromChild(BoxId),
    /// Nothing to paint.
    None,
}

impl BackgroundSource {
    /// The box supplying the style and image, given the box being drawn.
    pub fn source_box(self, own: BoxId) -> Option<BoxId> {
        match self {
            Self::Own => Some(own),
            Self::BorrowFromChild(child) => Some(child),
            Self::None => None,
        }
    }
}

/// The box has a background colour or image set.
pub fn has_background(node: &BoxNode) -> bool {
    node.background.is_some()
        || node
            .style
            .as_ref()
            .is_some_and(|s| !s.background_color.is_transparent())
}

/// Decide who paints the background of `id`.
pub fn resolve_background_owner(tree: &BoxTree, id: BoxId) -> BackgroundSource {
    let node = &tree[id];
    match node.parent() {
        None => {
            if has_background(node) {
                BackgroundSource::Own
            } else {
                match node.first_child() {
                    Some(child) if has_background(&tree[child]) => {
                        BackgroundSource::BorrowFromChild(child)
                    },
                    _ => BackgroundSource::None,
                }
            }
        },
        Some(parent) if tree.parent(parent).is_none() => {
            // Body: only keeps its background if the root painted its own.
            if has_background(node) && has_background(&tree[parent]) {
                BackgroundSource::Own
            } else {
                BackgroundSource::None
            }
        },
        Some(_) => BackgroundSource::Own,
    }
}

/// The background of `source` can be painted at all.
pub fn paints_background(source: &BoxNode) -> bool {
    if source.style.is_none() || !has_background(source) {
        return false;
    }
    match source.box_type {
        BoxType::Br | BoxType::Text | BoxType::InlineEnd => false,
        BoxType::Inline => source.object.is_some(),
        _ => true,
    }
}

/// Image placement resolved from `background-repeat`.
struct Tiling {
    repeat_x: bool,
    repeat_y: bool,
    plot_colour: bool,
}

fn tiling(style: &BoxStyle, image: &BackgroundImage, content: &dyn ContentDelegate) -> Tiling {
    let (repeat_x, repeat_y) = style.background_repeat.axes();
    Tiling {
        repeat_x,
        repeat_y,
        plot_colour: !(repeat_x && repeat_y && content.is_opaque(image.image)),
    }
}

/// Offset `origin` along one axis. `free` is the device space left over
/// once the image is placed.
fn position(origin: i32, pos: PositionValue, free: f32, scale: f32) -> i32 {
    match pos {
        PositionValue::Percent(pct) => (origin as f32 + free * pct / 100.0) as i32,
        PositionValue::Length(len) => origin + (len * scale) as i32,
    }
}

/// Clip the image to the painted area along non-repeating axes and hand
/// it to the content delegate.
#[allow(clippy::too_many_arguments)]
fn plot_image(
    plotter: &mut dyn Plotter,
    content: &mut dyn ContentDelegate,
    image: &BackgroundImage,
    x: i32,
    y: i32,
    mut clip: Rect,
    t: &Tiling,
    scale: f32,
    background: Color,
) -> Result<()> {
    let w = image.width as f32 * scale;
    let h = image.height as f32 * scale;
    if !t.repeat_x {
        clip.x0 = clip.x0.max(x);
        if clip.x1 as f32 > x as f32 + w {
            clip.x1 = (x as f32 + w) as i32;
        }
    }
    if !t.repeat_y {
        clip.y0 = clip.y0.max(y);
        if clip.y1 as f32 > y as f32 + h {
            clip.y1 = (y as f32 + h) as i32;
        }
    }
    if clip.is_empty() {
        return Ok(());
    }
    plotter.clip(&clip)?;
    content.redraw_tiled(
        plotter,
        image.image,
        x,
        y,
        w.ceil() as i32,
        h.ceil() as i32,
        &clip,
        scale,
        background,
        t.repeat_x,
        t.repeat_y,
    )
}

/// Paint the background of box `id` using the style and image of
/// `source`.
///
/// `area` is the region to fill, already intersected with the current
/// clip. A painted colour becomes the new `background` for anti-aliasing
/// the content above it. The caller restores its clip afterwards.
#[allow(clippy::too_many_arguments)]
pub fn paint_background(
    plotter: &mut dyn Plotter,
    content: &mut dyn ContentDelegate,
    tree: &BoxTree,
    id: BoxId,
    source: BoxId,
    geom: &BoxGeometry,
    area: &Rect,
    scale: f32,
    background: &mut Color,
) -> Result<()> {
    let node = &tree[id];
    let src = &tree[source];
    let Some(style) = src.style.as_ref() else {
        return Ok(());
    };

    let (ox, oy) = (geom.x, geom.y);
    let mut image = None;
    let mut plot_colour = true;
    if let Some(img) = src.background.as_ref() {
        let (mut x, mut y) = (ox, oy);
        let (width, height);
        if node.parent().is_none() {
            // The root positions its background against the margin box.
            x = (x as f32 - node.margin.left as f32 * scale) as i32;
            y = (y as f32 - node.margin.top as f32 * scale) as i32;
            width = node.margin.left + node.padding_width() + node.margin.right;
            height = node.margin.top + node.padding_height() + node.margin.bottom;
        } else {
            width = node.padding_width();
            height = node.padding_height();
        }
        let t = tiling(style, img, content);
        plot_colour = t.plot_colour;
        let pos = style.background_position;
        x = position(x, pos.horz, (width - img.width) as f32 * scale, scale);
        y = position(y, pos.vert, (height - img.height) as f32 * scale, scale);
        image = Some((img, x, y, t));
    }

    // With border-spacing, a row's background only shows through its
    // cells.
    let clip_to_cells = node.box_type == BoxType::TableRow
        && tree
            .ancestor_of_type(id, BoxType::Table)
            .and_then(|t| tree[t].style.as_ref())
            .is_some_and(|s| s.border_spacing.horz > 0 || s.border_spacing.vert > 0);

    let mut areas = Vec::new();
    if clip_to_cells {
        for cell_id in tree.children(id) {
            let cell = &tree[cell_id];
            let x0 = (ox as f32 + cell.x as f32 * scale) as i32;
            let y0 = (oy as f32 + cell.y as f32 * scale) as i32;
            let x1 = (x0 as f32 + cell.padding_width() as f32 * scale) as i32;
            let y1 = (y0 as f32 + cell.padding_height() as f32 * scale) as i32;
            let c = Rect::new(x0, y0, x1, y1).intersect(area);
            // Cell backgrounds override the row's.
            let cell_opaque = cell
                .style
                .as_ref()
                .is_some_and(|s| !s.background_color.is_transparent())
                || cell
                    .background
                    .as_ref()
                    .is_some_and(|b| content.is_opaque(b.image));
            if c.is_empty() || cell_opaque {
                continue;
            }
            areas.push(c);
        }
    } else {
        areas.push(*area);
    }

    for clip in areas {
        if !style.background_color.is_transparent() {
            *background = style.background_color;
            if plot_colour {
                plotter.rectangle(&clip, &PlotStyle::fill(style.background_color))?;
            }
        }
        if let Some((img, x, y, t)) = image.as_ref() {
            plot_image(plotter, content, img, *x, *y, clip, t, scale, *background)?;
        }
    }
    Ok(())
}

/// Paint the background of one line segment of an inline run.
///
/// `clip` is the segment intersected with the current clip. Percentage
/// positions are relative to the segment. A non-repeating image pinned to
/// the left edge only appears on the first line, and one pinned to the
/// right edge only on the last.
#[allow(clippy::too_many_arguments)]
pub fn paint_inline_background(
    plotter: &mut dyn Plotter,
    content: &mut dyn ContentDelegate,
    node: &BoxNode,
    style: &BoxStyle,
    segment: &InlineSegment,
    clip: &Rect,
    scale: f32,
    background: &mut Color,
) -> Result<()> {
    let seg = segment.rect;
    let mut plot_colour = true;
    let mut image = None;
    if let Some(img) = node.background.as_ref() {
        let t = tiling(style, img, content);
        plot_colour = t.plot_colour;
        let mut x = seg.x0;
        if segment.first {
            x += scale_len(node.border.left, scale);
        }
        let y = seg.y0 + scale_len(node.border.top, scale);
        let pos = style.background_position;
        let free_x = seg.width() as f32 - img.width as f32 * scale;
        let free_y = seg.height() as f32 - img.height as f32 * scale;
        let x = position(x, pos.horz, free_x, scale);
        let y = position(y, pos.vert, free_y, scale);

        let suppressed = match pos.horz {
            PositionValue::Percent(pct) if !t.repeat_x => {
                (pct < 2.0 && !segment.first) || (pct > 98.0 && !segment.last)
            },
            _ => false,
        };
        if !suppressed {
            image = Some((img, x, y, t));
        }
    }

    if !style.background_color.is_transparent() {
        *background = style.background_color;
        if plot_colour {
            plotter.rectangle(clip, &PlotStyle::fill(style.background_color))?;
        }
    }
    if let Some((img, x, y, t)) = image {
        plot_image(plotter, content, img, x, y, *clip, &t, scale, *background)?;
    }
    Ok(())
}
