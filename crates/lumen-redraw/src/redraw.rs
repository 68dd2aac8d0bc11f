//! The redraw walker: turns a laid-out [`Document`] into plot calls.
//!
//! A pass covers one clip rectangle at one scale. Each visible box is
//! painted in this order:
//!
//! 1. Group start, then debug outlines if enabled
//! 2. Clip to the box's extent (blocks, inline blocks, table cells, objects)
//! 3. Background
//! 4. Borders, or per-line backgrounds and borders for an inline run
//! 5. Clip to the padding box when overflow is not visible
//! 6. Text decoration
//! 7. Content: embedded object, form control, text run or children
//! 8. List marker
//! 9. Scrollbars, clip restore and group end
//!
//! The walk keeps its own work stack instead of recursing, so document
//! depth is bounded by memory rather than by the call stack. Steps 8 and
//! 9 are queued beneath a box's children and run once they are done.
//!
//! Any failing plot call or collaborator ends the pass at once. The
//! plotter may have drawn part of the page by then.

use lumen_types::color::Color;
use lumen_types::config::{RedrawOptions, RedrawTheme};
use lumen_types::error::Result;
use lumen_types::geom::Rect;
use lumen_types::plotter::{PlotStyle, Plotter};

use crate::background::{
    has_background, paint_background, paint_inline_background, paints_background,
    resolve_background_owner,
};
use crate::border::{paint_borders, paint_inline_borders};
use crate::boxes::{BoxId, BoxNode, BoxTree, BoxType, Document, Gadget};
use crate::collab::{Caret, ContentDelegate, FontMetrics, HighlightProvider};
use crate::decoration::paint_text_decoration;
use crate::form::{paint_checkbox, paint_file, paint_radio};
use crate::geometry::{BoxGeometry, scale_edges};
use crate::inline_run::InlineSegments;
use crate::print::PrintSession;
use crate::scrollbar::paint_scrollbars;
use crate::style::{INITIAL_STYLE, Visibility};
use crate::text::{Highlights, paint_caret, paint_text_run};

// -------------------------------------------------------------------
// Context
// -------------------------------------------------------------------

/// Everything a redraw pass draws with, beyond the document itself.
///
/// Built fresh for each pass. The plotter belongs to this pass alone for
/// as long as the context lives.
pub struct RedrawContext<'a> {
    plotter: &'a mut dyn Plotter,
    fonts: &'a dyn FontMetrics,
    content: &'a mut dyn ContentDelegate,
    theme: RedrawTheme,
    options: RedrawOptions,
    highlights: Highlights<'a>,
    caret: Option<Caret>,
    print: Option<&'a mut PrintSession>,
}

impl<'a> RedrawContext<'a> {
    pub fn new(
        plotter: &'a mut dyn Plotter,
        fonts: &'a dyn FontMetrics,
        content: &'a mut dyn ContentDelegate,
    ) -> Self {
        Self {
            plotter,
            fonts,
            content,
            theme: RedrawTheme::default(),
            options: RedrawOptions::default(),
            highlights: Highlights::default(),
            caret: None,
            print: None,
        }
    }

    pub fn with_theme(mut self, theme: RedrawTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_options(mut self, options: RedrawOptions) -> Self {
        self.options = options;
        self
    }

    /// Highlight the current selection.
    pub fn with_selection(mut self, selection: &'a dyn HighlightProvider) -> Self {
        self.highlights.selection = Some(selection);
        self
    }

    /// Highlight the current search match. Selection takes precedence.
    pub fn with_search(mut self, search: &'a dyn HighlightProvider) -> Self {
        self.highlights.search = Some(search);
        self
    }

    pub fn with_caret(mut self, caret: Caret) -> Self {
        self.caret = Some(caret);
        self
    }

    /// Draw one page of a print job.
    pub fn with_print(mut self, session: &'a mut PrintSession) -> Self {
        self.print = Some(session);
        self
    }

    pub fn printing(&self) -> bool {
        self.print.is_some()
    }

    pub fn theme(&self) -> &RedrawTheme {
        &self.theme
    }

    fn skip_backgrounds(&self) -> bool {
        self.printing() && self.options.remove_backgrounds_when_printing
    }
}

// -------------------------------------------------------------------
// Entry points
// -------------------------------------------------------------------

/// Redraw `document` with its root at `(x, y)`, limited to `clip`.
///
/// The clip is first filled with the document's canvas colour, or with
/// `background` when the document has none.
pub fn redraw(
    document: &Document,
    ctx: &mut RedrawContext<'_>,
    x: i32,
    y: i32,
    clip: &Rect,
    scale: f32,
    background: Color,
) -> Result<()> {
    log::debug!(
        "redraw: {} boxes, clip {:?}, scale {scale}",
        document.tree.len(),
        clip
    );
    ctx.plotter.clip(clip)?;
    let fill = if document.background_color.is_transparent() {
        background
    } else {
        document.background_color
    };
    if !fill.is_transparent() {
        ctx.plotter.rectangle(clip, &PlotStyle::fill(fill))?;
    }

    redraw_box(&document.tree, document.root, ctx, x, y, clip, scale, fill)?;

    if let Some(print) = ctx.print.as_deref() {
        log::debug!(
            "print page done: {} boxes printed, next page from {:?}",
            print.printed_count(),
            print.top_cropped()
        );
    }
    log::debug!("redraw done");
    Ok(())
}

/// Redraw the subtree at `id`, whose parent's padding box is at
/// `(x_parent, y_parent)` in unscaled document units.
#[allow(clippy::too_many_arguments)]
pub fn redraw_box(
    tree: &BoxTree,
    id: BoxId,
    ctx: &mut RedrawContext<'_>,
    x_parent: i32,
    y_parent: i32,
    clip: &Rect,
    scale: f32,
    background: Color,
) -> Result<()> {
    let mut stack = vec![Task::Visit(Visit {
        id,
        x_parent,
        y_parent,
        clip: *clip,
        background,
    })];
    while let Some(task) = stack.pop() {
        match task {
            Task::Visit(v) => visit(ctx, tree, v, scale, &mut stack)?,
            Task::Finish(f) => finish(ctx, tree, &f, scale)?,
            Task::EndGroup => ctx.plotter.group_end()?,
        }
    }
    Ok(())
}

/// Device-space area covered by `node` and everything below it.
///
/// A box that clips its overflow covers only its border box. The root also
/// covers its margins, since it paints the canvas.
pub fn visual_extent(node: &BoxNode, geom: &BoxGeometry, scale: f32) -> Rect {
    if node.style.as_ref().is_some_and(|s| s.overflow.clips()) {
        return geom.border_box();
    }
    let at = |base: i32, v: i32| {
        if scale == 1.0 {
            base + v
        } else {
            (base as f32 + v as f32 * scale) as i32
        }
    };
    let d = node.descendant;
    let extent = Rect::new(
        at(geom.x, d.x0),
        at(geom.y, d.y0),
        at(geom.x, d.x1) + 1,
        at(geom.y, d.y1) + 1,
    );
    if node.parent().is_none() {
        extent.union(&geom.margin_box(&scale_edges(&node.margin, scale)))
    } else {
        extent
    }
}

// -------------------------------------------------------------------
// Walker
// -------------------------------------------------------------------

enum Task {
    Visit(Visit),
    Finish(Finish),
    EndGroup,
}

struct Visit {
    id: BoxId,
    x_parent: i32,
    y_parent: i32,
    clip: Rect,
    background: Color,
}

/// Work left for a box once its content and marker are drawn.
struct Finish {
    id: BoxId,
    geom: BoxGeometry,
    entry_clip: Rect,
    clips_self: bool,
}

/// Box types that set the plotter clip to their own extent.
fn clips_self(node: &BoxNode) -> bool {
    node.object.is_some()
        || matches!(
            node.box_type,
            BoxType::Block | BoxType::InlineBlock | BoxType::TableCell
        )
}

/// Boxes that must not be split across a page edge.
fn keeps_together(node: &BoxNode) -> bool {
    node.object.is_some()
        || node.gadget.is_some()
        || matches!(node.box_type, BoxType::Text | BoxType::TableCell)
}

fn paints_own_border(node: &BoxNode) -> bool {
    match node.box_type {
        BoxType::Text | BoxType::InlineEnd => false,
        BoxType::Inline => node.object.is_some(),
        _ => true,
    }
}

/// Queue the children of `id`: normal flow first, then floats.
fn push_children(
    stack: &mut Vec<Task>,
    tree: &BoxTree,
    id: BoxId,
    x_parent: i32,
    y_parent: i32,
    clip: Rect,
    background: Color,
) {
    let flow: Vec<BoxId> = tree
        .children(id)
        .filter(|&c| !tree[c].box_type.is_float())
        .collect();
    let floats = tree[id].float_children().iter().rev().copied();
    for child in floats.chain(flow.into_iter().rev()) {
        stack.push(Task::Visit(Visit {
            id: child,
            x_parent,
            y_parent,
            clip,
            background,
        }));
    }
}

fn visit(
    ctx: &mut RedrawContext<'_>,
    tree: &BoxTree,
    v: Visit,
    scale: f32,
    stack: &mut Vec<Task>,
) -> Result<()> {
    let Visit {
        id,
        x_parent,
        y_parent,
        clip: entry_clip,
        mut background,
    } = v;
    let node = &tree[id];

    if ctx.print.as_deref().is_some_and(|p| p.is_printed(id)) {
        return Ok(());
    }

    let geom = BoxGeometry::compute(node, x_parent, y_parent, scale);
    let extent = visual_extent(node, &geom, scale);
    if !extent.intersects(&entry_clip) {
        log::trace!("box {} at {:?} outside clip", id.0, extent);
        return Ok(());
    }

    if let Some(print) = ctx.print.as_deref_mut() {
        let bottom = print.page_bottom();
        if extent.y1 > bottom {
            if extent.height() <= bottom && keeps_together(node) {
                log::trace!("box {} deferred to next page from y {}", id.0, extent.y0);
                print.defer(extent.y0);
                return Ok(());
            }
        } else {
            print.mark_printed(id);
        }
    }

    // Children's origin: this box's padding box, less its scroll offset.
    let child_x = x_parent + node.x - node.scroll_x;
    let child_y = y_parent + node.y - node.scroll_y;
    let style = node.style.as_ref();

    if style.is_some_and(|s| s.visibility == Visibility::Hidden) {
        ctx.plotter.group_start("hidden box")?;
        stack.push(Task::EndGroup);
        push_children(
            stack,
            tree,
            id,
            child_x,
            child_y,
            entry_clip.intersect(&extent),
            background,
        );
        return Ok(());
    }

    ctx.plotter.group_start("vis box")?;
    if ctx.options.debug_outlines {
        paint_debug_outlines(ctx.plotter, &ctx.theme, node, &geom, scale)?;
    }

    let clips_self = clips_self(node);
    let clip = if clips_self {
        let clip = extent.intersect(&entry_clip);
        if clip.is_empty() {
            return ctx.plotter.group_end();
        }
        ctx.plotter.clip(&clip)?;
        clip
    } else {
        entry_clip
    };

    if !ctx.skip_backgrounds() {
        let source = resolve_background_owner(tree, id);
        if let Some(src) = source.source_box(id)
            && paints_background(&tree[src])
        {
            let mut area = geom.border_box().intersect(&clip);
            if node.parent().is_none() {
                // The root's background covers its margins too.
                let m = scale_edges(&node.margin, scale);
                area = Rect::new(
                    (area.x0 - m.left).max(clip.x0),
                    (area.y0 - m.top).max(clip.y0),
                    (area.x1 + m.right).min(clip.x1),
                    (area.y1 + m.bottom).min(clip.y1),
                );
            }
            if !area.is_empty() {
                paint_background(
                    ctx.plotter,
                    ctx.content,
                    tree,
                    id,
                    src,
                    &geom,
                    &area,
                    scale,
                    &mut background,
                )?;
                ctx.plotter.clip(&clip)?;
            }
        }
    }

    if let Some(style) = style {
        if paints_own_border(node) && !geom.border.is_zero() {
            paint_borders(ctx.plotter, node, style, &geom)?;
        }
        if node.box_type == BoxType::Inline
            && node.inline_end.is_some()
            && (has_background(node) || !geom.border.is_zero())
        {
            let skip_backgrounds = ctx.skip_backgrounds();
            for seg in InlineSegments::new(tree, id, &geom, x_parent, y_parent, scale) {
                let seg_clip = seg.rect.intersect(&clip);
                if !skip_backgrounds && !seg_clip.is_empty() {
                    paint_inline_background(
                        ctx.plotter,
                        ctx.content,
                        node,
                        style,
                        &seg,
                        &seg_clip,
                        scale,
                        &mut background,
                    )?;
                    ctx.plotter.clip(&clip)?;
                }
                paint_inline_borders(ctx.plotter, node, style, &seg.rect, scale, seg.first, seg.last)?;
            }
        }
    }

    let mut content_clip = clip;
    if style.is_some_and(|s| s.overflow.clips()) {
        content_clip = geom.padding_box().intersect(&entry_clip);
        if content_clip.is_empty() {
            if clips_self {
                ctx.plotter.clip(&entry_clip)?;
            }
            return ctx.plotter.group_end();
        }
        if clips_self {
            ctx.plotter.clip(&content_clip)?;
        }
    }

    if node.box_type != BoxType::Text
        && style.is_some_and(|s| !s.text_decoration.is_none())
    {
        let printing = ctx.printing();
        paint_text_decoration(
            ctx.plotter,
            tree,
            id,
            x_parent,
            y_parent,
            scale,
            background,
            printing,
        )?;
    }

    let descend = paint_content(ctx, tree, id, &geom, &content_clip, scale, background)?;

    stack.push(Task::Finish(Finish {
        id,
        geom,
        entry_clip,
        clips_self,
    }));
    if let Some(marker) = node.list_marker {
        stack.push(Task::Visit(Visit {
            id: marker,
            x_parent: child_x,
            y_parent: child_y,
            clip: entry_clip,
            background,
        }));
    }
    if descend {
        push_children(stack, tree, id, child_x, child_y, content_clip, background);
    }
    Ok(())
}

/// Draw the box's own content. Returns `true` when the content is its
/// children, which the caller queues.
fn paint_content(
    ctx: &mut RedrawContext<'_>,
    tree: &BoxTree,
    id: BoxId,
    geom: &BoxGeometry,
    clip: &Rect,
    scale: f32,
    background: Color,
) -> Result<bool> {
    let node = &tree[id];
    let (x, y) = (geom.x + geom.padding_left, geom.y + geom.padding_top);

    if let Some(object) = node.object {
        let sx = (geom.x as f32 - node.scroll_x as f32 * scale) as i32;
        let sy = (geom.y as f32 - node.scroll_y as f32 * scale) as i32;
        ctx.content.redraw_object(
            ctx.plotter,
            object,
            sx + geom.padding_left,
            sy + geom.padding_top,
            geom.width,
            geom.height,
            clip,
            scale,
            background,
        )?;
        return Ok(false);
    }

    if let Some(gadget) = &node.gadget {
        match gadget {
            Gadget::Checkbox { selected } => {
                paint_checkbox(ctx.plotter, &ctx.theme, x, y, geom.width, geom.height, *selected)?;
            },
            Gadget::Radio { selected } => {
                paint_radio(ctx.plotter, &ctx.theme, x, y, geom.width, geom.height, *selected)?;
            },
            Gadget::File { value } => {
                let style = node.style.as_ref().unwrap_or(&INITIAL_STYLE);
                paint_file(
                    ctx.plotter,
                    ctx.fonts,
                    &ctx.theme,
                    style,
                    value.as_deref(),
                    x,
                    y,
                    geom.width,
                    geom.height,
                    scale,
                    background,
                )?;
            },
        }
        return Ok(false);
    }

    if let Some(run) = &node.text {
        let style = node.style.as_ref().unwrap_or(&INITIAL_STYLE);
        paint_text_run(
            ctx.plotter,
            ctx.fonts,
            &ctx.highlights,
            run,
            &style.font,
            style.color,
            geom.x,
            geom.y,
            clip,
            node.height,
            scale,
            background,
            false,
        )?;
        if let Some(caret) = ctx.caret
            && caret.text_box == id
        {
            paint_caret(ctx.plotter, &caret, ctx.theme.caret, scale)?;
        }
        return Ok(false);
    }

    Ok(true)
}

fn finish(ctx: &mut RedrawContext<'_>, tree: &BoxTree, f: &Finish, scale: f32) -> Result<()> {
    let node = &tree[f.id];
    if let Some(style) = node.style.as_ref()
        && style.overflow.scrolls()
        && !matches!(node.box_type, BoxType::Br | BoxType::Table | BoxType::Inline)
    {
        paint_scrollbars(
            ctx.plotter,
            &ctx.theme,
            node,
            scale,
            f.geom.x,
            f.geom.y,
            f.geom.padding_width,
            f.geom.padding_height,
        )?;
    }
    if f.clips_self {
        ctx.plotter.clip(&f.entry_clip)?;
    }
    ctx.plotter.group_end()
}

/// Stroke the padding, content and margin boxes.
fn paint_debug_outlines(
    plotter: &mut dyn Plotter,
    theme: &RedrawTheme,
    node: &BoxNode,
    geom: &BoxGeometry,
    scale: f32,
) -> Result<()> {
    plotter.rectangle(
        &geom.padding_box(),
        &PlotStyle::solid_line(theme.debug_padding),
    )?;
    plotter.rectangle(
        &geom.content_box(),
        &PlotStyle::solid_line(theme.debug_content),
    )?;
    plotter.rectangle(
        &geom.margin_box(&scale_edges(&node.margin, scale)),
        &PlotStyle::solid_line(theme.debug_margin),
    )
}
