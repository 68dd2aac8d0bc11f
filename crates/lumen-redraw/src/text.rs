//! Text runs with selection/search highlighting, and the caret.

use std::ops::Range;

use lumen_types::color::Color;
use lumen_types::error::Result;
use lumen_types::geom::{Point, Rect};
use lumen_types::plotter::{FontStyle, PlotStyle, Plotter};

use crate::boxes::TextRun;
use crate::collab::{Caret, FontMetrics, HighlightProvider};

/// Current selection and search match, consulted in that order.
#[derive(Clone, Copy, Default)]
pub struct Highlights<'a> {
    pub selection: Option<&'a dyn HighlightProvider>,
    pub search: Option<&'a dyn HighlightProvider>,
}

impl Highlights<'_> {
    pub const NONE: Highlights<'static> = Highlights {
        selection: None,
        search: None,
    };

    /// Highlighted sub-range of the document span `[start, end)`,
    /// relative to `start`. Selection wins over search.
    pub fn find(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        self.selection
            .and_then(|s| s.highlighted(start, end))
            .or_else(|| self.search.and_then(|s| s.highlighted(start, end)))
    }
}

/// A piece of a text run drawn in one colour scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub bytes: Range<usize>,
    /// Device-space offset of the segment from the start of the run.
    pub x0: i32,
    /// End offset. The trailing segment runs to the clip edge.
    pub x1: i32,
    pub highlighted: bool,
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    idx = idx.min(text.len());
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn measure(fonts: &dyn FontMetrics, font: &FontStyle, text: &str) -> i32 {
    fonts.width(font, text).unwrap_or_else(|| {
        log::warn!("font measurement failed for {} bytes of text", text.len());
        0
    })
}

/// Split a run into the parts before, inside and after the highlighted
/// byte range `[start, end)`.
///
/// `end` may exceed the text length by one when the trailing space is
/// highlighted; the space widens the highlight but is not drawn. Indices
/// that fall inside a UTF-8 sequence snap back to the previous boundary.
pub fn split_highlight(
    fonts: &dyn FontMetrics,
    font: &FontStyle,
    run: &TextRun,
    (start, end): (usize, usize),
    scale: f32,
) -> Vec<TextSegment> {
    let text = run.text.as_str();
    let len = text.len();
    let start = floor_char_boundary(text, start);
    let end_txt = floor_char_boundary(text, end).max(start);

    let mut startx = if start > 0 {
        measure(fonts, font, &text[..start])
    } else {
        0
    };
    let mut endx = measure(fonts, font, &text[..end_txt]);
    if end > len {
        if let Some(space) = fonts.width(font, " ") {
            endx += space;
        }
    }
    if scale != 1.0 {
        startx = (startx as f32 * scale) as i32;
        endx = (endx as f32 * scale) as i32;
    }

    let mut out = Vec::with_capacity(3);
    if start > 0 {
        out.push(TextSegment {
            bytes: 0..start,
            x0: 0,
            x1: startx,
            highlighted: false,
        });
    }
    out.push(TextSegment {
        bytes: start..end_txt,
        x0: startx,
        x1: endx,
        highlighted: true,
    });
    if end_txt < len {
        out.push(TextSegment {
            bytes: end_txt..len,
            x0: endx,
            x1: i32::MAX,
            highlighted: false,
        });
    }
    out
}

/// Paint a text run with its top-left at `(x, y)`.
///
/// `height` is the unscaled line height; the baseline sits three quarters
/// of the way down. Runs belonging to an embedded object are `excluded`
/// from highlighting.
#[allow(clippy::too_many_arguments)]
pub fn paint_text_run(
    plotter: &mut dyn Plotter,
    fonts: &dyn FontMetrics,
    highlights: &Highlights<'_>,
    run: &TextRun,
    font: &FontStyle,
    color: Color,
    x: i32,
    y: i32,
    clip: &Rect,
    height: i32,
    scale: f32,
    background: Color,
    excluded: bool,
) -> Result<()> {
    let baseline = y + (height as f32 * 0.75 * scale) as i32;
    let span_len = run.text.len() + usize::from(run.trailing_space);
    let range = if excluded {
        None
    } else {
        highlights.find(run.byte_offset, run.byte_offset + span_len)
    };
    let Some(range) = range else {
        return plotter.text(x, baseline, font, &run.text, background, color);
    };

    let fill = if background.is_light() {
        Color::BLACK
    } else {
        Color::WHITE
    };
    for seg in split_highlight(fonts, font, run, range, scale) {
        if seg.highlighted {
            let bottom = (y as f32 + height as f32 * scale) as i32;
            plotter.rectangle(
                &Rect::new(x + seg.x0, y, x + seg.x1, bottom),
                &PlotStyle::fill(fill),
            )?;
        }
        let visible = Rect::new(
            clip.x0.max(x.saturating_add(seg.x0)),
            clip.y0,
            clip.x1.min(x.saturating_add(seg.x1)),
            clip.y1,
        );
        if visible.is_empty() || seg.bytes.is_empty() {
            continue;
        }
        let (bg, fg) = if seg.highlighted {
            (fill, fill.inverted())
        } else {
            (background, color)
        };
        plotter.clip(&visible)?;
        plotter.text(x + seg.x0, baseline, font, &run.text[seg.bytes], bg, fg)?;
        plotter.clip(clip)?;
    }
    Ok(())
}

/// Draw the caret as an I-beam.
pub fn paint_caret(plotter: &mut dyn Plotter, caret: &Caret, color: Color, scale: f32) -> Result<()> {
    let s = |v: i32| (v as f32 * scale) as i32;
    let (xc, y) = (caret.x, caret.y);
    let h = caret.height - 1;
    let w = (h + 7) / 8;
    let style = PlotStyle::solid_line(color);
    plotter.line(Point::new(s(xc), s(y)), Point::new(s(xc), s(y + h)), &style)?;
    plotter.line(Point::new(s(xc - w), s(y)), Point::new(s(xc + w), s(y)), &style)?;
    plotter.line(
        Point::new(s(xc - w), s(y + h)),
        Point::new(s(xc + w), s(y + h)),
        &style,
    )
}
