//! Underline, overline and line-through for non-text boxes.
//!
//! Text boxes never decorate themselves. The decorated ancestor draws a
//! line across each text box inside it: for an inline, the text boxes of
//! its run; for a block, every text box reachable through inline
//! containers and nested blocks.

use lumen_types::color::{self, Color};
use lumen_types::error::Result;
use lumen_types::geom::Point;
use lumen_types::plotter::{PlotStyle, Plotter};

use crate::boxes::{BoxId, BoxNode, BoxTree, BoxType};
use crate::inline_run::run_boxes;
use crate::style::TextDecoration;

/// Decoration lines in paint order, with their height as a fraction of
/// the text box height.
fn lines(d: &TextDecoration) -> impl Iterator<Item = f32> {
    [(d.underline, 0.9), (d.overline, 0.1), (d.line_through, 0.5)]
        .into_iter()
        .filter_map(|(on, ratio)| on.then_some(ratio))
}

/// Paint the text decorations of `id`, whose parent's padding box is at
/// `(x_parent, y_parent)`.
#[allow(clippy::too_many_arguments)]
pub fn paint_text_decoration(
    plotter: &mut dyn Plotter,
    tree: &BoxTree,
    id: BoxId,
    x_parent: i32,
    y_parent: i32,
    scale: f32,
    background: Color,
    printing: bool,
) -> Result<()> {
    let node = &tree[id];
    let Some(style) = node.style.as_ref() else {
        return Ok(());
    };
    // Screen output blends toward the background to soften the line.
    let colour = if printing {
        style.color
    } else {
        color::blend(background, style.color)
    };
    let pstyle = PlotStyle::solid_line(colour);

    if node.box_type == BoxType::Inline {
        if node.inline_end.is_none() {
            return Ok(());
        }
        for ratio in lines(&style.text_decoration) {
            for c in run_boxes(tree, id) {
                if tree[c].box_type == BoxType::Text {
                    underline(plotter, &tree[c], x_parent, y_parent, scale, ratio, &pstyle)?;
                }
            }
        }
    } else {
        for ratio in lines(&style.text_decoration) {
            decorate_block(
                plotter,
                tree,
                id,
                x_parent + node.x,
                y_parent + node.y,
                scale,
                ratio,
                &pstyle,
            )?;
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn decorate_block(
    plotter: &mut dyn Plotter,
    tree: &BoxTree,
    id: BoxId,
    x: i32,
    y: i32,
    scale: f32,
    ratio: f32,
    pstyle: &PlotStyle,
) -> Result<()> {
    // Depth-first: (next child to visit, parent origin).
    let mut stack = vec![(tree[id].first_child(), x, y)];
    while let Some(top) = stack.last_mut() {
        let Some(c) = top.0 else {
            stack.pop();
            continue;
        };
        top.0 = tree.next(c);
        let (bx, by) = (top.1, top.2);
        let child = &tree[c];
        match child.box_type {
            BoxType::Text => underline(plotter, child, bx, by, scale, ratio, pstyle)?,
            BoxType::InlineContainer | BoxType::Block => {
                stack.push((child.first_child(), bx + child.x, by + child.y));
            },
            _ => {},
        }
    }
    Ok(())
}

fn underline(
    plotter: &mut dyn Plotter,
    text: &BoxNode,
    x: i32,
    y: i32,
    scale: f32,
    ratio: f32,
    pstyle: &PlotStyle,
) -> Result<()> {
    let ly = ((y + text.y) as f32 + text.height as f32 * ratio) * scale;
    let ly = ly as i32;
    plotter.line(
        Point::new(((x + text.x) as f32 * scale) as i32, ly),
        Point::new(((x + text.x + text.width) as f32 * scale) as i32, ly),
        pstyle,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::{BoxNode, TextRun};
    use crate::record::RecordingPlotter;
    use crate::style::BoxStyle;

    fn decorated(underline: bool, overline: bool, line_through: bool) -> BoxStyle {
        let mut s = BoxStyle::initial();
        s.text_decoration = TextDecoration {
            underline,
            overline,
            line_through,
        };
        s
    }

    fn text(x: i32, y: i32, w: i32) -> BoxNode {
        BoxNode::new(BoxType::Text)
            .with_rect(x, y, w, 20)
            .with_text(TextRun::new("t"))
    }

    #[test]
    fn block_underlines_nested_text() {
        let mut t = BoxTree::new();
        let block = t.add(
            BoxNode::new(BoxType::Block)
                .with_rect(10, 10, 200, 100)
                .with_style(decorated(true, false, false)),
        );
        let ic = t.push(block, BoxNode::new(BoxType::InlineContainer).with_rect(0, 5, 200, 20));
        t.push(ic, text(0, 0, 50));
        t.push(ic, text(60, 0, 30));
        let mut p = RecordingPlotter::new();
        paint_text_decoration(&mut p, &t, block, 0, 0, 1.0, Color::WHITE, false).unwrap();
        // y = 10 + 5 + 0 + 20 * 0.9 = 33
        assert_eq!(
            p.lines(),
            vec![
                (Point::new(10, 33), Point::new(60, 33)),
                (Point::new(70, 33), Point::new(100, 33)),
            ]
        );
    }

    #[test]
    fn nested_blocks_keep_document_order() {
        let mut t = BoxTree::new();
        let block = t.add(
            BoxNode::new(BoxType::Block)
                .with_rect(0, 0, 200, 100)
                .with_style(decorated(false, true, false)),
        );
        let a = t.push(block, BoxNode::new(BoxType::Block).with_rect(0, 0, 200, 20));
        t.push(a, text(1, 0, 10));
        let b = t.push(block, BoxNode::new(BoxType::Block).with_rect(0, 40, 200, 20));
        t.push(b, text(2, 0, 10));
        let mut p = RecordingPlotter::new();
        paint_text_decoration(&mut p, &t, block, 0, 0, 1.0, Color::WHITE, true).unwrap();
        let xs: Vec<i32> = p.lines().iter().map(|l| l.0.x).collect();
        assert_eq!(xs, vec![1, 2]);
    }

    #[test]
    fn inline_decorates_its_run_only() {
        let mut t = BoxTree::new();
        let parent = t.add(BoxNode::new(BoxType::InlineContainer).with_rect(0, 0, 300, 20));
        let inline = t.push(
            parent,
            BoxNode::new(BoxType::Inline).with_style(decorated(false, false, true)),
        );
        t.push(parent, text(0, 0, 40));
        let end = t.push(parent, BoxNode::new(BoxType::InlineEnd));
        t.push(parent, text(100, 0, 40));
        t.set_inline_end(inline, end);
        let mut p = RecordingPlotter::new();
        paint_text_decoration(&mut p, &t, inline, 0, 0, 1.0, Color::WHITE, false).unwrap();
        assert_eq!(p.lines(), vec![(Point::new(0, 10), Point::new(40, 10))]);
    }

    #[test]
    fn inline_without_end_draws_nothing() {
        let mut t = BoxTree::new();
        let parent = t.add(BoxNode::new(BoxType::InlineContainer));
        let inline = t.push(
            parent,
            BoxNode::new(BoxType::Inline).with_style(decorated(true, true, true)),
        );
        t.push(parent, text(0, 0, 40));
        let mut p = RecordingPlotter::new();
        paint_text_decoration(&mut p, &t, inline, 0, 0, 1.0, Color::WHITE, false).unwrap();
        assert!(p.calls.is_empty());
    }

    #[test]
    fn screen_colour_is_blended() {
        let mut t = BoxTree::new();
        let block = t.add(
            BoxNode::new(BoxType::Block)
                .with_rect(0, 0, 100, 20)
                .with_style(decorated(true, false, false)),
        );
        t.push(block, text(0, 0, 10));
        let mut p = RecordingPlotter::new();
        paint_text_decoration(&mut p, &t, block, 0, 0, 1.0, Color::WHITE, false).unwrap();
        let stroke = p.line_styles()[0].stroke_color;
        assert_eq!(stroke, color::blend(Color::WHITE, Color::BLACK));
    }

    #[test]
    fn all_three_lines_in_order() {
        let mut t = BoxTree::new();
        let block = t.add(
            BoxNode::new(BoxType::Block)
                .with_rect(0, 0, 100, 20)
                .with_style(decorated(true, true, true)),
        );
        t.push(block, text(0, 0, 10));
        let mut p = RecordingPlotter::new();
        paint_text_decoration(&mut p, &t, block, 0, 0, 2.0, Color::WHITE, true).unwrap();
        let ys: Vec<i32> = p.lines().iter().map(|l| l.0.y).collect();
        assert_eq!(ys, vec![36, 4, 20]);
    }
}
