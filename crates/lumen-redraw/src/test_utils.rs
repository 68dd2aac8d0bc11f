//! Shared test utilities for the redraw modules.
//!
//! Tree builders for the common shapes (a root with a body, a styled
//! block) and a font source that always fails.

use lumen_types::color::Color;
use lumen_types::plotter::FontStyle;

use crate::boxes::{BoxId, BoxNode, BoxTree, BoxType, Document, EdgeSizes};
use crate::collab::FontMetrics;
use crate::style::{BorderSide, BorderStyle, BoxStyle};

/// Font metrics that can never measure anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingFonts;

impl FontMetrics for FailingFonts {
    fn width(&self, _font: &FontStyle, _text: &str) -> Option<i32> {
        None
    }
}

/// Style with a background colour and a uniform border.
pub fn boxed_style(background: Color, border: BorderStyle, border_color: Color) -> BoxStyle {
    BoxStyle::initial()
        .with_background(background)
        .with_border(BorderSide::new(border_color, border))
}

/// A styled block at `(x, y)` with content size `w` x `h` and uniform
/// border width `b`.
pub fn block(x: i32, y: i32, w: i32, h: i32, b: i32, style: BoxStyle) -> BoxNode {
    BoxNode::new(BoxType::Block)
        .with_rect(x, y, w, h)
        .with_border(EdgeSizes::uniform(b))
        .with_style(style)
}

/// A document whose only box is `root`.
pub fn single(root: BoxNode) -> Document {
    let mut tree = BoxTree::new();
    let id = tree.add(root);
    tree.update_descendant_extents(id);
    Document::new(tree, id)
}

/// Root box of `w` x `h` with an unstyled-background body child of the
/// same size. Returns the tree and `(root, body)`.
pub fn root_and_body(w: i32, h: i32) -> (BoxTree, BoxId, BoxId) {
    let mut tree = BoxTree::new();
    let root = tree.add(
        BoxNode::new(BoxType::Block)
            .with_rect(0, 0, w, h)
            .with_style(BoxStyle::initial()),
    );
    let body = tree.push(
        root,
        BoxNode::new(BoxType::Block)
            .with_rect(0, 0, w, h)
            .with_style(BoxStyle::initial()),
    );
    (tree, root, body)
}
