//! Line segments of an inline run.
//!
//! An inline box's background and borders are drawn once per line it
//! spans. [`InlineSegments`] walks forward from the inline box through its
//! siblings to the matching inline-end marker and yields the border box of
//! each line segment together with first/last flags. Floats inside the
//! run are skipped.

use lumen_types::geom::Rect;

use crate::boxes::{BoxId, BoxTree};
use crate::geometry::{BoxGeometry, scale_len};

/// One line of an inline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineSegment {
    /// Border box of this line's part of the run, in device pixels.
    pub rect: Rect,
    pub first: bool,
    pub last: bool,
}

/// Iterator over the line segments of an inline run.
pub struct InlineSegments<'a> {
    tree: &'a BoxTree,
    start: BoxId,
    end: Option<BoxId>,
    cursor: Option<BoxId>,
    x_parent: i32,
    y_parent: i32,
    scale: f32,
    // vertical insets of the inline box itself
    top_inset: i32,
    bottom_outset: i32,
    current: Rect,
    first: bool,
    done: bool,
}

impl<'a> InlineSegments<'a> {
    /// Segments of the inline box `start`, whose geometry at this scale is
    /// `geom`. Sibling positions are taken relative to the same parent
    /// origin `(x_parent, y_parent)`.
    pub fn new(
        tree: &'a BoxTree,
        start: BoxId,
        geom: &BoxGeometry,
        x_parent: i32,
        y_parent: i32,
        scale: f32,
    ) -> Self {
        let top_inset = geom.border.top + geom.padding_top;
        let bottom_outset = geom.padding_height - geom.padding_top + geom.border.bottom;
        Self {
            tree,
            start,
            end: tree[start].inline_end,
            cursor: Some(start),
            x_parent,
            y_parent,
            scale,
            top_inset,
            bottom_outset,
            current: geom.border_box(),
            first: true,
            done: false,
        }
    }
}

impl Iterator for InlineSegments<'_> {
    type Item = InlineSegment;

    fn next(&mut self) -> Option<InlineSegment> {
        if self.done {
            return None;
        }
        loop {
            let Some(ib) = self.cursor else {
                self.done = true;
                return Some(InlineSegment {
                    rect: self.current,
                    first: self.first,
                    last: true,
                });
            };
            let node = &self.tree[ib];
            self.cursor = if Some(ib) == self.end {
                None
            } else {
                node.next()
            };
            if node.box_type.is_float() {
                continue;
            }

            let ib_x = scale_len(self.x_parent + node.x, self.scale);
            let ib_y = scale_len(self.y_parent + node.y, self.scale);
            let right = ib_x
                + scale_len(node.padding_width(), self.scale)
                + scale_len(node.border.right, self.scale);

            if node.inline_new_line && ib != self.start {
                let done_line = InlineSegment {
                    rect: self.current,
                    first: self.first,
                    last: false,
                };
                self.first = false;
                self.current = Rect::new(
                    ib_x - scale_len(node.border.left, self.scale),
                    ib_y - self.top_inset,
                    right,
                    ib_y + self.bottom_outset,
                );
                return Some(done_line);
            }
            self.current.x1 = right;
        }
    }
}

/// The boxes of an inline run after the inline box itself, up to but not
/// including its end marker.
pub fn run_boxes(tree: &BoxTree, start: BoxId) -> impl Iterator<Item = BoxId> + '_ {
    let end = tree[start].inline_end;
    std::iter::successors(tree.next(start), move |id| tree.next(*id))
        .take_while(move |id| Some(*id) != end)
}
