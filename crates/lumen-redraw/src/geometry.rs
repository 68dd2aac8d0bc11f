//! Device-space geometry of a box at a given scale.

use lumen_types::geom::Rect;

use crate::boxes::{BoxNode, EdgeSizes};

/// Scale a document length to device pixels, truncating toward zero.
///
/// At scale 1 the value passes through untouched.
#[inline]
pub fn scale_len(v: i32, scale: f32) -> i32 {
    if scale == 1.0 {
        v
    } else {
        (v as f32 * scale) as i32
    }
}

pub fn scale_edges(e: &EdgeSizes, scale: f32) -> EdgeSizes {
    EdgeSizes::new(
        scale_len(e.top, scale),
        scale_len(e.right, scale),
        scale_len(e.bottom, scale),
        scale_len(e.left, scale),
    )
}

/// A box's padding-box origin and sizes in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxGeometry {
    /// Top-left of the padding box.
    pub x: i32,
    pub y: i32,
    /// Content size.
    pub width: i32,
    pub height: i32,
    pub padding_left: i32,
    pub padding_top: i32,
    pub padding_width: i32,
    pub padding_height: i32,
    pub border: EdgeSizes,
}

impl BoxGeometry {
    /// Geometry of `node` whose parent's padding box is at
    /// `(x_parent, y_parent)` in unscaled document units.
    pub fn compute(node: &BoxNode, x_parent: i32, y_parent: i32, scale: f32) -> Self {
        if scale == 1.0 {
            Self {
                x: x_parent + node.x,
                y: y_parent + node.y,
                width: node.width,
                height: node.height,
                padding_left: node.padding.left,
                padding_top: node.padding.top,
                padding_width: node.padding_width(),
                padding_height: node.padding_height(),
                border: node.border,
            }
        } else {
            let s = |v: i32| (v as f32 * scale) as i32;
            Self {
                x: s(x_parent + node.x),
                y: s(y_parent + node.y),
                width: s(node.width),
                height: s(node.height),
                padding_left: s(node.padding.left),
                padding_top: s(node.padding.top),
                padding_width: s(node.padding_width()),
                padding_height: s(node.padding_height()),
                border: scale_edges(&node.border, scale),
            }
        }
    }

    pub fn padding_box(&self) -> Rect {
        Rect::new(
            self.x,
            self.y,
            self.x + self.padding_width,
            self.y + self.padding_height,
        )
    }

    pub fn border_box(&self) -> Rect {
        Rect::new(
            self.x - self.border.left,
            self.y - self.border.top,
            self.x + self.padding_width + self.border.right,
            self.y + self.padding_height + self.border.bottom,
        )
    }

    pub fn content_box(&self) -> Rect {
        Rect::from_size(
            self.x + self.padding_left,
            self.y + self.padding_top,
            self.width,
            self.height,
        )
    }

    /// Border box grown by the (already scaled) margins.
    pub fn margin_box(&self, margin: &EdgeSizes) -> Rect {
        let b = self.border_box();
        Rect::new(
            b.x0 - margin.left,
            b.y0 - margin.top,
            b.x1 + margin.right,
            b.y1 + margin.bottom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::BoxType;

    fn sample() -> BoxNode {
        BoxNode::new(BoxType::Block)
            .with_rect(10, 20, 100, 50)
            .with_padding(EdgeSizes::new(1, 2, 3, 4))
            .with_border(EdgeSizes::uniform(5))
    }

    #[test]
    fn unit_scale_is_exact() {
        let g = BoxGeometry::compute(&sample(), 5, 5, 1.0);
        assert_eq!((g.x, g.y), (15, 25));
        assert_eq!(g.padding_width, 106);
        assert_eq!(g.padding_height, 54);
        assert_eq!(g.border_box(), Rect::new(10, 20, 126, 84));
        assert_eq!(g.content_box(), Rect::new(19, 26, 119, 76));
    }

    #[test]
    fn scaled_geometry_truncates() {
        let g = BoxGeometry::compute(&sample(), 0, 0, 1.5);
        assert_eq!((g.x, g.y), (15, 30));
        assert_eq!(g.padding_width, 159);
        assert_eq!(g.border.top, 7);
        assert_eq!(g.padding_left, 6);
    }

    #[test]
    fn scale_len_truncates_toward_zero() {
        assert_eq!(scale_len(-3, 0.5), -1);
        assert_eq!(scale_len(3, 0.5), 1);
        assert_eq!(scale_len(7, 1.0), 7);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn scale_one_matches_integer_arithmetic(
                x in -2000i32..2000, y in -2000i32..2000,
                w in 0i32..2000, h in 0i32..2000,
                px in -2000i32..2000, py in -2000i32..2000,
                pad in 0i32..50, bor in 0i32..50,
            ) {
                let n = BoxNode::new(BoxType::Block)
                    .with_rect(x, y, w, h)
                    .with_padding(EdgeSizes::uniform(pad))
                    .with_border(EdgeSizes::uniform(bor));
                let g = BoxGeometry::compute(&n, px, py, 1.0);
                prop_assert_eq!(g.x, px + x);
                prop_assert_eq!(g.y, py + y);
                prop_assert_eq!(g.padding_width, pad + w + pad);
                prop_assert_eq!(g.border_box().x0, px + x - bor);
            }
        }
    }
}
