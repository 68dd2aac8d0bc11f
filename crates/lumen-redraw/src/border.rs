//! Border painting.
//!
//! Each box's border is described by a ten-point octagon: the inner and
//! outer corners of the border ring, with the first two corners repeated
//! at the end. Edge `i` (top, right, bottom, left) is the quadrilateral
//! `points[2i..2i + 4]`, so every edge is a contiguous window and the
//! left edge wraps back to the top-left corner.

use lumen_types::color::{self, Color};
use lumen_types::error::Result;
use lumen_types::geom::{Point, Rect};
use lumen_types::plotter::{PlotOpType, PlotStyle, Plotter};

use crate::boxes::{BoxNode, EdgeSizes, Side};
use crate::geometry::{BoxGeometry, scale_edges};
use crate::style::{BorderStyle, BoxStyle};

/// Inner/outer corner ring of a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderOctagon(pub [Point; 10]);

impl BorderOctagon {
    /// Octagon around a block's padding box at `(x, y)`.
    pub fn for_block(x: i32, y: i32, padding_width: i32, padding_height: i32, b: &EdgeSizes) -> Self {
        let (l, t, r, bt) = (b.left, b.top, b.right, b.bottom);
        let (pw, ph) = (padding_width, padding_height);
        Self([
            Point::new(x, y),
            Point::new(x - l, y - t),
            Point::new(x + pw + r, y - t),
            Point::new(x + pw, y),
            Point::new(x + pw, y + ph),
            Point::new(x + pw + r, y + ph + bt),
            Point::new(x - l, y + ph + bt),
            Point::new(x, y + ph),
            Point::new(x, y),
            Point::new(x - l, y - t),
        ])
    }

    /// Octagon for one line segment of an inline run. `outer` is the
    /// border box of the segment; the ring is inset by the border widths.
    pub fn for_inline(outer: &Rect, b: &EdgeSizes) -> Self {
        let Rect { x0, y0, x1, y1 } = *outer;
        let (l, t, r, bt) = (b.left, b.top, b.right, b.bottom);
        Self([
            Point::new(x0 + l, y0 + t),
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1 - r, y0 + t),
            Point::new(x1 - r, y1 - bt),
            Point::new(x1, y1),
            Point::new(x0, y1),
            Point::new(x0 + l, y1 - bt),
            Point::new(x0 + l, y0 + t),
            Point::new(x0, y0),
        ])
    }

    /// The four corners of one edge, in ring order. Adjacent edges share
    /// their mitred corner points.
    pub fn edge(&self, side: Side) -> [Point; 4] {
        let i = side.index() * 2;
        [self.0[i], self.0[i + 1], self.0[i + 2], self.0[i + 3]]
    }
}

/// Paint the four borders of a block-level box.
pub fn paint_borders(
    plotter: &mut dyn Plotter,
    node: &BoxNode,
    style: &BoxStyle,
    geom: &BoxGeometry,
) -> Result<()> {
    let oct = BorderOctagon::for_block(
        geom.x,
        geom.y,
        geom.padding_width,
        geom.padding_height,
        &geom.border,
    );
    for side in Side::ALL {
        if node.border.get(side) == 0 {
            continue;
        }
        let b = style.border[side.index()];
        plot_border(plotter, side, &oct, b.color, b.style, geom.border.get(side))?;
    }
    Ok(())
}

/// Paint the borders of one line segment of an inline run.
///
/// The left edge only appears on the first segment and the right edge
/// only on the last.
pub fn paint_inline_borders(
    plotter: &mut dyn Plotter,
    node: &BoxNode,
    style: &BoxStyle,
    outer: &Rect,
    scale: f32,
    first: bool,
    last: bool,
) -> Result<()> {
    let b = scale_edges(&node.border, scale);
    let oct = BorderOctagon::for_inline(outer, &b);
    let mut sides = Vec::with_capacity(4);
    if first {
        sides.push(Side::Left);
    }
    sides.push(Side::Top);
    sides.push(Side::Bottom);
    if last {
        sides.push(Side::Right);
    }
    for side in sides {
        if node.border.get(side) == 0 {
            continue;
        }
        let bs = style.border[side.index()];
        plot_border(plotter, side, &oct, bs.color, bs.style, b.get(side))?;
    }
    Ok(())
}

/// Plot one edge of a border.
pub fn plot_border(
    plotter: &mut dyn Plotter,
    side: Side,
    oct: &BorderOctagon,
    color: Color,
    style: BorderStyle,
    thickness: i32,
) -> Result<()> {
    if color.is_transparent() {
        return Ok(());
    }
    let [p0, p1, p2, p3] = oct.edge(side);
    let i = side.index();

    match style {
        BorderStyle::None | BorderStyle::Hidden => Ok(()),
        BorderStyle::Dotted | BorderStyle::Dashed => {
            let op = if style == BorderStyle::Dotted {
                PlotOpType::Dot
            } else {
                PlotOpType::Dash
            };
            plotter.line(
                p0.midpoint(p1),
                p2.midpoint(p3),
                &PlotStyle::stroke(color, thickness, op),
            )
        },
        BorderStyle::Solid => plotter.polygon(&[p0, p1, p2, p3], &PlotStyle::fill(color)),
        BorderStyle::Double => {
            let fill = PlotStyle::fill(color);
            plotter.polygon(&[p0, third(p0, p1), third(p3, p2), p3], &fill)?;
            plotter.polygon(&[p1, third(p1, p0), third(p2, p3), p2], &fill)
        },
        BorderStyle::Groove | BorderStyle::Ridge => {
            let light = if style == BorderStyle::Groove { 3 - i } else { i };
            let (dark_c, light_c) = (color::darken(color), color::lighten(color));
            let (inner, outer) = if light <= 1 {
                (dark_c, light_c)
            } else {
                (light_c, dark_c)
            };
            let m01 = p0.midpoint(p1);
            let m32 = p3.midpoint(p2);
            plotter.polygon(&[p0, m01, m32, p3], &PlotStyle::fill(inner))?;
            plotter.polygon(&[p1, m01, m32, p2], &PlotStyle::fill(outer))
        },
        BorderStyle::Inset | BorderStyle::Outset => {
            let light = if style == BorderStyle::Inset { (i + 2) % 4 } else { i };
            let (inner, outer) = match light {
                0 => (color::lighten(color), color::double_lighten(color)),
                1 => (color::double_darken(color), color::darken(color)),
                2 => (color::darken(color), color::double_darken(color)),
                _ => (color::double_lighten(color), color::lighten(color)),
            };
            let m01 = p0.midpoint(p1);
            let m32 = p3.midpoint(p2);
            plotter.polygon(&[p0, m01, m32, p3], &PlotStyle::fill(inner))?;
            plotter.polygon(&[p1, m01, m32, p2], &PlotStyle::fill(outer))
        },
    }
}

/// The point a third of the way from `a` to `b`.
fn third(a: Point, b: Point) -> Point {
    Point::new((a.x * 2 + b.x) / 3, (a.y * 2 + b.y) / 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::BoxType;
    use crate::record::{PlotCall, RecordingPlotter};
    use crate::style::BorderSide;

    fn octagon() -> BorderOctagon {
        BorderOctagon::for_block(10, 10, 100, 50, &EdgeSizes::uniform(5))
    }

    #[test]
    fn block_octagon_ring() {
        // padding box (10,10)-(110,60), 5px border all round
        assert_eq!(
            octagon().0,
            [
                Point::new(10, 10),
                Point::new(5, 5),
                Point::new(115, 5),
                Point::new(110, 10),
                Point::new(110, 60),
                Point::new(115, 65),
                Point::new(5, 65),
                Point::new(10, 60),
                Point::new(10, 10),
                Point::new(5, 5),
            ]
        );
    }

    #[test]
    fn block_octagon_edges() {
        let o = octagon();
        assert_eq!(
            o.edge(Side::Top),
            [
                Point::new(10, 10),
                Point::new(5, 5),
                Point::new(115, 5),
                Point::new(110, 10)
            ]
        );
        assert_eq!(
            o.edge(Side::Right),
            [
                Point::new(115, 5),
                Point::new(110, 10),
                Point::new(110, 60),
                Point::new(115, 65)
            ]
        );
        assert_eq!(
            o.edge(Side::Bottom),
            [
                Point::new(110, 60),
                Point::new(115, 65),
                Point::new(5, 65),
                Point::new(10, 60)
            ]
        );
        assert_eq!(
            o.edge(Side::Left),
            [
                Point::new(5, 65),
                Point::new(10, 60),
                Point::new(10, 10),
                Point::new(5, 5)
            ]
        );
    }

    #[test]
    fn solid_edge_is_one_polygon() {
        let mut p = RecordingPlotter::new();
        plot_border(&mut p, Side::Top, &octagon(), Color::BLACK, BorderStyle::Solid, 5).unwrap();
        assert_eq!(p.polygons().len(), 1);
        assert_eq!(p.polygons()[0].len(), 4);
    }

    #[test]
    fn transparent_edge_draws_nothing() {
        let mut p = RecordingPlotter::new();
        plot_border(&mut p, Side::Top, &octagon(), Color::TRANSPARENT, BorderStyle::Solid, 5)
            .unwrap();
        assert!(p.calls.is_empty());
    }

    #[test]
    fn dashed_edge_is_midline() {
        let mut p = RecordingPlotter::new();
        plot_border(&mut p, Side::Top, &octagon(), Color::BLACK, BorderStyle::Dashed, 5).unwrap();
        match &p.calls[0] {
            PlotCall::Line { from, to, style } => {
                assert_eq!(*from, Point::new(7, 7));
                assert_eq!(*to, Point::new(112, 7));
                assert_eq!(style.stroke_type, PlotOpType::Dash);
                assert_eq!(style.stroke_width, 5);
            },
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn double_edge_has_two_thirds() {
        let mut p = RecordingPlotter::new();
        plot_border(&mut p, Side::Top, &octagon(), Color::BLACK, BorderStyle::Double, 5).unwrap();
        let polys = p.polygons();
        assert_eq!(polys.len(), 2);
        // (2*10 + 5) / 3 = 8, (2*110 + 115) / 3 = 111
        assert_eq!(polys[0][1], Point::new(8, 8));
        assert_eq!(polys[0][2], Point::new(111, 8));
    }

    #[test]
    fn groove_top_is_dark_inside() {
        let c = Color::rgb(100, 100, 100);
        let mut p = RecordingPlotter::new();
        plot_border(&mut p, Side::Top, &octagon(), c, BorderStyle::Groove, 5).unwrap();
        let fills = p.polygon_fills();
        // groove: light = 3 - 0 = 3 > 1, inner is light.
        assert_eq!(fills, vec![color::lighten(c), color::darken(c)]);

        let mut p = RecordingPlotter::new();
        plot_border(&mut p, Side::Top, &octagon(), c, BorderStyle::Ridge, 5).unwrap();
        assert_eq!(p.polygon_fills(), vec![color::darken(c), color::lighten(c)]);
    }

    #[test]
    fn inset_and_outset_shades() {
        let c = Color::rgb(100, 100, 100);
        let mut p = RecordingPlotter::new();
        plot_border(&mut p, Side::Top, &octagon(), c, BorderStyle::Inset, 5).unwrap();
        // inset top: light = 2
        assert_eq!(
            p.polygon_fills(),
            vec![color::darken(c), color::double_darken(c)]
        );

        let mut p = RecordingPlotter::new();
        plot_border(&mut p, Side::Top, &octagon(), c, BorderStyle::Outset, 5).unwrap();
        assert_eq!(
            p.polygon_fills(),
            vec![color::lighten(c), color::double_lighten(c)]
        );
    }

    #[test]
    fn zero_width_sides_are_skipped() {
        let node = BoxNode::new(BoxType::Block)
            .with_rect(0, 0, 10, 10)
            .with_border(EdgeSizes::new(2, 0, 0, 0));
        let style = BoxStyle::initial().with_border(BorderSide::solid(Color::BLACK));
        let g = BoxGeometry::compute(&node, 0, 0, 1.0);
        let mut p = RecordingPlotter::new();
        paint_borders(&mut p, &node, &style, &g).unwrap();
        assert_eq!(p.polygons().len(), 1);
    }

    #[test]
    fn inline_middle_segment_has_no_side_edges() {
        let node = BoxNode::new(BoxType::Inline).with_border(EdgeSizes::uniform(1));
        let style = BoxStyle::initial().with_border(BorderSide::solid(Color::BLACK));
        let outer = Rect::new(0, 0, 50, 20);

        let mut p = RecordingPlotter::new();
        paint_inline_borders(&mut p, &node, &style, &outer, 1.0, false, false).unwrap();
        assert_eq!(p.polygons().len(), 2);

        let mut p = RecordingPlotter::new();
        paint_inline_borders(&mut p, &node, &style, &outer, 1.0, true, true).unwrap();
        assert_eq!(p.polygons().len(), 4);
        // left edge first
        assert_eq!(p.polygons()[0][0], Point::new(0, 20));
    }
}
