//! Device-space geometry.
//!
//! All coordinates here are integer output-device pixels. Rectangles are
//! half-open corner pairs `(x0, y0)`-`(x1, y1)`; a rectangle with
//! `x1 <= x0` or `y1 <= y0` is empty.

use serde::{Deserialize, Serialize};

/// A point in device space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Integer midpoint, truncating toward zero.
    pub const fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }
}

/// An axis-aligned rectangle in device space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Build a rectangle from an origin and a size.
    pub const fn from_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub const fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub const fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// Returns `true` if there is nothing inside this rectangle.
    pub const fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// The overlap of two rectangles. May be empty.
    pub fn intersect(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    /// The smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Returns `true` if the rectangles share at least one pixel.
    ///
    /// Edges are half-open, so rectangles that only touch do not
    /// intersect. Agrees with `!self.intersect(other).is_empty()`.
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }

    /// Check if a point is inside this rectangle.
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_overlapping() {
        let a = Rect::new(0, 0, 100, 50);
        let b = Rect::new(50, 25, 150, 75);
        assert_eq!(a.intersect(&b), Rect::new(50, 25, 100, 50));
    }

    #[test]
    fn intersect_disjoint_is_empty() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 20, 30, 30);
        assert!(a.intersect(&b).is_empty());
    }

    #[test]
    fn zero_width_is_empty() {
        assert!(Rect::new(5, 0, 5, 10).is_empty());
        assert!(Rect::new(0, 5, 10, 5).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!a.intersects(&Rect::new(10, 0, 20, 10)));
        assert!(!a.intersects(&Rect::new(0, 10, 10, 20)));
        assert!(a.intersects(&Rect::new(9, 9, 20, 20)));
        assert!(!a.intersects(&Rect::new(5, 5, 5, 8)));
    }

    #[test]
    fn midpoint_truncates() {
        assert_eq!(Point::new(0, 0).midpoint(Point::new(5, -5)), Point::new(2, -2));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_rect() -> impl Strategy<Value = Rect> {
            (-500i32..500, -500i32..500, 0i32..500, 0i32..500)
                .prop_map(|(x, y, w, h)| Rect::from_size(x, y, w, h))
        }

        proptest! {
            #[test]
            fn intersect_is_commutative(a in arb_rect(), b in arb_rect()) {
                prop_assert_eq!(a.intersect(&b), b.intersect(&a));
            }

            #[test]
            fn intersect_never_grows(a in arb_rect(), b in arb_rect()) {
                let i = a.intersect(&b);
                if !i.is_empty() {
                    prop_assert!(i.width() <= a.width() && i.width() <= b.width());
                    prop_assert!(i.height() <= a.height() && i.height() <= b.height());
                }
            }

            #[test]
            fn union_contains_both(a in arb_rect(), b in arb_rect()) {
                let u = a.union(&b);
                prop_assert!(u.x0 <= a.x0 && u.x0 <= b.x0);
                prop_assert!(u.y1 >= a.y1 && u.y1 >= b.y1);
            }

            #[test]
            fn intersects_matches_intersection(a in arb_rect(), b in arb_rect()) {
                prop_assert_eq!(a.intersects(&b), !a.intersect(&b).is_empty());
            }
        }
    }
}
