//! # Geometry
//!
//! Grid coordinates and axis-aligned rectangles used by every generation
//! stage. Coordinates are cell indices into the dungeon grid; one cell
//! corresponds to a fixed real-world unit.

use serde::{Deserialize, Serialize};

/// A 2D cell coordinate in the dungeon grid.
///
/// # Examples
///
/// ```
/// use delve::GridPoint;
///
/// let p = GridPoint::new(10, 5);
/// assert_eq!(p.x, 10);
/// assert_eq!(p.y, 5);
/// assert_eq!(p.manhattan_distance(GridPoint::new(13, 9)), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    /// Creates a new grid point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Calculates the Manhattan distance to another point.
    pub fn manhattan_distance(self, other: GridPoint) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }
}

/// An axis-aligned rectangle of grid cells.
///
/// `x`/`y` is the top-left cell; `width`/`height` are cell counts. A
/// rectangle covers the half-open ranges `[x, x + width)` and
/// `[y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Gets the center cell of the rectangle.
    pub fn center(&self) -> GridPoint {
        GridPoint::new(
            self.x + self.width as i32 / 2,
            self.y + self.height as i32 / 2,
        )
    }

    /// Gets the area in cells.
    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Checks if a point lies inside the rectangle.
    pub fn contains(&self, p: GridPoint) -> bool {
        p.x >= self.x
            && p.y >= self.y
            && p.x < self.x + self.width as i32
            && p.y < self.y + self.height as i32
    }

    /// Checks if a point lies on the rectangle's one-cell boundary ring.
    pub fn on_boundary(&self, p: GridPoint) -> bool {
        if !self.contains(p) {
            return false;
        }

        p.x == self.x
            || p.y == self.y
            || p.x == self.x + self.width as i32 - 1
            || p.y == self.y + self.height as i32 - 1
    }

    /// Checks if this rectangle intersects another.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Rect;
    ///
    /// let a = Rect::new(0, 0, 10, 10);
    /// let b = Rect::new(5, 5, 10, 10);
    /// let c = Rect::new(10, 0, 5, 5);
    /// assert!(a.intersects(&b));
    /// assert!(!a.intersects(&c)); // edges are exclusive
    /// ```
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.x >= other.x + other.width as i32
            || other.x >= self.x + self.width as i32
            || self.y >= other.y + other.height as i32
            || other.y >= self.y + self.height as i32)
    }

    /// Checks if this rectangle lies entirely within another.
    pub fn contained_in(&self, outer: &Rect) -> bool {
        self.x >= outer.x
            && self.y >= outer.y
            && self.x + self.width as i32 <= outer.x + outer.width as i32
            && self.y + self.height as i32 <= outer.y + outer.height as i32
    }

    /// Clamps a point to the nearest cell on the rectangle's boundary,
    /// moving along whichever axis needs the smaller correction.
    pub fn nearest_boundary_point(&self, p: GridPoint) -> GridPoint {
        let right = self.x + self.width as i32 - 1;
        let bottom = self.y + self.height as i32 - 1;

        let cx = p.x.clamp(self.x, right);
        let cy = p.y.clamp(self.y, bottom);

        if self.on_boundary(GridPoint::new(cx, cy)) || !self.contains(GridPoint::new(cx, cy)) {
            return GridPoint::new(cx, cy);
        }

        // Interior point: push it to the closest edge along one axis.
        let to_left = cx - self.x;
        let to_right = right - cx;
        let to_top = cy - self.y;
        let to_bottom = bottom - cy;
        let min_x = to_left.min(to_right);
        let min_y = to_top.min(to_bottom);

        if min_x <= min_y {
            let x = if to_left <= to_right { self.x } else { right };
            GridPoint::new(x, cy)
        } else {
            let y = if to_top <= to_bottom { self.y } else { bottom };
            GridPoint::new(cx, y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = GridPoint::new(0, 0);
        let b = GridPoint::new(3, 4);
        assert_eq!(a.manhattan_distance(b), 7);
        assert_eq!(b.manhattan_distance(a), 7);
    }

    #[test]
    fn test_rect_center_and_area() {
        let r = Rect::new(5, 5, 10, 8);
        assert_eq!(r.center(), GridPoint::new(10, 9));
        assert_eq!(r.area(), 80);
    }

    #[test]
    fn test_rect_containment() {
        let r = Rect::new(5, 5, 10, 8);
        assert!(r.contains(GridPoint::new(5, 5))); // top-left corner
        assert!(r.contains(GridPoint::new(14, 12))); // bottom-right corner
        assert!(!r.contains(GridPoint::new(15, 12))); // past right edge
        assert!(!r.contains(GridPoint::new(4, 5)));
    }

    #[test]
    fn test_rect_boundary() {
        let r = Rect::new(5, 5, 10, 8);
        assert!(r.on_boundary(GridPoint::new(5, 5)));
        assert!(r.on_boundary(GridPoint::new(10, 5)));
        assert!(r.on_boundary(GridPoint::new(14, 9)));
        assert!(!r.on_boundary(GridPoint::new(8, 8)));
        assert!(!r.on_boundary(GridPoint::new(20, 20)));
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(5, 5, 10, 8);
        let b = Rect::new(10, 8, 6, 6);
        let c = Rect::new(20, 20, 5, 5);
        let touching = Rect::new(15, 5, 5, 5); // shares the edge at x=15

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(!a.intersects(&touching));
    }

    #[test]
    fn test_rect_contained_in() {
        let outer = Rect::new(0, 0, 50, 50);
        assert!(Rect::new(5, 5, 10, 10).contained_in(&outer));
        assert!(Rect::new(0, 0, 50, 50).contained_in(&outer));
        assert!(!Rect::new(45, 45, 10, 10).contained_in(&outer));
    }

    #[test]
    fn test_nearest_boundary_point() {
        let r = Rect::new(5, 5, 10, 8);

        // Outside points clamp onto the ring.
        assert_eq!(
            r.nearest_boundary_point(GridPoint::new(0, 8)),
            GridPoint::new(5, 8)
        );
        assert_eq!(
            r.nearest_boundary_point(GridPoint::new(10, 20)),
            GridPoint::new(10, 12)
        );

        // Interior points move along the cheaper axis.
        let moved = r.nearest_boundary_point(GridPoint::new(6, 9));
        assert!(r.on_boundary(moved));
        assert_eq!(moved, GridPoint::new(5, 9));
    }
}
