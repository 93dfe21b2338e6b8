//! Element and viewport geometry.
//!
//! Browsers report element rectangles in CSS pixels relative to the top-left
//! corner of the viewport. A rectangle may start left of or above the viewport
//! and may carry a negative width or height, so every computation works on
//! the min/max of each edge pair rather than trusting `x`/`y` as the origin.

use serde::{Deserialize, Serialize};

/// A point in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are within `tolerance` of `other`
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

/// Element bounding rectangle as returned by `GET /element/{id}/rect`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Leftmost edge, whatever the sign of the width
    #[must_use]
    pub fn left(&self) -> f64 {
        self.x.min(self.x + self.width)
    }

    /// Rightmost edge
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x.max(self.x + self.width)
    }

    /// Topmost edge, whatever the sign of the height
    #[must_use]
    pub fn top(&self) -> f64 {
        self.y.min(self.y + self.height)
    }

    /// Bottommost edge
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y.max(self.y + self.height)
    }

    /// Get the center point, ignoring the viewport
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.left() + self.right()) / 2.0,
            (self.top() + self.bottom()) / 2.0,
        )
    }

    /// Check if a point is inside this rectangle
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}

/// Viewport dimensions (`window.innerWidth` / `window.innerHeight`)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Viewport width
    pub width: f64,
    /// Viewport height
    pub height: f64,
}

impl Viewport {
    /// Create a new viewport
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Compute the midpoint of the part of `elem` that is visible in `viewport`.
///
/// This is the point a pointer lands on when an action moves to an element
/// with a zero offset. Edges are clamped to `[0, viewport]`.
#[must_use]
pub fn in_view_center(elem: &Rect, viewport: &Viewport) -> Point {
    let left = elem.left().max(0.0);
    let right = elem.right().min(viewport.width).max(0.0);
    let top = elem.top().max(0.0);
    let bottom = elem.bottom().min(viewport.height).max(0.0);

    Point::new((left + right) / 2.0, (top + bottom) / 2.0)
}
