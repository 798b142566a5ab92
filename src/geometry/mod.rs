//! Canvas-space primitives and the viewport transform.
//!
//! Everything in this module is plain data plus pure functions. Canvas space is
//! the graph's own coordinate system; client space is where pointer events
//! arrive. [`Viewport`] maps between the two.

use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};

mod nodes;
mod viewport;

pub use nodes::{KindGeometry, NodeGeometry};
pub use viewport::{ClientRect, Viewport, ZoomLimits};

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this position shifted by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Width and height in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum, used to clamp a size against a minimum.
    pub fn max(self, min: Size) -> Self {
        Self {
            width: self.width.max(min.width),
            height: self.height.max(min.height),
        }
    }
}

/// An axis-aligned rectangle. `width` and `height` are never negative when the
/// rectangle is built through [`Rect::from_corners`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(origin: Position, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Builds the normalized rectangle spanned by two arbitrary corners.
    ///
    /// Drag direction is irrelevant: the origin is always the top-left corner.
    pub fn from_corners(a: Position, b: Position) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    /// Smallest rectangle containing all of `rects`, or `None` for an empty input.
    pub fn bounding<I>(rects: I) -> Option<Self>
    where
        I: IntoIterator<Item = Rect>,
    {
        let rects: Vec<Rect> = rects.into_iter().collect();
        let (min_x, max_x) = match rects
            .iter()
            .flat_map(|r| [r.x, r.right()])
            .minmax_by(f64::total_cmp)
        {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(v) => (v, v),
            MinMaxResult::MinMax(lo, hi) => (lo, hi),
        };
        let (min_y, max_y) = match rects
            .iter()
            .flat_map(|r| [r.y, r.bottom()])
            .minmax_by(f64::total_cmp)
        {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(v) => (v, v),
            MinMaxResult::MinMax(lo, hi) => (lo, hi),
        };
        Some(Self::from_corners(
            Position::new(min_x, min_y),
            Position::new(max_x, max_y),
        ))
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Axis-aligned overlap test. Two rectangles intersect unless one lies
    /// entirely to the left, right, above or below the other; shared edges count
    /// as overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom())
    }
}
