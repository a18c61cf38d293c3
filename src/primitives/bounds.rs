//! Axis-aligned bounding boxes.

use super::Point2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle `[x_min, x_max] × [y_min, y_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest x
    pub x_min: f64,
    /// Largest x
    pub x_max: f64,
    /// Smallest y
    pub y_min: f64,
    /// Largest y
    pub y_max: f64,
}

impl Bounds {
    /// Creates bounds from explicit extents.
    #[must_use]
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Smallest rectangle containing every point, or `None` for no points.
    ///
    /// # Examples
    ///
    /// ```
    /// use aprender_surface::primitives::{Bounds, Point2};
    ///
    /// let pts = [Point2::new(1.0, -1.0), Point2::new(3.0, 2.0)];
    /// let b = Bounds::enclosing(pts.iter().copied()).expect("non-empty");
    /// assert_eq!(b, Bounds::new(1.0, 3.0, -1.0, 2.0));
    /// ```
    pub fn enclosing<I: IntoIterator<Item = Point2>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let init = Self::new(first.x, first.x, first.y, first.y);
        Some(iter.fold(init, |b, p| {
            Self::new(
                b.x_min.min(p.x),
                b.x_max.max(p.x),
                b.y_min.min(p.y),
                b.y_max.max(p.y),
            )
        }))
    }

    /// Grows the rectangle by `margin` on every side.
    #[must_use]
    pub fn padded(&self, margin: f64) -> Self {
        Self::new(
            self.x_min - margin,
            self.x_max + margin,
            self.y_min - margin,
            self.y_max + margin,
        )
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Whether `p` lies inside or on the border.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }
}
