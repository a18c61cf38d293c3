//! Core geometric primitives (points, bounding boxes).
//!
//! Everything in the crate works on the plane, so a single `Point2`
//! type carries coordinates for both training data and grid points.

mod bounds;
mod point;

pub use bounds::Bounds;
pub use point::Point2;
