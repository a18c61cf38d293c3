//! aprender-surface: k-nearest-neighbour decision surfaces in pure Rust.
//!
//! Given labeled 2-D points and a neighbour count `k`, the crate lays a
//! regular grid over the data's padded bounding box and predicts, at every
//! grid point, the majority class among the `k` nearest training points
//! together with the share of the vote it won. The result is meant to be
//! drawn as a colored overlay beside the raw training points.
//!
//! # Quick Start
//!
//! ```
//! use aprender_surface::prelude::*;
//!
//! let set = TrainingSet::from_records([
//!     (0.0, 0.0, "A"),
//!     (1.0, 0.0, "A"),
//!     (0.0, 1.0, "B"),
//!     (1.0, 1.0, "B"),
//! ]).unwrap();
//!
//! let grid = EvaluationGrid::from_training(&set, &GridSpec::new().with_step(0.1)).unwrap();
//! let surface = evaluate(&set, 1, &grid).unwrap();
//!
//! assert_eq!(surface.len(), grid.len());
//! let near_origin = Evaluator::new(1).predict_point(&set, Point2::new(0.1, 0.1)).unwrap();
//! assert_eq!(near_origin.label(&set), Some("A"));
//! assert_eq!(near_origin.confidence, 1.0);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: `Point2` and `Bounds`
//! - [`data`]: `TrainingSet` and CSV loading
//! - [`grid`]: Evaluation lattice (`GridSpec`, `EvaluationGrid`)
//! - [`classification`]: KNN evaluator, predictions and vote weighting
//! - [`surface`]: Recompute-on-change holder for the current predictions
//! - [`cancel`]: Cooperative cancellation between grid points
//! - [`config`]: JSON-loadable configuration
//!
//! # Features
//!
//! - `parallel`: evaluate grid points on a rayon thread pool. Output is
//!   identical to the sequential path.

pub mod cancel;
pub mod classification;
pub mod config;
pub mod data;
pub mod error;
pub mod grid;
pub mod prelude;
pub mod primitives;
pub mod surface;

pub use error::{Result, SurfaceError};
pub use primitives::{Bounds, Point2};
