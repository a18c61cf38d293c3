//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use aprender_surface::prelude::*;
//! ```

pub use crate::cancel::CancellationToken;
pub use crate::classification::{evaluate, Evaluator, Prediction, PredictionSet, Weighting};
pub use crate::config::SurfaceConfig;
pub use crate::data::{ClassId, ColumnRef, ColumnSpec, LabeledPoint, TrainingSet};
pub use crate::error::SurfaceError;
pub use crate::grid::{EvaluationGrid, GridSpec};
pub use crate::primitives::{Bounds, Point2};
pub use crate::surface::DecisionSurface;
