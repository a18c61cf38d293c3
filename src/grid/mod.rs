//! Regular evaluation lattices.
//!
//! The grid covers the training data's bounding box padded by a margin
//! and is sampled at a fixed step. It depends only on the training set
//! and the [`GridSpec`], never on the neighbour count, so it is built once
//! and reused for every evaluation.
//!
//! Enumeration order is fixed: x is the outer loop, y the inner loop.
//! Point `i` sits at `(xs[i / ny], ys[i % ny])`.

use crate::data::TrainingSet;
use crate::error::{Result, SurfaceError};
use crate::primitives::{Bounds, Point2};
use serde::{Deserialize, Serialize};

/// Padding added on every side of the data's bounding box.
pub const DEFAULT_MARGIN: f64 = 1.0;

/// Spacing between neighbouring lattice points.
pub const DEFAULT_STEP: f64 = 0.02;

/// Upper bound on lattice size for one synchronous evaluation.
pub const DEFAULT_MAX_POINTS: usize = 4_000_000;

/// Relative slack so that `(hi - lo) / step` landing a hair above an
/// integer does not add a point past the upper bound.
const AXIS_EPSILON: f64 = 1e-9;

/// How to lay a lattice over the training data.
///
/// # Examples
///
/// ```
/// use aprender_surface::grid::GridSpec;
///
/// let spec = GridSpec::new().with_margin(0.5).with_step(0.25);
/// assert_eq!(spec.margin, 0.5);
/// assert!(spec.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridSpec {
    /// Padding around the data's bounding box
    pub margin: f64,
    /// Lattice spacing on both axes
    pub step: f64,
    /// Largest lattice accepted
    pub max_points: usize,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            step: DEFAULT_STEP,
            max_points: DEFAULT_MAX_POINTS,
        }
    }
}

impl GridSpec {
    /// Creates a spec with default margin, step and size cap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the margin.
    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the step.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Sets the maximum number of lattice points.
    #[must_use]
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    /// Checks margin, step and size cap.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the margin is negative or not finite,
    /// the step is not a positive finite number, or the size cap is zero.
    pub fn validate(&self) -> Result<()> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(SurfaceError::invalid_parameter(
                "margin",
                self.margin,
                "a finite value >= 0",
            ));
        }
        validate_step(self.step)?;
        if self.max_points == 0 {
            return Err(SurfaceError::invalid_parameter("max_points", 0, ">= 1"));
        }
        Ok(())
    }
}

fn validate_step(step: f64) -> Result<()> {
    if !step.is_finite() || step <= 0.0 {
        return Err(SurfaceError::invalid_parameter(
            "step",
            step,
            "a finite value > 0",
        ));
    }
    Ok(())
}

/// A regular lattice of grid points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationGrid {
    bounds: Bounds,
    step: f64,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl EvaluationGrid {
    /// Lays a lattice over the training data's padded bounding box.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty training set and
    /// `InvalidParameter` for an invalid spec or a lattice larger than
    /// `spec.max_points`.
    ///
    /// # Examples
    ///
    /// ```
    /// use aprender_surface::data::TrainingSet;
    /// use aprender_surface::grid::{EvaluationGrid, GridSpec};
    ///
    /// let set = TrainingSet::from_records([(0.0, 0.0, "A"), (1.0, 1.0, "B")]).unwrap();
    /// let grid = EvaluationGrid::from_training(&set, &GridSpec::new().with_step(0.5)).unwrap();
    ///
    /// // [-1, 2) sampled every 0.5 on both axes
    /// assert_eq!(grid.shape(), (6, 6));
    /// assert_eq!(grid.xs()[0], -1.0);
    /// ```
    pub fn from_training(training: &TrainingSet, spec: &GridSpec) -> Result<Self> {
        spec.validate()?;
        let bounds = training
            .bounds()
            .ok_or_else(|| SurfaceError::invalid_input("cannot build a grid over an empty training set"))?;
        let grid = Self::build(bounds.padded(spec.margin), spec.step, spec.max_points)?;
        tracing::debug!(
            nx = grid.xs.len(),
            ny = grid.ys.len(),
            step = spec.step,
            margin = spec.margin,
            "evaluation grid built"
        );
        Ok(grid)
    }

    /// Lays a lattice over explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a non-positive step, inverted or
    /// non-finite bounds, or a lattice above [`DEFAULT_MAX_POINTS`].
    pub fn from_bounds(bounds: Bounds, step: f64) -> Result<Self> {
        validate_step(step)?;
        Self::build(bounds, step, DEFAULT_MAX_POINTS)
    }

    fn build(bounds: Bounds, step: f64, max_points: usize) -> Result<Self> {
        let finite = [bounds.x_min, bounds.x_max, bounds.y_min, bounds.y_max]
            .iter()
            .all(|v| v.is_finite());
        if !finite || bounds.width() < 0.0 || bounds.height() < 0.0 {
            return Err(SurfaceError::invalid_parameter(
                "bounds",
                format!("{bounds:?}"),
                "finite extents with min <= max",
            ));
        }

        let nx = axis_len(bounds.x_min, bounds.x_max, step).ok_or_else(|| {
            SurfaceError::invalid_parameter("x extent", bounds.width(), "a finite span")
        })?;
        let ny = axis_len(bounds.y_min, bounds.y_max, step).ok_or_else(|| {
            SurfaceError::invalid_parameter("y extent", bounds.height(), "a finite span")
        })?;
        let total = nx.checked_mul(ny).unwrap_or(usize::MAX);
        if total > max_points {
            return Err(SurfaceError::invalid_parameter(
                "grid size",
                format!("{nx}x{ny}"),
                format!("at most {max_points} points (raise step or max_points)"),
            ));
        }

        Ok(Self {
            bounds,
            step,
            xs: axis_values(bounds.x_min, nx, step),
            ys: axis_values(bounds.y_min, ny, step),
        })
    }

    /// Extent the lattice was laid over.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Lattice spacing.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// x coordinates of the lattice columns.
    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// y coordinates of the lattice rows.
    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// `(nx, ny)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.xs.len(), self.ys.len())
    }

    /// Number of grid points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len() * self.ys.len()
    }

    /// Whether the lattice has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grid point at enumeration position `i`.
    #[must_use]
    pub fn point(&self, i: usize) -> Option<Point2> {
        (i < self.len()).then(|| self.point_at(i))
    }

    /// Grid point at `i`; callers guarantee `i < self.len()`.
    pub(crate) fn point_at(&self, i: usize) -> Point2 {
        let ny = self.ys.len();
        Point2::new(self.xs[i / ny], self.ys[i % ny])
    }

    /// Enumeration position of lattice cell `(ix, iy)`.
    #[must_use]
    pub fn index(&self, ix: usize, iy: usize) -> Option<usize> {
        (ix < self.xs.len() && iy < self.ys.len()).then(|| ix * self.ys.len() + iy)
    }

    /// All grid points in enumeration order (x outer, y inner).
    pub fn points(&self) -> impl ExactSizeIterator<Item = Point2> + '_ {
        (0..self.len()).map(move |i| self.point_at(i))
    }
}

/// Number of samples in `[lo, hi)` at `step`, at least one.
///
/// `None` when the span overflows `f64`.
fn axis_len(lo: f64, hi: f64, step: f64) -> Option<usize> {
    let span = (hi - lo) / step;
    if !span.is_finite() {
        return None;
    }
    let n = (span - AXIS_EPSILON * span.abs().max(1.0)).ceil();
    Some(if n < 1.0 {
        1
    } else if n >= usize::MAX as f64 {
        usize::MAX
    } else {
        n as usize
    })
}

fn axis_values(lo: f64, n: usize, step: f64) -> Vec<f64> {
    (0..n).map(|i| lo + i as f64 * step).collect()
}
