//! Recompute-on-change holder for a decision surface.
//!
//! A [`DecisionSurface`] owns the read-only training set, the evaluation
//! grid built once from it, and the current predictions. Changing `k`
//! recomputes every prediction and swaps the whole set in one step; a
//! failed or cancelled recomputation leaves the previous predictions in
//! place. Callers receive predictions as `Arc<PredictionSet>` and never
//! mutate them.

use crate::cancel::CancellationToken;
use crate::classification::{Evaluator, PredictionSet, Weighting};
use crate::data::TrainingSet;
use crate::error::Result;
use crate::grid::{EvaluationGrid, GridSpec};
use std::sync::Arc;

/// Training data, grid and the latest predictions.
///
/// # Examples
///
/// ```
/// use aprender_surface::data::TrainingSet;
/// use aprender_surface::grid::GridSpec;
/// use aprender_surface::surface::DecisionSurface;
///
/// let set = TrainingSet::from_records([
///     (0.0, 0.0, "A"),
///     (1.0, 0.0, "A"),
///     (0.0, 1.0, "B"),
///     (1.0, 1.0, "B"),
/// ]).unwrap();
///
/// let mut surface = DecisionSurface::new(set, &GridSpec::new().with_step(0.25)).unwrap();
/// assert!(surface.predictions().is_none());
///
/// let first = surface.set_k(1).unwrap();
/// let second = surface.set_k(3).unwrap();
/// assert_eq!(first.len(), second.len());
/// assert_eq!(surface.k(), Some(3));
///
/// // Out-of-range k is rejected and the k=3 predictions stay current.
/// assert!(surface.set_k(10).is_err());
/// assert_eq!(surface.k(), Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct DecisionSurface {
    training: Arc<TrainingSet>,
    grid: EvaluationGrid,
    current: Option<Arc<PredictionSet>>,
}

impl DecisionSurface {
    /// Builds the grid over `training`; no predictions are computed yet.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty or single-class training set
    /// and `InvalidParameter` for an invalid grid spec.
    pub fn new(training: impl Into<Arc<TrainingSet>>, spec: &GridSpec) -> Result<Self> {
        let training = training.into();
        // Any k would do here; only the data checks matter.
        Evaluator::new(1).validate(&training)?;
        let grid = EvaluationGrid::from_training(&training, spec)?;
        Ok(Self {
            training,
            grid,
            current: None,
        })
    }

    /// The training set, shared read-only.
    #[must_use]
    pub fn training_set(&self) -> &Arc<TrainingSet> {
        &self.training
    }

    /// The evaluation grid.
    #[must_use]
    pub fn grid(&self) -> &EvaluationGrid {
        &self.grid
    }

    /// The current predictions, if any have been computed.
    #[must_use]
    pub fn predictions(&self) -> Option<Arc<PredictionSet>> {
        self.current.clone()
    }

    /// `k` of the current predictions.
    #[must_use]
    pub fn k(&self) -> Option<usize> {
        self.current.as_ref().map(|p| p.k())
    }

    /// Recomputes all predictions for `k` with uniform votes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `k` is outside `1..=training.len()`;
    /// the current predictions are kept.
    pub fn set_k(&mut self, k: usize) -> Result<Arc<PredictionSet>> {
        self.set_k_with(k, Weighting::Uniform)
    }

    /// Recomputes all predictions for `k` and `weighting`.
    ///
    /// Asking for the `(k, weighting)` already held returns the current
    /// predictions without recomputing.
    ///
    /// # Errors
    ///
    /// Same as [`DecisionSurface::set_k`].
    pub fn set_k_with(&mut self, k: usize, weighting: Weighting) -> Result<Arc<PredictionSet>> {
        if let Some(current) = self.current_for(k, weighting) {
            return Ok(current);
        }
        let evaluator = Evaluator::new(k).with_weighting(weighting);
        let predictions = evaluator.evaluate(&self.training, &self.grid)?;
        Ok(self.replace(predictions))
    }

    /// Like [`DecisionSurface::set_k_with`], but gives up if `token` is
    /// cancelled before every grid point has been evaluated.
    ///
    /// # Errors
    ///
    /// Same as [`DecisionSurface::set_k`], plus `Cancelled`.
    pub fn set_k_cancellable(
        &mut self,
        k: usize,
        weighting: Weighting,
        token: &CancellationToken,
    ) -> Result<Arc<PredictionSet>> {
        if let Some(current) = self.current_for(k, weighting) {
            return Ok(current);
        }
        let evaluator = Evaluator::new(k).with_weighting(weighting);
        let predictions = evaluator.evaluate_cancellable(&self.training, &self.grid, token)?;
        Ok(self.replace(predictions))
    }

    fn current_for(&self, k: usize, weighting: Weighting) -> Option<Arc<PredictionSet>> {
        self.current
            .as_ref()
            .filter(|p| p.k() == k && p.weighting() == weighting)
            .cloned()
    }

    fn replace(&mut self, predictions: PredictionSet) -> Arc<PredictionSet> {
        let predictions = Arc::new(predictions);
        tracing::debug!(
            k = predictions.k(),
            previous = ?self.k(),
            "decision surface replaced"
        );
        self.current = Some(Arc::clone(&predictions));
        predictions
    }
}
