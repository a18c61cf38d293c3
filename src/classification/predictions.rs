//! Evaluation results.

use super::{Prediction, Weighting};
use crate::data::{ClassId, TrainingSet};
use serde::Serialize;

/// Predictions for every point of one grid, produced by one evaluation.
///
/// Immutable once built. Predictions are stored in the grid's enumeration
/// order (x outer, y inner), so prediction `i` belongs to grid point `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionSet {
    k: usize,
    weighting: Weighting,
    shape: (usize, usize),
    predictions: Vec<Prediction>,
}

impl PredictionSet {
    pub(super) fn new(
        k: usize,
        weighting: Weighting,
        shape: (usize, usize),
        predictions: Vec<Prediction>,
    ) -> Self {
        debug_assert_eq!(shape.0 * shape.1, predictions.len());
        Self {
            k,
            weighting,
            shape,
            predictions,
        }
    }

    /// Neighbour count used.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Vote weighting used.
    #[must_use]
    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    /// Grid shape `(nx, ny)` the predictions were computed over.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Number of predictions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    /// Whether there are no predictions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    /// Prediction for grid point `i`.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&Prediction> {
        self.predictions.get(i)
    }

    /// Iterates predictions in grid order.
    pub fn iter(&self) -> std::slice::Iter<'_, Prediction> {
        self.predictions.iter()
    }

    /// All predictions in grid order.
    #[must_use]
    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    /// Consumes the set, returning the predictions.
    #[must_use]
    pub fn into_predictions(self) -> Vec<Prediction> {
        self.predictions
    }

    /// Predicted classes as `nx` rows of `ny` values, for contour plots.
    ///
    /// `class_grid()[ix][iy]` is the class at `(xs[ix], ys[iy])`.
    #[must_use]
    pub fn class_grid(&self) -> Vec<Vec<ClassId>> {
        self.rows().map(|row| row.iter().map(|p| p.class).collect()).collect()
    }

    /// Confidences laid out like [`PredictionSet::class_grid`].
    #[must_use]
    pub fn confidence_grid(&self) -> Vec<Vec<f64>> {
        self.rows()
            .map(|row| row.iter().map(|p| p.confidence).collect())
            .collect()
    }

    fn rows(&self) -> std::slice::Chunks<'_, Prediction> {
        self.predictions.chunks(self.shape.1.max(1))
    }

    /// Number of grid points predicted as each class.
    ///
    /// The result has at least `n_classes` entries.
    #[must_use]
    pub fn class_counts(&self, n_classes: usize) -> Vec<usize> {
        let mut counts = vec![0; n_classes];
        for p in &self.predictions {
            if p.class >= counts.len() {
                counts.resize(p.class + 1, 0);
            }
            counts[p.class] += 1;
        }
        counts
    }

    /// Mean confidence over the grid, `0.0` when empty.
    #[must_use]
    pub fn mean_confidence(&self) -> f64 {
        if self.predictions.is_empty() {
            return 0.0;
        }
        self.predictions.iter().map(|p| p.confidence).sum::<f64>() / self.predictions.len() as f64
    }

    /// Predicted labels in grid order.
    pub fn labels<'a>(&'a self, training: &'a TrainingSet) -> impl Iterator<Item = &'a str> + 'a {
        self.predictions
            .iter()
            .map(move |p| p.label(training).unwrap_or_default())
    }
}

impl<'a> IntoIterator for &'a PredictionSet {
    type Item = &'a Prediction;
    type IntoIter = std::slice::Iter<'a, Prediction>;

    fn into_iter(self) -> Self::IntoIter {
        self.predictions.iter()
    }
}
