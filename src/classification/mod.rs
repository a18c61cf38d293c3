//! k-nearest-neighbour decision surfaces.
//!
//! The [`Evaluator`] classifies every point of an [`EvaluationGrid`] against
//! a [`TrainingSet`] and reports, per grid point, the winning class and the
//! share of the vote it received.
//!
//! Selection and voting are deterministic:
//!
//! - Neighbours are ordered by `(distance, training index)`, so two
//!   training points at the same distance are taken in load order.
//! - A vote tie between classes goes to the class whose closest voting
//!   member is nearest to the grid point. If those distances are equal too,
//!   the class of the earlier neighbour in the order above wins. Label text
//!   never decides a tie.

mod neighbors;
mod predictions;

pub use predictions::PredictionSet;

use crate::cancel::CancellationToken;
use crate::data::{ClassId, TrainingSet};
use crate::error::{Result, SurfaceError};
use crate::grid::EvaluationGrid;
use crate::primitives::Point2;
use neighbors::{Neighbor, NeighborSearch};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How the k neighbours' votes are weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    /// Every neighbour casts one vote; confidence is `votes / k`.
    #[default]
    Uniform,
    /// Votes are weighted by inverse distance. If any neighbour coincides
    /// with the grid point, only the coincident neighbours vote.
    Distance,
}

/// Predicted class and confidence at one grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Winning class
    pub class: ClassId,
    /// Share of the vote won, in `[0, 1]`
    pub confidence: f64,
}

impl Prediction {
    /// Label of the predicted class in `training`.
    #[must_use]
    pub fn label<'a>(&self, training: &'a TrainingSet) -> Option<&'a str> {
        training.class_name(self.class)
    }
}

/// k-nearest-neighbour grid evaluator.
///
/// # Example
///
/// ```
/// use aprender_surface::classification::Evaluator;
/// use aprender_surface::data::TrainingSet;
/// use aprender_surface::grid::{EvaluationGrid, GridSpec};
///
/// let set = TrainingSet::from_records([
///     (0.0, 0.0, "A"),
///     (0.0, 1.0, "A"),
///     (5.0, 5.0, "B"),
///     (5.0, 6.0, "B"),
/// ]).expect("finite coordinates");
/// let grid = EvaluationGrid::from_training(&set, &GridSpec::new().with_step(0.5))
///     .expect("small grid");
///
/// let surface = Evaluator::new(3).evaluate(&set, &grid).expect("valid inputs");
/// assert_eq!(surface.len(), grid.len());
/// assert!(surface.iter().all(|p| p.confidence >= 0.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    /// Number of neighbours consulted
    k: usize,
    /// Vote weighting
    weighting: Weighting,
}

impl Evaluator {
    /// Creates an evaluator consulting `k` neighbours with uniform votes.
    ///
    /// `k` is validated against the training set at evaluation time.
    #[must_use]
    pub fn new(k: usize) -> Self {
        Self {
            k,
            weighting: Weighting::Uniform,
        }
    }

    /// Sets the vote weighting.
    #[must_use]
    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Neighbour count.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Vote weighting.
    #[must_use]
    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    /// Checks the training set and `k`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty or single-class training set and
    /// `InvalidParameter` if `k` is outside `1..=training.len()`.
    pub fn validate(&self, training: &TrainingSet) -> Result<()> {
        if training.is_empty() {
            return Err(SurfaceError::invalid_input("training set is empty"));
        }
        if training.n_classes() < 2 {
            return Err(SurfaceError::invalid_input(format!(
                "training set has {} class, a decision boundary needs at least 2",
                training.n_classes()
            )));
        }
        if self.k == 0 || self.k > training.len() {
            return Err(SurfaceError::invalid_k(self.k, training.len()));
        }
        Ok(())
    }

    /// Classifies a single point.
    ///
    /// # Errors
    ///
    /// Same as [`Evaluator::validate`].
    pub fn predict_point(&self, training: &TrainingSet, point: Point2) -> Result<Prediction> {
        self.validate(training)?;
        let mut search = NeighborSearch::new(training);
        Ok(self.classify(&mut search, point))
    }

    /// Evaluates every grid point.
    ///
    /// Returns one prediction per grid point in the grid's enumeration
    /// order. All inputs are checked before any point is evaluated.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty or single-class training set or an empty
    /// grid, `InvalidParameter` for `k` outside `1..=training.len()`.
    pub fn evaluate(&self, training: &TrainingSet, grid: &EvaluationGrid) -> Result<PredictionSet> {
        self.run(training, grid, None)
    }

    /// Evaluates every grid point, giving up if `token` is cancelled.
    ///
    /// The token is checked between grid points; once cancellation is seen
    /// no further points are evaluated and no partial result is returned.
    ///
    /// # Errors
    ///
    /// Same as [`Evaluator::evaluate`], plus `Cancelled`.
    pub fn evaluate_cancellable(
        &self,
        training: &TrainingSet,
        grid: &EvaluationGrid,
        token: &CancellationToken,
    ) -> Result<PredictionSet> {
        self.run(training, grid, Some(token))
    }

    fn run(
        &self,
        training: &TrainingSet,
        grid: &EvaluationGrid,
        token: Option<&CancellationToken>,
    ) -> Result<PredictionSet> {
        self.validate(training)?;
        if grid.is_empty() {
            return Err(SurfaceError::invalid_input("evaluation grid is empty"));
        }

        tracing::debug!(
            k = self.k,
            weighting = ?self.weighting,
            points = grid.len(),
            training = training.len(),
            "evaluating decision surface"
        );

        let predictions = self.classify_grid(training, grid, token)?;
        Ok(PredictionSet::new(
            self.k,
            self.weighting,
            grid.shape(),
            predictions,
        ))
    }

    #[cfg(not(feature = "parallel"))]
    fn classify_grid(
        &self,
        training: &TrainingSet,
        grid: &EvaluationGrid,
        token: Option<&CancellationToken>,
    ) -> Result<Vec<Prediction>> {
        let total = grid.len();
        let mut search = NeighborSearch::new(training);
        let mut predictions = Vec::with_capacity(total);

        for (i, point) in grid.points().enumerate() {
            if token.is_some_and(CancellationToken::is_cancelled) {
                tracing::debug!(evaluated = i, total, "evaluation cancelled");
                return Err(SurfaceError::Cancelled { evaluated: i, total });
            }
            predictions.push(self.classify(&mut search, point));
        }

        Ok(predictions)
    }

    #[cfg(feature = "parallel")]
    fn classify_grid(
        &self,
        training: &TrainingSet,
        grid: &EvaluationGrid,
        token: Option<&CancellationToken>,
    ) -> Result<Vec<Prediction>> {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let total = grid.len();
        let evaluated = AtomicUsize::new(0);

        // Collecting `Option`s keeps grid order and stops on the first `None`.
        let predictions: Option<Vec<Prediction>> = (0..total)
            .into_par_iter()
            .map_init(
                || NeighborSearch::new(training),
                |search, i| {
                    if token.is_some_and(CancellationToken::is_cancelled) {
                        return None;
                    }
                    let prediction = self.classify(search, grid.point_at(i));
                    evaluated.fetch_add(1, Ordering::Relaxed);
                    Some(prediction)
                },
            )
            .collect();

        predictions.ok_or_else(|| {
            let evaluated = evaluated.load(Ordering::Relaxed);
            tracing::debug!(evaluated, total, "evaluation cancelled");
            SurfaceError::Cancelled { evaluated, total }
        })
    }

    fn classify(&self, search: &mut NeighborSearch<'_>, point: Point2) -> Prediction {
        let (neighbors, tally) = search.nearest(point, self.k);
        vote(neighbors, self.weighting, tally)
    }
}

/// Evaluates the decision surface with uniform voting.
///
/// Shorthand for `Evaluator::new(k).evaluate(training, grid)`.
///
/// # Errors
///
/// See [`Evaluator::evaluate`].
///
/// # Examples
///
/// ```
/// use aprender_surface::classification::evaluate;
/// use aprender_surface::data::TrainingSet;
/// use aprender_surface::grid::{EvaluationGrid, GridSpec};
///
/// let set = TrainingSet::from_records([(0.0, 0.0, "A"), (1.0, 1.0, "B")]).unwrap();
/// let grid = EvaluationGrid::from_training(&set, &GridSpec::new().with_step(0.25)).unwrap();
///
/// let surface = evaluate(&set, 1, &grid).unwrap();
/// assert!(surface.iter().all(|p| p.confidence == 1.0));
/// assert!(evaluate(&set, 3, &grid).is_err());
/// ```
pub fn evaluate(training: &TrainingSet, k: usize, grid: &EvaluationGrid) -> Result<PredictionSet> {
    Evaluator::new(k).evaluate(training, grid)
}

/// Tallies the neighbours' votes and picks the winner.
///
/// `neighbors` must be non-empty and sorted by `(distance, index)`;
/// `tally` must hold one zeroed slot per class and is left zeroed.
fn vote(neighbors: &[Neighbor], weighting: Weighting, tally: &mut [f64]) -> Prediction {
    let nearest = neighbors[0].distance;
    let mut total = 0.0;

    for n in neighbors {
        let weight = match weighting {
            Weighting::Uniform => 1.0,
            Weighting::Distance if nearest == 0.0 => {
                if n.distance == 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            // `nearest / d` is proportional to `1 / d` and lies in (0, 1],
            // so tiny distances cannot overflow the total.
            Weighting::Distance => nearest / n.distance,
        };
        tally[n.class] += weight;
        total += weight;
    }

    let best = neighbors
        .iter()
        .map(|n| tally[n.class])
        .fold(f64::NEG_INFINITY, f64::max);

    // In sorted order the first member of each class is its nearest
    // representative, so the first tied class met wins.
    let winner = neighbors
        .iter()
        .find(|n| tally[n.class] == best)
        .map_or(neighbors[0].class, |n| n.class);
    debug_assert!(total.is_finite() && total > 0.0, "vote total {total}");
    // Summation order can leave the winner's share an ulp above one.
    let confidence = (tally[winner] / total).min(1.0);

    for n in neighbors {
        tally[n.class] = 0.0;
    }

    Prediction {
        class: winner,
        confidence,
    }
}

#[cfg(test)]
mod tests_knn_contract;
