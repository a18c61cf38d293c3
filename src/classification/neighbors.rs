//! Exact k-nearest-neighbour search over a training set.

use crate::data::{ClassId, TrainingSet};
use crate::primitives::Point2;
use std::cmp::Ordering;

/// A training point seen from a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Neighbor {
    /// Euclidean distance to the query
    pub distance: f64,
    /// Position in the training set
    pub index: usize,
    /// Class of the training point
    pub class: ClassId,
}

impl Neighbor {
    /// Total order: nearer first, then earlier in the training set.
    fn order(a: &Self, b: &Self) -> Ordering {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| a.index.cmp(&b.index))
    }
}

/// Reusable buffers for repeated searches against one training set.
#[derive(Debug)]
pub(super) struct NeighborSearch<'a> {
    training: &'a TrainingSet,
    candidates: Vec<Neighbor>,
    tally: Vec<f64>,
}

impl<'a> NeighborSearch<'a> {
    pub(super) fn new(training: &'a TrainingSet) -> Self {
        Self {
            training,
            candidates: Vec::with_capacity(training.len()),
            tally: vec![0.0; training.n_classes()],
        }
    }

    /// The `k` nearest training points to `query`, sorted by
    /// `(distance, index)`, plus a zeroed per-class tally buffer.
    ///
    /// `k` is capped at the training set size.
    pub(super) fn nearest(&mut self, query: Point2, k: usize) -> (&[Neighbor], &mut [f64]) {
        self.candidates.clear();
        self.candidates
            .extend(self.training.iter().enumerate().map(|(index, r)| Neighbor {
                distance: r.point.distance(&query),
                index,
                class: r.class,
            }));

        let k = k.min(self.candidates.len());
        if k > 0 && k < self.candidates.len() {
            // `order` is total, so partitioning agrees with a full sort.
            self.candidates.select_nth_unstable_by(k - 1, Neighbor::order);
            self.candidates.truncate(k);
        }
        self.candidates.sort_unstable_by(Neighbor::order);

        (&self.candidates[..k], &mut self.tally)
    }
}
