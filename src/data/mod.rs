//! Labeled 2-D training data.
//!
//! A [`TrainingSet`] is an ordered, immutable list of labeled points.
//! Labels are interned into a class table in first-seen order, so each
//! record only carries a [`ClassId`]. Record order matters: it is the
//! tie-break for neighbours at equal distance.

mod csv_loader;

pub use csv_loader::{ColumnRef, ColumnSpec};

use crate::error::{Result, SurfaceError};
use crate::primitives::{Bounds, Point2};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Index into a training set's class table.
pub type ClassId = usize;

/// A training point: coordinates plus class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabeledPoint {
    /// Coordinates
    pub point: Point2,
    /// Class index into [`TrainingSet::classes`]
    pub class: ClassId,
}

/// An ordered, read-only set of labeled 2-D points.
///
/// # Examples
///
/// ```
/// use aprender_surface::data::TrainingSet;
///
/// let set = TrainingSet::from_records([
///     (0.0, 0.0, "A"),
///     (1.0, 0.0, "A"),
///     (0.0, 1.0, "B"),
/// ]).expect("finite coordinates");
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.classes(), ["A", "B"]);
/// assert_eq!(set.class_counts(), vec![2, 1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    records: Vec<LabeledPoint>,
    classes: Vec<String>,
}

impl TrainingSet {
    /// Builds a training set from `(x, y, label)` triples.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a coordinate is not finite or a label is
    /// empty. The offending record is reported by its position.
    pub fn from_records<I, S>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64, S)>,
        S: AsRef<str>,
    {
        let mut builder = Builder::default();
        for (i, (x, y, label)) in records.into_iter().enumerate() {
            let point = Point2::new(x, y);
            if !point.is_finite() {
                return Err(SurfaceError::invalid_input(format!(
                    "record {i} has a non-finite coordinate ({x}, {y})"
                )));
            }
            let label = label.as_ref().trim();
            if label.is_empty() {
                return Err(SurfaceError::invalid_input(format!(
                    "record {i} has an empty label"
                )));
            }
            builder.push(point, label);
        }
        Ok(builder.finish())
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in load order.
    #[must_use]
    pub fn records(&self) -> &[LabeledPoint] {
        &self.records
    }

    /// Record at position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LabeledPoint> {
        self.records.get(index)
    }

    /// Iterates records in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, LabeledPoint> {
        self.records.iter()
    }

    /// Class labels, indexed by [`ClassId`], in first-seen order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of distinct classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Label for a class id.
    #[must_use]
    pub fn class_name(&self, class: ClassId) -> Option<&str> {
        self.classes.get(class).map(String::as_str)
    }

    /// Class id for a label.
    #[must_use]
    pub fn class_id(&self, label: &str) -> Option<ClassId> {
        self.classes.iter().position(|c| c == label)
    }

    /// Number of records per class, indexed by [`ClassId`].
    #[must_use]
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.classes.len()];
        for r in &self.records {
            counts[r.class] += 1;
        }
        counts
    }

    /// The most frequent class; among equally frequent classes the one
    /// seen first wins. `None` for an empty set.
    #[must_use]
    pub fn majority_class(&self) -> Option<ClassId> {
        let counts = self.class_counts();
        let max = *counts.iter().max()?;
        counts.iter().position(|&c| c == max)
    }

    /// Bounding box of all training points.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(self.records.iter().map(|r| r.point))
    }

    /// Summary statistics for display.
    #[must_use]
    pub fn summary(&self) -> DataSummary {
        DataSummary {
            n: self.len(),
            classes: self
                .classes
                .iter()
                .cloned()
                .zip(self.class_counts())
                .collect(),
            bounds: self.bounds(),
        }
    }
}

impl<'a> IntoIterator for &'a TrainingSet {
    type Item = &'a LabeledPoint;
    type IntoIter = std::slice::Iter<'a, LabeledPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Interns labels while records are appended.
#[derive(Debug, Default)]
pub(crate) struct Builder {
    records: Vec<LabeledPoint>,
    classes: Vec<String>,
    index: HashMap<String, ClassId>,
}

impl Builder {
    pub(crate) fn push(&mut self, point: Point2, label: &str) {
        let class = match self.index.get(label) {
            Some(&id) => id,
            None => {
                let id = self.classes.len();
                self.classes.push(label.to_string());
                self.index.insert(label.to_string(), id);
                id
            }
        };
        self.records.push(LabeledPoint { point, class });
    }

    pub(crate) fn finish(self) -> TrainingSet {
        tracing::debug!(
            records = self.records.len(),
            classes = self.classes.len(),
            "training set built"
        );
        TrainingSet {
            records: self.records,
            classes: self.classes,
        }
    }
}

/// Summary of a loaded training set.
#[derive(Debug, Clone, Default)]
pub struct DataSummary {
    /// Number of records
    pub n: usize,
    /// `(label, count)` per class in first-seen order
    pub classes: Vec<(String, usize)>,
    /// Extent of the training points
    pub bounds: Option<Bounds>,
}

impl fmt::Display for DataSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Training Data:")?;
        writeln!(f, "  Records:  {}", self.n)?;
        for (label, count) in &self.classes {
            writeln!(f, "  Class {label}: {count}")?;
        }
        match self.bounds {
            Some(b) => write!(
                f,
                "  Extent:   x [{:.3}, {:.3}], y [{:.3}, {:.3}]",
                b.x_min, b.x_max, b.y_min, b.y_max
            ),
            None => write!(f, "  Extent:   (empty)"),
        }
    }
}

#[cfg(test)]
mod tests;
