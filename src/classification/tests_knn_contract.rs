// =========================================================================
// FALSIFY-SURF: decision-surface contract tests
//
// Each test names the property it tries to break; a failure message starts
// with FALSIFIED and the property id.
//
// References:
//   - Cover & Hart (1967) "Nearest Neighbor Pattern Classification"
// =========================================================================

use super::*;
use crate::grid::GridSpec;

fn two_clusters() -> TrainingSet {
    TrainingSet::from_records([
        (0.0, 0.0, "left"),
        (0.5, 0.5, "left"),
        (1.0, 0.0, "left"),
        (5.0, 5.0, "right"),
        (5.5, 5.5, "right"),
        (6.0, 5.0, "right"),
    ])
    .expect("valid records")
}

/// FALSIFY-SURF-001: Predicted classes come from the training set
#[test]
fn falsify_surf_001_predictions_in_class_range() {
    let set = two_clusters();
    let grid = EvaluationGrid::from_training(&set, &GridSpec::new().with_step(0.5)).expect("grid");
    let surface = evaluate(&set, 3, &grid).expect("evaluate");

    for (i, p) in surface.iter().enumerate() {
        assert!(
            p.class < set.n_classes(),
            "FALSIFIED SURF-001: prediction[{i}] class {} not in 0..{}",
            p.class,
            set.n_classes()
        );
    }
}

/// FALSIFY-SURF-002: Prediction count matches grid size
#[test]
fn falsify_surf_002_prediction_count() {
    let set = two_clusters();
    let grid = EvaluationGrid::from_training(&set, &GridSpec::new().with_step(0.3)).expect("grid");
    let surface = evaluate(&set, 2, &grid).expect("evaluate");
    assert_eq!(
        surface.len(),
        grid.len(),
        "FALSIFIED SURF-002: {} predictions for {} grid points",
        surface.len(),
        grid.len()
    );
}

/// FALSIFY-SURF-003: Training points are classified as their own class at k=1
#[test]
fn falsify_surf_003_training_points_self_classified() {
    let set = two_clusters();
    let evaluator = Evaluator::new(1);
    for r in &set {
        let p = evaluator.predict_point(&set, r.point).expect("predict");
        assert_eq!(
            p.class, r.class,
            "FALSIFIED SURF-003: training point {:?} not classified as its own class",
            r.point
        );
    }
}

/// FALSIFY-SURF-004: Deterministic predictions
#[test]
fn falsify_surf_004_deterministic() {
    let set = two_clusters();
    let grid = EvaluationGrid::from_training(&set, &GridSpec::new().with_step(0.5)).expect("grid");
    let evaluator = Evaluator::new(4).with_weighting(Weighting::Distance);
    let a = evaluator.evaluate(&set, &grid).expect("evaluate 1");
    let b = evaluator.evaluate(&set, &grid).expect("evaluate 2");
    assert_eq!(a, b, "FALSIFIED SURF-004: predictions differ on same input");
}

/// FALSIFY-SURF-005: Confidence stays in [0, 1] for both weightings
#[test]
fn falsify_surf_005_confidence_bounded() {
    let set = two_clusters();
    let grid = EvaluationGrid::from_training(&set, &GridSpec::new().with_step(0.5)).expect("grid");
    for weighting in [Weighting::Uniform, Weighting::Distance] {
        for k in 1..=set.len() {
            let surface = Evaluator::new(k)
                .with_weighting(weighting)
                .evaluate(&set, &grid)
                .expect("evaluate");
            for p in &surface {
                assert!(
                    (0.0..=1.0).contains(&p.confidence),
                    "FALSIFIED SURF-005: confidence {} out of range (k={k}, {weighting:?})",
                    p.confidence
                );
            }
        }
    }
}

/// FALSIFY-SURF-006: Grid does not depend on k
#[test]
fn falsify_surf_006_grid_shape_independent_of_k() {
    let set = two_clusters();
    let grid = EvaluationGrid::from_training(&set, &GridSpec::new().with_step(0.5)).expect("grid");
    let shapes: Vec<(usize, usize)> = (1..=set.len())
        .map(|k| evaluate(&set, k, &grid).expect("evaluate").shape())
        .collect();
    assert!(
        shapes.iter().all(|s| *s == grid.shape()),
        "FALSIFIED SURF-006: shapes {shapes:?} differ from grid {:?}",
        grid.shape()
    );
}
