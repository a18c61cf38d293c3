//! Integration tests for aprender-surface.
//!
//! These tests verify end-to-end workflows: CSV in, decision surface out.

use aprender_surface::prelude::*;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

#[test]
fn test_csv_to_surface_workflow() {
    let file = write_csv(
        "x,y,class\n\
         0.0,0.0,A\n\
         1.0,0.0,A\n\
         0.0,1.0,B\n\
         1.0,1.0,B\n",
    );

    let set = TrainingSet::from_csv_path(file.path(), &ColumnSpec::default())
        .expect("Failed to load CSV");
    assert_eq!(set.len(), 4);

    let grid = EvaluationGrid::from_training(&set, &GridSpec::new().with_step(0.1))
        .expect("Failed to build grid");
    let bounds = grid.bounds();
    assert_eq!(bounds, Bounds::new(-1.0, 2.0, -1.0, 2.0));

    let surface = evaluate(&set, 1, &grid).expect("Failed to evaluate");
    assert_eq!(surface.len(), grid.len());

    // Bottom rows belong to A, top rows to B at k=1.
    let idx_low = grid.index(5, 0).expect("in range");
    let idx_high = grid.index(5, grid.shape().1 - 1).expect("in range");
    assert_eq!(surface.get(idx_low).and_then(|p| p.label(&set)), Some("A"));
    assert_eq!(surface.get(idx_high).and_then(|p| p.label(&set)), Some("B"));
}

#[test]
fn test_boundary_follows_horizontal_midline() {
    let set = TrainingSet::from_records([
        (0.0, 0.0, "low"),
        (1.0, 0.0, "low"),
        (2.0, 0.0, "low"),
        (0.0, 2.0, "high"),
        (1.0, 2.0, "high"),
        (2.0, 2.0, "high"),
    ])
    .expect("valid records");
    let grid = EvaluationGrid::from_training(&set, &GridSpec::new().with_step(0.25))
        .expect("grid");
    let surface = evaluate(&set, 3, &grid).expect("evaluate");

    let low = set.class_id("low").expect("class");
    for (i, p) in surface.iter().enumerate() {
        let point = grid.point(i).expect("in range");
        if point.y < 0.9 {
            assert_eq!(p.class, low, "{point:?} should be low");
        } else if point.y > 1.1 {
            assert_ne!(p.class, low, "{point:?} should be high");
        }
    }
}

#[test]
fn test_surface_recompute_on_k_change() {
    let file = write_csv(
        "label,feature_a,feature_b\n\
         red,0.0,0.0\n\
         red,0.2,0.1\n\
         red,0.1,0.3\n\
         blue,3.0,3.0\n\
         blue,3.2,2.9\n",
    );
    let columns = ColumnSpec::by_name("feature_a", "feature_b", "label");
    let set = TrainingSet::from_csv_path(file.path(), &columns).expect("load");

    let mut surface = DecisionSurface::new(set, &GridSpec::new().with_step(0.1)).expect("surface");
    let k1 = surface.set_k(1).expect("k=1");
    let k5 = surface.set_k(5).expect("k=5");

    // At k = |set| every grid point goes to the majority class.
    let red = surface.training_set().class_id("red").expect("class");
    assert!(k5.iter().all(|p| p.class == red));
    assert!(k1.iter().any(|p| p.class != red));
    assert!(Arc::ptr_eq(&k5, &surface.predictions().expect("current")));
}

#[test]
fn test_config_driven_workflow() {
    let csv = write_csv("x,y,species\n0,0,setosa\n0,1,setosa\n4,4,virginica\n4,5,virginica\n");
    let config = SurfaceConfig::from_json_str(
        r#"{"k": 2, "weighting": "distance", "grid": {"margin": 0.5, "step": 0.25}}"#,
    )
    .expect("config");

    let surface = config.load_surface(csv.path()).expect("surface");
    let predictions = surface.predictions().expect("evaluated");
    assert_eq!(predictions.weighting(), Weighting::Distance);
    assert_eq!(surface.grid().bounds(), Bounds::new(-0.5, 4.5, -0.5, 5.5));
    assert!(predictions.iter().all(|p| (0.0..=1.0).contains(&p.confidence)));
}

#[test]
fn test_malformed_csv_rejected_before_evaluation() {
    let file = write_csv("x,y,class\n0,0,A\n1,oops,B\n");
    let err = TrainingSet::from_csv_path(file.path(), &ColumnSpec::default()).unwrap_err();
    match err {
        SurfaceError::MalformedRecord { line, field, .. } => {
            assert_eq!(line, 3);
            assert_eq!(field, "y");
        }
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn test_cancellation_between_recomputations() {
    let set = TrainingSet::from_records([(0.0, 0.0, "A"), (1.0, 1.0, "B")]).expect("valid");
    let mut surface = DecisionSurface::new(set, &GridSpec::new()).expect("surface");
    let token = CancellationToken::new();

    surface
        .set_k_cancellable(1, Weighting::Uniform, &token)
        .expect("k=1");
    token.cancel();
    assert!(surface
        .set_k_cancellable(2, Weighting::Uniform, &token)
        .is_err());
    assert_eq!(surface.k(), Some(1));

    token.reset();
    surface
        .set_k_cancellable(2, Weighting::Uniform, &token)
        .expect("k=2");
    assert_eq!(surface.k(), Some(2));
}
