//! Tests for the data module.

use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

#[test]
fn test_from_records_interns_labels_in_first_seen_order() {
    let set = TrainingSet::from_records([
        (0.0, 0.0, "red"),
        (1.0, 0.0, "blue"),
        (2.0, 0.0, "red"),
        (3.0, 0.0, "green"),
    ])
    .expect("valid records");

    assert_eq!(set.classes(), ["red", "blue", "green"]);
    let ids: Vec<ClassId> = set.iter().map(|r| r.class).collect();
    assert_eq!(ids, vec![0, 1, 0, 2]);
    assert_eq!(set.class_id("green"), Some(2));
    assert_eq!(set.class_id("purple"), None);
}

#[test]
fn test_from_records_rejects_non_finite() {
    let err = TrainingSet::from_records([(0.0, f64::NAN, "A")]).unwrap_err();
    assert!(matches!(err, SurfaceError::InvalidInput { .. }));
}

#[test]
fn test_from_records_rejects_empty_label() {
    let err = TrainingSet::from_records([(0.0, 0.0, "  ")]).unwrap_err();
    assert!(matches!(err, SurfaceError::InvalidInput { .. }));
}

#[test]
fn test_majority_class_prefers_first_seen_on_tie() {
    let set = TrainingSet::from_records([
        (0.0, 0.0, "B"),
        (1.0, 0.0, "A"),
        (2.0, 0.0, "A"),
        (3.0, 0.0, "B"),
    ])
    .expect("valid records");
    assert_eq!(set.majority_class(), Some(0));
    assert_eq!(TrainingSet::default().majority_class(), None);
}

#[test]
fn test_bounds_and_summary() {
    let set = TrainingSet::from_records([(-1.0, 2.0, "A"), (3.0, -4.0, "B")])
        .expect("valid records");
    let b = set.bounds().expect("non-empty");
    assert_eq!(b, Bounds::new(-1.0, 3.0, -4.0, 2.0));

    let summary = set.summary();
    assert_eq!(summary.n, 2);
    assert_eq!(summary.classes, vec![("A".to_string(), 1), ("B".to_string(), 1)]);
    let text = summary.to_string();
    assert!(text.contains("Records:  2"));
    assert!(text.contains("Class A: 1"));
}

#[test]
fn test_csv_default_columns() {
    let file = write_csv("x,y,class\n0.5,1.5,A\n-2,3,B\n");
    let set = TrainingSet::from_csv_path(file.path(), &ColumnSpec::default()).expect("load CSV");

    assert_eq!(set.len(), 2);
    assert_eq!(set.records()[0].point, Point2::new(0.5, 1.5));
    assert_eq!(set.records()[1].point, Point2::new(-2.0, 3.0));
    assert_eq!(set.classes(), ["A", "B"]);
}

#[test]
fn test_csv_named_columns_in_any_order() {
    let csv = "id,label,feature_2,feature_1\n1,yes,10,20\n2,no,30,40\n";
    let columns = ColumnSpec::by_name("feature_1", "feature_2", "label");
    let set = TrainingSet::from_csv_reader(csv.as_bytes(), &columns).expect("load CSV");

    assert_eq!(set.records()[0].point, Point2::new(20.0, 10.0));
    assert_eq!(set.class_name(set.records()[1].class), Some("no"));
}

#[test]
fn test_csv_trims_whitespace() {
    let csv = "x, y, class\n 1 , 2 , A \n";
    let columns = ColumnSpec::by_name("x", "y", "class");
    let set = TrainingSet::from_csv_reader(csv.as_bytes(), &columns).expect("load CSV");
    assert_eq!(set.records()[0].point, Point2::new(1.0, 2.0));
    assert_eq!(set.classes(), ["A"]);
}

#[test]
fn test_csv_unknown_column_name() {
    let csv = "x,y,class\n0,0,A\n";
    let columns = ColumnSpec::by_name("x", "y", "species");
    let err = TrainingSet::from_csv_reader(csv.as_bytes(), &columns).unwrap_err();
    assert!(matches!(err, SurfaceError::InvalidParameter { .. }));
    assert!(err.to_string().contains("species"));
}

#[test]
fn test_csv_column_index_out_of_range() {
    let csv = "x,y\n0,0\n";
    let err = TrainingSet::from_csv_reader(csv.as_bytes(), &ColumnSpec::default()).unwrap_err();
    assert!(matches!(err, SurfaceError::InvalidParameter { .. }));
}

#[test]
fn test_csv_missing_field_reports_line() {
    let csv = "x,y,class\n0,0,A\n1,1\n";
    let err = TrainingSet::from_csv_reader(csv.as_bytes(), &ColumnSpec::default()).unwrap_err();
    match err {
        SurfaceError::MalformedRecord { line, field, .. } => {
            assert_eq!(line, 3);
            assert_eq!(field, "class");
        }
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn test_csv_non_numeric_coordinate() {
    let csv = "x,y,class\n0,0,A\nabc,1,B\n";
    let err = TrainingSet::from_csv_reader(csv.as_bytes(), &ColumnSpec::default()).unwrap_err();
    match err {
        SurfaceError::MalformedRecord { line, field, message } => {
            assert_eq!(line, 3);
            assert_eq!(field, "x");
            assert!(message.contains("abc"));
        }
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn test_csv_non_finite_coordinate() {
    let csv = "x,y,class\nNaN,0,A\n";
    let err = TrainingSet::from_csv_reader(csv.as_bytes(), &ColumnSpec::default()).unwrap_err();
    assert!(matches!(err, SurfaceError::MalformedRecord { .. }));
}

#[test]
fn test_csv_empty_coordinate() {
    let csv = "x,y,class\n0,,A\n";
    let err = TrainingSet::from_csv_reader(csv.as_bytes(), &ColumnSpec::default()).unwrap_err();
    match err {
        SurfaceError::MalformedRecord { field, message, .. } => {
            assert_eq!(field, "y");
            assert!(message.contains("missing"));
        }
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn test_csv_empty_label() {
    let csv = "x,y,class\n0,0,\n";
    let err = TrainingSet::from_csv_reader(csv.as_bytes(), &ColumnSpec::default()).unwrap_err();
    assert!(matches!(err, SurfaceError::MalformedRecord { .. }));
}

#[test]
fn test_csv_header_only_is_invalid_input() {
    let csv = "x,y,class\n";
    let err = TrainingSet::from_csv_reader(csv.as_bytes(), &ColumnSpec::default()).unwrap_err();
    assert!(matches!(err, SurfaceError::InvalidInput { .. }));
}

#[test]
fn test_csv_empty_input_is_invalid_input() {
    let err = TrainingSet::from_csv_reader("".as_bytes(), &ColumnSpec::default()).unwrap_err();
    match err {
        SurfaceError::InvalidInput { message } => assert!(message.contains("header")),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_csv_missing_file_is_io_error() {
    let err = TrainingSet::from_csv_path("/nonexistent/points.csv", &ColumnSpec::default())
        .unwrap_err();
    assert!(matches!(err, SurfaceError::Io(_)));
}

#[test]
fn test_column_spec_deserializes_mixed_refs() {
    let spec: ColumnSpec =
        serde_json::from_str(r#"{"x": "sepal_length", "y": 3, "label": "species"}"#)
            .expect("valid json");
    assert_eq!(spec.x, ColumnRef::Name("sepal_length".to_string()));
    assert_eq!(spec.y, ColumnRef::Index(3));
    assert_eq!(spec.label, ColumnRef::Name("species".to_string()));
}

#[test]
fn test_column_spec_defaults_missing_fields() {
    let spec: ColumnSpec = serde_json::from_str(r#"{"label": 4}"#).expect("valid json");
    assert_eq!(spec.x, ColumnRef::Index(0));
    assert_eq!(spec.y, ColumnRef::Index(1));
    assert_eq!(spec.label, ColumnRef::Index(4));
}
