//! CSV loading for training sets.
//!
//! Input is comma-separated UTF-8 with a header row. Two columns hold the
//! coordinates and one holds the class label; columns are picked by
//! position or by header name.

use super::{Builder, TrainingSet};
use crate::error::{Result, SurfaceError};
use crate::primitives::Point2;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Reference to a CSV column, by zero-based position or header name.
///
/// Deserializes from either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    /// Zero-based column position
    Index(usize),
    /// Header name (exact match after trimming)
    Name(String),
}

impl ColumnRef {
    fn resolve(&self, role: &str, headers: &csv::StringRecord) -> Result<usize> {
        match self {
            ColumnRef::Index(i) if *i < headers.len() => Ok(*i),
            ColumnRef::Index(i) => Err(SurfaceError::invalid_parameter(
                &format!("columns.{role}"),
                i,
                format!("< {}", headers.len()),
            )),
            ColumnRef::Name(name) => headers
                .iter()
                .position(|h| h.trim() == name.as_str())
                .ok_or_else(|| {
                    SurfaceError::invalid_parameter(
                        &format!("columns.{role}"),
                        name,
                        format!(
                            "one of {:?}",
                            headers.iter().map(str::trim).collect::<Vec<_>>()
                        ),
                    )
                }),
        }
    }
}

impl From<usize> for ColumnRef {
    fn from(i: usize) -> Self {
        ColumnRef::Index(i)
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        ColumnRef::Name(name.to_string())
    }
}

/// Which columns hold the x coordinate, the y coordinate and the label.
///
/// Defaults to the first three columns in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnSpec {
    /// Column with the x coordinate
    pub x: ColumnRef,
    /// Column with the y coordinate
    pub y: ColumnRef,
    /// Column with the class label
    pub label: ColumnRef,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            x: ColumnRef::Index(0),
            y: ColumnRef::Index(1),
            label: ColumnRef::Index(2),
        }
    }
}

impl ColumnSpec {
    /// Selects columns by header name.
    #[must_use]
    pub fn by_name(x: &str, y: &str, label: &str) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            label: label.into(),
        }
    }

    fn resolve(&self, headers: &csv::StringRecord) -> Result<[usize; 3]> {
        Ok([
            self.x.resolve("x", headers)?,
            self.y.resolve("y", headers)?,
            self.label.resolve("label", headers)?,
        ])
    }
}

impl TrainingSet {
    /// Loads a training set from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened, `InvalidParameter` if a
    /// selected column does not exist, `MalformedRecord` for a row with a
    /// missing field, a non-numeric or non-finite coordinate or an empty
    /// label, and `InvalidInput` if the file holds no records.
    pub fn from_csv_path<P: AsRef<Path>>(path: P, columns: &ColumnSpec) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let set = Self::from_csv_reader(file, columns)?;
        tracing::debug!(
            path = %path.display(),
            records = set.len(),
            classes = set.n_classes(),
            "loaded training set"
        );
        Ok(set)
    }

    /// Loads a training set from any CSV source.
    ///
    /// # Errors
    ///
    /// Same as [`TrainingSet::from_csv_path`], minus file opening.
    ///
    /// # Examples
    ///
    /// ```
    /// use aprender_surface::data::{ColumnSpec, TrainingSet};
    ///
    /// let csv = "x,y,class\n0,0,A\n1,1,B\n";
    /// let set = TrainingSet::from_csv_reader(csv.as_bytes(), &ColumnSpec::default())
    ///     .expect("well-formed CSV");
    /// assert_eq!(set.len(), 2);
    /// assert_eq!(set.class_name(1), Some("B"));
    /// ```
    pub fn from_csv_reader<R: Read>(reader: R, columns: &ColumnSpec) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(SurfaceError::invalid_input("no header row"));
        }
        let [x_idx, y_idx, label_idx] = columns.resolve(&headers)?;
        let x_name = header_name(&headers, x_idx);
        let y_name = header_name(&headers, y_idx);
        let label_name = header_name(&headers, label_idx);

        let mut builder = Builder::default();
        let mut line_num = 1; // header

        for result in reader.records() {
            let record = result?;
            line_num = record.position().map_or(line_num + 1, csv::Position::line);

            let x = parse_coordinate(&record, x_idx, &x_name, line_num)?;
            let y = parse_coordinate(&record, y_idx, &y_name, line_num)?;
            let label = record
                .get(label_idx)
                .map(str::trim)
                .ok_or_else(|| SurfaceError::malformed(line_num, &label_name, "missing field"))?;
            if label.is_empty() {
                return Err(SurfaceError::malformed(line_num, &label_name, "empty label"));
            }

            builder.push(Point2::new(x, y), label);
        }

        let set = builder.finish();
        if set.is_empty() {
            return Err(SurfaceError::invalid_input("no training records found"));
        }
        Ok(set)
    }
}

fn header_name(headers: &csv::StringRecord, idx: usize) -> String {
    headers
        .get(idx)
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map_or_else(|| format!("#{idx}"), str::to_string)
}

fn parse_coordinate(
    record: &csv::StringRecord,
    idx: usize,
    field: &str,
    line: u64,
) -> Result<f64> {
    let raw = record
        .get(idx)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SurfaceError::malformed(line, field, "missing field"))?;
    let value: f64 = raw
        .parse()
        .map_err(|_| SurfaceError::malformed(line, field, format!("not a number: '{raw}'")))?;
    if !value.is_finite() {
        return Err(SurfaceError::malformed(
            line,
            field,
            format!("non-finite coordinate: '{raw}'"),
        ));
    }
    Ok(value)
}
