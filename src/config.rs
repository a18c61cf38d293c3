//! Surface configuration.
//!
//! Every field has a default, so a configuration document only needs to
//! name what it changes:
//!
//! ```json
//! {
//!   "k": 15,
//!   "weighting": "distance",
//!   "grid": { "step": 0.05 },
//!   "columns": { "x": "petal_length", "y": "petal_width", "label": "species" }
//! }
//! ```

use crate::classification::Weighting;
use crate::data::{ColumnSpec, TrainingSet};
use crate::error::{Result, SurfaceError};
use crate::grid::GridSpec;
use crate::surface::DecisionSurface;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default neighbour count.
pub const DEFAULT_K: usize = 5;

/// Everything needed to go from a CSV file to a decision surface.
///
/// # Examples
///
/// ```
/// use aprender_surface::classification::Weighting;
/// use aprender_surface::config::SurfaceConfig;
///
/// let config = SurfaceConfig::from_json_str(r#"{"k": 7, "weighting": "distance"}"#).unwrap();
/// assert_eq!(config.k, 7);
/// assert_eq!(config.weighting, Weighting::Distance);
/// assert_eq!(config.grid.margin, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurfaceConfig {
    /// Grid layout
    pub grid: GridSpec,
    /// Initial neighbour count
    pub k: usize,
    /// Vote weighting
    pub weighting: Weighting,
    /// CSV column selection
    pub columns: ColumnSpec,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            k: DEFAULT_K,
            weighting: Weighting::Uniform,
            columns: ColumnSpec::default(),
        }
    }
}

impl SurfaceConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the grid layout.
    #[must_use]
    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }

    /// Sets the initial neighbour count.
    #[must_use]
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Sets the vote weighting.
    #[must_use]
    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Sets the CSV column selection.
    #[must_use]
    pub fn with_columns(mut self, columns: ColumnSpec) -> Self {
        self.columns = columns;
        self
    }

    /// Checks values that do not depend on the data.
    ///
    /// `k` is checked against the training set size when a surface is
    /// evaluated.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an invalid grid or `k = 0`.
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        if self.k == 0 {
            return Err(SurfaceError::invalid_parameter("k", 0, ">= 1"));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `Config` for malformed JSON or unknown fields, and
    /// `InvalidParameter` for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, otherwise as
    /// [`SurfaceConfig::from_json_str`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded surface config");
        Ok(config)
    }

    /// Loads the training CSV, builds the surface and evaluates it at the
    /// configured `k`.
    ///
    /// # Errors
    ///
    /// Any loading, grid or evaluation error; see [`TrainingSet::from_csv_path`]
    /// and [`DecisionSurface::set_k_with`].
    pub fn load_surface<P: AsRef<Path>>(&self, csv_path: P) -> Result<DecisionSurface> {
        self.validate()?;
        let training = TrainingSet::from_csv_path(csv_path, &self.columns)?;
        let mut surface = DecisionSurface::new(training, &self.grid)?;
        surface.set_k_with(self.k, self.weighting)?;
        Ok(surface)
    }
}
