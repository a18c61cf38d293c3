//! KNN Decision Boundary on a Two-Moons Dataset
//!
//! This demo walks through what a dashboard does when a user drags the
//! neighbour-count slider:
//! - Load the labeled points once
//! - Build the evaluation grid once
//! - Recompute every prediction whenever k changes
//! - Hand the class and confidence grids to a renderer (ASCII here)
//!
//! Run with `RUST_LOG=debug` to see the library's tracing output.
//!
//! ```text
//! cargo run --example decision_boundary -- [data.csv] [k ...]
//! ```

use aprender_surface::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_DATA: &str = "demos/data/two_moons.csv";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| DEFAULT_DATA.to_string());
    let ks: Vec<usize> = args.map(|a| a.parse()).collect::<Result<_, _>>()?;
    let ks = if ks.is_empty() { vec![1, 5, 15, 60] } else { ks };

    println!("=== KNN Decision Surface ===\n");

    let training = TrainingSet::from_csv_path(&path, &ColumnSpec::default())?;
    println!("{}\n", training.summary());

    let spec = GridSpec::new().with_step(0.1);
    let mut surface = DecisionSurface::new(training, &spec)?;
    let (nx, ny) = surface.grid().shape();
    println!("Grid: {nx} x {ny} = {} points\n", surface.grid().len());

    for k in ks {
        let predictions = match surface.set_k(k) {
            Ok(p) => p,
            Err(e) => {
                println!("k={k}: rejected ({e})\n");
                continue;
            }
        };

        let training = surface.training_set();
        let counts = predictions.class_counts(training.n_classes());
        println!("=== k = {k} ===");
        for (label, count) in training.classes().iter().zip(&counts) {
            println!("  {label:>8}: {count} grid points");
        }
        println!("  mean confidence: {:.3}\n", predictions.mean_confidence());
        render(&predictions);
        println!();
    }

    let weighted = surface.set_k_with(15, Weighting::Distance)?;
    println!(
        "=== k = 15, distance-weighted ===\n  mean confidence: {:.3}",
        weighted.mean_confidence()
    );

    Ok(())
}

/// Draws the surface with one character per cell: the class letter when
/// confidence is at least 0.8, lower case when the vote is closer.
fn render(predictions: &PredictionSet) {
    const SYMBOLS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];
    let classes = predictions.class_grid();
    let confidences = predictions.confidence_grid();
    let (nx, ny) = predictions.shape();

    // Sample at most 60 columns and 24 rows; y grows upwards.
    let x_stride = nx.div_ceil(60).max(1);
    let y_stride = ny.div_ceil(24).max(1);

    for iy in (0..ny).rev().step_by(y_stride) {
        let line: String = (0..nx)
            .step_by(x_stride)
            .map(|ix| {
                let symbol = SYMBOLS[classes[ix][iy] % SYMBOLS.len()];
                if confidences[ix][iy] >= 0.8 {
                    symbol
                } else {
                    symbol.to_ascii_lowercase()
                }
            })
            .collect();
        println!("  {line}");
    }
}
