//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use autolysis::plot::{ChartRenderer, PlotError, PlotKind};
use polars::prelude::*;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

/// Write `content` to `<dir>/<name>` and return the path
pub fn write_file(dir: &Path, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Create a temporary directory holding one CSV file
pub fn create_temp_csv(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(temp_dir.path(), name, content);
    (temp_dir, path)
}

/// CSV with the classic mixed-quality layout:
/// - `id`: 1..=100, all unique (ratio 1.0, excluded)
/// - `score`: roughly normal around 70, rounded to whole points (meaningful)
/// - `category`: 5 values cycling (ratio 0.05, excluded)
pub fn id_score_category_csv() -> String {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let categories = ["red", "green", "blue", "yellow", "purple"];

    let mut csv = String::from("id,score,category\n");
    for i in 0..100 {
        // Box-Muller transform
        let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
        let u2: f64 = rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        let score = (70.0 + 10.0 * z).round();
        csv.push_str(&format!("{},{:.1},{}\n", i + 1, score, categories[i % 5]));
    }
    csv
}

/// Ten-row DataFrame with known selector outcomes:
/// - `id`: unique, excluded
/// - `constant_ish`: 1 distinct value (ratio 0.1, excluded at the boundary)
/// - `a`: 5 distinct floats (meaningful numeric)
/// - `b`: 4 distinct ints (meaningful numeric)
/// - `c`: 3 distinct strings (meaningful categorical)
pub fn create_mixed_dataframe() -> DataFrame {
    df! {
        "id" => [1i32, 2, 3, 4, 5, 6, 7, 8, 9, 10],
        "constant_ish" => [7i32; 10],
        "a" => [1.0f64, 2.0, 3.0, 1.0, 2.0, 3.0, 4.0, 5.0, 1.0, 2.0],
        "b" => [10i64, 20, 10, 30, 20, 10, 40, 10, 20, 30],
        "c" => ["x", "y", "x", "z", "x", "y", "x", "z", "x", "x"],
    }
    .unwrap()
}

/// Renderer that records every call and writes a small stub file instead of an image
#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: RefCell<Vec<(PlotKind, String)>>,
    pub fail_on: Option<PlotKind>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(kind: PlotKind) -> Self {
        Self {
            fail_on: Some(kind),
            ..Self::default()
        }
    }

    pub fn kinds(&self) -> Vec<PlotKind> {
        self.calls.borrow().iter().map(|(kind, _)| *kind).collect()
    }

    fn record(&self, kind: PlotKind, column: &str, path: &Path) -> Result<(), PlotError> {
        self.calls.borrow_mut().push((kind, column.to_string()));
        if self.fail_on == Some(kind) {
            return Err(PlotError::Render("forced failure".to_string()));
        }
        std::fs::write(path, b"stub").map_err(|e| PlotError::Render(e.to_string()))
    }
}

impl ChartRenderer for RecordingRenderer {
    fn histogram(&self, column: &str, _values: &[f64], path: &Path) -> Result<(), PlotError> {
        self.record(PlotKind::Histogram, column, path)
    }

    fn box_plot(&self, column: &str, _values: &[f64], path: &Path) -> Result<(), PlotError> {
        self.record(PlotKind::BoxPlot, column, path)
    }

    fn category_bar(
        &self,
        column: &str,
        _categories: &[(String, usize)],
        path: &Path,
    ) -> Result<(), PlotError> {
        self.record(PlotKind::CategoryBar, column, path)
    }
}
