//! Plot generation - picks what to draw and delegates rendering
//!
//! At most [`MAX_PLOTS`] images are written, in a fixed priority order:
//! histogram of the first meaningful numeric column, box plot of the second,
//! then a bar chart of the first meaningful categorical column. The bar chart
//! is only attempted while fewer than two images exist.

pub mod fonts;
pub mod geometry;
pub mod render;

use std::path::{Path, PathBuf};

use polars::prelude::*;
use thiserror::Error;

use crate::pipeline::{meaningful_columns, top_categories, ColumnKind, TOP_CATEGORIES};
use crate::utils::{print_info, print_warning};

pub use render::PlottersRenderer;

/// Maximum number of images produced for one dataset
pub const MAX_PLOTS: usize = 2;

/// Kind of chart an artifact holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotKind {
    Histogram,
    BoxPlot,
    CategoryBar,
}

impl PlotKind {
    pub const ALL: [PlotKind; 3] = [
        PlotKind::Histogram,
        PlotKind::BoxPlot,
        PlotKind::CategoryBar,
    ];

    /// Suffix used in the image file name
    pub fn file_suffix(self) -> &'static str {
        match self {
            PlotKind::Histogram => "histogram",
            PlotKind::BoxPlot => "box_plot",
            PlotKind::CategoryBar => "categories",
        }
    }

    /// Human-readable name used in console messages
    pub fn label(self) -> &'static str {
        match self {
            PlotKind::Histogram => "histogram",
            PlotKind::BoxPlot => "box plot",
            PlotKind::CategoryBar => "categories",
        }
    }
}

/// One rendered image and where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct PlotArtifact {
    pub kind: PlotKind,
    pub column: String,
    pub path: PathBuf,
}

impl PlotArtifact {
    /// File name of the image, used as alt text and link in the report
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Errors raised while producing plots
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Data(#[from] PolarsError),

    #[error("column '{0}' has no values to plot")]
    NoData(String),

    #[error("column '{0}' spans a value range too wide to plot")]
    Range(String),

    #[error("cannot remove stale image {}: {source}", path.display())]
    Stale {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rendering failed: {0}")]
    Render(String),
}

/// Backend that turns prepared data into image files
pub trait ChartRenderer {
    /// Histogram with a smoothed density overlay
    fn histogram(&self, column: &str, values: &[f64], path: &Path) -> Result<(), PlotError>;

    /// Vertical box plot
    fn box_plot(&self, column: &str, values: &[f64], path: &Path) -> Result<(), PlotError>;

    /// Horizontal bar chart, categories given most frequent first
    fn category_bar(
        &self,
        column: &str,
        categories: &[(String, usize)],
        path: &Path,
    ) -> Result<(), PlotError>;
}

/// Image path for a column and plot kind: `<output_dir>/<column>_<suffix>.png`
pub fn artifact_path(output_dir: &Path, column: &str, kind: PlotKind) -> PathBuf {
    let safe_column: String = column
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    output_dir.join(format!("{}_{}.png", safe_column, kind.file_suffix()))
}

/// Whether a file name looks like an image written by [`generate_plots`]
pub fn is_plot_image(file_name: &str) -> bool {
    PlotKind::ALL
        .iter()
        .any(|kind| file_name.ends_with(&format!("_{}.png", kind.file_suffix())))
}

/// Delete images left in `output_dir` by an earlier run
fn remove_stale_images(output_dir: &Path) -> Result<(), PlotError> {
    let entries = std::fs::read_dir(output_dir).map_err(|source| PlotError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    for entry in entries.flatten() {
        let path = entry.path();
        let stale = path.is_file()
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(is_plot_image);
        if stale {
            std::fs::remove_file(&path).map_err(|source| PlotError::Stale { path, source })?;
        }
    }
    Ok(())
}

/// Non-missing, finite values of a column as f64
pub fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<f64>, PlotError> {
    let as_float = df.column(column)?.cast(&DataType::Float64)?;
    let values: Vec<f64> = as_float
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect();

    if values.is_empty() {
        return Err(PlotError::NoData(column.to_string()));
    }
    Ok(values)
}

/// Produce up to [`MAX_PLOTS`] images for the dataset.
///
/// Images from an earlier run in `output_dir` are removed first. A failure
/// inside one plot is reported and that plot is skipped. Only a failure to
/// prepare `output_dir` or to classify columns is returned as an error.
pub fn generate_plots(
    df: &DataFrame,
    output_dir: &Path,
    renderer: &dyn ChartRenderer,
) -> Result<Vec<PlotArtifact>, PlotError> {
    std::fs::create_dir_all(output_dir).map_err(|source| PlotError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;
    remove_stale_images(output_dir)?;

    let mut artifacts = Vec::with_capacity(MAX_PLOTS);

    let numeric = meaningful_columns(df, ColumnKind::Numeric)?;
    if let Some(first) = numeric.first() {
        attempt(&mut artifacts, output_dir, first, PlotKind::Histogram, |path| {
            let values = numeric_values(df, first)?;
            renderer.histogram(first, &values, path)
        });

        if let Some(second) = numeric.get(1) {
            attempt(&mut artifacts, output_dir, second, PlotKind::BoxPlot, |path| {
                let values = numeric_values(df, second)?;
                renderer.box_plot(second, &values, path)
            });
        }
    } else {
        print_info("No meaningful numerical columns available for plotting.");
    }

    if artifacts.len() < MAX_PLOTS {
        let categorical = meaningful_columns(df, ColumnKind::Categorical)?;
        if let Some(column) = categorical.first() {
            attempt(&mut artifacts, output_dir, column, PlotKind::CategoryBar, |path| {
                let top = top_categories(df, column, TOP_CATEGORIES)?;
                if top.is_empty() {
                    return Err(PlotError::NoData(column.clone()));
                }
                renderer.category_bar(column, &top, path)
            });
        }
    }

    Ok(artifacts)
}

fn attempt<F>(
    artifacts: &mut Vec<PlotArtifact>,
    output_dir: &Path,
    column: &str,
    kind: PlotKind,
    draw: F,
) where
    F: FnOnce(&Path) -> Result<(), PlotError>,
{
    let path = artifact_path(output_dir, column, kind);
    match draw(&path) {
        Ok(()) => artifacts.push(PlotArtifact {
            kind,
            column: column.to_string(),
            path,
        }),
        Err(e) => print_warning(&format!(
            "Error plotting {} for column {}: {}",
            kind.label(),
            column,
            e
        )),
    }
}
