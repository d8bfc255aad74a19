//! Markdown report generation
//!
//! Statistics are gathered into a [`DatasetSummary`] first and then rendered
//! into a fixed template. The template carries no timestamps, so two runs on
//! the same input produce byte-identical files.

use std::path::{Path, PathBuf};

use polars::prelude::*;
use thiserror::Error;

use crate::pipeline::{
    columns_of_kind, distinct_count, meaningful_columns, top_categories, ColumnKind,
    TOP_CATEGORIES,
};
use crate::plot::PlotArtifact;
use crate::utils::print_success;

/// Name of the report file inside the output directory
pub const README_FILE: &str = "README.md";

/// Visualizations section text when no image was produced
pub const NO_VISUALIZATIONS: &str =
    "No visualizations were generated due to data constraints or processing errors.";

/// Errors raised while computing statistics or writing the report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot compute statistics: {0}")]
    Stats(#[from] PolarsError),

    #[error("cannot create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Mean and standard deviation of one numeric column
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub column: String,
    pub mean: f64,
    pub std: f64,
}

/// Top category counts of one categorical column
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalSummary {
    pub column: String,
    pub top_counts: Vec<usize>,
}

/// Everything the report shows about a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: usize,
    /// Column count per kind, most common kind first
    pub kinds: Vec<(ColumnKind, usize)>,
    pub missing_values: usize,
    pub columns_with_missing: usize,
    pub complete_columns: usize,
    /// Meaningful numeric columns with more than two distinct values
    pub numeric: Vec<NumericSummary>,
    /// First categorical column of the dataset, meaningful or not
    pub categorical: Option<CategoricalSummary>,
}

impl DatasetSummary {
    pub fn from_dataframe(df: &DataFrame) -> PolarsResult<Self> {
        let (rows, columns) = df.shape();

        let mut kinds: Vec<(ColumnKind, usize)> = Vec::new();
        let mut missing_values = 0;
        let mut columns_with_missing = 0;
        for col in df.get_columns() {
            let kind = ColumnKind::of(col.dtype());
            match kinds.iter_mut().find(|(k, _)| *k == kind) {
                Some((_, count)) => *count += 1,
                None => kinds.push((kind, 1)),
            }

            let nulls = col.null_count();
            missing_values += nulls;
            if nulls > 0 {
                columns_with_missing += 1;
            }
        }
        kinds.sort_by(|a, b| b.1.cmp(&a.1));

        let mut numeric = Vec::new();
        for name in meaningful_columns(df, ColumnKind::Numeric)? {
            let col = df.column(&name)?;
            if distinct_count(col)? <= 2 {
                continue;
            }
            let as_float = col.cast(&DataType::Float64)?;
            let values = as_float.f64()?;
            numeric.push(NumericSummary {
                column: name,
                mean: values.mean().unwrap_or(f64::NAN),
                std: values.std(1).unwrap_or(f64::NAN),
            });
        }

        let categorical = match columns_of_kind(df, ColumnKind::Categorical).into_iter().next() {
            Some(column) => {
                let top_counts = top_categories(df, &column, TOP_CATEGORIES)?
                    .into_iter()
                    .map(|(_, count)| count)
                    .collect();
                Some(CategoricalSummary { column, top_counts })
            }
            None => None,
        };

        Ok(Self {
            rows,
            columns,
            kinds,
            missing_values,
            columns_with_missing,
            complete_columns: columns - columns_with_missing,
            numeric,
            categorical,
        })
    }
}

/// Markdown image reference for one artifact, linked relative to the report
fn image_markdown(artifact: &PlotArtifact) -> String {
    let name = artifact.file_name();
    format!("![{}]({})", name, name.replace(' ', "%20"))
}

/// Render the report text
pub fn render_readme(summary: &DatasetSummary, artifacts: &[PlotArtifact]) -> String {
    let dtype_summary = summary
        .kinds
        .iter()
        .map(|(kind, count)| format!("- **{}**: {} columns", kind.label(), count))
        .collect::<Vec<_>>()
        .join("\n");

    let numerical_summary = summary
        .numeric
        .iter()
        .map(|n| {
            format!(
                "- **{}**: Mean = {:.2}, Std Dev = {:.2}",
                n.column, n.mean, n.std
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let categorical_summary = summary
        .categorical
        .as_ref()
        .map(|c| {
            let counts = c
                .top_counts
                .iter()
                .map(|count| count.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("- **{}**: Top 5 categories - {}", c.column, counts)
        })
        .unwrap_or_default();

    let plots_markdown = if artifacts.is_empty() {
        NO_VISUALIZATIONS.to_string()
    } else {
        artifacts
            .iter()
            .map(image_markdown)
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"
# Data Analysis Report

Welcome to the data analysis report for your dataset! This document highlights the key findings and provides visualizations that help understand the data better. Dive in to explore the insights revealed during our analysis.

---

## Dataset Overview

The dataset consists of **{rows} rows** and **{columns} columns**, offering a diverse range of information to analyze. Here's a breakdown of the column data types:
{dtype_summary}

Of these:
- **{missing_columns} columns** contain missing values.
- **{complete_columns} columns** are fully populated.

---

## Key Insights

### Numerical Features:
{numerical_summary}

### Categorical Features:
{categorical_summary}

---

## Visualizations

To complement the analysis, the following visualizations were created:

{plots_markdown}

---

## Next Steps

Based on this initial exploration, consider the following recommendations for further analysis:
1. Investigate missing data and decide on appropriate strategies (e.g., imputation or removal).
2. Explore the relationships between key variables using advanced statistical models or machine learning techniques.
3. Consider deeper analysis on outliers, anomalies, or trends observed in the visualizations.

Thank you for reviewing this report! We hope these insights help you make informed decisions or further explore the dataset. Stay curious and keep exploring!

---
*Generated dynamically using autolysis. Have a great day analyzing your data!*
"#,
        rows = summary.rows,
        columns = summary.columns,
        dtype_summary = dtype_summary,
        missing_columns = summary.columns_with_missing,
        complete_columns = summary.complete_columns,
        numerical_summary = numerical_summary,
        categorical_summary = categorical_summary,
        plots_markdown = plots_markdown,
    )
}

/// Compute statistics, render the report and write `<output_dir>/README.md`.
///
/// An existing report is overwritten. Returns the path written.
pub fn write_readme(
    output_dir: &Path,
    df: &DataFrame,
    artifacts: &[PlotArtifact],
) -> Result<PathBuf, ReportError> {
    let summary = DatasetSummary::from_dataframe(df)?;
    let content = render_readme(&summary, artifacts);

    std::fs::create_dir_all(output_dir).map_err(|source| ReportError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let readme_path = output_dir.join(README_FILE);
    std::fs::write(&readme_path, content).map_err(|source| ReportError::Write {
        path: readme_path.clone(),
        source,
    })?;

    print_success(&format!(
        "README.md created successfully: {}",
        readme_path.display()
    ));
    Ok(readme_path)
}
