//! Column classification and the "meaningful column" filter
//!
//! A column is meaningful when its distinct-value ratio (distinct non-missing
//! values over total rows) lies strictly between [`UNIQUE_MIN`] and
//! [`UNIQUE_MAX`]. This drops near-constant columns and identifier-like
//! columns before plotting and statistics.

use std::collections::HashMap;

use polars::prelude::*;

/// Lower bound of the distinct-value ratio band (exclusive)
pub const UNIQUE_MIN: f64 = 0.1;

/// Upper bound of the distinct-value ratio band (exclusive)
pub const UNIQUE_MAX: f64 = 0.9;

/// Number of categories kept by [`top_categories`] in plots and reports
pub const TOP_CATEGORIES: usize = 5;

/// Inferred kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl ColumnKind {
    /// Classify a polars dtype. Booleans, strings and all-null columns are categorical.
    pub fn of(dtype: &DataType) -> Self {
        if dtype.is_primitive_numeric() {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
        }
    }
}

/// Derived per-column metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMeta {
    pub name: String,
    pub kind: ColumnKind,
    pub distinct: usize,
    /// `None` for a dataset without rows
    pub distinct_ratio: Option<f64>,
    pub missing: usize,
}

impl ColumnMeta {
    pub fn is_meaningful(&self) -> bool {
        self.distinct_ratio.is_some_and(ratio_in_band)
    }
}

/// Check a ratio against the fixed (0.1, 0.9) band, both ends exclusive
pub fn ratio_in_band(ratio: f64) -> bool {
    UNIQUE_MIN < ratio && ratio < UNIQUE_MAX
}

/// Number of distinct non-missing values in a column
pub fn distinct_count(column: &Column) -> PolarsResult<usize> {
    column.as_materialized_series().drop_nulls().n_unique()
}

/// Distinct-value ratio of a column, or `None` when the dataset has no rows
pub fn distinct_ratio(df: &DataFrame, column: &str) -> PolarsResult<Option<f64>> {
    let col = df.column(column)?;
    if col.len() == 0 {
        return Ok(None);
    }
    let distinct = distinct_count(col)?;
    Ok(Some(distinct as f64 / col.len() as f64))
}

/// Whether a column is meaningful for plotting and statistics
pub fn is_meaningful(df: &DataFrame, column: &str) -> PolarsResult<bool> {
    Ok(distinct_ratio(df, column)?.is_some_and(ratio_in_band))
}

/// Inferred kind of a named column
pub fn column_kind(df: &DataFrame, column: &str) -> PolarsResult<ColumnKind> {
    Ok(ColumnKind::of(df.column(column)?.dtype()))
}

/// All columns of one kind, in dataset order
pub fn columns_of_kind(df: &DataFrame, kind: ColumnKind) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| ColumnKind::of(col.dtype()) == kind)
        .map(|col| col.name().to_string())
        .collect()
}

/// Meaningful columns of one kind, in dataset order
pub fn meaningful_columns(df: &DataFrame, kind: ColumnKind) -> PolarsResult<Vec<String>> {
    let mut selected = Vec::new();
    for name in columns_of_kind(df, kind) {
        if is_meaningful(df, &name)? {
            selected.push(name);
        }
    }
    Ok(selected)
}

/// Compute [`ColumnMeta`] for every column
pub fn describe_columns(df: &DataFrame) -> PolarsResult<Vec<ColumnMeta>> {
    let height = df.height();
    df.get_columns()
        .iter()
        .map(|col| {
            let distinct = distinct_count(col)?;
            let distinct_ratio = if height == 0 {
                None
            } else {
                Some(distinct as f64 / height as f64)
            };
            Ok(ColumnMeta {
                name: col.name().to_string(),
                kind: ColumnKind::of(col.dtype()),
                distinct,
                distinct_ratio,
                missing: col.null_count(),
            })
        })
        .collect()
}

/// Most frequent values of a column.
///
/// Missing values are not counted. The result is sorted by descending count;
/// values with equal counts keep the order in which they first appear.
pub fn top_categories(df: &DataFrame, column: &str, k: usize) -> PolarsResult<Vec<(String, usize)>> {
    let as_text = df.column(column)?.cast(&DataType::String)?;
    let values = as_text.str()?;

    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in values.into_iter().flatten() {
        match position.get(value) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                position.insert(value, counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }

    // sort_by is stable, so ties stay in first-occurrence order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(k);
    Ok(counts)
}
