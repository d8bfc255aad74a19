//! Numeric summaries behind the charts: histogram bins, a Gaussian kernel
//! density curve and box plot quartiles.

use std::f64::consts::PI;

use polars::prelude::{ChunkVar, Float64Chunked};

/// Bins used for the histogram
pub const HISTOGRAM_BINS: usize = 30;

/// Whisker reach in multiples of the interquartile range
pub const WHISKER_IQR: f64 = 1.5;

/// Equal-width histogram over the value range
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub start: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width buckets spanning min..max.
    /// A constant column gets a unit-wide range centred on its value.
    /// Returns `None` for empty input or a span that overflows `f64`.
    pub fn from_values(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 || !has_finite_span(values) {
            return None;
        }

        let (min, max) = min_max(values);
        let (start, end) = if max > min {
            (min, max)
        } else {
            (min - 0.5, max + 0.5)
        };
        let bin_width = (end - start) / bins as f64;

        let mut counts = vec![0usize; bins];
        for &v in values {
            // The maximum lands exactly on the right edge; fold it into the last bin
            let idx = (((v - start) / bin_width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Self {
            start,
            bin_width,
            counts,
        })
    }

    pub fn end(&self) -> f64 {
        self.start + self.bin_width * self.counts.len() as f64
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Left and right edge of bin `idx`
    pub fn bin_edges(&self, idx: usize) -> (f64, f64) {
        let left = self.start + self.bin_width * idx as f64;
        (left, left + self.bin_width)
    }
}

/// Gaussian kernel density estimate sampled at `points` positions in `start..=end`.
///
/// Bandwidth follows Scott's rule, `std * n^(-1/5)` with the sample standard
/// deviation. Returns an empty curve when fewer than two values are given or
/// the values have no spread.
pub fn kde_curve(values: &[f64], start: f64, end: f64, points: usize) -> Vec<(f64, f64)> {
    let n = values.len();
    if n < 2 || points < 2 {
        return Vec::new();
    }

    let std = match sample_std(values) {
        Some(std) if std.is_finite() && std > 0.0 => std,
        _ => return Vec::new(),
    };

    let bandwidth = std * (n as f64).powf(-0.2);
    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * PI).sqrt());
    let step = (end - start) / (points - 1) as f64;

    (0..points)
        .map(|i| {
            let x = start + step * i as f64;
            let density: f64 = values
                .iter()
                .map(|&xi| {
                    let z = (x - xi) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            (x, density * norm)
        })
        .collect()
}

/// Quartiles, Tukey whiskers and outliers of a sample
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    /// Smallest and largest value drawn, outliers included
    pub fn extent(&self) -> (f64, f64) {
        self.outliers.iter().fold(
            (self.lower_whisker, self.upper_whisker),
            |(lo, hi), &v| (lo.min(v), hi.max(v)),
        )
    }
}

/// Linear-interpolated quantile of sorted data
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Sample standard deviation (ddof = 1), computed the same way as the report statistics
pub fn sample_std(values: &[f64]) -> Option<f64> {
    Float64Chunked::from_vec("".into(), values.to_vec()).std(1)
}

/// Whether `max - min` of non-empty `values` is representable
pub fn has_finite_span(values: &[f64]) -> bool {
    let (min, max) = min_max(values);
    !values.is_empty() && (max - min).is_finite()
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
