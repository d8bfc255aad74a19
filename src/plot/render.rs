//! PNG rendering with plotters' bitmap backend

use std::fmt::Display;
use std::path::Path;

use plotters::prelude::*;

use super::fonts::{text_available, FONT_FAMILY};
use super::geometry::{has_finite_span, kde_curve, BoxStats, Histogram, HISTOGRAM_BINS};
use super::{ChartRenderer, PlotError};

/// Image size in pixels (8 x 6 inches at 100 dpi)
pub const FIGURE_SIZE: (u32, u32) = (800, 600);

const KDE_POINTS: usize = 200;

const TEAL: RGBColor = RGBColor(0, 128, 128);
const ORANGE: RGBColor = RGBColor(255, 165, 0);

/// Five evenly spaced samples of the viridis colormap
const VIRIDIS: [RGBColor; 5] = [
    RGBColor(68, 1, 84),
    RGBColor(59, 82, 139),
    RGBColor(33, 145, 140),
    RGBColor(94, 201, 98),
    RGBColor(253, 231, 37),
];

fn render_err<E: Display>(e: E) -> PlotError {
    PlotError::Render(e.to_string())
}

/// Pad a value range so data does not touch the plot border.
/// `None` when the padded span no longer fits in an `f64`.
fn padded_range(lo: f64, hi: f64) -> Option<(f64, f64)> {
    let (lo, hi) = if hi > lo {
        let pad = (hi - lo) * 0.05;
        (lo - pad, hi + pad)
    } else {
        (lo - 0.5, hi + 0.5)
    };
    (hi - lo).is_finite().then_some((lo, hi))
}

/// [`ChartRenderer`] writing 800x600 PNG files
#[derive(Debug, Default, Clone, Copy)]
pub struct PlottersRenderer;

impl PlottersRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ChartRenderer for PlottersRenderer {
    fn histogram(&self, column: &str, values: &[f64], path: &Path) -> Result<(), PlotError> {
        if values.is_empty() {
            return Err(PlotError::NoData(column.to_string()));
        }
        if !has_finite_span(values) {
            return Err(PlotError::Range(column.to_string()));
        }
        let hist = Histogram::from_values(values, HISTOGRAM_BINS)
            .ok_or_else(|| PlotError::NoData(column.to_string()))?;

        // Density scaled to counts so the curve sits on top of the bars
        let scale = values.len() as f64 * hist.bin_width;
        let curve: Vec<(f64, f64)> = kde_curve(values, hist.start, hist.end(), KDE_POINTS)
            .into_iter()
            .map(|(x, density)| (x, density * scale))
            .collect();

        let curve_peak = curve.iter().map(|&(_, y)| y).fold(0.0, f64::max);
        let y_max = (hist.max_count() as f64).max(curve_peak) * 1.1;

        let text = text_available();
        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut builder = ChartBuilder::on(&root);
        builder.margin(20);
        if text {
            builder
                .caption(format!("Histogram of {}", column), (FONT_FAMILY, 24))
                .x_label_area_size(50)
                .y_label_area_size(60);
        }
        let mut chart = builder
            .build_cartesian_2d(hist.start..hist.end(), 0f64..y_max)
            .map_err(render_err)?;

        if text {
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_desc(column)
                .y_desc("Frequency")
                .axis_desc_style((FONT_FAMILY, 18))
                .label_style((FONT_FAMILY, 14))
                .draw()
                .map_err(render_err)?;
        }

        chart
            .draw_series(hist.counts.iter().enumerate().map(|(idx, &count)| {
                let (left, right) = hist.bin_edges(idx);
                Rectangle::new([(left, 0.0), (right, count as f64)], TEAL.mix(0.55).filled())
            }))
            .map_err(render_err)?;
        chart
            .draw_series(hist.counts.iter().enumerate().map(|(idx, &count)| {
                let (left, right) = hist.bin_edges(idx);
                Rectangle::new([(left, 0.0), (right, count as f64)], TEAL.stroke_width(1))
            }))
            .map_err(render_err)?;

        if !curve.is_empty() {
            chart
                .draw_series(LineSeries::new(curve, TEAL.stroke_width(2)))
                .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
        Ok(())
    }

    fn box_plot(&self, column: &str, values: &[f64], path: &Path) -> Result<(), PlotError> {
        let stats =
            BoxStats::from_values(values).ok_or_else(|| PlotError::NoData(column.to_string()))?;
        let (lo, hi) = stats.extent();
        let (y_lo, y_hi) =
            padded_range(lo, hi).ok_or_else(|| PlotError::Range(column.to_string()))?;

        let text = text_available();
        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut builder = ChartBuilder::on(&root);
        builder.margin(20);
        if text {
            builder
                .caption(format!("Box Plot of {}", column), (FONT_FAMILY, 24))
                .x_label_area_size(20)
                .y_label_area_size(60);
        }
        let mut chart = builder
            .build_cartesian_2d(0f64..1f64, y_lo..y_hi)
            .map_err(render_err)?;

        if text {
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(0)
                .y_desc(column)
                .axis_desc_style((FONT_FAMILY, 18))
                .label_style((FONT_FAMILY, 14))
                .draw()
                .map_err(render_err)?;
        }

        let (box_left, box_right) = (0.3, 0.7);
        let (cap_left, cap_right) = (0.4, 0.6);
        let center = 0.5;

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(box_left, stats.q1), (box_right, stats.q3)],
                ORANGE.mix(0.85).filled(),
            )))
            .map_err(render_err)?;
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(box_left, stats.q1), (box_right, stats.q3)],
                BLACK.stroke_width(1),
            )))
            .map_err(render_err)?;

        let lines = vec![
            vec![(box_left, stats.median), (box_right, stats.median)],
            vec![(center, stats.q3), (center, stats.upper_whisker)],
            vec![(center, stats.q1), (center, stats.lower_whisker)],
            vec![(cap_left, stats.upper_whisker), (cap_right, stats.upper_whisker)],
            vec![(cap_left, stats.lower_whisker), (cap_right, stats.lower_whisker)],
        ];
        chart
            .draw_series(
                lines
                    .into_iter()
                    .map(|points| PathElement::new(points, BLACK.stroke_width(2))),
            )
            .map_err(render_err)?;

        chart
            .draw_series(
                stats
                    .outliers
                    .iter()
                    .map(|&v| Circle::new((center, v), 4, BLACK.stroke_width(1))),
            )
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }

    fn category_bar(
        &self,
        column: &str,
        categories: &[(String, usize)],
        path: &Path,
    ) -> Result<(), PlotError> {
        if categories.is_empty() {
            return Err(PlotError::NoData(column.to_string()));
        }

        let rows = categories.len() as i32;
        let max_count = categories.iter().map(|(_, c)| *c).max().unwrap_or(0) as f64;
        let x_max = (max_count * 1.1).max(1.0);

        // Row 0 is the bottom of the chart; the most frequent category goes on top
        let label_for = |value: &SegmentValue<i32>| match value {
            SegmentValue::CenterOf(row) => categories
                .get((rows - 1 - *row) as usize)
                .map(|(name, _)| name.clone())
                .unwrap_or_default(),
            _ => String::new(),
        };

        let text = text_available();
        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut builder = ChartBuilder::on(&root);
        builder.margin(20);
        if text {
            builder
                .caption(format!("Top Categories in {}", column), (FONT_FAMILY, 24))
                .x_label_area_size(50)
                .y_label_area_size(140);
        }
        let mut chart = builder
            .build_cartesian_2d(0f64..x_max, (0..rows).into_segmented())
            .map_err(render_err)?;

        if text {
            chart
                .configure_mesh()
                .disable_y_mesh()
                .y_label_formatter(&label_for)
                .x_desc("Count")
                .y_desc(column)
                .axis_desc_style((FONT_FAMILY, 18))
                .label_style((FONT_FAMILY, 14))
                .draw()
                .map_err(render_err)?;
        }

        chart
            .draw_series(categories.iter().enumerate().map(|(rank, (_, count))| {
                let row = rows - 1 - rank as i32;
                let color = VIRIDIS[rank % VIRIDIS.len()];
                let mut bar = Rectangle::new(
                    [
                        (0.0, SegmentValue::Exact(row)),
                        (*count as f64, SegmentValue::Exact(row + 1)),
                    ],
                    color.filled(),
                );
                bar.set_margin(10, 10, 0, 0);
                bar
            }))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }
}
