//! Chart Plotter Module
//! Draws chart descriptions interactively using egui_plot.

use crate::charts::{ChartKind, ChartSpec};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};
use std::ops::RangeInclusive;

/// Main series color
pub const SERIES_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const EDGE_COLOR: Color32 = Color32::from_rgb(30, 30, 30);

const BAR_WIDTH: f64 = 0.8;

/// Draws a `ChartSpec` into an egui region.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Tick formatter for a categorical axis: labels at integer positions only.
    fn category_formatter(
        labels: Vec<String>,
    ) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String + 'static {
        move |mark, _range| {
            let rounded = mark.value.round();
            if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            labels.get(rounded as usize).cloned().unwrap_or_default()
        }
    }

    /// Draw the chart title and the interactive plot filling `height`.
    pub fn draw_chart(ui: &mut egui::Ui, chart: &ChartSpec, height: f32) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&chart.title).size(16.0).strong());
        });
        ui.add_space(6.0);

        let (x_labels, y_labels) = match &chart.kind {
            ChartKind::Bars { labels, .. } => (Some(labels.clone()), None),
            ChartKind::Scatter {
                x_labels, y_labels, ..
            }
            | ChartKind::Line {
                x_labels, y_labels, ..
            } => (x_labels.clone(), y_labels.clone()),
            ChartKind::Histogram(_) => (None, None),
        };

        let mut plot = Plot::new(format!("chart_{}", chart.title))
            .height(height)
            .x_axis_label(chart.x_label.clone())
            .y_axis_label(chart.y_label.clone())
            .allow_scroll(false);
        if let Some(labels) = x_labels {
            plot = plot.x_axis_formatter(Self::category_formatter(labels));
        }
        if let Some(labels) = y_labels {
            plot = plot.y_axis_formatter(Self::category_formatter(labels));
        }

        plot.show(ui, |plot_ui| match &chart.kind {
            ChartKind::Histogram(hist) => {
                let width = hist.bin_width();
                let bars: Vec<Bar> = hist
                    .bars()
                    .into_iter()
                    .map(|(center, count)| {
                        Bar::new(center, count as f64)
                            .width(width)
                            .stroke(egui::Stroke::new(1.0, EDGE_COLOR))
                    })
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(SERIES_COLOR.gamma_multiply(0.7))
                        .name(&chart.x_label),
                );
            }
            ChartKind::Bars { labels, heights } => {
                let bars: Vec<Bar> = labels
                    .iter()
                    .zip(heights.iter())
                    .enumerate()
                    .map(|(i, (label, &height))| {
                        Bar::new(i as f64, height).width(BAR_WIDTH).name(label)
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).color(SERIES_COLOR));
            }
            ChartKind::Scatter { points, .. } => {
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(3.0)
                        .color(SERIES_COLOR.gamma_multiply(0.6))
                        .name(&chart.y_label),
                );
            }
            ChartKind::Line { points, .. } => {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(SERIES_COLOR)
                        .width(2.0)
                        .name(&chart.y_label),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(2.0)
                        .color(SERIES_COLOR),
                );
            }
        });
    }
}
