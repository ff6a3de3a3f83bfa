//! Chart Viewer Widget
//! Central panel showing the current chart and its interpretation line.

use crate::charts::{ChartPlotter, ChartSpec, Rendered};
use egui::{Color32, RichText};

const INTERPRETATION_HEIGHT: f32 = 40.0;

/// Displays the last successfully rendered chart.
pub struct ChartViewer {
    pub chart: Option<ChartSpec>,
    pub interpretation: String,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            chart: None,
            interpretation: "Interpretation will appear here".to_string(),
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a render result. Without a chart only the interpretation changes.
    pub fn set_rendered(&mut self, rendered: Rendered) {
        if let Some(chart) = rendered.chart {
            self.chart = Some(chart);
        }
        self.interpretation = rendered.interpretation;
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let plot_height = (ui.available_height() - INTERPRETATION_HEIGHT - 40.0).max(200.0);

        match &self.chart {
            Some(chart) => ChartPlotter::draw_chart(ui, chart, plot_height),
            None => {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("Graph will appear here").size(16.0).strong());
                });
                ui.allocate_ui(egui::vec2(ui.available_width(), plot_height), |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            RichText::new("Load data to get started")
                                .size(20.0)
                                .color(Color32::GRAY),
                        );
                    });
                });
            }
        }

        ui.separator();
        ui.label(RichText::new(format!("📊 {}", self.interpretation)).size(14.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ChartKind, AXES_REQUIRED};

    fn bars_chart() -> ChartSpec {
        ChartSpec {
            title: "Bar Chart of species".into(),
            x_label: "species".into(),
            y_label: "Count".into(),
            kind: ChartKind::Bars {
                labels: vec!["a".into()],
                heights: vec![1.0],
            },
        }
    }

    #[test]
    fn prompt_keeps_previous_chart() {
        let mut viewer = ChartViewer::new();
        viewer.set_rendered(Rendered {
            chart: Some(bars_chart()),
            interpretation: "Bar chart of species".into(),
        });
        viewer.set_rendered(Rendered {
            chart: None,
            interpretation: AXES_REQUIRED.into(),
        });

        assert_eq!(viewer.chart, Some(bars_chart()));
        assert_eq!(viewer.interpretation, AXES_REQUIRED);
    }
}
