//! Control Panel Widget
//! Left side panel with data source, axis and chart type controls.

use crate::charts::{ChartType, Selection};
use crate::data::DatasetInfo;
use egui::{Color32, ComboBox, RichText};

/// Left side control panel. Selection state itself is owned by the app.
pub struct ControlPanel {
    pub url: String,
    pub columns: Vec<String>,
    pub info: Option<DatasetInfo>,
    pub source: Option<String>,
    pub status: String,
}

impl ControlPanel {
    pub fn new(default_url: &str) -> Self {
        Self {
            url: default_url.to_string(),
            columns: Vec::new(),
            info: None,
            source: None,
            status: "Ready".to_string(),
        }
    }

    /// Update available columns and the summary after a load
    pub fn update_dataset(
        &mut self,
        columns: Vec<String>,
        info: Option<DatasetInfo>,
        source: Option<String>,
    ) {
        self.columns = columns;
        self.info = info;
        self.source = source;
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, selection: &mut Selection) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Data Graph Explorer")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("Data URL:");
            ui.add(egui::TextEdit::singleline(&mut self.url).desired_width(f32::INFINITY));
        });
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.button("🌐 Load from URL").clicked() {
                action = ControlPanelAction::LoadUrl;
            }
            if ui.button("⭐ Load Default").clicked() {
                action = ControlPanelAction::LoadDefault;
            }
            if ui.button("📂 Upload CSV").clicked() {
                action = ControlPanelAction::UploadCsv;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Axis Section =====
        ui.label(RichText::new("🔧 Axes").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 70.0;
        let combo_width = 180.0;
        let has_columns = !self.columns.is_empty();

        ui.add_enabled_ui(has_columns, |ui| {
            for (axis, salt) in [("X-axis:", "x_col"), ("Y-axis:", "y_col")] {
                let slot = if salt == "x_col" {
                    &mut selection.x_col
                } else {
                    &mut selection.y_col
                };
                ui.horizontal(|ui| {
                    ui.add_sized([label_width, 20.0], egui::Label::new(axis));
                    ComboBox::from_id_salt(salt)
                        .width(combo_width)
                        .selected_text(slot.as_deref().unwrap_or("Select column"))
                        .show_ui(ui, |ui| {
                            for col in &self.columns {
                                if ui
                                    .selectable_label(slot.as_deref() == Some(col.as_str()), col)
                                    .clicked()
                                {
                                    *slot = Some(col.clone());
                                    action = ControlPanelAction::SelectionChanged;
                                }
                            }
                        });
                });
                ui.add_space(5.0);
            }
        });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Chart Type Section =====
        ui.label(RichText::new("📈 Graph Type").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            for chart_type in ChartType::ALL {
                if ui
                    .radio_value(&mut selection.chart_type, chart_type, chart_type.label())
                    .clicked()
                {
                    action = ControlPanelAction::SelectionChanged;
                }
            }
        });

        ui.add_space(15.0);

        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("▶ Generate Graph").size(16.0))
                .min_size(egui::vec2(200.0, 35.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::Generate;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Data Information Section =====
        ui.label(RichText::new("ℹ Data Information").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| match &self.info {
                Some(info) => {
                    let (rows, cols) = info.shape();
                    if let Some(source) = &self.source {
                        ui.label(RichText::new(source).size(11.0).color(Color32::GRAY));
                    }
                    ui.label(format!("Dataset Shape: ({rows}, {cols})"));
                    ui.add_space(4.0);
                    ui.label(RichText::new(format!("Columns ({cols}):")).strong());
                    egui::Grid::new("data_info_grid")
                        .striped(true)
                        .spacing([12.0, 2.0])
                        .show(ui, |ui| {
                            for (name, dtype) in &info.columns {
                                ui.label(format!("• {name}"));
                                ui.label(RichText::new(dtype).color(Color32::GRAY));
                                ui.end_row();
                            }
                        });
                }
                None => {
                    ui.label(RichText::new("No data loaded").color(Color32::GRAY));
                }
            });

        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    LoadUrl,
    LoadDefault,
    UploadCsv,
    SelectionChanged,
    Generate,
}
