//! Data Graph Explorer Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{ChartSelector, ChartSpec, RenderError, Selection};
use crate::config::ExplorerConfig;
use crate::data::{DataLoader, DataSource, LoaderError};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use tracing::{error, info, warn};

/// A message for the user, shown as a modal dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Warning(String),
    Error(String),
}

impl Notice {
    fn from_load_error(err: LoaderError) -> Self {
        if matches!(err, LoaderError::EmptyUrl) {
            return Notice::Warning(err.to_string());
        }
        let err = anyhow::Error::from(err).context("Error loading data");
        Notice::Error(format!("{err:#}"))
    }

    fn from_render_error(err: RenderError) -> Self {
        if err.is_warning() {
            return Notice::Warning(err.to_string());
        }
        let err = anyhow::Error::from(err).context("Error creating graph");
        Notice::Error(format!("{err:#}"))
    }

    /// Blocking native message box.
    fn show(&self) {
        let (level, title, message) = match self {
            Notice::Warning(message) => (rfd::MessageLevel::Warning, "Warning", message),
            Notice::Error(message) => (rfd::MessageLevel::Error, "Error", message),
        };
        rfd::MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(message.as_str())
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

/// Main application window. Owns the dataset and the selection state.
pub struct ExplorerApp {
    config: ExplorerConfig,
    loader: DataLoader,
    selector: ChartSelector,
    selection: Selection,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl ExplorerApp {
    pub fn new(config: ExplorerConfig) -> Self {
        Self {
            loader: DataLoader::new(),
            selector: ChartSelector::new(&config),
            selection: Selection::default(),
            control_panel: ControlPanel::new(&config.default_url),
            chart_viewer: ChartViewer::new(),
            config,
        }
    }

    /// Load a dataset, auto-select axes and draw the first chart.
    fn load(&mut self, source: DataSource) -> Result<(), Notice> {
        if let Err(err) = self.loader.load(source) {
            self.control_panel.set_status("Error: data not loaded");
            return Err(Notice::from_load_error(err));
        }

        let columns = self.loader.get_columns();
        self.selection.auto_select(&columns);
        self.control_panel.set_status(&format!(
            "Loaded {} rows, {} columns",
            self.loader.get_row_count(),
            columns.len()
        ));
        let source = self.loader.get_source().map(ToString::to_string);
        self.control_panel
            .update_dataset(columns, self.loader.info(), source);
        info!(
            x = self.selection.x_col.as_deref(),
            y = self.selection.y_col.as_deref(),
            "auto-selected axes"
        );

        self.generate()
    }

    fn handle_load_url(&mut self) -> Result<(), Notice> {
        let source = DataSource::parse(&self.control_panel.url).map_err(Notice::from_load_error)?;
        self.load(source)
    }

    fn handle_load_default(&mut self) -> Result<(), Notice> {
        self.load(DataSource::Url(self.config.default_url.clone()))
    }

    /// Native file picker; cancelling is a no-op.
    fn handle_upload_csv(&mut self) -> Result<(), Notice> {
        match rfd::FileDialog::new()
            .set_title("Select CSV file")
            .add_filter("CSV files", &["csv"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            Some(path) => self.load(DataSource::File(path)),
            None => Ok(()),
        }
    }

    /// Selection edits redraw only once there is something to draw.
    fn handle_selection_changed(&mut self) -> Result<(), Notice> {
        if self.loader.get_dataframe().is_none() {
            return Ok(());
        }
        self.generate()
    }

    fn generate(&mut self) -> Result<(), Notice> {
        let rendered = self
            .selector
            .render(self.loader.get_dataframe(), &self.selection)
            .map_err(Notice::from_render_error)?;
        info!(
            plotted = rendered.chart.as_ref().map(ChartSpec::plotted_count),
            interpretation = %rendered.interpretation,
            "chart updated"
        );
        self.chart_viewer.set_rendered(rendered);
        Ok(())
    }

    fn dispatch(&mut self, action: ControlPanelAction) -> Result<(), Notice> {
        match action {
            ControlPanelAction::LoadUrl => self.handle_load_url(),
            ControlPanelAction::LoadDefault => self.handle_load_default(),
            ControlPanelAction::UploadCsv => self.handle_upload_csv(),
            ControlPanelAction::SelectionChanged => self.handle_selection_changed(),
            ControlPanelAction::Generate => self.generate(),
            ControlPanelAction::None => Ok(()),
        }
    }

    /// Run an action and surface any failure; the app stays usable afterwards.
    fn run_action(&mut self, action: ControlPanelAction) {
        if let Err(notice) = self.dispatch(action) {
            match &notice {
                Notice::Warning(message) => warn!(notice = %message, "action rejected"),
                Notice::Error(message) => error!(notice = %message, "action failed"),
            }
            notice.show();
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        let action = SidePanel::left("control_panel")
            .min_width(320.0)
            .max_width(380.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .show(ui, |ui| self.control_panel.show(ui, &mut self.selection))
                    .inner
            })
            .inner;

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });

        if action != ControlPanelAction::None {
            self.run_action(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ChartKind, ChartType, AXES_REQUIRED};
    use std::path::PathBuf;

    const CSV: &str = "height,weight,team\n\
                       1.0,2.0,red\n\
                       2.0,4.1,blue\n\
                       3.0,5.9,red\n\
                       4.0,8.2,green\n";

    fn temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "data_graph_explorer_app_{}_{}.csv",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).expect("write temp csv");
        path
    }

    fn loaded_app(name: &str) -> (ExplorerApp, PathBuf) {
        let path = temp_csv(name, CSV);
        let mut app = ExplorerApp::new(ExplorerConfig::default());
        app.load(DataSource::File(path.clone())).expect("load");
        (app, path)
    }

    #[test]
    fn generate_without_data_warns_and_leaves_chart_alone() {
        let mut app = ExplorerApp::new(ExplorerConfig::default());
        let notice = app.generate().expect_err("no data");
        assert_eq!(notice, Notice::Warning("Please load data first".into()));
        assert!(app.chart_viewer.chart.is_none());
        assert_eq!(app.chart_viewer.interpretation, "Interpretation will appear here");
    }

    #[test]
    fn load_auto_selects_first_two_columns_and_draws_scatter() {
        let (app, path) = loaded_app("auto_select");

        assert_eq!(app.selection.x_col.as_deref(), Some("height"));
        assert_eq!(app.selection.y_col.as_deref(), Some("weight"));
        assert_eq!(app.control_panel.columns.len(), 3);
        assert_eq!(app.control_panel.status, "Loaded 4 rows, 3 columns");
        assert!(app
            .chart_viewer
            .interpretation
            .starts_with("Scatter plot: height vs weight, Correlation: 0.99"));
        assert!(matches!(
            app.chart_viewer.chart.as_ref().map(|c| &c.kind),
            Some(ChartKind::Scatter { .. })
        ));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn bar_without_y_prompts_and_keeps_chart() {
        let (mut app, path) = loaded_app("bar_prompt");
        let before = app.chart_viewer.chart.clone();

        app.selection.chart_type = ChartType::Bar;
        app.selection.y_col = None;
        app.generate().expect("prompt is not an error");

        assert_eq!(app.chart_viewer.interpretation, AXES_REQUIRED);
        assert_eq!(app.chart_viewer.chart, before);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn render_failure_is_reported_as_error() {
        let (mut app, path) = loaded_app("render_failure");

        app.selection.x_col = Some("team".into());
        app.selection.chart_type = ChartType::Histogram;
        let notice = app.dispatch(ControlPanelAction::Generate).expect_err("text histogram");
        assert_eq!(
            notice,
            Notice::Error("Error creating graph: Column 'team' is not numeric".into())
        );

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn failed_load_reports_error_and_keeps_dataset() {
        let (mut app, path) = loaded_app("failed_load");

        let missing = std::env::temp_dir().join("data_graph_explorer_app_missing.csv");
        let notice = app.load(DataSource::File(missing)).expect_err("missing file");
        match notice {
            Notice::Error(message) => assert!(message.starts_with("Error loading data: ")),
            other => panic!("unexpected notice {other:?}"),
        }
        assert_eq!(app.loader.get_row_count(), 4);
        assert_eq!(app.selection.x_col.as_deref(), Some("height"));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn empty_url_is_a_warning() {
        let mut app = ExplorerApp::new(ExplorerConfig::default());
        app.control_panel.url = "  ".into();
        let notice = app.dispatch(ControlPanelAction::LoadUrl).expect_err("empty url");
        assert_eq!(notice, Notice::Warning("Please enter a URL".into()));
    }

    #[test]
    fn url_box_accepts_local_paths() {
        let path = temp_csv("url_box_path", CSV);
        let mut app = ExplorerApp::new(ExplorerConfig::default());
        app.control_panel.url = path.display().to_string();

        app.dispatch(ControlPanelAction::LoadUrl).expect("load path");
        assert_eq!(app.loader.get_row_count(), 4);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn selection_change_before_load_does_nothing() {
        let mut app = ExplorerApp::new(ExplorerConfig::default());
        app.selection.chart_type = ChartType::Line;
        app.dispatch(ControlPanelAction::SelectionChanged).expect("no-op");
        assert!(app.chart_viewer.chart.is_none());
    }
}
