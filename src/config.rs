//! Application configuration.
//! Fixed defaults for data sources, chart selection thresholds and the window.

/// Sample dataset loaded by "Load Default".
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/mwaskom/seaborn-data/master/iris.csv";

/// Explorer settings shared by the loader, the chart selector and the window.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    pub default_url: String,
    /// Number of equal-width bins for histograms.
    pub histogram_bins: usize,
    /// Numeric columns with fewer distinct values than this are counted, not grouped.
    pub categorical_threshold: usize,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            default_url: DEFAULT_DATA_URL.to_string(),
            histogram_bins: 20,
            categorical_threshold: 10,
            window_size: [1400.0, 850.0],
            min_window_size: [1000.0, 650.0],
        }
    }
}
