//! Chart Selector Module
//! Turns the loaded dataset and the current selection into a chart description
//! plus a one-line interpretation.

use crate::config::ExplorerConfig;
use crate::data::is_numeric_dtype;
use crate::stats::{Histogram, StatsCalculator};
use polars::prelude::*;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Shown instead of a chart when a two-axis chart type has no Y column.
pub const AXES_REQUIRED: &str = "Please select both X and Y axes for this graph type";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Please load data first")]
    NoData,
    #[error("Please select an X-axis column")]
    NoXColumn,
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),
    #[error("Column '{0}' is not numeric")]
    NotNumeric(String),
    #[error("Polars error")]
    PolarsError(#[from] PolarsError),
}

impl RenderError {
    /// Missing preconditions are warnings; everything else is a failed render.
    pub fn is_warning(&self) -> bool {
        matches!(self, RenderError::NoData | RenderError::NoXColumn)
    }
}

/// Chart types offered by the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartType {
    #[default]
    Scatter,
    Line,
    Histogram,
    Bar,
}

impl ChartType {
    pub const ALL: [ChartType; 4] = [
        ChartType::Scatter,
        ChartType::Line,
        ChartType::Histogram,
        ChartType::Bar,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Scatter => "scatter",
            ChartType::Line => "line",
            ChartType::Histogram => "histogram",
            ChartType::Bar => "bar",
        }
    }
}

/// Current user choice of axes and chart type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub x_col: Option<String>,
    pub y_col: Option<String>,
    pub chart_type: ChartType,
}

impl Selection {
    /// Pick the first two columns of a freshly loaded dataset.
    ///
    /// An axis keeps its previous column when the dataset is too narrow to supply one.
    pub fn auto_select(&mut self, columns: &[String]) {
        if let Some(first) = columns.first() {
            self.x_col = Some(first.clone());
        }
        if let Some(second) = columns.get(1) {
            self.y_col = Some(second.clone());
        }
    }

    fn x(&self) -> Option<&str> {
        self.x_col.as_deref().filter(|s| !s.is_empty())
    }

    fn y(&self) -> Option<&str> {
        self.y_col.as_deref().filter(|s| !s.is_empty())
    }
}

/// Values of one column mapped onto a plot axis.
///
/// Categorical columns are placed at 0, 1, 2, ... in order of first appearance
/// and keep their labels for the tick formatter.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub values: Vec<Option<f64>>,
    pub labels: Option<Vec<String>>,
}

impl Axis {
    pub fn is_numeric(&self) -> bool {
        self.labels.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Histogram(Histogram),
    /// One labelled bar per entry, drawn at positions 0, 1, 2, ...
    Bars {
        labels: Vec<String>,
        heights: Vec<f64>,
    },
    Scatter {
        points: Vec<[f64; 2]>,
        x_labels: Option<Vec<String>>,
        y_labels: Option<Vec<String>>,
    },
    Line {
        points: Vec<[f64; 2]>,
        x_labels: Option<Vec<String>>,
        y_labels: Option<Vec<String>>,
    },
}

/// Everything the plotter needs to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
}

impl ChartSpec {
    /// Number of data values represented in the chart.
    pub fn plotted_count(&self) -> usize {
        match &self.kind {
            ChartKind::Histogram(hist) => hist.total(),
            ChartKind::Bars { heights, .. } => heights.len(),
            ChartKind::Scatter { points, .. } | ChartKind::Line { points, .. } => points.len(),
        }
    }
}

/// Outcome of a render request. `chart` is `None` when the selection is
/// incomplete and only the interpretation line changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub chart: Option<ChartSpec>,
    pub interpretation: String,
}

impl Rendered {
    fn drawn(chart: ChartSpec, interpretation: String) -> Self {
        Self {
            chart: Some(chart),
            interpretation,
        }
    }

    fn prompt() -> Self {
        Self {
            chart: None,
            interpretation: AXES_REQUIRED.to_string(),
        }
    }
}

/// Decides which chart to draw for a selection and computes its data.
pub struct ChartSelector {
    histogram_bins: usize,
    categorical_threshold: usize,
}

impl Default for ChartSelector {
    fn default() -> Self {
        Self::new(&ExplorerConfig::default())
    }
}

impl ChartSelector {
    pub fn new(config: &ExplorerConfig) -> Self {
        Self {
            histogram_bins: config.histogram_bins,
            categorical_threshold: config.categorical_threshold,
        }
    }

    /// Build the chart for `selection` over `df`.
    pub fn render(
        &self,
        df: Option<&DataFrame>,
        selection: &Selection,
    ) -> Result<Rendered, RenderError> {
        let df = df.ok_or(RenderError::NoData)?;
        let x = selection.x().ok_or(RenderError::NoXColumn)?;

        debug!(
            chart_type = selection.chart_type.label(),
            x,
            y = selection.y(),
            "rendering chart"
        );

        match (selection.chart_type, selection.y()) {
            (ChartType::Histogram, _) => self.histogram(df, x),
            (ChartType::Bar, Some(y)) => self.bar(df, x, y),
            (ChartType::Scatter, Some(y)) => Self::scatter(df, x, y),
            (ChartType::Line, Some(y)) => Self::line(df, x, y),
            (ChartType::Bar | ChartType::Scatter | ChartType::Line, None) => Ok(Rendered::prompt()),
        }
    }

    fn histogram(&self, df: &DataFrame, x: &str) -> Result<Rendered, RenderError> {
        let column = column(df, x)?;
        if !is_numeric_dtype(column.dtype()) {
            return Err(RenderError::NotNumeric(x.to_string()));
        }

        let values: Vec<f64> = numeric_values(column)?.into_iter().flatten().collect();
        let hist = StatsCalculator::histogram(&values, self.histogram_bins);

        let chart = ChartSpec {
            title: format!("Distribution of {x}"),
            x_label: x.to_string(),
            y_label: "Frequency".to_string(),
            kind: ChartKind::Histogram(hist),
        };
        Ok(Rendered::drawn(
            chart,
            format!("Histogram of {x}: Shows data distribution"),
        ))
    }

    fn bar(&self, df: &DataFrame, x: &str, y: &str) -> Result<Rendered, RenderError> {
        let x_column = column(df, x)?;
        let counts = value_counts(x_column)?;

        if !is_numeric_dtype(x_column.dtype()) || counts.len() < self.categorical_threshold {
            let (labels, heights) = counts
                .into_iter()
                .map(|(label, count)| (label, count as f64))
                .unzip();
            let chart = ChartSpec {
                title: format!("Bar Chart of {x}"),
                x_label: x.to_string(),
                y_label: "Count".to_string(),
                kind: ChartKind::Bars { labels, heights },
            };
            return Ok(Rendered::drawn(chart, format!("Bar chart of {x}")));
        }

        let (labels, heights) = grouped_means(df, x, y)?;
        let chart = ChartSpec {
            title: format!("Average {y} by {x}"),
            x_label: x.to_string(),
            y_label: format!("Average {y}"),
            kind: ChartKind::Bars { labels, heights },
        };
        Ok(Rendered::drawn(
            chart,
            format!("Grouped bar chart: {y} by {x}"),
        ))
    }

    fn scatter(df: &DataFrame, x: &str, y: &str) -> Result<Rendered, RenderError> {
        let x_axis = axis(column(df, x)?)?;
        let y_axis = axis(column(df, y)?)?;

        let interpretation = if x_axis.is_numeric() && y_axis.is_numeric() {
            let r = StatsCalculator::pearson_correlation(&x_axis.values, &y_axis.values);
            format!("Scatter plot: {x} vs {y}, Correlation: {r:.3}")
        } else {
            format!("Scatter plot: {x} vs {y}")
        };

        let chart = ChartSpec {
            title: format!("Scatter Plot: {x} vs {y}"),
            x_label: x.to_string(),
            y_label: y.to_string(),
            kind: ChartKind::Scatter {
                points: paired_points(&x_axis, &y_axis),
                x_labels: x_axis.labels,
                y_labels: y_axis.labels,
            },
        };
        Ok(Rendered::drawn(chart, interpretation))
    }

    fn line(df: &DataFrame, x: &str, y: &str) -> Result<Rendered, RenderError> {
        // Validate names before sorting so a bad column reports as missing.
        column(df, x)?;
        column(df, y)?;

        let sorted = df.sort(
            [x],
            SortMultipleOptions::default()
                .with_maintain_order(true)
                .with_nulls_last(true),
        )?;
        let x_axis = axis(column(&sorted, x)?)?;
        let y_axis = axis(column(&sorted, y)?)?;

        let chart = ChartSpec {
            title: format!("Line Graph: {y} over {x}"),
            x_label: x.to_string(),
            y_label: y.to_string(),
            kind: ChartKind::Line {
                points: paired_points(&x_axis, &y_axis),
                x_labels: x_axis.labels,
                y_labels: y_axis.labels,
            },
        };
        Ok(Rendered::drawn(chart, format!("Line graph: {y} over {x}")))
    }
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, RenderError> {
    df.column(name)
        .map_err(|_| RenderError::ColumnNotFound(name.to_string()))
}

/// Column as f64. Nulls, NaN and infinities are all reported as missing.
fn numeric_values(column: &Column) -> Result<Vec<Option<f64>>, RenderError> {
    let cast = column.cast(&DataType::Float64)?;
    let values = cast
        .f64()?
        .into_iter()
        .map(|v| v.filter(|f| f.is_finite()))
        .collect();
    Ok(values)
}

fn text_values(column: &Column) -> Result<Vec<Option<String>>, RenderError> {
    let cast = column.cast(&DataType::String)?;
    let values = cast
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(values)
}

fn axis(column: &Column) -> Result<Axis, RenderError> {
    if is_numeric_dtype(column.dtype()) {
        return Ok(Axis {
            values: numeric_values(column)?,
            labels: None,
        });
    }

    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut labels: Vec<String> = Vec::new();
    let values = text_values(column)?
        .into_iter()
        .map(|value| {
            value.map(|label| {
                let next = labels.len();
                let pos = *positions.entry(label.clone()).or_insert_with(|| {
                    labels.push(label);
                    next
                });
                pos as f64
            })
        })
        .collect();

    Ok(Axis {
        values,
        labels: Some(labels),
    })
}

fn paired_points(x: &Axis, y: &Axis) -> Vec<[f64; 2]> {
    x.values
        .iter()
        .zip(y.values.iter())
        .filter_map(|pair| match pair {
            (Some(a), Some(b)) => Some([*a, *b]),
            _ => None,
        })
        .collect()
}

/// Occurrences of each distinct non-missing value, most frequent first.
/// Ties keep the order in which values first appear.
fn value_counts(column: &Column) -> Result<Vec<(String, usize)>, RenderError> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in text_values(column)?.into_iter().flatten() {
        match index.get(&value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(counts)
}

/// Mean of `y` per distinct `x`, groups in ascending `x` order.
fn grouped_means(df: &DataFrame, x: &str, y: &str) -> Result<(Vec<String>, Vec<f64>), RenderError> {
    if !is_numeric_dtype(column(df, y)?.dtype()) {
        return Err(RenderError::NotNumeric(y.to_string()));
    }

    let existing = df.get_column_names();
    let mut mean_name = format!("{y}_mean");
    while existing.iter().any(|name| name.as_str() == mean_name) {
        mean_name.push('_');
    }

    let grouped = df
        .clone()
        .lazy()
        .filter(col(x).is_not_null())
        .group_by([col(x)])
        .agg([col(y).cast(DataType::Float64).mean().alias(mean_name.as_str())])
        .sort([x], SortMultipleOptions::default())
        .collect()?;

    let labels = text_values(column(&grouped, x)?)?
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect();
    let heights = column(&grouped, &mean_name)?
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect();

    Ok((labels, heights))
}
