//! CSV Data Loader Module
//! Handles CSV loading from URLs, local files and raw bytes using Polars.

use polars::prelude::*;
use std::fmt;
use std::io::Cursor;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Tokens read as missing values, in addition to empty fields.
const NULL_TOKENS: [&str; 6] = ["NA", "N/A", "NaN", "nan", "null", "NULL"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV")]
    CsvError(#[from] PolarsError),
    #[error("HTTP request failed")]
    HttpError(#[from] reqwest::Error),
    #[error("Failed to read {}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Please enter a URL")]
    EmptyUrl,
}

/// Where a dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// Interpret the text of the URL box: `http...` is fetched, anything else is a local path.
    pub fn parse(text: &str) -> Result<Self, LoaderError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LoaderError::EmptyUrl);
        }
        if text.starts_with("http") {
            Ok(DataSource::Url(text.to_string()))
        } else {
            Ok(DataSource::File(PathBuf::from(text)))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Shape and column types of the loaded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetInfo {
    pub rows: usize,
    /// `(column name, dtype name)` in column order.
    pub columns: Vec<(String, String)>,
}

impl DatasetInfo {
    pub fn from_dataframe(df: &DataFrame) -> Self {
        Self {
            rows: df.height(),
            columns: df
                .get_columns()
                .iter()
                .map(|col| (col.name().to_string(), col.dtype().to_string()))
                .collect(),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns.len())
    }
}

/// True for the integer and float dtypes; every other dtype is treated as categorical.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Owns the in-memory dataset. Each successful load replaces it wholesale.
pub struct DataLoader {
    df: Option<DataFrame>,
    source: Option<DataSource>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            source: None,
        }
    }

    /// Fetch and parse a dataset. On failure the previously loaded data is kept.
    pub fn load(&mut self, source: DataSource) -> Result<&DataFrame, LoaderError> {
        info!(source = %source, "loading dataset");
        let bytes = Self::fetch_bytes(&source)?;
        self.load_bytes(bytes, source)
    }

    /// Parse CSV bytes that were already obtained from `source`.
    pub fn load_bytes(
        &mut self,
        bytes: Vec<u8>,
        source: DataSource,
    ) -> Result<&DataFrame, LoaderError> {
        let df = Self::parse_csv(bytes)?;
        info!(
            source = %source,
            rows = df.height(),
            columns = df.width(),
            "dataset loaded"
        );
        self.source = Some(source);
        Ok(&*self.df.insert(df))
    }

    /// Blocking read of the raw CSV bytes. No retries, no timeout.
    fn fetch_bytes(source: &DataSource) -> Result<Vec<u8>, LoaderError> {
        match source {
            DataSource::Url(url) => {
                let response = reqwest::blocking::get(url.as_str())?.error_for_status()?;
                let bytes = response.bytes()?;
                debug!(url = %url, bytes = bytes.len(), "downloaded csv");
                Ok(bytes.to_vec())
            }
            DataSource::File(path) => std::fs::read(path).map_err(|source| LoaderError::IoError {
                path: path.clone(),
                source,
            }),
        }
    }

    /// Parse comma-delimited CSV with a header row.
    pub fn parse_csv(bytes: Vec<u8>) -> Result<DataFrame, LoaderError> {
        let null_values = NullValues::AllColumns(NULL_TOKENS.iter().map(|&s| s.into()).collect());

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_parse_options(
                CsvParseOptions::default()
                    .with_separator(b',')
                    .with_null_values(Some(null_values)),
            )
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        Ok(df)
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    pub fn get_source(&self) -> Option<&DataSource> {
        self.source.as_ref()
    }

    pub fn info(&self) -> Option<DatasetInfo> {
        self.df.as_ref().map(DatasetInfo::from_dataframe)
    }
}
