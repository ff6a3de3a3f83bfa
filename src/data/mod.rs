//! Data module - CSV loading

mod loader;

pub use loader::{is_numeric_dtype, DataLoader, DataSource, DatasetInfo, LoaderError};
