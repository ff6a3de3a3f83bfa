//! Stats module - Correlation and binning

mod calculator;

pub use calculator::{Histogram, StatsCalculator};
