//! csv_eda - exploratory data analysis for CSV files
//!
//! Loads a CSV file with Polars, summarizes every column (entry count,
//! value kind, nulls, descriptive statistics) and renders box-plot grids,
//! histogram grids and a correlation heatmap as SVG figures.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod stats;

pub use config::{GridConfig, LoadOptions, ReportConfig, WarningPolicy};
pub use error::{EdaError, Result};
pub use report::{AnalysisSummary, ReportDriver};
pub use stats::{stats_report, StatsReport};
