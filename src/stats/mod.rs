//! Stats module - Descriptive statistics, correlation and the column report

mod calculator;
mod report;

pub use calculator::{
    Advisory, AdvisoryKind, CorrelationMatrix, Descriptive, StatsCalculator,
};
pub use report::{stats_report, ColumnSummary, StatsReport, REPORT_FIELDS};
