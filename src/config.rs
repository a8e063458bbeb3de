//! Validated run configuration.
//!
//! Every option is checked when the struct is built, so the rendering and
//! loading code never has to re-validate what it is handed.

use crate::error::{EdaError, Result};
use crate::stats::Advisory;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Default number of subplot columns in a chart grid.
pub const DEFAULT_GRID_COLUMNS: usize = 3;

/// Width of a chart grid, in subplots per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    num_cols: NonZeroUsize,
}

impl GridConfig {
    pub fn new(num_cols: usize) -> Result<Self> {
        NonZeroUsize::new(num_cols)
            .map(|num_cols| Self { num_cols })
            .ok_or_else(|| {
                EdaError::InvalidConfig("grid width must be a positive integer, got 0".to_string())
            })
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols.get()
    }

    pub fn width(&self) -> NonZeroUsize {
        self.num_cols
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            num_cols: NonZeroUsize::new(DEFAULT_GRID_COLUMNS).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl FromStr for GridConfig {
    type Err = EdaError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let value: i64 = trimmed.parse().map_err(|_| {
            EdaError::InvalidConfig(format!("grid width must be an integer, got '{trimmed}'"))
        })?;
        if value <= 0 {
            return Err(EdaError::InvalidConfig(format!(
                "grid width must be a positive integer, got {value}"
            )));
        }
        let value = usize::try_from(value)
            .map_err(|_| EdaError::InvalidConfig(format!("grid width {value} is too large")))?;
        Self::new(value)
    }
}

impl fmt::Display for GridConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.num_cols)
    }
}

/// Options applied while reading a CSV file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Treat `inf` and `-inf` cells in float columns as missing.
    pub inf_as_missing: bool,
}

impl LoadOptions {
    pub fn with_inf_as_missing(mut self, inf_as_missing: bool) -> Self {
        self.inf_as_missing = inf_as_missing;
        self
    }
}

/// What happens to non-fatal statistical advisories raised during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WarningPolicy {
    /// Keep advisories out of user-visible output (trace log only).
    #[default]
    Suppress,
    /// Log every advisory as a warning.
    Show,
}

impl WarningPolicy {
    /// Log `advisories` under this policy and return how many were shown.
    pub fn emit(self, advisories: &[Advisory]) -> usize {
        for advisory in advisories {
            match self {
                WarningPolicy::Show => log::warn!("{}", advisory),
                WarningPolicy::Suppress => log::trace!("suppressed: {}", advisory),
            }
        }
        match self {
            WarningPolicy::Show => advisories.len(),
            WarningPolicy::Suppress => 0,
        }
    }
}

/// Everything the report driver needs for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportConfig {
    pub grid: GridConfig,
    pub load: LoadOptions,
    pub warnings: WarningPolicy,
}

impl ReportConfig {
    pub fn new(num_cols: usize) -> Result<Self> {
        Ok(Self {
            grid: GridConfig::new(num_cols)?,
            ..Self::default()
        })
    }

    pub fn with_load_options(mut self, load: LoadOptions) -> Self {
        self.load = load;
        self
    }

    pub fn with_warnings(mut self, warnings: WarningPolicy) -> Self {
        self.warnings = warnings;
        self
    }
}
