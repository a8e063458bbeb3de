//! Report Driver
//! Runs the full chart analysis for one CSV file.

use crate::charts::{ChartKind, ChartRenderer, DisplaySurface, RenderContext};
use crate::config::{GridConfig, ReportConfig};
use crate::data::DataLoader;
use crate::error::Result;
use crate::stats::Advisory;
use std::path::Path;

/// What a completed analysis produced.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSummary {
    pub figures: usize,
    pub rows: usize,
    pub numeric_columns: usize,
    /// Advisories raised along the way.
    pub advisories: Vec<Advisory>,
}

/// Sequences loading and chart rendering.
pub struct ReportDriver;

impl ReportDriver {
    /// Load `path`, then render the box-plot grid, the histogram grid and
    /// the correlation heatmap onto `surface`.
    ///
    /// Any loader or renderer error is returned as is; figures already
    /// presented stay on the surface.
    pub fn run(
        path: impl AsRef<Path>,
        config: &ReportConfig,
        surface: &mut dyn DisplaySurface,
    ) -> Result<AnalysisSummary> {
        let table = DataLoader::load_csv(path, &config.load)?;

        let mut ctx = RenderContext::new(surface, config.warnings);
        ChartRenderer::render_grid(&mut ctx, &table, ChartKind::Box, &config.grid)?;
        ChartRenderer::render_grid(&mut ctx, &table, ChartKind::Histogram, &config.grid)?;
        ChartRenderer::render_heatmap(&mut ctx, &table)?;

        let figures = ctx.presented();
        let advisories = ctx.finish();
        log::debug!(
            "Analysis done: {} figures, {} advisories",
            figures,
            advisories.len()
        );

        Ok(AnalysisSummary {
            figures,
            rows: table.row_count(),
            numeric_columns: table.numeric_column_names().len(),
            advisories,
        })
    }

    /// Validate `num_cols` and run with default options.
    pub fn initial_analysis(
        path: impl AsRef<Path>,
        num_cols: usize,
        surface: &mut dyn DisplaySurface,
    ) -> Result<AnalysisSummary> {
        let config = ReportConfig {
            grid: GridConfig::new(num_cols)?,
            ..ReportConfig::default()
        };
        Self::run(path, &config, surface)
    }
}
