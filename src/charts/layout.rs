//! Subplot grid arithmetic.

use crate::config::GridConfig;
use serde::Serialize;
use std::num::NonZeroUsize;

/// Row-major placement of `plots` subplots into a grid `cols` wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridLayout {
    plots: usize,
    cols: NonZeroUsize,
    rows: usize,
}

impl GridLayout {
    pub fn new(plots: usize, grid: &GridConfig) -> Self {
        let cols = grid.width();
        Self {
            plots,
            cols,
            rows: plots.div_ceil(cols.get()),
        }
    }

    pub fn plots(&self) -> usize {
        self.plots
    }

    pub fn cols(&self) -> usize {
        self.cols.get()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cells(&self) -> usize {
        self.rows * self.cols()
    }

    /// Cells past the last populated one.
    pub fn hidden(&self) -> usize {
        self.cells() - self.plots
    }

    /// (row, col) of the `index`-th cell.
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.cols(), index % self.cols())
    }

    pub fn is_populated(&self, index: usize) -> bool {
        index < self.plots
    }
}
