//! Render targets.
//!
//! A [`RenderContext`] is the single owner of the output surface for the
//! duration of a run. Chart functions take it by `&mut`, present finished
//! figures through it, and report advisories to it. `finish` flushes the
//! advisories and releases the surface.

use super::layout::GridLayout;
use crate::config::WarningPolicy;
use crate::error::Result;
use crate::stats::Advisory;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureKind {
    BoxGrid,
    HistogramGrid,
    Heatmap,
}

impl FigureKind {
    pub fn slug(self) -> &'static str {
        match self {
            FigureKind::BoxGrid => "boxplots",
            FigureKind::HistogramGrid => "histograms",
            FigureKind::Heatmap => "correlation_heatmap",
        }
    }
}

/// A finished chart as an SVG document.
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub kind: FigureKind,
    pub layout: Option<GridLayout>,
    pub size: (u32, u32),
    pub svg: String,
}

/// Where finished figures go.
pub trait DisplaySurface {
    fn show(&mut self, figure: Figure) -> Result<()>;
}

/// Keeps figures in memory.
#[derive(Debug, Default)]
pub struct FigureCollector {
    figures: Vec<Figure>,
}

impl FigureCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn into_figures(self) -> Vec<Figure> {
        self.figures
    }
}

impl DisplaySurface for FigureCollector {
    fn show(&mut self, figure: Figure) -> Result<()> {
        self.figures.push(figure);
        Ok(())
    }
}

/// Writes each figure to a numbered SVG file and optionally opens it.
#[derive(Debug)]
pub struct SvgDirectory {
    dir: PathBuf,
    open_with_viewer: bool,
    written: Vec<PathBuf>,
}

impl SvgDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            open_with_viewer: false,
            written: Vec::new(),
        })
    }

    /// Hand every written file to the system default viewer.
    pub fn open_with_viewer(mut self, open: bool) -> Self {
        self.open_with_viewer = open;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl DisplaySurface for SvgDirectory {
    fn show(&mut self, figure: Figure) -> Result<()> {
        let file_name = format!("{:02}_{}.svg", self.written.len() + 1, figure.kind.slug());
        let path = self.dir.join(file_name);
        fs::write(&path, figure.svg.as_bytes())?;
        log::info!("Wrote {} to {}", figure.title, path.display());

        if self.open_with_viewer {
            if let Err(e) = open::that(&path) {
                log::warn!("Could not open {}: {}", path.display(), e);
            }
        }

        self.written.push(path);
        Ok(())
    }
}

/// Explicit rendering context handed to every chart function.
pub struct RenderContext<'a> {
    surface: &'a mut dyn DisplaySurface,
    policy: WarningPolicy,
    advisories: Vec<Advisory>,
    presented: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(surface: &'a mut dyn DisplaySurface, policy: WarningPolicy) -> Self {
        Self {
            surface,
            policy,
            advisories: Vec::new(),
            presented: 0,
        }
    }

    pub fn present(&mut self, figure: Figure) -> Result<()> {
        log::debug!("Presenting '{}' ({}x{})", figure.title, figure.size.0, figure.size.1);
        self.surface.show(figure)?;
        self.presented += 1;
        Ok(())
    }

    pub fn advise(&mut self, advisory: Advisory) {
        if !self.advisories.contains(&advisory) {
            self.advisories.push(advisory);
        }
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    pub fn presented(&self) -> usize {
        self.presented
    }

    /// Flush advisories according to the policy and release the surface.
    pub fn finish(self) -> Vec<Advisory> {
        self.policy.emit(&self.advisories);
        self.advisories
    }
}
