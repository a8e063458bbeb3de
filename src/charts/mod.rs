//! Charts module - Grid layout, chart rendering and display surfaces

mod layout;
mod renderer;
mod surface;

pub use layout::GridLayout;
pub use renderer::{capitalize, histogram_bins, Bin, ChartKind, ChartRenderer};
pub use surface::{DisplaySurface, Figure, FigureCollector, FigureKind, RenderContext, SvgDirectory};
