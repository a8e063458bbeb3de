//! Chart Renderer
//! Draws box-plot grids, histogram grids and the correlation heatmap as SVG.
//!
//! Grid figures:
//! 1. Title band: "Boxplot Analysis" / "Histogram Analysis"
//! 2. One subplot per numeric column, row-major, `num_cols` wide
//! 3. Cells past the last column are left blank (no axes, no ticks)

use super::layout::GridLayout;
use super::surface::{Figure, FigureKind, RenderContext};
use crate::config::GridConfig;
use crate::data::{ColumnClassifier, Table};
use crate::error::Result;
use crate::stats::{Advisory, AdvisoryKind, CorrelationMatrix, StatsCalculator};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::TextStyle;

// Figure geometry (pixels)
const GRID_WIDTH: u32 = 1500;
const GRID_CELL_HEIGHT: u32 = 500;
const TITLE_BAND: u32 = 60;
const HEATMAP_SIZE: (u32, u32) = (800, 600);
const COLORBAR_WIDTH: u32 = 90;

// Colors
const BOX_FILL: RGBColor = RGBColor(189, 215, 238);
const BOX_LINE: RGBColor = RGBColor(49, 99, 149);
const HIST_FILL: RGBColor = RGBColor(91, 155, 213);
const HIST_LINE: RGBColor = RGBColor(38, 70, 110);
const NEG_END: RGBColor = RGBColor(59, 76, 192);
const POS_END: RGBColor = RGBColor(180, 4, 38);
const UNDEFINED_CELL: RGBColor = RGBColor(220, 220, 220);

/// Histograms never get more bins than this.
const MAX_BINS: usize = 500;

/// Which chart a grid holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Box,
    Histogram,
}

impl ChartKind {
    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Box => "Boxplot Analysis",
            ChartKind::Histogram => "Histogram Analysis",
        }
    }

    fn figure_kind(self) -> FigureKind {
        match self {
            ChartKind::Box => FigureKind::BoxGrid,
            ChartKind::Histogram => FigureKind::HistogramGrid,
        }
    }
}

/// One histogram bin: `[left, right)` and its count (the last bin is closed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub left: f64,
    pub right: f64,
    pub count: usize,
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Equal-width bins, count picked like NumPy's "auto" (the narrower of the
/// Sturges and Freedman-Diaconis widths). A constant sample gets one unit bin.
pub fn histogram_bins(values: &[f64]) -> Vec<Bin> {
    if values.is_empty() {
        return Vec::new();
    }
    let sorted = StatsCalculator::sorted(values);
    let n = sorted.len();
    let min = sorted[0];
    let max = sorted[n - 1];
    let span = max - min;

    if span == 0.0 || !span.is_finite() {
        return vec![Bin {
            left: min - 0.5,
            right: min + 0.5,
            count: n,
        }];
    }

    let sturges = span / ((n as f64).log2() + 1.0);
    let iqr = StatsCalculator::percentile(&sorted, 75.0) - StatsCalculator::percentile(&sorted, 25.0);
    let fd = 2.0 * iqr / (n as f64).cbrt();
    let width = if fd > 0.0 { fd.min(sturges) } else { sturges };
    let count = ((span / width).ceil() as usize).clamp(1, MAX_BINS);
    let step = span / count as f64;

    let mut bins: Vec<Bin> = (0..count)
        .map(|i| Bin {
            left: min + step * i as f64,
            right: if i + 1 == count { max } else { min + step * (i + 1) as f64 },
            count: 0,
        })
        .collect();
    for v in &sorted {
        let idx = (((v - min) / span) * count as f64) as usize;
        bins[idx.min(count - 1)].count += 1;
    }
    bins
}

/// Axis range covering `sorted`, padded so the extremes stay off the frame.
fn padded_range(sorted: &[f64]) -> (f64, f64) {
    let (Some(&lo), Some(&hi)) = (sorted.first(), sorted.last()) else {
        return (0.0, 1.0);
    };
    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    if lo == hi {
        return (lo - 0.5, hi + 0.5);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

/// Blend from white toward the end color of the coefficient's sign.
fn diverging_color(r: f64) -> RGBColor {
    if r.is_nan() {
        return UNDEFINED_CELL;
    }
    let t = r.abs().min(1.0);
    let end = if r >= 0.0 { POS_END } else { NEG_END };
    let mix = |c: u8| (255.0 * (1.0 - t) + c as f64 * t).round() as u8;
    RGBColor(mix(end.0), mix(end.1), mix(end.2))
}

/// Renders the standard EDA charts into a [`RenderContext`].
pub struct ChartRenderer;

impl ChartRenderer {
    /// Draw one chart per numeric column into a grid `grid.num_cols()` wide.
    pub fn render_grid(
        ctx: &mut RenderContext<'_>,
        table: &Table,
        kind: ChartKind,
        grid: &GridConfig,
    ) -> Result<()> {
        let numeric = ColumnClassifier::numeric(table);
        let layout = GridLayout::new(numeric.column_count(), grid);
        let size = (GRID_WIDTH, TITLE_BAND + layout.rows() as u32 * GRID_CELL_HEIGHT);
        log::debug!(
            "{}: {} plots in {}x{} grid, {} hidden",
            kind.title(),
            layout.plots(),
            layout.rows(),
            layout.cols(),
            layout.hidden()
        );

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            root.fill(&WHITE)?;
            let body = root.titled(kind.title(), ("sans-serif", 28))?;

            if layout.rows() > 0 {
                let cells = body.split_evenly((layout.rows(), layout.cols()));
                for (cell, column) in cells.iter().zip(numeric.columns()) {
                    let values: Vec<f64> = Table::present_values(column)?
                        .into_iter()
                        .filter(|v| v.is_finite())
                        .collect();
                    if values.is_empty() {
                        ctx.advise(Advisory::new(column.name().as_str(), AdvisoryKind::EmptySlice));
                    }
                    let caption = capitalize(column.name());
                    match kind {
                        ChartKind::Box => Self::draw_box(cell, &caption, &values)?,
                        ChartKind::Histogram => Self::draw_histogram(cell, &caption, &values)?,
                    }
                }
            }

            root.present()?;
        }

        ctx.present(Figure {
            title: kind.title().to_string(),
            kind: kind.figure_kind(),
            layout: Some(layout),
            size,
            svg,
        })
    }

    /// Horizontal box plot: box from Q1 to Q3, median bar, whiskers to the
    /// most extreme values within 1.5 IQR, and outliers as dots.
    fn draw_box(area: &DrawingArea<SVGBackend<'_>, Shift>, caption: &str, values: &[f64]) -> Result<()> {
        let sorted = StatsCalculator::sorted(values);
        let (lo, hi) = padded_range(&sorted);

        let mut chart = ChartBuilder::on(area)
            .caption(caption, ("sans-serif", 18))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(10)
            .build_cartesian_2d(lo..hi, -1.0f64..1.0f64)?;
        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_label_formatter(&|_| String::new())
            .x_desc(caption)
            .draw()?;

        if sorted.is_empty() {
            return Ok(());
        }

        let q1 = StatsCalculator::percentile(&sorted, 25.0);
        let median = StatsCalculator::percentile(&sorted, 50.0);
        let q3 = StatsCalculator::percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let low = sorted
            .iter()
            .copied()
            .find(|&v| v >= q1 - 1.5 * iqr)
            .unwrap_or(q1);
        let high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + 1.5 * iqr)
            .unwrap_or(q3);

        chart.draw_series(std::iter::once(Rectangle::new(
            [(q1, -0.4), (q3, 0.4)],
            BOX_FILL.filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(q1, -0.4), (q3, 0.4)],
            BOX_LINE.stroke_width(2),
        )))?;

        let segments = [
            vec![(median, -0.4), (median, 0.4)],
            vec![(low, 0.0), (q1, 0.0)],
            vec![(q3, 0.0), (high, 0.0)],
            vec![(low, -0.2), (low, 0.2)],
            vec![(high, -0.2), (high, 0.2)],
        ];
        chart.draw_series(
            segments
                .into_iter()
                .map(|points| PathElement::new(points, BOX_LINE.stroke_width(2))),
        )?;

        chart.draw_series(
            sorted
                .iter()
                .filter(|&&v| v < low || v > high)
                .map(|&v| Circle::new((v, 0.0), 3, BOX_LINE.filled())),
        )?;

        Ok(())
    }

    fn draw_histogram(
        area: &DrawingArea<SVGBackend<'_>, Shift>,
        caption: &str,
        values: &[f64],
    ) -> Result<()> {
        let bins = histogram_bins(values);
        let (lo, hi) = match (bins.first(), bins.last()) {
            (Some(first), Some(last)) => (first.left, last.right),
            _ => (0.0, 1.0),
        };
        let top = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64 * 1.05;

        let mut chart = ChartBuilder::on(area)
            .caption(caption, ("sans-serif", 18))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(lo..hi, 0.0..top)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(caption)
            .y_desc("Count")
            .draw()?;

        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.left, 0.0), (b.right, b.count as f64)], HIST_FILL.filled())
        }))?;
        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.left, 0.0), (b.right, b.count as f64)], HIST_LINE.stroke_width(1))
        }))?;

        Ok(())
    }

    /// Annotated Pearson correlation heatmap over the numeric columns.
    pub fn render_heatmap(ctx: &mut RenderContext<'_>, table: &Table) -> Result<()> {
        let matrix = CorrelationMatrix::from_table(table)?;
        for advisory in matrix.advisories() {
            ctx.advise(advisory.clone());
        }
        let title = "Correlation Heatmap";
        let n = matrix.size() as i32;
        let names = matrix.columns().to_vec();

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, HEATMAP_SIZE).into_drawing_area();
            root.fill(&WHITE)?;
            let body = root.titled(title, ("sans-serif", 24))?;
            let (plot_area, bar_area) = body.split_horizontally(HEATMAP_SIZE.0 - COLORBAR_WIDTH);

            let mut chart = ChartBuilder::on(&plot_area)
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(100)
                .build_cartesian_2d(0i32..n, n..0i32)?;

            let (plot_w, plot_h) = chart.plotting_area().dim_in_pixel();
            let cell_w = plot_w as i32 / n;
            let cell_h = plot_h as i32 / n;
            let label = |v: &i32| {
                usize::try_from(*v)
                    .ok()
                    .and_then(|i| names.get(i))
                    .cloned()
                    .unwrap_or_default()
            };
            chart
                .configure_mesh()
                .disable_mesh()
                .x_labels(n as usize + 1)
                .y_labels(n as usize + 1)
                .x_label_offset(cell_w / 2)
                .y_label_offset(cell_h / 2)
                .x_label_formatter(&label)
                .y_label_formatter(&label)
                .label_style(("sans-serif", 13))
                .draw()?;

            chart.draw_series((0..n).flat_map(|row| (0..n).map(move |col| (row, col))).map(
                |(row, col)| {
                    let r = matrix.get(row as usize, col as usize);
                    Rectangle::new([(col, row), (col + 1, row + 1)], diverging_color(r).filled())
                },
            ))?;
            chart.draw_series((0..n).flat_map(|row| (0..n).map(move |col| (row, col))).map(
                |(row, col)| Rectangle::new([(col, row), (col + 1, row + 1)], WHITE.stroke_width(1)),
            ))?;

            let font_size = (cell_w.min(cell_h) / 4).clamp(8, 16);
            chart.draw_series((0..n).flat_map(|row| (0..n).map(move |col| (row, col))).map(
                |(row, col)| {
                    let r = matrix.get(row as usize, col as usize);
                    let text = if r.is_nan() {
                        "nan".to_string()
                    } else {
                        format!("{:.2}", r)
                    };
                    let ink = if r.abs() > 0.6 { &WHITE } else { &BLACK };
                    let style = TextStyle::from(("sans-serif", font_size).into_font())
                        .pos(Pos::new(HPos::Center, VPos::Center))
                        .color(ink);
                    EmptyElement::at((col, row)) + Text::new(text, (cell_w / 2, cell_h / 2), style)
                },
            ))?;

            Self::draw_colorbar(&bar_area)?;
            root.present()?;
        }

        ctx.present(Figure {
            title: title.to_string(),
            kind: FigureKind::Heatmap,
            layout: None,
            size: HEATMAP_SIZE,
            svg,
        })
    }

    fn draw_colorbar(area: &DrawingArea<SVGBackend<'_>, Shift>) -> Result<()> {
        const STEPS: i32 = 40;
        let mut chart = ChartBuilder::on(area)
            .margin_top(10)
            .margin_bottom(50)
            .margin_right(10)
            .y_label_area_size(40)
            .build_cartesian_2d(0i32..1i32, -1.0f64..1.0f64)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_label_formatter(&|_| String::new())
            .y_labels(5)
            .label_style(("sans-serif", 12))
            .draw()?;

        let step = 2.0 / STEPS as f64;
        chart.draw_series((0..STEPS).map(|i| {
            let from = -1.0 + step * i as f64;
            let to = from + step;
            Rectangle::new([(0, from), (1, to)], diverging_color((from + to) / 2.0).filled())
        }))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::FigureCollector;
    use crate::config::WarningPolicy;
    use polars::prelude::{Column, DataFrame};

    fn table(columns: Vec<Column>) -> Table {
        Table::new(DataFrame::new(columns).unwrap())
    }

    fn three_numeric() -> Table {
        table(vec![
            Column::new("height".into(), vec![1.0f64, 2.0, 3.0, 4.0, 50.0]),
            Column::new("weight".into(), vec![5i64, 3, 4, 1, 2]),
            Column::new("name".into(), vec!["a", "b", "c", "d", "e"]),
            Column::new("age".into(), vec![Some(3.5f64), None, Some(1.0), Some(2.0), Some(8.0)]),
        ])
    }

    #[test]
    fn capitalize_like_a_title() {
        assert_eq!(capitalize("income"), "Income");
        assert_eq!(capitalize("TOTAL_sales"), "Total_sales");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn bins_cover_every_value() {
        let values: Vec<f64> = (0..100).map(|i| (i * 7 % 31) as f64).collect();
        let bins = histogram_bins(&values);
        assert!(bins.len() > 1);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins.first().unwrap().left, 0.0);
        assert_eq!(bins.last().unwrap().right, 30.0);
    }

    #[test]
    fn constant_values_get_one_bin() {
        let bins = histogram_bins(&[4.0, 4.0, 4.0]);
        assert_eq!(
            bins,
            [Bin {
                left: 3.5,
                right: 4.5,
                count: 3
            }]
        );
        assert!(histogram_bins(&[]).is_empty());
    }

    #[test]
    fn box_grid_lays_out_numeric_columns() {
        let mut collector = FigureCollector::new();
        let mut ctx = RenderContext::new(&mut collector, WarningPolicy::Suppress);
        let grid = GridConfig::new(2).unwrap();
        ChartRenderer::render_grid(&mut ctx, &three_numeric(), ChartKind::Box, &grid).unwrap();
        ctx.finish();

        let figure = &collector.figures()[0];
        let layout = figure.layout.unwrap();
        assert_eq!((layout.rows(), layout.cols(), layout.hidden()), (2, 2, 1));
        assert_eq!(figure.size, (GRID_WIDTH, TITLE_BAND + 2 * GRID_CELL_HEIGHT));
        assert!(figure.svg.contains("Boxplot Analysis"));
        for caption in ["Height", "Weight", "Age"] {
            assert!(figure.svg.contains(caption), "missing {caption}");
        }
        assert!(!figure.svg.contains("Name"));
    }

    #[test]
    fn histogram_grid_title() {
        let mut collector = FigureCollector::new();
        let mut ctx = RenderContext::new(&mut collector, WarningPolicy::Suppress);
        let grid = GridConfig::new(3).unwrap();
        ChartRenderer::render_grid(&mut ctx, &three_numeric(), ChartKind::Histogram, &grid)
            .unwrap();
        ctx.finish();

        let figure = &collector.figures()[0];
        assert_eq!(figure.kind, FigureKind::HistogramGrid);
        assert_eq!(figure.layout.unwrap().rows(), 1);
        assert!(figure.svg.contains("Histogram Analysis"));
    }

    #[test]
    fn no_numeric_columns_gives_an_empty_grid() {
        let text_only = table(vec![Column::new("city".into(), vec!["x", "y"])]);
        let mut collector = FigureCollector::new();
        let mut ctx = RenderContext::new(&mut collector, WarningPolicy::Suppress);
        let grid = GridConfig::default();
        ChartRenderer::render_grid(&mut ctx, &text_only, ChartKind::Box, &grid).unwrap();
        ChartRenderer::render_grid(&mut ctx, &text_only, ChartKind::Histogram, &grid).unwrap();
        let heatmap = ChartRenderer::render_heatmap(&mut ctx, &text_only);
        assert!(matches!(heatmap, Err(crate::error::EdaError::InsufficientData(_))));
        ctx.finish();

        assert_eq!(collector.figures().len(), 2);
        for figure in collector.figures() {
            assert_eq!(figure.layout.unwrap().cells(), 0);
        }
    }

    #[test]
    fn zero_row_numeric_column_is_advised() {
        let t = table(vec![Column::new("x".into(), Vec::<f64>::new())]);
        let mut collector = FigureCollector::new();
        let mut ctx = RenderContext::new(&mut collector, WarningPolicy::Suppress);
        ChartRenderer::render_grid(&mut ctx, &t, ChartKind::Box, &GridConfig::default()).unwrap();
        let advisories = ctx.finish();

        assert_eq!(advisories, [Advisory::new("x", AdvisoryKind::EmptySlice)]);
        assert_eq!(collector.figures()[0].layout.unwrap().plots(), 1);
    }

    #[test]
    fn heatmap_annotates_coefficients() {
        let mut collector = FigureCollector::new();
        let mut ctx = RenderContext::new(&mut collector, WarningPolicy::Suppress);
        ChartRenderer::render_heatmap(&mut ctx, &three_numeric()).unwrap();
        ctx.finish();

        let figure = &collector.figures()[0];
        assert_eq!(figure.kind, FigureKind::Heatmap);
        assert!(figure.svg.contains("Correlation Heatmap"));
        assert!(figure.svg.contains("1.00"));
        assert!(figure.svg.contains("weight"));
    }

    #[test]
    fn diverging_scale_endpoints() {
        assert_eq!(diverging_color(0.0), RGBColor(255, 255, 255));
        assert_eq!(diverging_color(1.0), POS_END);
        assert_eq!(diverging_color(-1.0), NEG_END);
        assert_eq!(diverging_color(f64::NAN), UNDEFINED_CELL);
    }
}
