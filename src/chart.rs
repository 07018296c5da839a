use crate::category::Category;
use crate::dataset::Series;
use crate::error::{Error, Result};
use anyhow::Context;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};

// Font sizes
const TITLE_FONT_SIZE: u32 = 40;
const AXIS_LABEL_FONT_SIZE: u32 = 26;
const TICK_LABEL_FONT_SIZE: u32 = 20;
const LEGEND_FONT_SIZE: u32 = 20;
const DATA_LABEL_FONT_SIZE: u32 = 15;

const MARKER_SIZE: i32 = 6;

/// Colorblind-safe palette (Tableau 10)
const TABLEAU_COLORBLIND_10: &[RGBColor] = &[
    RGBColor(0, 107, 164),
    RGBColor(255, 128, 14),
    RGBColor(171, 171, 171),
    RGBColor(89, 89, 89),
    RGBColor(95, 158, 209),
    RGBColor(200, 82, 0),
    RGBColor(137, 137, 137),
    RGBColor(162, 200, 236),
    RGBColor(255, 188, 121),
    RGBColor(207, 207, 207),
];

/// Point marker drawn on top of each line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    Triangle,
    Cross,
}

/// Visual settings handed to the renderer.
///
/// Series pick their color, marker and annotation offset by their position in
/// the list being drawn, cycling through each table.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub palette: Vec<RGBColor>,
    pub markers: Vec<Marker>,
    /// Draw `"{elapsed} {unit}"` next to every point
    pub annotate: bool,
    /// Vertical pixel offset of annotations, positive is above the point
    pub annotation_offsets: Vec<i32>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
            palette: TABLEAU_COLORBLIND_10.to_vec(),
            markers: vec![Marker::Circle, Marker::Square, Marker::Triangle, Marker::Cross],
            annotate: true,
            annotation_offsets: vec![15, -15, -15],
        }
    }
}

impl ChartStyle {
    pub fn color(&self, index: usize) -> RGBColor {
        cycle(&self.palette, index).unwrap_or(BLACK)
    }

    pub fn marker(&self, index: usize) -> Marker {
        cycle(&self.markers, index).unwrap_or(Marker::Circle)
    }

    pub fn annotation_offset(&self, index: usize) -> i32 {
        cycle(&self.annotation_offsets, index).unwrap_or(15)
    }
}

fn cycle<T: Copy>(items: &[T], index: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[index % items.len()])
    }
}

/// Something that can persist one chart of series
pub trait ChartRenderer {
    /// Draw `series` under `title` and store the image as `output_name`.
    /// Returns the path written. An empty `series` still produces a chart.
    fn render(&self, series: &[&Series], title: &str, output_name: &str) -> Result<PathBuf>;
}

/// Renders PNG line charts with log-scaled axes
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    output_dir: PathBuf,
    style: ChartStyle,
}

impl PlottersRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, style: ChartStyle) -> Self {
        Self {
            output_dir: output_dir.into(),
            style,
        }
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    fn draw(&self, series: &[&Series], title: &str, path: &Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.output_dir).context("Failed to create output directory")?;

        let root = BitMapBackend::new(path, (self.style.width, self.style.height))
            .into_drawing_area();
        root.fill(&WHITE)?;

        // Log axes cannot show non-positive values.
        let plotted: Vec<Vec<(f64, f64, f64)>> = series
            .iter()
            .map(|s| s.points().filter(|&(x, y, _)| x > 0.0 && y > 0.0).collect())
            .collect();

        let x_range = log_bounds(plotted.iter().flatten().map(|&(x, _, _)| x));
        let y_range = log_bounds(plotted.iter().flatten().map(|&(_, y, _)| y));

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", TITLE_FONT_SIZE))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(110)
            .build_cartesian_2d(x_range.log_scale(), y_range.log_scale())?;

        chart
            .configure_mesh()
            .x_label_formatter(&|x| format_log_tick(*x))
            .y_label_formatter(&|y| format_log_tick(*y))
            .x_desc("Sample Size")
            .y_desc("Throughput")
            .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
            .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
            .draw()?;

        for (idx, (s, points)) in series.iter().zip(&plotted).enumerate() {
            let color = self.style.color(idx);
            let data: Vec<(f64, f64)> = points.iter().map(|&(x, y, _)| (x, y)).collect();

            chart
                .draw_series(LineSeries::new(data.clone(), color.stroke_width(3)))?
                .label(s.strategy())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
                });

            match self.style.marker(idx) {
                Marker::Circle => {
                    chart.draw_series(
                        data.iter()
                            .map(|&c| Circle::new(c, MARKER_SIZE, color.filled())),
                    )?;
                }
                Marker::Square => {
                    chart.draw_series(data.iter().map(|&c| {
                        EmptyElement::at(c)
                            + Rectangle::new(
                                [(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)],
                                color.filled(),
                            )
                    }))?;
                }
                Marker::Triangle => {
                    chart.draw_series(
                        data.iter()
                            .map(|&c| TriangleMarker::new(c, MARKER_SIZE + 2, color.filled())),
                    )?;
                }
                Marker::Cross => {
                    chart.draw_series(
                        data.iter()
                            .map(|&c| Cross::new(c, MARKER_SIZE, color.stroke_width(3))),
                    )?;
                }
            }

            if self.style.annotate {
                let dy = -self.style.annotation_offset(idx);
                let font = ("sans-serif", DATA_LABEL_FONT_SIZE)
                    .into_font()
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, VPos::Center));
                let unit = s.time_unit();

                chart.draw_series(points.iter().map(|&(x, y, elapsed)| {
                    EmptyElement::at((x, y))
                        + Text::new(format!("{elapsed:.3} {unit}"), (0, dy), font.clone())
                }))?;
            }
        }

        if !series.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font(("sans-serif", LEGEND_FONT_SIZE))
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, series: &[&Series], title: &str, output_name: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(format!("{output_name}.png"));
        tracing::debug!(path = %path.display(), series = series.len(), "rendering chart");

        self.draw(series, title, &path)
            .map_err(|source| Error::Render {
                output: path.display().to_string(),
                source: source.into(),
            })?;
        Ok(path)
    }
}

/// Compact count, e.g. `1K`, `10M`
fn format_count(value: f64) -> String {
    if value >= 1e9 {
        format!("{:.0}G", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.0}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.0}K", value / 1e3)
    } else {
        format!("{}", value)
    }
}

fn format_log_tick(value: f64) -> String {
    if value <= 0.0 {
        return String::new();
    }
    // Only label powers of 10 so neighbouring ticks don't overlap.
    let log10 = value.log10();
    let nearest = log10.round();
    if (log10 - nearest).abs() < 1e-6 {
        format_count(10f64.powi(nearest as i32))
    } else {
        String::new()
    }
}

/// Axis range padded by a factor of two on each side, `1..10` when empty
fn log_bounds(values: impl Iterator<Item = f64>) -> std::ops::Range<f64> {
    let (min, max) = values.fold((f64::MAX, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if max <= 0.0 {
        return 1.0..10.0;
    }
    (min / 2.0)..(max * 2.0)
}

/// Render one chart per category, titled with the thread count when known
pub fn generate_charts<R: ChartRenderer + ?Sized>(
    renderer: &R,
    categories: &[Category<'_>],
    num_cpus: Option<u64>,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(categories.len());

    for category in categories {
        let title = category.rule.full_title(num_cpus);
        let path = renderer.render(&category.series, &title, &category.rule.id)?;
        println!("Generated: {}", path.display());
        written.push(path);
    }

    Ok(written)
}
