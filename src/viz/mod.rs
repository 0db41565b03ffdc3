//! Rendering backend: draw a fully-resolved [`ChartSpec`] to **SVG** or **PNG**.
//!
//! - Backend chosen by file extension (`.svg` vector, anything else bitmap)
//! - Canvas height comes from the resolved layout, so tall category charts
//!   grow with the data instead of cramming labels
//! - Year-partitioned specs render as a vertical stack of captioned pie bands
//! - Empty record sets draw an explicit "No data available" state, never an error

pub mod palette;
pub mod text;

pub use palette::{DASHBOARD8, Palette, SERIES_FILL};

use crate::models::{ChartArchetype, ChartSpec};
use anyhow::{Result, anyhow};

use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::FontFamily;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use text::truncate_label;

/// One-time registration for a fallback "sans-serif" font when using the
/// `ab_glyph` text path. Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    // Safe to call many times; only runs once.
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

const MARGIN: u32 = 16;
/// Height of one band in a year-partitioned chart, px.
const PARTITION_BAND_HEIGHT: u32 = 420;
/// Glyph estimate used when truncating category labels to the axis gutter.
const LABEL_GLYPH_PX: u32 = 8;

/// Render `spec` with the default palette.
///
/// The canvas is `width` px wide; its height is taken from
/// `spec.layout.chart_height` (the resolver's sizing is authoritative),
/// except for `YearPartitionedPie` which stacks one fixed-height band per
/// sub-spec.
pub fn render_chart<P: AsRef<Path>>(spec: &ChartSpec, out_path: P, width: u32) -> Result<()> {
    render_chart_with(spec, out_path, width, DASHBOARD8)
}

/// Render `spec` with an explicit palette.
pub fn render_chart_with<P: AsRef<Path>>(
    spec: &ChartSpec,
    out_path: P,
    width: u32,
    palette: Palette,
) -> Result<()> {
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let height = canvas_height(spec);

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_spec(root, spec, palette)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_spec(root, spec, palette)?;
    }
    Ok(())
}

fn canvas_height(spec: &ChartSpec) -> u32 {
    match spec.archetype {
        ChartArchetype::YearPartitionedPie => {
            PARTITION_BAND_HEIGHT * spec.sub_specs.len().max(1) as u32
        }
        _ => spec.layout.chart_height,
    }
}

fn draw_spec<DB>(root: DrawingArea<DB, Shift>, spec: &ChartSpec, palette: Palette) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    match spec.archetype {
        ChartArchetype::CategoryBar => draw_bars(&root, spec)?,
        ChartArchetype::Pie => draw_pie(&root, spec, palette)?,
        ChartArchetype::YearPartitionedPie => {
            if spec.sub_specs.is_empty() {
                draw_no_data(&root)?;
            } else {
                let bands = root.split_evenly((spec.sub_specs.len(), 1));
                for (band, sub) in bands.iter().zip(&spec.sub_specs) {
                    draw_pie(band, sub, palette)?;
                }
            }
        }
        ChartArchetype::TimeSeriesLine => draw_line(&root, spec)?,
    }
    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Horizontal bars, one per record, category labels on the left axis.
fn draw_bars<DB>(area: &DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<()>
where
    DB: DrawingBackend,
{
    let rows: Vec<(String, f64)> = spec
        .records
        .iter()
        .map(|r| {
            (
                r.display(&spec.category_field),
                r.number(&spec.value_field).unwrap_or(0.0),
            )
        })
        .collect();
    if rows.is_empty() {
        return draw_no_data(area);
    }

    let n = rows.len() as i32;
    let max_val = rows.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
    let x_max = if max_val > 0.0 { max_val * 1.05 } else { 1.0 };

    let (area_w, _) = area.dim_in_pixel();
    let label_cap = (area_w / 2).max(48);
    let label_px = spec.layout.category_axis_width.clamp(48, label_cap);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(MARGIN)
        .set_label_area_size(LabelAreaPosition::Left, label_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 40);
    if let Some(t) = spec.title.as_deref() {
        builder.caption(t, (FontFamily::SansSerif, 20));
    }
    let mut chart = builder
        .build_cartesian_2d(0.0..x_max, (0..n).into_segmented())
        .map_err(|e| anyhow!("{:?}", e))?;

    // First record at the top: segment n-1-i holds row i.
    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_labels(10)
        .y_labels(n as usize)
        .x_label_formatter(&|v: &f64| format!("{:.2}", v))
        .y_label_formatter(&|seg: &SegmentValue<i32>| match seg {
            SegmentValue::CenterOf(i) => rows
                .get((n - 1 - *i) as usize)
                .map(|(label, _)| truncate_label(label, LABEL_GLYPH_PX, label_px))
                .unwrap_or_default(),
            _ => String::new(),
        })
        .label_style((FontFamily::SansSerif, 12))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    let (_, plot_h) = chart.plotting_area().dim_in_pixel();
    let row_px = f64::from(plot_h) / f64::from(n);
    let inset = ((row_px - spec.layout.bar_thickness) / 2.0).max(row_px * 0.05) as u32;

    chart
        .draw_series(rows.iter().enumerate().map(|(i, (_, v))| {
            let seg = n - 1 - i as i32;
            let mut bar = Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(seg)),
                    (*v, SegmentValue::Exact(seg + 1)),
                ],
                SERIES_FILL.filled(),
            );
            bar.set_margin(inset, inset, 0, 0);
            bar
        }))
        .map_err(|e| anyhow!("{:?}", e))?;

    // Value labels at the bar ends, 2 decimals like the axis.
    chart
        .draw_series(rows.iter().enumerate().map(|(i, (_, v))| {
            Text::new(
                format!("{:.2}", v),
                (*v, SegmentValue::CenterOf(n - 1 - i as i32)),
                (FontFamily::SansSerif, 12),
            )
        }))
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// One pie over the category/value binding; slices cycle the palette.
fn draw_pie<DB>(area: &DrawingArea<DB, Shift>, spec: &ChartSpec, palette: Palette) -> Result<()>
where
    DB: DrawingBackend,
{
    let area = match spec.title.as_deref() {
        Some(t) => area
            .titled(t, (FontFamily::SansSerif, 18))
            .map_err(|e| anyhow!("{:?}", e))?,
        None => area.clone(),
    };

    // Zero or missing values cannot form a slice.
    let slices: Vec<(String, f64)> = spec
        .records
        .iter()
        .filter_map(|r| {
            let v = r.number(&spec.value_field)?;
            (v > 0.0).then(|| (r.display(&spec.category_field), v))
        })
        .collect();
    if slices.is_empty() {
        return draw_no_data(&area);
    }

    let sizes: Vec<f64> = slices.iter().map(|(_, v)| *v).collect();
    let labels: Vec<String> = slices.iter().map(|(label, _)| label.clone()).collect();
    let colors: Vec<RGBColor> = (0..slices.len()).map(|i| palette.color(i)).collect();

    let (w, h) = area.dim_in_pixel();
    let center = ((w / 2) as i32, (h / 2) as i32);
    let radius = f64::from(w.min(h)) * 0.35;
    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 14).into_font());
    area.draw(&pie).map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Generic line chart, the fallback archetype: records with numeric
/// (category, value) pairs plotted in order.
fn draw_line<DB>(area: &DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<()>
where
    DB: DrawingBackend,
{
    let points: Vec<(f64, f64)> = spec
        .records
        .iter()
        .filter_map(|r| {
            Some((
                r.number(&spec.category_field)?,
                r.number(&spec.value_field)?,
            ))
        })
        .collect();
    if points.is_empty() {
        return draw_no_data(area);
    }

    let (mut x_min, mut x_max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (x, _)| {
            (lo.min(*x), hi.max(*x))
        });
    let (mut y_min, mut y_max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, y)| {
            (lo.min(*y), hi.max(*y))
        });
    if (x_max - x_min).abs() < f64::EPSILON {
        x_min -= 1.0;
        x_max += 1.0;
    }
    if (y_max - y_min).abs() < f64::EPSILON {
        y_min -= 1.0;
        y_max += 1.0;
    }

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(MARGIN)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40);
    if let Some(t) = spec.title.as_deref() {
        builder.caption(t, (FontFamily::SansSerif, 20));
    }
    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .x_desc(spec.category_field.as_str())
        .y_desc(spec.value_field.as_str())
        .y_label_formatter(&|v: &f64| format!("{:.2}", v))
        .label_style((FontFamily::SansSerif, 12))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .draw_series(LineSeries::new(points, SERIES_FILL.stroke_width(2)))
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// The explicit empty-dataset state.
fn draw_no_data<DB>(area: &DrawingArea<DB, Shift>) -> Result<()>
where
    DB: DrawingBackend,
{
    let (w, h) = area.dim_in_pixel();
    let style = ("sans-serif", 20).into_font().color(&BLACK.mix(0.6));
    area.draw(&Text::new(
        "No data available".to_string(),
        ((w / 2) as i32 - 80, (h / 2) as i32),
        style,
    ))
    .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
