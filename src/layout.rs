//! Layout sizing: derive bar thickness, canvas height, and the category
//! label gutter from data cardinality and label text.

use crate::models::{LayoutParams, Record};

/// Sizing constants for category charts.
///
/// These are the tunable knobs behind [`compute_layout`]; the defaults
/// match the dashboard's original proportions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Smallest bar the renderer will draw, px. Also the floor applied to
    /// large datasets so bars never collapse to hairlines.
    pub min_bar_thickness: f64,
    /// Pixel budget shared across bars before the minimum kicks in; tiny
    /// datasets get `budget / count` wide bars instead of over-wide ones.
    pub bar_span_budget: f64,
    /// Minimum canvas height, px.
    pub min_chart_height: u32,
    /// Vertical space reserved per category row, px.
    pub row_height: u32,
    /// Average glyph width of the label font, px.
    pub glyph_width: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_bar_thickness: 40.0,
            bar_span_budget: 200.0,
            min_chart_height: 500,
            row_height: 40,
            glyph_width: 8,
        }
    }
}

/// Compute layout parameters for a record set.
///
/// Total: never fails, and empty input returns the minimum bounds
/// (`bar_thickness = min_bar_thickness`, `chart_height = min_chart_height`,
/// `category_axis_width = 0`). The axis width is the widest category label
/// estimated at `glyph_width` px per character; a field absent on every
/// record contributes nothing.
pub fn compute_layout(cfg: &LayoutConfig, records: &[Record], category_field: &str) -> LayoutParams {
    let count = records.len();
    let bar_thickness = if count == 0 {
        cfg.min_bar_thickness
    } else {
        cfg.min_bar_thickness.max(cfg.bar_span_budget / count as f64)
    };
    let chart_height = cfg.min_chart_height.max(count as u32 * cfg.row_height);
    let category_axis_width = records
        .iter()
        .map(|r| r.display(category_field).chars().count() as u32 * cfg.glyph_width)
        .max()
        .unwrap_or(0);
    LayoutParams {
        bar_thickness,
        chart_height,
        category_axis_width,
    }
}
