use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of an aggregate result set: field name to value.
///
/// Rows arrive from the aggregates service as JSON objects whose fields are
/// numbers, strings, or null. A `Record` is never mutated after it is built;
/// normalization produces a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    /// Raw value of a field, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Numeric view of a field. `None` for absent, null, or non-numeric values.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.0.get(field).and_then(Value::as_f64)
    }

    /// Display string of a field: strings verbatim, numbers via their JSON
    /// representation, empty for anything else (including absent fields).
    pub fn display(&self, field: &str) -> String {
        match self.0.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Record(map)
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Record(iter.into_iter().collect())
    }
}

/// Chart families a metric can resolve to. Exactly one archetype per metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartArchetype {
    /// Horizontal bar chart keyed by a categorical field.
    CategoryBar,
    /// Single pie chart keyed by a categorical field.
    Pie,
    /// One pie chart per model year; requires the year-partition field.
    YearPartitionedPie,
    /// Generic line chart; the permissive fallback for unlisted metrics.
    TimeSeriesLine,
}

/// Static binding of a metric id to its archetype and axis fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricDescriptor {
    pub id: &'static str,
    pub archetype: ChartArchetype,
    /// Field bound to the categorical axis (pie slice names, bar labels).
    pub category_field: &'static str,
    /// Field bound to the measured quantity.
    pub value_field: &'static str,
}

/// Sizing derived from data cardinality and label text; recomputed on every
/// resolution, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    /// Bar height in pixels for `CategoryBar` charts.
    pub bar_thickness: f64,
    /// Canvas height in pixels.
    pub chart_height: u32,
    /// Width reserved for category labels, in pixels.
    pub category_axis_width: u32,
}

/// The fully-resolved, renderer-agnostic description of one chart.
///
/// Built once per `(metric, dataset)` pair and handed to the rendering
/// backend; rebuilt wholesale when either changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub archetype: ChartArchetype,
    pub category_field: String,
    pub value_field: String,
    pub records: Vec<Record>,
    pub layout: LayoutParams,
    /// Optional section heading drawn by the renderer (set for the
    /// per-year sub-charts of `YearPartitionedPie`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Populated only for `YearPartitionedPie`: one `Pie` spec per
    /// partition year, in partition order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_specs: Vec<ChartSpec>,
}
