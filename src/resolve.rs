//! The resolution engine: turn `(metric id, raw records)` into a
//! fully-resolved [`ChartSpec`].
//!
//! Resolution is a pure function of its inputs. Records are normalized,
//! the metric's descriptor is looked up in the static registry, layout is
//! derived from the cleaned data, and the year-partitioned case is split
//! into per-year pie specs. No component retains state across calls.

use crate::format::normalize_records;
use crate::layout::{LayoutConfig, compute_layout};
use crate::models::{ChartArchetype, ChartSpec, MetricDescriptor, Record};
use crate::registry::{self, DEFAULT_PARTITION_YEARS, UnknownMetric, YEAR_FIELD};

/// What [`Resolver::resolve`] does with a metric id outside the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownMetricPolicy {
    /// Propagate [`UnknownMetric`]. The default: the host's selection
    /// surface can only name registry ids, so anything else is a
    /// configuration error.
    #[default]
    Fail,
    /// Substitute the registry's default descriptor, a generic line chart
    /// over `x`/`y`. For direct library callers that prefer a permissive
    /// answer over a hard failure.
    FallbackLine,
}

/// Turns a metric id and its raw aggregate rows into a [`ChartSpec`].
///
/// Holds the injected configuration: layout constants, the partition
/// years for `YearPartitionedPie`, and the unknown-metric policy.
#[derive(Debug, Clone)]
pub struct Resolver {
    layout: LayoutConfig,
    partition_years: Vec<i32>,
    policy: UnknownMetricPolicy,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            layout: LayoutConfig::default(),
            partition_years: DEFAULT_PARTITION_YEARS.to_vec(),
            policy: UnknownMetricPolicy::default(),
        }
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Override the partition set for year-partitioned metrics.
    pub fn with_partition_years(mut self, years: Vec<i32>) -> Self {
        self.partition_years = years;
        self
    }

    pub fn with_policy(mut self, policy: UnknownMetricPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve `metric_id` over `raw_records`.
    ///
    /// Deterministic: repeated calls with the same inputs produce
    /// structurally equal specs. An empty record set is a valid result
    /// (the renderer owns the "no data" presentation); only the registry
    /// lookup can fail, per the configured policy.
    pub fn resolve(
        &self,
        metric_id: &str,
        raw_records: &[Record],
    ) -> Result<ChartSpec, UnknownMetric> {
        let records = normalize_records(raw_records);
        let descriptor = match registry::resolve(metric_id) {
            Ok(d) => *d,
            Err(e) => match self.policy {
                UnknownMetricPolicy::Fail => return Err(e),
                UnknownMetricPolicy::FallbackLine => registry::default_descriptor(),
            },
        };
        Ok(self.build_spec(&descriptor, records))
    }

    fn build_spec(&self, descriptor: &MetricDescriptor, records: Vec<Record>) -> ChartSpec {
        let sub_specs = if descriptor.archetype == ChartArchetype::YearPartitionedPie {
            split_by_year(
                &records,
                &self.partition_years,
                descriptor.category_field,
                descriptor.value_field,
                &self.layout,
            )
        } else {
            Vec::new()
        };
        // Layout is always computed, even for archetypes that ignore the
        // category axis, so every spec is uniformly shaped.
        let layout = compute_layout(&self.layout, &records, descriptor.category_field);
        ChartSpec {
            archetype: descriptor.archetype,
            category_field: descriptor.category_field.to_string(),
            value_field: descriptor.value_field.to_string(),
            records,
            layout,
            title: None,
            sub_specs,
        }
    }
}

/// Convenience: resolve with the default configuration (hard-fail policy,
/// default layout and partition years).
pub fn resolve(metric_id: &str, raw_records: &[Record]) -> Result<ChartSpec, UnknownMetric> {
    Resolver::new().resolve(metric_id, raw_records)
}

/// Split one record set into per-year pie specs.
///
/// For each year in `years`, in the given order: filter records whose
/// [`YEAR_FIELD`] equals that year (original relative order preserved) and
/// build a `Pie` spec over `(category_field, value_field)` with its own
/// layout and a "Model Year" title. A year with no matches still yields a
/// spec with an empty record list, so callers always get one section per
/// year.
pub fn split_by_year(
    records: &[Record],
    years: &[i32],
    category_field: &str,
    value_field: &str,
    layout: &LayoutConfig,
) -> Vec<ChartSpec> {
    years
        .iter()
        .map(|&year| {
            let subset: Vec<Record> = records
                .iter()
                .filter(|r| r.number(YEAR_FIELD) == Some(f64::from(year)))
                .cloned()
                .collect();
            let params = compute_layout(layout, &subset, category_field);
            ChartSpec {
                archetype: ChartArchetype::Pie,
                category_field: category_field.to_string(),
                value_field: value_field.to_string(),
                records: subset,
                layout: params,
                title: Some(format!("Model Year: {year}")),
                sub_specs: Vec::new(),
            }
        })
        .collect()
}
