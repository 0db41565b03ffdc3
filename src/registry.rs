//! The fixed metric table: which chart archetype and axis fields each
//! aggregate resolves to.

use crate::models::{ChartArchetype, MetricDescriptor};
use thiserror::Error;

/// A metric id outside the fixed table. A configuration error, not a
/// transient failure: callers picked an id the registry has never heard of.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown metric `{0}`")]
pub struct UnknownMetric(pub String);

/// Field that partitions `co2RatingPct` into per-year sub-charts.
pub const YEAR_FIELD: &str = "MODEL_YEAR";

/// Default partition set: the three most recent supported model years,
/// ascending. Overridable per resolver.
pub const DEFAULT_PARTITION_YEARS: [i32; 3] = [2022, 2023, 2024];

/// Fixed metric table. The order is the selection surface order the host
/// shell exposes.
pub static METRICS: [MetricDescriptor; 8] = [
    MetricDescriptor {
        id: "avgConsMake",
        archetype: ChartArchetype::CategoryBar,
        category_field: "MAKE",
        value_field: "AVG_CONS",
    },
    MetricDescriptor {
        id: "topEfficient",
        archetype: ChartArchetype::CategoryBar,
        category_field: "MODEL",
        value_field: "COMB_CONS",
    },
    MetricDescriptor {
        id: "fuelTypeDist",
        archetype: ChartArchetype::Pie,
        category_field: "FUEL_TYPE",
        value_field: "COUNT_FT",
    },
    MetricDescriptor {
        id: "co2ByClass",
        archetype: ChartArchetype::CategoryBar,
        category_field: "VEH_CLASS",
        value_field: "AVG_CO2",
    },
    MetricDescriptor {
        id: "bestSmog",
        archetype: ChartArchetype::CategoryBar,
        category_field: "MODEL",
        value_field: "SMOG_RATING",
    },
    MetricDescriptor {
        id: "consByTrans",
        archetype: ChartArchetype::CategoryBar,
        category_field: "TRANS",
        value_field: "AVG_CONS",
    },
    MetricDescriptor {
        id: "co2RatingPct",
        archetype: ChartArchetype::YearPartitionedPie,
        category_field: "CO2_RATING",
        value_field: "PERCENTAGE",
    },
    MetricDescriptor {
        id: "topLowCo2",
        archetype: ChartArchetype::CategoryBar,
        category_field: "MAKE",
        value_field: "AVG_CO2",
    },
];

/// Look up the descriptor for `metric_id`.
///
/// Fails with [`UnknownMetric`] for ids outside the table. Callers that
/// want a permissive answer instead use [`default_descriptor`] via the
/// resolver's fallback policy; the two paths are deliberately distinct.
pub fn resolve(metric_id: &str) -> Result<&'static MetricDescriptor, UnknownMetric> {
    METRICS
        .iter()
        .find(|d| d.id == metric_id)
        .ok_or_else(|| UnknownMetric(metric_id.to_string()))
}

/// The permissive fallback: a generic line chart over `x`/`y`.
///
/// Handed out only when a resolver is explicitly configured to fall back;
/// its id is empty and never appears in the selection surface.
pub fn default_descriptor() -> MetricDescriptor {
    MetricDescriptor {
        id: "",
        archetype: ChartArchetype::TimeSeriesLine,
        category_field: "x",
        value_field: "y",
    }
}

/// The fixed, ordered metric ids of the selection surface.
pub fn metric_ids() -> impl Iterator<Item = &'static str> {
    METRICS.iter().map(|d| d.id)
}
