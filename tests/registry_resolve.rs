use fuelviz::models::ChartArchetype;
use fuelviz::registry::{self, UnknownMetric};

#[test]
fn table_lists_the_eight_dashboard_metrics_in_order() {
    let ids: Vec<&str> = registry::metric_ids().collect();
    assert_eq!(
        ids,
        [
            "avgConsMake",
            "topEfficient",
            "fuelTypeDist",
            "co2ByClass",
            "bestSmog",
            "consByTrans",
            "co2RatingPct",
            "topLowCo2",
        ]
    );
}

#[test]
fn resolve_binds_archetype_and_axes() {
    let d = registry::resolve("fuelTypeDist").unwrap();
    assert_eq!(d.archetype, ChartArchetype::Pie);
    assert_eq!(d.category_field, "FUEL_TYPE");
    assert_eq!(d.value_field, "COUNT_FT");

    let d = registry::resolve("avgConsMake").unwrap();
    assert_eq!(d.archetype, ChartArchetype::CategoryBar);
    assert_eq!(d.category_field, "MAKE");
    assert_eq!(d.value_field, "AVG_CONS");

    let d = registry::resolve("co2RatingPct").unwrap();
    assert_eq!(d.archetype, ChartArchetype::YearPartitionedPie);
    assert_eq!(d.category_field, "CO2_RATING");
    assert_eq!(d.value_field, "PERCENTAGE");
}

#[test]
fn every_listed_metric_resolves() {
    for id in registry::metric_ids() {
        assert!(registry::resolve(id).is_ok(), "{id} should resolve");
    }
}

#[test]
fn unknown_id_is_a_hard_error() {
    let err = registry::resolve("doesNotExist").unwrap_err();
    assert_eq!(err, UnknownMetric("doesNotExist".into()));
    assert_eq!(err.to_string(), "unknown metric `doesNotExist`");
}

#[test]
fn default_descriptor_is_the_permissive_line_fallback() {
    let d = registry::default_descriptor();
    assert_eq!(d.archetype, ChartArchetype::TimeSeriesLine);
    assert_eq!(d.category_field, "x");
    assert_eq!(d.value_field, "y");
}

#[test]
fn partition_constants_cover_the_supported_years() {
    assert_eq!(registry::YEAR_FIELD, "MODEL_YEAR");
    assert_eq!(registry::DEFAULT_PARTITION_YEARS, [2022, 2023, 2024]);
}
