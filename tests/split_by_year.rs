use fuelviz::layout::LayoutConfig;
use fuelviz::models::{ChartArchetype, Record};
use fuelviz::resolve::split_by_year;
use serde_json::json;

fn rating_row(year: i32, rating: i32, pct: f64) -> Record {
    serde_json::from_value(json!({
        "MODEL_YEAR": year,
        "CO2_RATING": rating,
        "PERCENTAGE": pct,
    }))
    .unwrap()
}

#[test]
fn one_populated_year_still_yields_all_sections() {
    let records = vec![
        rating_row(2022, 5, 40.0),
        rating_row(2022, 3, 35.0),
        rating_row(2022, 1, 25.0),
    ];
    let specs = split_by_year(
        &records,
        &[2022, 2023, 2024],
        "CO2_RATING",
        "PERCENTAGE",
        &LayoutConfig::default(),
    );
    assert_eq!(specs.len(), 3);

    // 2022 gets every row, original relative order preserved.
    let ratings: Vec<f64> = specs[0]
        .records
        .iter()
        .map(|r| r.number("CO2_RATING").unwrap())
        .collect();
    assert_eq!(ratings, [5.0, 3.0, 1.0]);

    // The empty years are present, not omitted.
    assert!(specs[1].records.is_empty());
    assert!(specs[2].records.is_empty());
    for spec in &specs {
        assert_eq!(spec.archetype, ChartArchetype::Pie);
        assert_eq!(spec.category_field, "CO2_RATING");
        assert_eq!(spec.value_field, "PERCENTAGE");
        assert!(spec.sub_specs.is_empty());
    }
}

#[test]
fn output_order_matches_the_years_argument() {
    let records = vec![rating_row(2022, 5, 50.0), rating_row(2024, 2, 50.0)];
    let specs = split_by_year(
        &records,
        &[2024, 2022],
        "CO2_RATING",
        "PERCENTAGE",
        &LayoutConfig::default(),
    );
    let titles: Vec<Option<&str>> = specs.iter().map(|s| s.title.as_deref()).collect();
    assert_eq!(titles, [Some("Model Year: 2024"), Some("Model Year: 2022")]);
    assert_eq!(specs[0].records[0].number("CO2_RATING"), Some(2.0));
    assert_eq!(specs[1].records[0].number("CO2_RATING"), Some(5.0));
}

#[test]
fn each_section_gets_its_own_layout() {
    let records = vec![
        rating_row(2022, 5, 40.0),
        rating_row(2022, 3, 60.0),
    ];
    let specs = split_by_year(
        &records,
        &[2022, 2023],
        "CO2_RATING",
        "PERCENTAGE",
        &LayoutConfig::default(),
    );
    // Two slices in 2022: bar budget 200 / 2.
    assert_eq!(specs[0].layout.bar_thickness, 100.0);
    // Empty 2023 falls back to the minimum bounds.
    assert_eq!(specs[1].layout.bar_thickness, 40.0);
    assert_eq!(specs[1].layout.category_axis_width, 0);
}

#[test]
fn rows_without_the_year_field_match_no_section() {
    let records = vec![
        serde_json::from_value::<Record>(json!({"CO2_RATING": 9, "PERCENTAGE": 10.0})).unwrap(),
        rating_row(2023, 4, 90.0),
    ];
    let specs = split_by_year(
        &records,
        &[2022, 2023],
        "CO2_RATING",
        "PERCENTAGE",
        &LayoutConfig::default(),
    );
    assert!(specs[0].records.is_empty());
    assert_eq!(specs[1].records.len(), 1);
}
