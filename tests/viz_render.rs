use fuelviz::models::Record;
use fuelviz::resolve::{Resolver, UnknownMetricPolicy, resolve};
use fuelviz::viz;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

fn rec(v: serde_json::Value) -> Record {
    serde_json::from_value(v).unwrap()
}

fn bar_rows() -> Vec<Record> {
    vec![
        rec(json!({"MAKE": "Honda", "AVG_CONS": 7.2})),
        rec(json!({"MAKE": "Lamborghini", "AVG_CONS": 17.8})),
        rec(json!({"MAKE": "Kia", "AVG_CONS": 6.9})),
    ]
}

fn write_and_check<F: Fn(&PathBuf)>(maker: F, name: &str) {
    let tmp = std::env::temp_dir();
    let path: PathBuf = tmp.join(format!("fuelviz_viz_{}.svg", name));
    maker(&path);
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "svg has content");
    fs::remove_file(&path).ok();
}

#[test]
fn bar_chart_produces_a_file() {
    let spec = resolve("avgConsMake", &bar_rows()).unwrap();
    write_and_check(|p| viz::render_chart(&spec, p, 800).unwrap(), "bars");
}

#[test]
fn pie_chart_produces_a_file() {
    let rows = vec![
        rec(json!({"FUEL_TYPE": "Gasoline", "COUNT_FT": 120.0})),
        rec(json!({"FUEL_TYPE": "Diesel", "COUNT_FT": 30.0})),
        rec(json!({"FUEL_TYPE": "Electric", "COUNT_FT": 15.0})),
    ];
    let spec = resolve("fuelTypeDist", &rows).unwrap();
    write_and_check(|p| viz::render_chart(&spec, p, 800).unwrap(), "pie");
}

#[test]
fn partitioned_pies_produce_a_file() {
    let rows = vec![
        rec(json!({"MODEL_YEAR": 2022, "CO2_RATING": 5, "PERCENTAGE": 60.0})),
        rec(json!({"MODEL_YEAR": 2022, "CO2_RATING": 3, "PERCENTAGE": 40.0})),
        rec(json!({"MODEL_YEAR": 2023, "CO2_RATING": 6, "PERCENTAGE": 100.0})),
    ];
    let spec = resolve("co2RatingPct", &rows).unwrap();
    write_and_check(|p| viz::render_chart(&spec, p, 800).unwrap(), "partitioned");
}

#[test]
fn line_fallback_produces_a_file() {
    let rows = vec![
        rec(json!({"x": 1, "y": 2.0})),
        rec(json!({"x": 2, "y": 3.5})),
        rec(json!({"x": 3, "y": 2.8})),
    ];
    let spec = Resolver::new()
        .with_policy(UnknownMetricPolicy::FallbackLine)
        .resolve("somethingNew", &rows)
        .unwrap();
    write_and_check(|p| viz::render_chart(&spec, p, 800).unwrap(), "line");
}

#[test]
fn empty_dataset_renders_the_no_data_state() {
    let spec = resolve("avgConsMake", &[]).unwrap();
    write_and_check(|p| viz::render_chart(&spec, p, 800).unwrap(), "empty");
}

#[test]
fn png_output_is_supported() {
    let spec = resolve("avgConsMake", &bar_rows()).unwrap();
    let path = std::env::temp_dir().join("fuelviz_viz_bars.png");
    viz::render_chart(&spec, &path, 800).unwrap();
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "png has content");
    fs::remove_file(&path).ok();
}
