use fuelviz::models::Record;
use fuelviz::storage::{RAW_COLUMNS, save_csv, save_json};
use serde_json::json;
use tempfile::tempdir;

fn sample_rows() -> Vec<Record> {
    vec![
        serde_json::from_value(json!({
            "MODEL_YEAR": 2023,
            "MAKE": "Honda",
            "MODEL": "Civic",
            "VEHICLE_CLASS": "Compact",
            "ENGINE_SIZE": 2.0,
            "CYLINDERS": 4,
            "TRANSMISSION": "AV7",
            "FUEL_TYPE": "X",
            "CITY_CONSUMPTION": 7.8,
            "HIGHWAY_CONSUMPTION": 6.1,
            "COMBINED_CONSUMPTION": 7.0,
            "COMBINED_MPG": 40,
            "CO2_EMISSIONS": 164,
            "CO2_RATING": 6,
            "SMOG_RATING": 7,
        }))
        .unwrap(),
        serde_json::from_value(json!({
            "MODEL_YEAR": 2024,
            "MAKE": "Kia",
            "MODEL": "EV6",
        }))
        .unwrap(),
    ]
}

#[test]
fn raw_schema_has_the_fifteen_listing_columns() {
    assert_eq!(RAW_COLUMNS.len(), 15);
    assert_eq!(RAW_COLUMNS[0], "MODEL_YEAR");
    assert_eq!(RAW_COLUMNS[14], "SMOG_RATING");
}

#[test]
fn csv_export_writes_header_and_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("raw.csv");
    save_csv(&sample_rows(), &RAW_COLUMNS, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("MODEL_YEAR,MAKE,MODEL"));
    assert!(lines[1].contains("Honda"));
    // Fields missing on a record are written empty, not skipped.
    assert!(lines[2].starts_with("2024,Kia,EV6,,"));
}

#[test]
fn json_export_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("raw.json");
    let rows = sample_rows();
    save_json(&rows, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let back: Vec<Record> = serde_json::from_str(&text).unwrap();
    assert_eq!(back, rows);
}
