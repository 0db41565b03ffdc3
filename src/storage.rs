use crate::models::Record;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Column order of the raw fuel-consumption listing, as presented in the
/// tabular display mode.
pub const RAW_COLUMNS: [&str; 15] = [
    "MODEL_YEAR",
    "MAKE",
    "MODEL",
    "VEHICLE_CLASS",
    "ENGINE_SIZE",
    "CYLINDERS",
    "TRANSMISSION",
    "FUEL_TYPE",
    "CITY_CONSUMPTION",
    "HIGHWAY_CONSUMPTION",
    "COMBINED_CONSUMPTION",
    "COMBINED_MPG",
    "CO2_EMISSIONS",
    "CO2_RATING",
    "SMOG_RATING",
];

/// Save records as CSV with header. Fields are rendered via their display
/// string; absent fields are written empty.
pub fn save_csv<P: AsRef<Path>>(records: &[Record], columns: &[&str], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(columns)?;
    for r in records {
        wtr.write_record(columns.iter().map(|c| r.display(c)))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save records as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(records: &[Record], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(records)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
