//! Serialize query results to CSV and JSON
//!
//! Each matching close approach flattens into an [`ApproachRecord`]: the
//! formatted approach time at minute precision, the two approach numerics,
//! and the linked NEO's catalog fields. CSV renders an absent name as an
//! empty cell and an unknown numeric as `NaN`; JSON nests the NEO fields
//! under `"neo"` and renders absent values as `null` (serde_json writes
//! non-finite floats as `null`).

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::database::NeoDatabase;
use crate::error::NeoError;
use crate::models::CloseApproach;

const CSV_HEADERS: [&str; 7] = [
    "datetime_utc",
    "distance_au",
    "velocity_km_s",
    "designation",
    "name",
    "diameter_km",
    "potentially_hazardous",
];

/// Catalog fields of the linked NEO, as they appear in output
#[derive(Debug, Clone, Serialize)]
pub struct NeoSummary {
    pub designation: String,
    pub name: Option<String>,
    pub diameter_km: f64,
    pub potentially_hazardous: bool,
}

/// One close approach as a flat output record
#[derive(Debug, Clone, Serialize)]
pub struct ApproachRecord {
    pub datetime_utc: String,
    pub distance_au: f64,
    pub velocity_km_s: f64,
    pub neo: NeoSummary,
}

impl ApproachRecord {
    /// Flatten an approach and its linked NEO for output.
    ///
    /// An unlinked approach falls back to its own foreign designation, with
    /// no name, unknown diameter, and the hazard flag down.
    pub fn for_approach(db: &NeoDatabase, approach: &CloseApproach) -> Self {
        let neo = db.neo_for(approach);
        Self {
            datetime_utc: approach.time_str(),
            distance_au: approach.distance().unwrap_or(f64::NAN),
            velocity_km_s: approach.velocity().unwrap_or(f64::NAN),
            neo: NeoSummary {
                designation: neo
                    .map(|n| n.designation().to_string())
                    .unwrap_or_else(|| approach.designation().to_string()),
                name: neo.and_then(|n| n.name().map(str::to_string)),
                diameter_km: neo.and_then(|n| n.diameter()).unwrap_or(f64::NAN),
                potentially_hazardous: neo.map(|n| n.hazardous()).unwrap_or(false),
            },
        }
    }
}

/// Write records to a CSV file. The header row is written even when there
/// are no records.
pub fn write_to_csv(records: &[ApproachRecord], path: &Path) -> Result<(), NeoError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADERS)?;
    for record in records {
        writer.write_record(&[
            record.datetime_utc.clone(),
            record.distance_au.to_string(),
            record.velocity_km_s.to_string(),
            record.neo.designation.clone(),
            record.neo.name.clone().unwrap_or_default(),
            record.neo.diameter_km.to_string(),
            record.neo.potentially_hazardous.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records to a JSON file as an array of objects.
pub fn write_to_json(records: &[ApproachRecord], path: &Path) -> Result<(), NeoError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), records)?;
    Ok(())
}
