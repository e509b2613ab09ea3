//! Extract NEOs and close approaches from NASA data files
//!
//! `load_neos` reads the NEO catalog from CSV; `load_approaches` reads the
//! close-approach data from the JSON "cad" layout (a `fields` array naming
//! the columns and a `data` array of rows). Missing or unparseable optional
//! values are coerced — empty name to `None`, non-numeric diameter, distance,
//! or velocity to `None`, empty hazard token to `false` — they never fail the
//! load. Timestamps are the exception: every approach must carry one.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::error::{IngestError, NeoError};
use crate::models::{CloseApproach, NearEarthObject};

/// The catalog columns of interest; serde skips the many others.
#[derive(Debug, Deserialize)]
struct NeoRow {
    pdes: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    pha: String,
    #[serde(default)]
    diameter: String,
}

/// Read the NEO catalog from a CSV file.
pub fn load_neos(path: &Path) -> Result<Vec<NearEarthObject>, NeoError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut neos = Vec::new();
    for row in reader.deserialize() {
        let row: NeoRow = row?;
        neos.push(NearEarthObject::new(
            row.pdes,
            Some(row.name),
            parse_hazard_flag(&row.pha),
            parse_optional_f64(&row.diameter),
        ));
    }
    info!(count = neos.len(), path = %path.display(), "loaded NEO catalog");
    Ok(neos)
}

/// The close-approach payload: column names up front, rows as loose arrays.
#[derive(Debug, Deserialize)]
struct CadPayload {
    fields: Vec<String>,
    #[serde(default)]
    data: Vec<Vec<Value>>,
}

/// Read close-approach data from a JSON file.
pub fn load_approaches(path: &Path) -> Result<Vec<CloseApproach>, NeoError> {
    let file = File::open(path)?;
    let payload: CadPayload = serde_json::from_reader(BufReader::new(file))?;

    let col = |field: &'static str| -> Result<usize, IngestError> {
        payload
            .fields
            .iter()
            .position(|f| f == field)
            .ok_or(IngestError::MissingField { field })
    };
    let des = col("des")?;
    let cd = col("cd")?;
    let dist = col("dist")?;
    let v_rel = col("v_rel")?;

    let mut approaches = Vec::with_capacity(payload.data.len());
    for (row_idx, row) in payload.data.iter().enumerate() {
        let designation = row
            .get(des)
            .and_then(Value::as_str)
            .ok_or_else(|| IngestError::MalformedPayload {
                reason: format!("row {row_idx} has no designation"),
            })?
            .to_string();
        let raw_time =
            row.get(cd)
                .and_then(Value::as_str)
                .ok_or_else(|| IngestError::InvalidTimestamp {
                    raw: format!("<row {row_idx}>"),
                })?;
        let time = CloseApproach::parse_time(raw_time)?;
        approaches.push(CloseApproach::new(
            designation,
            time,
            cell_f64(row.get(dist)),
            cell_f64(row.get(v_rel)),
        ));
    }
    info!(count = approaches.len(), path = %path.display(), "loaded close approaches");
    Ok(approaches)
}

/// Numeric cell: the cad payload usually carries numbers as strings, but
/// plain JSON numbers are accepted too.
fn cell_f64(value: Option<&Value>) -> Option<f64> {
    let value = value?;
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| parse_optional_f64(s)))
}

/// Empty or unparseable numeric input coerces to `None`, never to zero.
pub(crate) fn parse_optional_f64(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// The catalog hazard token is `Y`/`N`, possibly empty; only `Y` means true.
pub(crate) fn parse_hazard_flag(raw: &str) -> bool {
    matches!(raw.trim(), "Y" | "y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const NEO_CSV: &str = "\
pdes,name,pha,diameter,orbit_id
2020 FK,Big Rock,Y,12.345,1
2019 XY,,N,,2
2018 QQ,Pebble,,0.0,3
";

    const CAD_JSON: &str = r#"{
        "signature": {"source": "NASA/JPL SBDB Close Approach Data API", "version": "1.1"},
        "count": 2,
        "fields": ["des", "orbit_id", "jd", "cd", "dist", "v_rel"],
        "data": [
            ["2020 FK", "1", "2458849.5", "2020-Jan-01 12:30", "0.25", "56.78"],
            ["2019 XY", "2", "2458880.5", "2020-Feb-02 01:15", "garbled", null]
        ]
    }"#;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_and_coerces_the_catalog() {
        let file = write_temp(NEO_CSV);
        let neos = load_neos(file.path()).unwrap();
        assert_eq!(neos.len(), 3);

        assert_eq!(neos[0].designation(), "2020 FK");
        assert_eq!(neos[0].name(), Some("Big Rock"));
        assert!(neos[0].hazardous());
        assert_eq!(neos[0].diameter(), Some(12.345));

        // Empty name -> None, empty diameter -> None, N -> not hazardous.
        assert_eq!(neos[1].name(), None);
        assert!(!neos[1].hazardous());
        assert_eq!(neos[1].diameter(), None);

        // Empty hazard token -> false; zero diameter survives as a value.
        assert!(!neos[2].hazardous());
        assert_eq!(neos[2].diameter(), Some(0.0));
    }

    #[test]
    fn loads_and_coerces_close_approaches() {
        let file = write_temp(CAD_JSON);
        let approaches = load_approaches(file.path()).unwrap();
        assert_eq!(approaches.len(), 2);

        assert_eq!(approaches[0].designation(), "2020 FK");
        assert_eq!(approaches[0].time_str(), "2020-01-01 12:30");
        assert_eq!(approaches[0].distance(), Some(0.25));
        assert_eq!(approaches[0].velocity(), Some(56.78));

        // Garbled distance and null velocity coerce to None.
        assert_eq!(approaches[1].distance(), None);
        assert_eq!(approaches[1].velocity(), None);
    }

    #[test]
    fn missing_cad_field_is_an_error() {
        let file = write_temp(r#"{"fields": ["des", "cd", "dist"], "data": []}"#);
        let err = load_approaches(file.path()).unwrap_err();
        assert!(matches!(
            err,
            NeoError::Ingest(IngestError::MissingField { field: "v_rel" })
        ));
    }

    #[test]
    fn bad_timestamp_is_an_error() {
        let file = write_temp(
            r#"{"fields": ["des", "cd", "dist", "v_rel"],
                "data": [["2020 FK", "sometime in March", "0.25", "56.78"]]}"#,
        );
        let err = load_approaches(file.path()).unwrap_err();
        assert!(matches!(
            err,
            NeoError::Ingest(IngestError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn optional_f64_coercion() {
        assert_eq!(parse_optional_f64("12.345"), Some(12.345));
        assert_eq!(parse_optional_f64("  0.25 "), Some(0.25));
        assert_eq!(parse_optional_f64(""), None);
        assert_eq!(parse_optional_f64("unknown"), None);
        assert_eq!(parse_optional_f64("NaN"), None);
    }

    #[test]
    fn hazard_flag_coercion() {
        assert!(parse_hazard_flag("Y"));
        assert!(parse_hazard_flag("y"));
        assert!(!parse_hazard_flag("N"));
        assert!(!parse_hazard_flag(""));
        assert!(!parse_hazard_flag("maybe"));
    }
}
