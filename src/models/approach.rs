//! Close approaches of NEOs to Earth

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use super::NeoId;
use crate::error::IngestError;

/// Compact calendar form carried by the source data: `2020-Jan-01 12:30`
const CAD_TIME_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Minute-precision display form: `2020-01-01 12:30`. The source data has no
/// real seconds, so none are rendered.
const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Length of the compact form up to and including the minutes
const CAD_TIME_LEN: usize = "YYYY-Mon-DD HH:MM".len();

/// A close approach to Earth by an NEO
///
/// Carries the date and time (UTC) of closest approach, the nominal approach
/// distance in astronomical units, and the relative approach velocity in
/// kilometers per second.
///
/// The designation of the approaching NEO is kept even after linkage resolves
/// it to a handle, for diagnostics on phantom approaches that match no
/// catalog entry.
#[derive(Debug, Clone)]
pub struct CloseApproach {
    designation: String,
    time: NaiveDateTime,
    distance: Option<f64>,
    velocity: Option<f64>,
    neo: Option<NeoId>,
}

impl CloseApproach {
    /// Create a new close approach. The NEO reference starts absent and is
    /// resolved by the `NeoDatabase` linkage pass.
    pub fn new(
        designation: impl Into<String>,
        time: NaiveDateTime,
        distance: Option<f64>,
        velocity: Option<f64>,
    ) -> Self {
        Self {
            designation: designation.into(),
            time,
            distance: distance.filter(|v| !v.is_nan()),
            velocity: velocity.filter(|v| !v.is_nan()),
            neo: None,
        }
    }

    /// Parse the compact calendar form used by the close-approach data.
    ///
    /// The form always carries year/month/day/hour/minute; some rows carry a
    /// trailing seconds component, which is discarded.
    pub fn parse_time(raw: &str) -> Result<NaiveDateTime, IngestError> {
        let trimmed = raw.trim();
        let head = trimmed.get(..CAD_TIME_LEN).unwrap_or(trimmed);
        NaiveDateTime::parse_from_str(head, CAD_TIME_FORMAT).map_err(|_| {
            IngestError::InvalidTimestamp {
                raw: raw.to_string(),
            }
        })
    }

    /// Foreign designation of the approaching NEO
    pub fn designation(&self) -> &str {
        &self.designation
    }

    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    /// Calendar date of the approach, for date-only criteria
    pub fn date(&self) -> NaiveDate {
        self.time.date()
    }

    pub fn distance(&self) -> Option<f64> {
        self.distance
    }

    pub fn velocity(&self) -> Option<f64> {
        self.velocity
    }

    /// Handle to the linked NEO; absent before linkage and for approaches
    /// whose designation matched no catalog entry
    pub fn neo(&self) -> Option<NeoId> {
        self.neo
    }

    /// Bind this approach to its NEO. Called only from the database linkage
    /// pass, which is the single code path maintaining the mutual references.
    pub(crate) fn set_neo(&mut self, id: NeoId) {
        self.neo = Some(id);
    }

    /// Minute-precision formatted approach time
    pub fn time_str(&self) -> String {
        self.time.format(DISPLAY_TIME_FORMAT).to_string()
    }
}

impl fmt::Display for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "At {}, '{}' approaches Earth at a distance of {} au and a velocity of {} km/s.",
            self.time_str(),
            self.designation,
            OptFloat(self.distance),
            OptFloat(self.velocity),
        )
    }
}

/// Renders an optional numeric as its value or `unknown`
struct OptFloat(Option<f64>);

impl fmt::Display for OptFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "unknown"),
        }
    }
}
