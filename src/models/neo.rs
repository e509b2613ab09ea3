//! Near-Earth object catalog entries

use std::fmt;

use super::ApproachId;

/// A near-Earth object (NEO)
///
/// Encapsulates the semantic and physical parameters of one catalog-listed
/// body: its primary designation (required, unique), IAU name (optional),
/// diameter in kilometers (optional — sometimes unknown), and whether it is
/// marked as potentially hazardous.
///
/// The approach list starts empty on every instance and is populated only by
/// the `NeoDatabase` linkage pass.
#[derive(Debug, Clone)]
pub struct NearEarthObject {
    designation: String,
    name: Option<String>,
    diameter: Option<f64>,
    hazardous: bool,
    approaches: Vec<ApproachId>,
}

impl NearEarthObject {
    /// Create a new NEO from coerced field values.
    ///
    /// An empty or whitespace-only name normalizes to `None` so that display
    /// logic and name lookups never see `Some("")`. An unknown diameter is
    /// `None`, never zero — zero is a legitimate, meaningfully different
    /// size.
    pub fn new(
        designation: impl Into<String>,
        name: Option<String>,
        hazardous: bool,
        diameter: Option<f64>,
    ) -> Self {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        Self {
            designation: designation.into(),
            name,
            diameter: diameter.filter(|d| !d.is_nan()),
            hazardous,
            approaches: Vec::new(),
        }
    }

    pub fn designation(&self) -> &str {
        &self.designation
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn diameter(&self) -> Option<f64> {
        self.diameter
    }

    pub fn hazardous(&self) -> bool {
        self.hazardous
    }

    /// Handles of this NEO's linked close approaches, in linkage order
    pub fn approaches(&self) -> &[ApproachId] {
        &self.approaches
    }

    /// Append a linked approach. Called only from the database linkage pass,
    /// which is the single code path maintaining the mutual references.
    pub(crate) fn push_approach(&mut self, id: ApproachId) {
        self.approaches.push(id);
    }

    /// Full name: `"<designation> (<name>)"`, or the bare designation when
    /// the NEO is unnamed
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", self.designation, name),
            None => self.designation.clone(),
        }
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hazard = if self.hazardous { "is" } else { "is not" };
        match self.diameter {
            Some(d) => write!(
                f,
                "NEO {} has a diameter of {:.3} km and {} potentially hazardous.",
                self.fullname(),
                d,
                hazard
            ),
            None => write!(
                f,
                "NEO {} has an unknown diameter and {} potentially hazardous.",
                self.fullname(),
                hazard
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_name_normalizes_to_none() {
        let neo = NearEarthObject::new("2020 FK", Some(String::new()), false, None);
        assert_eq!(neo.name(), None);

        let neo = NearEarthObject::new("2020 FK", Some("   ".to_string()), false, None);
        assert_eq!(neo.name(), None);
    }

    #[test]
    fn nan_diameter_normalizes_to_none() {
        let neo = NearEarthObject::new("2020 FK", None, false, Some(f64::NAN));
        assert_eq!(neo.diameter(), None);
    }

    #[test]
    fn zero_diameter_is_preserved() {
        let neo = NearEarthObject::new("2020 FK", None, false, Some(0.0));
        assert_eq!(neo.diameter(), Some(0.0));
    }

    #[test]
    fn fullname_with_and_without_name() {
        let named = NearEarthObject::new("2020 FK", Some("Big Rock".to_string()), true, None);
        assert_eq!(named.fullname(), "2020 FK (Big Rock)");

        let unnamed = NearEarthObject::new("2020 FK", None, true, None);
        assert_eq!(unnamed.fullname(), "2020 FK");
    }

    #[test]
    fn display_reads_like_a_sentence() {
        let neo = NearEarthObject::new(
            "2020 FK",
            Some("One REALLY BIG fake asteroid".to_string()),
            true,
            Some(12.345),
        );
        assert_eq!(
            neo.to_string(),
            "NEO 2020 FK (One REALLY BIG fake asteroid) has a diameter of 12.345 km \
             and is potentially hazardous."
        );
    }

    #[test]
    fn every_instance_gets_its_own_approach_list() {
        let a = NearEarthObject::new("a", None, false, None);
        let mut b = NearEarthObject::new("b", None, false, None);
        b.push_approach(ApproachId(0));
        assert!(a.approaches().is_empty());
        assert_eq!(b.approaches().len(), 1);
    }
}
