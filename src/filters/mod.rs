//! Attribute filters for querying close approaches
//!
//! A query is the conjunction of independent `AttributeFilter`s. Each filter
//! binds one attribute of a close approach (or of its linked NEO) to a
//! comparison operator and an optional reference value. A filter whose
//! reference value is absent is inert — it matches everything — which is what
//! lets callers supply an arbitrary subset of criteria without special-casing
//! "no filter on this field".
//!
//! Attribute access goes through the closed `FilterField` set rather than
//! string paths, so an unrecognized criterion is rejected when the query is
//! built (`QuerySpec::set`), before any approach is evaluated.

use chrono::NaiveDate;

use crate::error::QueryError;
use crate::models::{CloseApproach, NearEarthObject};

/// Two-argument comparison applied as `attribute OP reference`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ge,
    Le,
}

/// The closed set of filterable attributes
///
/// `Diameter` and `Hazardous` traverse to the linked NEO. On an approach with
/// no linked NEO the traversal yields nothing, and an active filter on these
/// fields never matches — the same rule as for unknown numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// Approach time, compared on its date component only
    ApproachDate,
    /// Nominal approach distance, in au
    Distance,
    /// Relative approach velocity, in km/s
    Velocity,
    /// Diameter of the linked NEO, in km
    Diameter,
    /// Hazard flag of the linked NEO
    Hazardous,
}

/// A reference value for one filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterValue {
    Date(NaiveDate),
    Float(f64),
    Bool(bool),
}

/// One comparison test against a close approach
#[derive(Debug, Clone)]
pub struct AttributeFilter {
    field: FilterField,
    op: CompareOp,
    value: Option<FilterValue>,
}

impl AttributeFilter {
    /// Build a filter. `value: None` produces an inert filter that matches
    /// every approach.
    pub fn new(field: FilterField, op: CompareOp, value: Option<FilterValue>) -> Self {
        Self { field, op, value }
    }

    pub fn is_active(&self) -> bool {
        self.value.is_some()
    }

    /// Evaluate this filter against an approach and its linked NEO (if any).
    ///
    /// Unknown attribute values — an absent numeric, or any NEO attribute on
    /// an unlinked approach — never satisfy an active filter.
    pub fn matches(&self, approach: &CloseApproach, neo: Option<&NearEarthObject>) -> bool {
        let Some(value) = self.value else {
            return true;
        };
        match (self.field, value) {
            (FilterField::ApproachDate, FilterValue::Date(d)) => {
                compare_ord(approach.date(), d, self.op)
            }
            (FilterField::Distance, FilterValue::Float(v)) => {
                compare_float(approach.distance(), v, self.op)
            }
            (FilterField::Velocity, FilterValue::Float(v)) => {
                compare_float(approach.velocity(), v, self.op)
            }
            (FilterField::Diameter, FilterValue::Float(v)) => {
                compare_float(neo.and_then(NearEarthObject::diameter), v, self.op)
            }
            (FilterField::Hazardous, FilterValue::Bool(b)) => {
                neo.map(|n| n.hazardous() == b).unwrap_or(false)
            }
            // Field/value type mismatches cannot be produced by
            // `create_filters`; treat them as never-matching.
            _ => false,
        }
    }
}

fn compare_ord<T: Ord>(lhs: T, rhs: T, op: CompareOp) -> bool {
    match op {
        CompareOp::Eq => lhs == rhs,
        CompareOp::Ge => lhs >= rhs,
        CompareOp::Le => lhs <= rhs,
    }
}

/// Ordering test over an optional float. `None` never satisfies, regardless
/// of the reference value.
fn compare_float(lhs: Option<f64>, rhs: f64, op: CompareOp) -> bool {
    match lhs {
        Some(v) => match op {
            CompareOp::Eq => v == rhs,
            CompareOp::Ge => v >= rhs,
            CompareOp::Le => v <= rhs,
        },
        None => false,
    }
}

/// The flat, all-optional criteria set for one query
///
/// Typed callers fill the fields directly; callers holding loosely-typed
/// name/value pairs (a CLI, a config file) go through [`QuerySpec::set`],
/// which is where unsupported criterion names are rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySpec {
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub distance_min: Option<f64>,
    pub distance_max: Option<f64>,
    pub velocity_min: Option<f64>,
    pub velocity_max: Option<f64>,
    pub diameter_min: Option<f64>,
    pub diameter_max: Option<f64>,
    pub hazardous: Option<bool>,
}

impl QuerySpec {
    /// Set one criterion from a name/value pair.
    ///
    /// Fails fast with [`QueryError::UnsupportedCriterion`] for names outside
    /// the supported set, and [`QueryError::InvalidCriterionValue`] for
    /// values that do not parse — both before any approach is evaluated.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<(), QueryError> {
        match name {
            "date" => self.date = Some(parse_date(name, raw)?),
            "start_date" => self.start_date = Some(parse_date(name, raw)?),
            "end_date" => self.end_date = Some(parse_date(name, raw)?),
            "distance_min" => self.distance_min = Some(parse_float(name, raw)?),
            "distance_max" => self.distance_max = Some(parse_float(name, raw)?),
            "velocity_min" => self.velocity_min = Some(parse_float(name, raw)?),
            "velocity_max" => self.velocity_max = Some(parse_float(name, raw)?),
            "diameter_min" => self.diameter_min = Some(parse_float(name, raw)?),
            "diameter_max" => self.diameter_max = Some(parse_float(name, raw)?),
            "hazardous" => self.hazardous = Some(parse_bool(name, raw)?),
            _ => {
                return Err(QueryError::UnsupportedCriterion {
                    name: name.to_string(),
                })
            }
        }
        Ok(())
    }
}

fn parse_date(name: &str, raw: &str) -> Result<NaiveDate, QueryError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| invalid(name, raw))
}

fn parse_float(name: &str, raw: &str) -> Result<f64, QueryError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .ok_or_else(|| invalid(name, raw))
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, QueryError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("yes") || raw == "1" {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") || raw.eq_ignore_ascii_case("no") || raw == "0" {
        Ok(false)
    } else {
        Err(invalid(name, raw))
    }
}

fn invalid(name: &str, raw: &str) -> QueryError {
    QueryError::InvalidCriterionValue {
        name: name.to_string(),
        raw: raw.to_string(),
    }
}

/// Build the conjunction of filters for a criteria set.
///
/// All ten filters are always produced; those whose criterion is unset are
/// inert. An empty criteria set therefore matches every approach.
pub fn create_filters(spec: &QuerySpec) -> Vec<AttributeFilter> {
    use CompareOp::{Eq, Ge, Le};
    use FilterField::{ApproachDate, Diameter, Distance, Hazardous, Velocity};

    vec![
        AttributeFilter::new(ApproachDate, Eq, spec.date.map(FilterValue::Date)),
        AttributeFilter::new(ApproachDate, Ge, spec.start_date.map(FilterValue::Date)),
        AttributeFilter::new(ApproachDate, Le, spec.end_date.map(FilterValue::Date)),
        AttributeFilter::new(Distance, Ge, spec.distance_min.map(FilterValue::Float)),
        AttributeFilter::new(Distance, Le, spec.distance_max.map(FilterValue::Float)),
        AttributeFilter::new(Velocity, Ge, spec.velocity_min.map(FilterValue::Float)),
        AttributeFilter::new(Velocity, Le, spec.velocity_max.map(FilterValue::Float)),
        AttributeFilter::new(Diameter, Ge, spec.diameter_min.map(FilterValue::Float)),
        AttributeFilter::new(Diameter, Le, spec.diameter_max.map(FilterValue::Float)),
        AttributeFilter::new(Hazardous, Eq, spec.hazardous.map(FilterValue::Bool)),
    ]
}
