//! End-to-end scenarios over the linked database: ingest-shaped data in,
//! filtered and limited approach streams out.

use neodb::extract::{load_approaches, load_neos};
use neodb::filters::{create_filters, QuerySpec};
use neodb::write::ApproachRecord;
use neodb::{limit, CloseApproach, NearEarthObject, NeoDatabase};

use std::io::Write;
use tempfile::NamedTempFile;

fn big_rock_db() -> NeoDatabase {
    let neo = NearEarthObject::new(
        "2020 FK",
        Some("Big Rock".to_string()),
        true,
        Some(12.345),
    );
    let time = CloseApproach::parse_time("2020-Jan-01 12:30").unwrap();
    let approach = CloseApproach::new("2020 FK", time, Some(0.25), Some(56.78));
    NeoDatabase::new(vec![neo], vec![approach])
}

#[test]
fn hazardous_min_distance_query_finds_big_rock() {
    let db = big_rock_db();

    let mut spec = QuerySpec::default();
    spec.set("hazardous", "true").unwrap();
    spec.set("distance_min", "0.1").unwrap();
    let filters = create_filters(&spec);

    let matches: Vec<_> = db.query(&filters).collect();
    assert_eq!(matches.len(), 1);

    let record = ApproachRecord::for_approach(&db, matches[0]);
    assert_eq!(record.datetime_utc, "2020-01-01 12:30");
    assert_eq!(record.distance_au, 0.25);
    assert_eq!(record.velocity_km_s, 56.78);
    assert_eq!(record.neo.name.as_deref(), Some("Big Rock"));
}

#[test]
fn max_distance_query_finds_nothing() {
    let db = big_rock_db();

    let mut spec = QuerySpec::default();
    spec.set("distance_max", "0.1").unwrap();
    let filters = create_filters(&spec);

    assert_eq!(db.query(&filters).count(), 0);
}

#[test]
fn diameter_criteria_exclude_unlinked_approaches() {
    // A phantom approach with no catalog entry: an active NEO-attribute
    // criterion never matches it.
    let time = CloseApproach::parse_time("2020-Apr-04 08:00").unwrap();
    let phantom = CloseApproach::new("1999 ZZ", time, Some(0.5), Some(10.0));
    let db = NeoDatabase::new(vec![], vec![phantom]);

    let mut spec = QuerySpec::default();
    spec.set("diameter_min", "0.0").unwrap();
    assert_eq!(db.query(&create_filters(&spec)).count(), 0);

    // Without NEO criteria the phantom is still queryable.
    let all = create_filters(&QuerySpec::default());
    assert_eq!(db.query(&all).count(), 1);
}

#[test]
fn limiting_composes_with_query() {
    let neo = NearEarthObject::new("2020 FK", None, false, None);
    let approaches: Vec<_> = (1..=9)
        .map(|day| {
            let raw = format!("2020-Jan-{day:02} 00:0{}", day % 10);
            CloseApproach::new(
                "2020 FK",
                CloseApproach::parse_time(&raw).unwrap(),
                Some(day as f64),
                None,
            )
        })
        .collect();
    let db = NeoDatabase::new(vec![neo], approaches);
    let filters = create_filters(&QuerySpec::default());

    let first_three: Vec<_> = limit(db.query(&filters), Some(3))
        .map(|a| a.distance().unwrap())
        .collect();
    assert_eq!(first_three, vec![1.0, 2.0, 3.0]);

    assert_eq!(limit(db.query(&filters), Some(0)).count(), 9);
    assert_eq!(limit(db.query(&filters), None).count(), 9);
    assert_eq!(limit(db.query(&filters), Some(50)).count(), 9);
}

#[test]
fn files_to_filtered_stream() {
    let mut neo_csv = NamedTempFile::new().unwrap();
    neo_csv
        .write_all(
            b"pdes,name,pha,diameter\n\
              2020 FK,Big Rock,Y,12.345\n\
              2019 XY,,N,\n",
        )
        .unwrap();

    let mut cad_json = NamedTempFile::new().unwrap();
    cad_json
        .write_all(
            br#"{"fields": ["des", "cd", "dist", "v_rel"],
                 "data": [["2020 FK", "2020-Jan-01 12:30", "0.25", "56.78"],
                          ["2019 XY", "2020-Jun-15 03:00", "0.9", "12.0"]]}"#,
        )
        .unwrap();

    let db = NeoDatabase::new(
        load_neos(neo_csv.path()).unwrap(),
        load_approaches(cad_json.path()).unwrap(),
    );

    let mut spec = QuerySpec::default();
    spec.set("hazardous", "true").unwrap();
    let filters = create_filters(&spec);

    let matches: Vec<_> = db.query(&filters).collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].designation(), "2020 FK");
    assert_eq!(
        db.neo_for(matches[0]).and_then(|n| n.name()),
        Some("Big Rock")
    );
}
