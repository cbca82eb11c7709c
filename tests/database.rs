use neows::NeowsError;
use neows::database::NeoDatabase;
use neows::filter::{Attribute, AttributeFilter, Comparator};
use neows::limit::limit;
use neows::model::{parse_date_hour, CloseApproach, NearEarthObject};

fn approach(des: &str, cd: &str, dist: f64, v_rel: f64) -> CloseApproach {
    CloseApproach::new(des, parse_date_hour(cd).unwrap(), dist, v_rel).unwrap()
}

fn setup() -> NeoDatabase {
    let neos = vec![
        NearEarthObject::new("433", Some("Eros".into()), 16.84, false).unwrap(),
        NearEarthObject::new("2000 AB", Some("Apophis-like".into()), 0.370, true).unwrap(),
        NearEarthObject::new("2020 QQ", None, f64::NAN, false).unwrap(),
    ];
    let approaches = vec![
        approach("2000 AB", "1900-Jan-01 00:00", 0.092, 13.5),
        approach("433", "1900-Dec-27 01:30", 0.315, 5.58),
        approach("2000 AB", "1950-Jun-15 12:00", 0.41, 9.1),
        approach("433", "2019-Jan-31 10:00", 0.21, 5.6),
    ];
    NeoDatabase::new(neos, approaches).unwrap()
}

#[test]
fn linking_connects_both_sides() {
    let db = setup();
    assert_eq!(db.neo_count(), 3);
    assert_eq!(db.approach_count(), 4);
    let apophis = db.get_neo_by_designation("2000 AB").unwrap();
    assert_eq!(apophis.approaches(), &[0, 2]);
    for id in apophis.approaches() {
        let linked = db.link(db.approach(*id).unwrap()).unwrap();
        assert_eq!(linked.neo().designation(), "2000 AB");
    }
    let lonely = db.get_neo_by_designation("2020 QQ").unwrap();
    assert!(lonely.approaches().is_empty());
    let times: Vec<String> = db
        .approaches_of("433")
        .unwrap()
        .map(|a| a.approach().time_str())
        .collect();
    assert_eq!(times, vec!["1900-12-27 01:30", "2019-01-31 10:00"], "approaches keep load order");
}

#[test]
fn lookups_by_designation_and_name() {
    let db = setup();
    assert_eq!(db.get_neo_by_name("Eros").unwrap().designation(), "433");
    assert_eq!(db.get_neo_by_designation("433").unwrap().fullname(), "433 Eros");
    assert!(db.get_neo_by_designation("eros").is_none());
    assert!(db.get_neo_by_name("433").is_none());
    assert!(db.get_neo_by_name("").is_none(), "unnamed objects are not indexed by name");
}

#[test]
fn query_applies_all_filters() {
    let db = setup();
    let filters = [
        AttributeFilter::new(Attribute::Diameter, Comparator::Ge, 0.3),
        AttributeFilter::new(Attribute::Hazardous, Comparator::Eq, false),
    ];
    let results: Vec<_> = db.query(&filters).collect::<Result<_, _>>().unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.neo().designation() == "433"));

    let close = [AttributeFilter::new(Attribute::Distance, Comparator::Le, 0.1)];
    let results: Vec<_> = db.query(&close).collect::<Result<_, _>>().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].to_string(),
        "On 1900-01-01 00:00, '2000 AB Apophis-like' approaches Earth at a distance of 0.09 au and a velocity of 13.50 km/s."
    );
}

#[test]
fn query_is_lazy_and_limitable() {
    let db = setup();
    let first: Vec<_> = limit(db.query(&[]), Some(2)).collect::<Result<_, _>>().unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].approach().time_str(), "1900-01-01 00:00");
    assert_eq!(first[1].approach().time_str(), "1900-12-27 01:30");
}

#[test]
fn results_outlive_the_filters() {
    let db = setup();
    let results: Vec<_> = {
        let filters = vec![AttributeFilter::new(Attribute::Velocity, Comparator::Ge, 9.0)];
        db.query(&filters).collect::<Result<_, _>>().unwrap()
    };
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.neo().designation() == "2000 AB"));
}

#[test]
fn approaches_of_resolves_within_its_own_database() {
    let db = setup();
    assert!(db.approaches_of("1221").is_none(), "unknown designation");
    assert_eq!(db.approaches_of("2020 QQ").unwrap().count(), 0);

    // an object from another database is looked up by designation here
    let other = NeoDatabase::new(
        vec![NearEarthObject::new("2000 AB", None, 1.0, false).unwrap()],
        vec![approach("2000 AB", "2001-Jan-01 00:00", 0.5, 1.0)],
    )
    .unwrap();
    let foreign = other.get_neo_by_designation("2000 AB").unwrap();
    let times: Vec<String> = db
        .approaches_of(foreign.designation())
        .unwrap()
        .map(|a| a.approach().time_str())
        .collect();
    assert_eq!(times, vec!["1900-01-01 00:00", "1950-06-15 12:00"]);
}

#[test]
fn unsupported_filter_ends_the_stream() {
    let db = setup();
    let filters = [AttributeFilter::new(Attribute::Other("Albedo"), Comparator::Ge, 0.1)];
    let mut results = db.query(&filters);
    assert!(matches!(results.next(), Some(Err(NeowsError::UnsupportedCriterion(_)))));
    assert!(results.next().is_none());
}

#[test]
fn duplicate_designation_is_rejected() {
    let neos = vec![
        NearEarthObject::new("433", None, 1.0, false).unwrap(),
        NearEarthObject::new("433", Some("Eros".into()), 16.84, false).unwrap(),
    ];
    let err = NeoDatabase::new(neos, Vec::new()).unwrap_err();
    assert!(matches!(err, NeowsError::DuplicateDesignation(d) if d == "433"));
}

#[test]
fn orphan_approach_is_rejected() {
    let neos = vec![NearEarthObject::new("433", None, 1.0, false).unwrap()];
    let approaches = vec![approach("1221", "1932-Mar-22 12:00", 0.1, 4.0)];
    let err = NeoDatabase::new(neos, approaches).unwrap_err();
    assert!(matches!(err, NeowsError::UnknownDesignation(d) if d == "1221"));
}

#[test]
fn database_can_be_shared_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NeoDatabase>();

    let db = setup();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..2)
            .map(|_| s.spawn(|| db.query(&[]).count()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 4);
        }
    });
}
