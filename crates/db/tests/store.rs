mod support;

use costwatch_core::CostFilter;
use support::{make_record, setup_db, sorted};

#[test]
fn query_range_without_filter_returns_insertion_order() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let records = vec![
        make_record("2024-01-03", "s3", 1.0),
        make_record("2024-01-01", "ec2", 2.0),
        make_record("2024-01-02", "rds", 3.0),
    ];
    assert_eq!(db.append_records(&records).expect("append"), 3);

    let stored = db.query_range(&CostFilter::all()).expect("query");
    assert_eq!(stored, records);
}

#[test]
fn query_range_bounds_are_inclusive() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    db.append_records(&[
        make_record("2024-01-01T00:00:00Z", "ec2", 1.0),
        make_record("2024-01-02T00:00:00Z", "ec2", 2.0),
        make_record("2024-01-03T00:00:00Z", "ec2", 3.0),
        make_record("2024-01-04T00:00:00Z", "ec2", 4.0),
    ])
    .expect("append");

    let filter = CostFilter {
        start: Some("2024-01-02T00:00:00.000Z".to_string()),
        end: Some("2024-01-03T00:00:00.000Z".to_string()),
        service: None,
    };
    let costs: Vec<f64> = db
        .query_range(&filter)
        .expect("query")
        .into_iter()
        .map(|record| record.cost)
        .collect();
    assert_eq!(costs, vec![2.0, 3.0]);

    let open_start = CostFilter {
        end: Some("2024-01-02T00:00:00.000Z".to_string()),
        ..CostFilter::all()
    };
    assert_eq!(db.query_range(&open_start).expect("query").len(), 2);

    let open_end = CostFilter {
        start: Some("2024-01-04T00:00:00.000Z".to_string()),
        ..CostFilter::all()
    };
    assert_eq!(db.query_range(&open_end).expect("query").len(), 1);
}

#[test]
fn query_range_filters_by_exact_service() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    db.append_records(&[
        make_record("2024-01-01", "EC2", 1.0),
        make_record("2024-01-01", "ec2", 2.0),
        make_record("2024-01-02", "s3", 3.0),
    ])
    .expect("append");

    let filter = CostFilter {
        service: Some("ec2".to_string()),
        ..CostFilter::all()
    };
    let stored = db.query_range(&filter).expect("query");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].cost, 2.0);
}

#[test]
fn append_keeps_existing_records() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    db.append_records(&[make_record("2024-01-01", "ec2", 1.0)])
        .expect("append");
    db.append_records(&[make_record("2024-01-01", "ec2", 1.0)])
        .expect("append duplicate");
    assert_eq!(db.append_records(&[]).expect("append empty"), 0);

    assert_eq!(db.count_records().expect("count"), 2);
}

#[test]
fn reset_all_replaces_contents_with_seed() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    db.append_records(&[
        make_record("2024-01-01", "ec2", 1.0),
        make_record("2024-01-02", "s3", 2.0),
    ])
    .expect("append");

    let seed = vec![
        make_record("2025-08-01T01:00:00Z", "S3", 2.5),
        make_record("2025-08-01T00:00:00Z", "EC2", 12.34),
        make_record("2025-08-01T02:00:00Z", "Lambda", 0.75),
    ];
    assert_eq!(db.reset_all(&seed).expect("reset"), 3);

    let stored = db.query_range(&CostFilter::all()).expect("query");
    assert_eq!(sorted(stored), sorted(seed));
}

#[test]
fn reset_all_with_empty_seed_clears_store() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    db.append_records(&[make_record("2024-01-01", "ec2", 1.0)])
        .expect("append");

    db.reset_all(&[]).expect("reset");

    assert_eq!(db.count_records().expect("count"), 0);
    assert!(db.list_services().expect("services").is_empty());
}

#[test]
fn list_services_is_distinct_and_sorted() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    db.append_records(&[
        make_record("2024-01-01", "s3", 1.0),
        make_record("2024-01-01", "EC2", 1.0),
        make_record("2024-01-02", "s3", 1.0),
    ])
    .expect("append");

    assert_eq!(
        db.list_services().expect("services"),
        vec!["EC2".to_string(), "s3".to_string()]
    );
}
