mod support;

use rusqlite::Connection;
use support::{make_record, setup_db};

#[test]
fn migrate_is_idempotent() {
    let mut test_db = setup_db();
    test_db
        .db
        .append_records(&[make_record("2025-08-01T00:00:00Z", "EC2", 12.34)])
        .expect("append");

    test_db.db.migrate().expect("migrate again");

    assert_eq!(test_db.db.count_records().expect("count"), 1);
}

#[test]
fn stored_records_cannot_be_updated() {
    let mut test_db = setup_db();
    test_db
        .db
        .append_records(&[make_record("2025-08-01T00:00:00Z", "EC2", 12.34)])
        .expect("append");

    let conn = Connection::open(&test_db.path).expect("open conn");
    let err = conn
        .execute("UPDATE cost_record SET cost = 0", [])
        .expect_err("update must fail");
    assert!(err.to_string().contains("immutable"));

    let cost: f64 = conn
        .query_row("SELECT cost FROM cost_record", [], |row| row.get(0))
        .expect("load cost");
    assert_eq!(cost, 12.34);
}

#[test]
fn negative_costs_are_refused_by_schema() {
    let test_db = setup_db();
    let conn = Connection::open(&test_db.path).expect("open conn");
    let result = conn.execute(
        "INSERT INTO cost_record (ts, service, cost) VALUES ('2025-08-01T00:00:00.000Z', 'EC2', -1)",
        [],
    );
    assert!(result.is_err());
}
