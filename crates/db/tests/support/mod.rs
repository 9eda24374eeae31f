#![allow(dead_code)]

use std::path::PathBuf;

use costwatch_core::{CostRecord, normalize_timestamp};
use costwatch_db::Db;
use tempfile::TempDir;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn make_record(ts: &str, service: &str, cost: f64) -> CostRecord {
    CostRecord {
        timestamp: normalize_timestamp(ts).expect("timestamp"),
        service: service.to_string(),
        cost,
    }
}

pub fn sorted(mut records: Vec<CostRecord>) -> Vec<CostRecord> {
    records.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.service.cmp(&b.service))
            .then_with(|| a.cost.total_cmp(&b.cost))
    });
    records
}
