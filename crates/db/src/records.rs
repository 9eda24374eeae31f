use costwatch_core::{CostFilter, CostRecord};
use rusqlite::{Transaction, TransactionBehavior, params, params_from_iter};

use crate::Db;
use crate::error::Result;
use crate::helpers::row_to_cost_record;

fn insert_all(tx: &Transaction<'_>, records: &[CostRecord]) -> Result<usize> {
    let mut stmt = tx.prepare("INSERT INTO cost_record (ts, service, cost) VALUES (?1, ?2, ?3)")?;
    let mut inserted = 0usize;
    for record in records {
        inserted += stmt.execute(params![record.timestamp, record.service, record.cost])?;
    }
    Ok(inserted)
}

impl Db {
    /// Appends every record in one write transaction. Readers see all of them or none.
    pub fn append_records(&mut self, records: &[CostRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let inserted = insert_all(&tx, records)?;
        tx.commit()?;
        Ok(inserted)
    }

    /// Records matching `filter`, in insertion order.
    pub fn query_range(&self, filter: &CostFilter) -> Result<Vec<CostRecord>> {
        let mut sql = String::from("SELECT ts, service, cost FROM cost_record");
        let mut clauses = Vec::new();
        let mut values: Vec<&str> = Vec::new();
        if let Some(start) = filter.start.as_deref() {
            values.push(start);
            clauses.push(format!("ts >= ?{}", values.len()));
        }
        if let Some(end) = filter.end.as_deref() {
            values.push(end);
            clauses.push(format!("ts <= ?{}", values.len()));
        }
        if let Some(service) = filter.service.as_deref() {
            values.push(service);
            clauses.push(format!("service = ?{}", values.len()));
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY seq ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values), row_to_cost_record)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Replaces the whole table with `seed` in one write transaction. This is the only
    /// way records are ever removed.
    pub fn reset_all(&mut self, seed: &[CostRecord]) -> Result<usize> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let removed = tx.execute("DELETE FROM cost_record", [])?;
        let inserted = insert_all(&tx, seed)?;
        tx.commit()?;
        tracing::debug!(removed, inserted, "cost store reset");
        Ok(inserted)
    }

    pub fn count_records(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cost_record", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    pub fn list_services(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT service FROM cost_record ORDER BY service ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}
