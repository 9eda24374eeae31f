use costwatch_core::CostRecord;
use rusqlite::Row;

pub(crate) fn row_to_cost_record(row: &Row<'_>) -> std::result::Result<CostRecord, rusqlite::Error> {
    Ok(CostRecord {
        timestamp: row.get(0)?,
        service: row.get(1)?,
        cost: row.get(2)?,
    })
}
