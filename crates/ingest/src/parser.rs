use std::collections::HashMap;
use std::time::Instant;

use costwatch_core::{RawCostRecord, ValidationError, validate};
use csv::StringRecord;
use rayon::prelude::*;

use crate::types::{IngestError, IngestOutcome, Result, RowRejection};

pub const REQUIRED_COLUMNS: [&str; 3] = ["timestamp", "service", "cost"];

#[derive(Debug, Clone, Copy)]
struct Columns {
    timestamp: usize,
    service: usize,
    cost: usize,
}

struct DecodedRow {
    row: usize,
    line: Option<u64>,
    fields: std::result::Result<RawCostRecord, String>,
}

fn normalize_header_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

fn resolve_columns(headers: &StringRecord) -> Result<Columns> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        positions.entry(normalize_header_name(name)).or_insert(idx);
    }
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !positions.contains_key(**name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MalformedHeader { missing });
    }
    Ok(Columns {
        timestamp: positions["timestamp"],
        service: positions["service"],
        cost: positions["cost"],
    })
}

fn field(record: &StringRecord, idx: usize) -> Option<String> {
    record.get(idx).map(str::to_string)
}

fn to_raw(record: &StringRecord, columns: Columns) -> RawCostRecord {
    RawCostRecord {
        timestamp: field(record, columns.timestamp),
        service: field(record, columns.service),
        cost: field(record, columns.cost),
    }
}

/// A whitespace-only line. Rows with delimiters are data rows even when every field
/// is empty.
fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record.get(0).is_some_and(|value| value.trim().is_empty())
}

/// Parses a CSV upload into accepted records and per-row rejections.
///
/// The header must name `timestamp`, `service` and `cost` (any case, any order).
/// Bad rows are collected rather than aborting the upload; the only hard failures
/// are a non-UTF-8 body and a header missing required columns.
pub fn ingest_csv(bytes: &[u8]) -> Result<IngestOutcome> {
    let started = Instant::now();
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();
    let columns = resolve_columns(&headers)?;

    let mut decoded = Vec::new();
    for result in reader.records() {
        let (line, fields) = match result {
            Ok(record) => {
                if is_blank(&record) {
                    continue;
                }
                (
                    record.position().map(|pos| pos.line()),
                    Ok(to_raw(&record, columns)),
                )
            }
            Err(err) => (err.position().map(|pos| pos.line()), Err(err.to_string())),
        };
        decoded.push(DecodedRow {
            row: decoded.len() + 1,
            line,
            fields,
        });
    }

    let validated: Vec<(usize, Option<u64>, std::result::Result<_, ValidationError>)> = decoded
        .into_par_iter()
        .map(|row| {
            let result = match row.fields {
                Ok(raw) => validate(&raw),
                Err(message) => Err(ValidationError::MalformedRow(message)),
            };
            (row.row, row.line, result)
        })
        .collect();

    let mut outcome = IngestOutcome::default();
    for (row, line, result) in validated {
        match result {
            Ok(record) => outcome.accepted.push(record),
            Err(error) => outcome.rejected.push(RowRejection { row, line, error }),
        }
    }

    tracing::debug!(
        rows = outcome.rows(),
        accepted = outcome.accepted.len(),
        rejected = outcome.rejected.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "parsed csv upload"
    );
    Ok(outcome)
}
