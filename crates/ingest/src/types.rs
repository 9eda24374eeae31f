use std::str::Utf8Error;

use costwatch_core::{CostRecord, ValidationError};
use serde::Serialize;

/// A data row that failed validation. `row` counts data rows from 1, excluding the
/// header; `line` is the physical line in the upload when known.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRejection {
    pub row: usize,
    pub line: Option<u64>,
    pub error: ValidationError,
}

/// Result of ingesting one upload. Nothing here has been written anywhere yet.
#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    pub accepted: Vec<CostRecord>,
    pub rejected: Vec<RowRejection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestStatus {
    Complete,
    Partial,
    Rejected,
    Empty,
}

impl IngestOutcome {
    pub fn rows(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }

    pub fn status(&self) -> IngestStatus {
        match (self.accepted.is_empty(), self.rejected.is_empty()) {
            (true, true) => IngestStatus::Empty,
            (false, true) => IngestStatus::Complete,
            (false, false) => IngestStatus::Partial,
            (true, false) => IngestStatus::Rejected,
        }
    }
}

/// Upload-level failures. Nothing from the upload is accepted when one of these occurs.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("upload is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] Utf8Error),
    #[error("malformed header: missing required column(s) {}", .missing.join(", "))]
    MalformedHeader { missing: Vec<String> },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
