use serde::Serialize;

use ingest::{IngestStatus, RowRejection};

pub const ROOT_MESSAGE: &str = "Cloud Cost & Performance Monitoring API is running.";
pub const RESET_STATUS: &str = "reset to mock data";

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct RejectedRowResponse {
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
    pub kind: &'static str,
    pub reason: String,
}

impl From<&RowRejection> for RejectedRowResponse {
    fn from(rejection: &RowRejection) -> Self {
        Self {
            row: rejection.row,
            line: rejection.line,
            kind: rejection.error.kind(),
            reason: rejection.error.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: IngestStatus,
    pub accepted: usize,
    pub inserted: usize,
    pub rejected: Vec<RejectedRowResponse>,
}

#[derive(Serialize)]
pub struct ResetResponse {
    pub status: &'static str,
    pub records: usize,
}
