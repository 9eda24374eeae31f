use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("db error: {0}")]
    Db(costwatch_db::DbError),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("{0}")]
    Ingest(#[from] ingest::IngestError),
    #[error("invalid range: {0}")]
    InvalidRange(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Message(String),
}

impl From<costwatch_db::DbError> for AppError {
    fn from(err: costwatch_db::DbError) -> Self {
        if err.is_unavailable() {
            Self::StoreUnavailable(err.to_string())
        } else {
            Self::Db(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

fn ingest_code(err: &ingest::IngestError) -> &'static str {
    match err {
        ingest::IngestError::MalformedHeader { .. } => "malformed_header",
        ingest::IngestError::InvalidEncoding(_) => "invalid_encoding",
        ingest::IngestError::Csv(_) => "invalid_input",
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let (status, code) = match &err {
            AppError::InvalidInput(_) => (400, Some("invalid_input")),
            AppError::InvalidRange(_) => (400, Some("invalid_range")),
            AppError::Ingest(inner) => (400, Some(ingest_code(inner))),
            AppError::StoreUnavailable(_) => (503, Some("store_unavailable")),
            AppError::Db(_) | AppError::Io(_) | AppError::Message(_) => (500, None),
        };
        Self {
            status,
            message: err.to_string(),
            code: code.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_header_maps_to_bad_request() {
        let err = AppError::Ingest(ingest::IngestError::MalformedHeader {
            missing: vec!["cost".to_string()],
        });
        let api = ApiError::from(err);
        assert_eq!(api.status, 400);
        assert_eq!(api.code.as_deref(), Some("malformed_header"));
        assert!(api.message.contains("cost"));
    }

    #[test]
    fn store_unavailable_is_retryable_status() {
        let api = ApiError::from(AppError::StoreUnavailable("locked".to_string()));
        assert_eq!(api.status, 503);
        assert_eq!(api.code.as_deref(), Some("store_unavailable"));
    }

    #[test]
    fn internal_errors_have_no_code() {
        let api = ApiError::from(AppError::Message("boom".to_string()));
        assert_eq!(api.status, 500);
        assert_eq!(api.code, None);
    }
}
