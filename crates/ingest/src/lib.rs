mod parser;
mod types;

pub use parser::{REQUIRED_COLUMNS, ingest_csv};
pub use types::{IngestError, IngestOutcome, IngestStatus, Result, RowRejection};
