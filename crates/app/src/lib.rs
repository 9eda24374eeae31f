pub mod app;
pub mod config;
pub mod error;
pub mod seed;
pub mod services;
pub mod startup;
pub mod util;

pub use app::{AppConfig, AppState};
pub use config::RangeParams;
pub use error::{ApiError, AppError, Result};
pub use seed::mock_records;
pub use services::{AppServices, CostQueryResult, UploadReport};
pub use startup::{AppPaths, ensure_app_data_dir};
pub use util::time::resolve_filter;
