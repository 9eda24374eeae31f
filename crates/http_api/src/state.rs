use app_api::AppContext;

/// Upload size limit applied when none is configured.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct HttpState {
    pub context: AppContext,
    pub max_upload_bytes: usize,
}

impl HttpState {
    pub fn new(context: AppContext, max_upload_bytes: usize) -> Self {
        Self {
            context,
            max_upload_bytes,
        }
    }
}
