use serde::{Deserialize, Serialize};

/// Date filter as supplied by a caller. Explicit `start`/`end` win over `range`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RangeParams {
    pub range: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}
