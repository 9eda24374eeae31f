use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct CostsRequest {
    pub range: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub service: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SummaryRequest {
    pub range: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub service: Option<String>,
    pub bucket: Option<String>,
}
