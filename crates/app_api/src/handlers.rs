use chrono::Utc;
use costwatch_app::{AppError, CostQueryResult, RangeParams, Result, resolve_filter};
use costwatch_core::{Anomaly, Bucket, CostFilter, CostRecord};

use crate::{
    AppContext, CostsRequest, RESET_STATUS, ROOT_MESSAGE, RejectedRowResponse, ResetResponse,
    RootResponse, SummaryRequest, UploadResponse,
};

fn resolve(
    range: Option<String>,
    start: Option<String>,
    end: Option<String>,
    service: Option<&str>,
) -> Result<CostFilter> {
    resolve_filter(&RangeParams { range, start, end }, service)
}

fn parse_bucket(bucket: Option<&str>) -> Result<Bucket> {
    match bucket.map(str::trim).filter(|value| !value.is_empty()) {
        None | Some("exact") => Ok(Bucket::Exact),
        Some("hour") => Ok(Bucket::Hour),
        Some("day") => Ok(Bucket::Day),
        Some(value) => Err(AppError::InvalidInput(format!(
            "unsupported bucket {}",
            value
        ))),
    }
}

pub fn root() -> RootResponse {
    RootResponse {
        message: ROOT_MESSAGE,
    }
}

pub fn costs(ctx: &AppContext, req: CostsRequest) -> Result<Vec<CostRecord>> {
    let filter = resolve(req.range, req.start, req.end, req.service.as_deref())?;
    ctx.app_state.services.costs.list(&filter)
}

pub fn costs_summary(ctx: &AppContext, req: SummaryRequest) -> Result<CostQueryResult> {
    let bucket = parse_bucket(req.bucket.as_deref())?;
    let filter = resolve(req.range, req.start, req.end, req.service.as_deref())?;
    ctx.app_state.services.costs.query(&filter, bucket)
}

pub fn services(ctx: &AppContext) -> Result<Vec<String>> {
    ctx.app_state.services.costs.services()
}

pub fn anomalies(ctx: &AppContext) -> Result<Vec<Anomaly>> {
    ctx.app_state.services.anomalies.detect(Utc::now())
}

pub fn upload_csv(ctx: &AppContext, bytes: &[u8]) -> Result<UploadResponse> {
    let report = ctx.app_state.services.ingest.upload(bytes)?;
    Ok(UploadResponse {
        status: report.outcome.status(),
        accepted: report.outcome.accepted.len(),
        inserted: report.inserted,
        rejected: report
            .outcome
            .rejected
            .iter()
            .map(RejectedRowResponse::from)
            .collect(),
    })
}

pub fn reset_mock_data(ctx: &AppContext) -> Result<ResetResponse> {
    let records = ctx.app_state.services.reset.reset()?;
    Ok(ResetResponse {
        status: RESET_STATUS,
        records,
    })
}
