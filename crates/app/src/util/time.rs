use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};
use costwatch_core::{CostFilter, format_timestamp, parse_date_only, parse_timestamp};

use crate::config::RangeParams;
use crate::error::{AppError, Result};

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_start(value: &str) -> Result<String> {
    parse_timestamp(value)
        .map(format_timestamp)
        .ok_or_else(|| AppError::InvalidInput(format!("invalid start date {:?}", value)))
}

/// A bare date as an end bound covers that whole day.
fn parse_end(value: &str) -> Result<String> {
    if let Some(date) = parse_date_only(value) {
        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
            .ok_or_else(|| AppError::Message("invalid end-of-day time".to_string()))?;
        return Ok(format_timestamp(date.and_time(end_of_day).and_utc()));
    }
    parse_timestamp(value)
        .map(format_timestamp)
        .ok_or_else(|| AppError::InvalidInput(format!("invalid end date {:?}", value)))
}

fn preset_start(range: &str, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>> {
    let start = match range {
        "alltime" => return Ok(None),
        "today" => Utc
            .with_ymd_and_hms(now.year(), now.month(), now.day(), 0, 0, 0)
            .single(),
        "last7days" => Some(now - Duration::days(7)),
        "last14days" => Some(now - Duration::days(14)),
        "thismonth" => Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .single(),
        value => {
            return Err(AppError::InvalidInput(format!(
                "unsupported range {}",
                value
            )));
        }
    };
    start
        .map(Some)
        .ok_or_else(|| AppError::InvalidInput("invalid date".to_string()))
}

pub fn resolve_filter_at(
    params: &RangeParams,
    service: Option<&str>,
    now: DateTime<Utc>,
) -> Result<CostFilter> {
    let start = non_blank(params.start.as_deref());
    let end = non_blank(params.end.as_deref());
    let (start, end) = if start.is_some() || end.is_some() {
        (
            start.map(parse_start).transpose()?,
            end.map(parse_end).transpose()?,
        )
    } else if let Some(range) = non_blank(params.range.as_deref()) {
        match preset_start(range, now)? {
            Some(start) => (Some(format_timestamp(start)), Some(format_timestamp(now))),
            None => (None, None),
        }
    } else {
        (None, None)
    };

    if let (Some(start), Some(end)) = (start.as_deref(), end.as_deref())
        && start > end
    {
        return Err(AppError::InvalidRange(format!(
            "start {} is after end {}",
            start, end
        )));
    }

    Ok(CostFilter {
        start,
        end,
        service: non_blank(service).map(str::to_string),
    })
}

pub fn resolve_filter(params: &RangeParams, service: Option<&str>) -> Result<CostFilter> {
    resolve_filter_at(params, service, Utc::now())
}
