use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One validated cost observation.
///
/// `timestamp` is always in the canonical form produced by [`format_timestamp`], so
/// string order and chronological order agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub timestamp: String,
    pub service: String,
    pub cost: f64,
}

/// Untyped field record as read from an upload, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCostRecord {
    pub timestamp: Option<String>,
    pub service: Option<String>,
    pub cost: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostProblem {
    NotANumber,
    Negative,
}

impl fmt::Display for CostProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => write!(f, "not a number"),
            Self::Negative => write!(f, "negative"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("invalid service: missing or blank")]
    InvalidService,
    #[error("invalid cost: {0}")]
    InvalidCost(CostProblem),
    #[error("malformed row: {0}")]
    MalformedRow(String),
}

impl ValidationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidTimestamp(_) => "invalid_timestamp",
            Self::InvalidService => "invalid_service",
            Self::InvalidCost(_) => "invalid_cost",
            Self::MalformedRow(_) => "malformed_row",
        }
    }
}

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%.f%z"];
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Years the canonical form can hold while staying fixed-width.
const YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

pub fn parse_date_only(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .filter(|date| YEARS.contains(&date.year()))
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    parse_any(raw).filter(|value| YEARS.contains(&value.year()))
}

fn parse_any(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    if let Some(date) = parse_date_only(raw) {
        return date.and_hms_opt(0, 0, 0).map(|value| value.and_utc());
    }
    // Bare digits are epoch seconds or milliseconds; shorter runs such as 20240101
    // are too easy to misread and are rejected.
    if raw.chars().all(|ch| ch.is_ascii_digit())
        && let Ok(value) = raw.parse::<i64>()
    {
        return match raw.len() {
            9 | 10 => DateTime::<Utc>::from_timestamp(value, 0),
            12 | 13 => DateTime::<Utc>::from_timestamp(
                value / 1000,
                (value % 1000) as u32 * 1_000_000,
            ),
            _ => None,
        };
    }
    None
}

pub fn normalize_timestamp(raw: &str) -> Option<String> {
    parse_timestamp(raw).map(format_timestamp)
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_cost(raw: Option<&str>) -> Result<f64, ValidationError> {
    let value = present(raw).ok_or(ValidationError::InvalidCost(CostProblem::NotANumber))?;
    let cost = value
        .parse::<f64>()
        .ok()
        .filter(|cost| cost.is_finite())
        .ok_or(ValidationError::InvalidCost(CostProblem::NotANumber))?;
    if cost < 0.0 {
        return Err(ValidationError::InvalidCost(CostProblem::Negative));
    }
    // Folds -0 into 0.
    Ok(if cost == 0.0 { 0.0 } else { cost })
}

pub fn validate(raw: &RawCostRecord) -> Result<CostRecord, ValidationError> {
    let timestamp = match present(raw.timestamp.as_deref()) {
        Some(value) => normalize_timestamp(value).ok_or_else(|| {
            ValidationError::InvalidTimestamp(format!("unrecognized date {:?}", value))
        })?,
        None => return Err(ValidationError::InvalidTimestamp("missing".to_string())),
    };
    let service = present(raw.service.as_deref()).ok_or(ValidationError::InvalidService)?;
    let cost = parse_cost(raw.cost.as_deref())?;
    Ok(CostRecord {
        timestamp,
        service: service.to_string(),
        cost,
    })
}
