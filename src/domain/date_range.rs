use chrono::NaiveDate;

use crate::domain::validation::ValidationIssue;
use crate::error::{Result, ServiceError};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Longest stay, in days, a single search may ask about.
pub const MAX_SEARCH_DAYS: i64 = 366;

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ServiceError::InvalidDateFormat {
            value: value.to_string(),
        }
    })
}

/// Expand `start..=end` into every calendar day it covers.
///
/// Both bounds must parse as `YYYY-MM-DD`. An `end` before `start` yields an
/// empty range rather than an error; a span longer than [`MAX_SEARCH_DAYS`]
/// is a validation error.
pub fn generate_date_range(start: &str, end: &str) -> Result<Vec<NaiveDate>> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if end < start {
        return Ok(Vec::new());
    }
    if (end - start).num_days() >= MAX_SEARCH_DAYS {
        return Err(ServiceError::Validation(vec![ValidationIssue::new(
            "endDate",
            format!("date range must not exceed {MAX_SEARCH_DAYS} days"),
        )]));
    }
    Ok(start.iter_days().take_while(|day| *day <= end).collect())
}

pub fn format_dates(dates: &[NaiveDate]) -> Vec<String> {
    dates
        .iter()
        .map(|d| d.format(DATE_FORMAT).to_string())
        .collect()
}
