use chrono::NaiveDate;
use serde::Serialize;

use super::accommodation::NewAccommodation;
use super::date_range::DATE_FORMAT;

const MAX_NAME_LEN: usize = 100;

/// A single violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check every rule and return all violations, in field order.
pub fn validate(input: &NewAccommodation) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if input.name.trim().is_empty() {
        issues.push(ValidationIssue::new("name", "must not be blank"));
    } else if input.name.trim().chars().count() > MAX_NAME_LEN {
        issues.push(ValidationIssue::new(
            "name",
            format!("must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    require_text(&mut issues, "address", &input.address);
    require_text(&mut issues, "city", &input.city);
    require_text(&mut issues, "country", &input.country);
    require_text(&mut issues, "ownerId", &input.owner_id);

    if !looks_like_email(&input.owner_email) {
        issues.push(ValidationIssue::new(
            "ownerEmail",
            "must be a valid email address",
        ));
    }

    if input.min_visitors == 0 {
        issues.push(ValidationIssue::new("minVisitors", "must be at least 1"));
    }
    if input.max_visitors < input.min_visitors {
        issues.push(ValidationIssue::new(
            "maxVisitors",
            "must not be lower than minVisitors",
        ));
    }
    if input.price == 0 {
        issues.push(ValidationIssue::new("price", "must be greater than 0"));
    }
    if input.amenities.iter().any(|a| a.trim().is_empty()) {
        issues.push(ValidationIssue::new(
            "amenities",
            "must not contain blank entries",
        ));
    }

    for (i, period) in input.availabilities.iter().enumerate() {
        let field = format!("availabilities[{i}]");
        let start = NaiveDate::parse_from_str(&period.start_date, DATE_FORMAT);
        let end = NaiveDate::parse_from_str(&period.end_date, DATE_FORMAT);
        match (start, end) {
            (Ok(start), Ok(end)) if end < start => {
                issues.push(ValidationIssue::new(
                    field.as_str(),
                    "endDate must not precede startDate",
                ));
            }
            (Ok(_), Ok(_)) => {}
            _ => issues.push(ValidationIssue::new(
                field.as_str(),
                "dates must use the YYYY-MM-DD format",
            )),
        }
        if period.price == 0 {
            issues.push(ValidationIssue::new(field, "price must be greater than 0"));
        }
    }

    issues
}

fn require_text(issues: &mut Vec<ValidationIssue>, field: &str, value: &str) {
    if value.trim().is_empty() {
        issues.push(ValidationIssue::new(field, "must not be blank"));
    }
}

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}
