use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::domain::accommodation::NewAccommodation;
use crate::domain::search_criteria::SearchCriteria;
use crate::domain::validation::ValidationIssue;
use crate::error::{Result, ServiceError};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccommodationRequest {
    #[serde(flatten)]
    pub accommodation: NewAccommodation,
    /// Base64-encoded image bytes.
    #[serde(default)]
    pub image: String,
}

impl CreateAccommodationRequest {
    pub fn into_parts(self) -> Result<(NewAccommodation, Vec<u8>)> {
        let image = base64::engine::general_purpose::STANDARD
            .decode(self.image.trim())
            .map_err(|e| {
                ServiceError::Validation(vec![ValidationIssue::new(
                    "image",
                    format!("must be base64 encoded: {e}"),
                )])
            })?;
        Ok((self.accommodation, image))
    }
}

#[derive(Debug, Deserialize)]
pub struct IdsRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub rating: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedDto {
    pub deleted: usize,
}

/// Build search criteria from a raw query string.
///
/// `conveniences` may repeat; `distinguished` is only true for the literal
/// `"true"`. Numeric fields that do not parse are reported together.
pub fn parse_search_query(raw: Option<&str>) -> Result<SearchCriteria> {
    let mut criteria = SearchCriteria::default();
    let mut issues = Vec::new();

    for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
        match key.as_ref() {
            "city" => criteria.city = value.into_owned(),
            "country" => criteria.country = value.into_owned(),
            "numOfVisitors" => match parse_number(&value) {
                Some(n) => criteria.min_visitors = n,
                None => issues.push(ValidationIssue::new(
                    "numOfVisitors",
                    "must be a non-negative integer",
                )),
            },
            "startDate" => criteria.start_date = Some(value.into_owned()),
            "endDate" => criteria.end_date = Some(value.into_owned()),
            "maxPrice" => match parse_number(&value) {
                Some(n) => criteria.max_price = Some(n),
                None => issues.push(ValidationIssue::new(
                    "maxPrice",
                    "must be a non-negative integer",
                )),
            },
            "conveniences" | "conveniences[]" => {
                criteria.amenities.extend(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from),
                );
            }
            "distinguished" => criteria.distinguished_only = value == "true",
            _ => {}
        }
    }

    if issues.is_empty() {
        Ok(criteria)
    } else {
        Err(ServiceError::Validation(issues))
    }
}

/// Blank numeric parameters mean "not set".
fn parse_number(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        return Some(0);
    }
    value.parse().ok()
}
