use serde::{Deserialize, Serialize};

/// Lifecycle of an accommodation record.
///
/// A record is written as `Pending` and flips to `Created` once the
/// reservations service has accepted its availability calendar. Records whose
/// registration fails are deleted rather than moved to another state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationStatus {
    Pending,
    Created,
}

impl std::fmt::Display for AccommodationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Created => write!(f, "created"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    #[serde(default)]
    pub owner_username: String,
    #[serde(default)]
    pub owner_email: String,
    pub address: String,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub min_visitors: u32,
    pub max_visitors: u32,
    pub price: u32,
    pub status: AccommodationStatus,
    #[serde(default)]
    pub image_ids: Vec<String>,
    #[serde(default)]
    pub rating: f64,
}

impl Accommodation {
    /// Build a `Pending` record from validated input.
    pub fn pending(id: String, input: &NewAccommodation, image_ids: Vec<String>) -> Self {
        Self {
            id,
            name: input.name.trim().to_string(),
            owner_id: input.owner_id.clone(),
            owner_username: input.owner_username.clone(),
            owner_email: input.owner_email.clone(),
            address: input.address.trim().to_string(),
            city: input.city.trim().to_string(),
            country: input.country.trim().to_string(),
            amenities: input.amenities.clone(),
            min_visitors: input.min_visitors,
            max_visitors: input.max_visitors,
            price: input.price,
            status: AccommodationStatus::Pending,
            image_ids,
            rating: 0.0,
        }
    }

    pub fn accepts_visitors(&self, visitors: u32) -> bool {
        visitors == 0 || (self.min_visitors <= visitors && visitors <= self.max_visitors)
    }

    pub fn has_amenities(&self, wanted: &[String]) -> bool {
        wanted.iter().all(|w| {
            self.amenities
                .iter()
                .any(|have| have.eq_ignore_ascii_case(w.trim()))
        })
    }
}

impl std::fmt::Display for Accommodation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}, {} ({}-{} guests, {}/night, {})",
            self.name,
            self.city,
            self.country,
            self.min_visitors,
            self.max_visitors,
            self.price,
            self.status
        )
    }
}

/// One bookable period sent to the reservations service on creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityPeriod {
    pub start_date: String,
    pub end_date: String,
    pub price: u32,
    #[serde(default)]
    pub price_per_guest: bool,
}

/// Input for creating an accommodation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccommodation {
    pub name: String,
    pub owner_id: String,
    #[serde(default)]
    pub owner_username: String,
    #[serde(default)]
    pub owner_email: String,
    pub address: String,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub min_visitors: u32,
    pub max_visitors: u32,
    pub price: u32,
    #[serde(default)]
    pub availabilities: Vec<AvailabilityPeriod>,
}
