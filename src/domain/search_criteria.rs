use serde::Serialize;

/// What a caller is looking for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub city: String,
    pub country: String,
    pub min_visitors: u32,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub max_price: Option<u32>,
    pub amenities: Vec<String>,
    pub distinguished_only: bool,
}

/// The filtering strategy a set of criteria resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchKind {
    /// Store results are returned as-is.
    Unfiltered,
    /// Drop listings with a reservation in the requested dates.
    DateOnly,
    /// Availability filtering, then keep distinguished owners only.
    DateAndDistinguished,
    /// Keep distinguished owners only.
    DistinguishedOnly,
    /// No filtering strategy exists for this combination yet.
    Unsupported,
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unfiltered => write!(f, "unfiltered"),
            Self::DateOnly => write!(f, "date range"),
            Self::DateAndDistinguished => write!(f, "date range + distinguished owners"),
            Self::DistinguishedOnly => write!(f, "distinguished owners"),
            Self::Unsupported => write!(f, "price ceiling with remote filters"),
        }
    }
}

/// Store-level filter: the structural fields the accommodation store can match on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreQuery {
    pub city: String,
    pub country: String,
    pub min_visitors: u32,
    pub max_price: Option<u32>,
    pub amenities: Vec<String>,
}

impl SearchCriteria {
    pub fn has_dates(&self) -> bool {
        non_blank(self.start_date.as_deref()).is_some()
            || non_blank(self.end_date.as_deref()).is_some()
    }

    /// Price ceiling, with zero meaning "no ceiling".
    pub fn price_ceiling(&self) -> Option<u32> {
        self.max_price.filter(|p| *p > 0)
    }

    pub fn kind(&self) -> SearchKind {
        match (
            self.has_dates(),
            self.price_ceiling().is_some(),
            self.distinguished_only,
        ) {
            (false, false, false) => SearchKind::Unfiltered,
            (true, false, false) => SearchKind::DateOnly,
            (true, false, true) => SearchKind::DateAndDistinguished,
            (false, false, true) => SearchKind::DistinguishedOnly,
            (_, true, _) => SearchKind::Unsupported,
        }
    }

    /// Date bounds as supplied; a missing bound comes back empty so that
    /// range expansion reports it as an invalid date.
    pub fn date_bounds(&self) -> (&str, &str) {
        (
            non_blank(self.start_date.as_deref()).unwrap_or_default(),
            non_blank(self.end_date.as_deref()).unwrap_or_default(),
        )
    }

    pub fn store_query(&self) -> StoreQuery {
        StoreQuery {
            city: self.city.trim().to_string(),
            country: self.country.trim().to_string(),
            min_visitors: self.min_visitors,
            max_price: self.price_ceiling(),
            amenities: self
                .amenities
                .iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
