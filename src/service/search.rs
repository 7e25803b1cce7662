//! Availability- and owner-aware accommodation search.
//!
//! A search always starts with a structural query against the accommodation
//! store. Depending on the criteria it then removes listings that already have
//! a reservation in the requested dates, keeps only listings whose owner is a
//! distinguished host, or both, in that order.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::domain::accommodation::Accommodation;
use crate::domain::date_range::generate_date_range;
use crate::domain::filter::{ids_of, remove_conflicting};
use crate::domain::search_criteria::{SearchCriteria, SearchKind};
use crate::error::{Result, ServiceError};
use crate::ports::accommodation_store::AccommodationStore;
use crate::ports::reservations_client::ReservationsClient;
use crate::ports::user_client::UserClient;

pub struct SearchEngine {
    store: Arc<dyn AccommodationStore>,
    reservations: Arc<dyn ReservationsClient>,
    users: Arc<dyn UserClient>,
    owner_lookup_concurrency: usize,
}

impl SearchEngine {
    pub fn new(
        store: Arc<dyn AccommodationStore>,
        reservations: Arc<dyn ReservationsClient>,
        users: Arc<dyn UserClient>,
    ) -> Self {
        Self {
            store,
            reservations,
            users,
            owner_lookup_concurrency: 1,
        }
    }

    /// Number of owner profiles fetched at once; values below 1 mean sequential.
    #[must_use]
    pub fn with_owner_lookup_concurrency(mut self, concurrency: usize) -> Self {
        self.owner_lookup_concurrency = concurrency.max(1);
        self
    }

    pub async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Accommodation>> {
        let kind = criteria.kind();
        let candidates = self
            .store
            .query(&criteria.store_query())
            .await
            .map_err(|e| ServiceError::SearchFailed {
                reason: e.to_string(),
            })?;
        debug!(%kind, candidates = candidates.len(), "Store query complete");

        let results = match kind {
            SearchKind::Unfiltered => candidates,
            SearchKind::DateOnly => self.exclude_reserved(candidates, criteria).await?,
            SearchKind::DateAndDistinguished => {
                let available = self.exclude_reserved(candidates, criteria).await?;
                self.keep_distinguished_owners(available).await
            }
            SearchKind::DistinguishedOnly => self.keep_distinguished_owners(candidates).await,
            SearchKind::Unsupported => {
                return Err(ServiceError::UnsupportedCriteria {
                    kind: kind.to_string(),
                });
            }
        };

        info!(%kind, results = results.len(), "Search complete");
        Ok(results)
    }

    async fn exclude_reserved(
        &self,
        candidates: Vec<Accommodation>,
        criteria: &SearchCriteria,
    ) -> Result<Vec<Accommodation>> {
        let (start, end) = criteria.date_bounds();
        let dates = generate_date_range(start, end)?;
        if dates.is_empty() {
            debug!(start, end, "Empty date range, nothing can be available");
            return Ok(Vec::new());
        }
        if candidates.is_empty() {
            return Ok(candidates);
        }

        let reserved = self
            .reservations
            .check_availability(&ids_of(&candidates), &dates)
            .await
            .map_err(|e| ServiceError::AvailabilityCheckFailed {
                reason: e.to_string(),
            })?;
        debug!(reserved = reserved.len(), "Reserved accommodations in range");
        Ok(remove_conflicting(candidates, &reserved))
    }

    async fn keep_distinguished_owners(&self, candidates: Vec<Accommodation>) -> Vec<Accommodation> {
        stream::iter(candidates)
            .map(|acc| self.keep_if_owner_distinguished(acc))
            .buffered(self.owner_lookup_concurrency)
            .filter_map(futures::future::ready)
            .collect()
            .await
    }

    async fn keep_if_owner_distinguished(&self, acc: Accommodation) -> Option<Accommodation> {
        match self.users.get_user_by_id(&acc.owner_id).await {
            Ok(profile) if profile.distinguished => Some(acc),
            Ok(_) => None,
            Err(e) => {
                warn!(
                    accommodation = %acc.id,
                    owner = %acc.owner_id,
                    error = %e,
                    "Owner profile lookup failed, excluding accommodation"
                );
                None
            }
        }
    }
}
