use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::accommodation::{Accommodation, AccommodationStatus};
use crate::domain::search_criteria::StoreQuery;
use crate::error::{Result, ServiceError};
use crate::ports::accommodation_store::AccommodationStore;

const ENTITY: &str = "Accommodation";

/// Insertion-ordered accommodation store held in process memory.
#[derive(Default)]
pub struct InMemoryAccommodationStore {
    records: RwLock<Vec<Accommodation>>,
}

impl InMemoryAccommodationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Accommodation>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn matches_text(wanted: &str, have: &str) -> bool {
    wanted.is_empty() || wanted.eq_ignore_ascii_case(have.trim())
}

fn matches_query(acc: &Accommodation, query: &StoreQuery) -> bool {
    acc.status == AccommodationStatus::Created
        && matches_text(&query.city, &acc.city)
        && matches_text(&query.country, &acc.country)
        && acc.accepts_visitors(query.min_visitors)
        && query.max_price.is_none_or(|max| acc.price <= max)
        && acc.has_amenities(&query.amenities)
}

fn not_found(id: &str) -> ServiceError {
    ServiceError::NotFound {
        entity: ENTITY,
        id: id.to_string(),
    }
}

#[async_trait]
impl AccommodationStore for InMemoryAccommodationStore {
    async fn query(&self, query: &StoreQuery) -> Result<Vec<Accommodation>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|acc| matches_query(acc, query))
            .cloned()
            .collect())
    }

    async fn save(&self, accommodation: Accommodation) -> Result<Accommodation> {
        let mut records = self.records.write().await;
        if records.iter().any(|a| a.id == accommodation.id) {
            return Err(ServiceError::Store {
                reason: format!("duplicate accommodation id {}", accommodation.id),
            });
        }
        records.push(accommodation.clone());
        Ok(accommodation)
    }

    async fn update(&self, accommodation: Accommodation) -> Result<Accommodation> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|a| a.id == accommodation.id)
            .ok_or_else(|| not_found(&accommodation.id))?;
        *slot = accommodation.clone();
        Ok(accommodation)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut records = self.records.write().await;
        let pos = records
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| not_found(id))?;
        records.remove(pos);
        Ok(())
    }

    async fn update_status(&self, id: &str, status: AccommodationStatus) -> Result<()> {
        let mut records = self.records.write().await;
        let acc = records
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| not_found(id))?;
        acc.status = status;
        Ok(())
    }

    async fn update_rating(&self, id: &str, rating: f64) -> Result<()> {
        let mut records = self.records.write().await;
        let acc = records
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| not_found(id))?;
        acc.rating = rating;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Accommodation>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Accommodation>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|a| ids.contains(&a.id))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Accommodation>> {
        Ok(self.records.read().await.clone())
    }

    async fn delete_by_owner(&self, owner_id: &str) -> Result<usize> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|a| a.owner_id != owner_id);
        Ok(before - records.len())
    }
}
