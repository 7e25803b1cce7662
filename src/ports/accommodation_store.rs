use async_trait::async_trait;

use crate::domain::accommodation::{Accommodation, AccommodationStatus};
use crate::domain::search_criteria::StoreQuery;
use crate::error::Result;

/// Persistence for accommodation records.
///
/// `query` and `find_all` return records in the store's native order; callers
/// rely on that order being stable between calls over unchanged data.
#[async_trait]
pub trait AccommodationStore: Send + Sync {
    async fn query(&self, query: &StoreQuery) -> Result<Vec<Accommodation>>;
    async fn save(&self, accommodation: Accommodation) -> Result<Accommodation>;
    async fn update(&self, accommodation: Accommodation) -> Result<Accommodation>;
    async fn delete(&self, id: &str) -> Result<()>;
    async fn update_status(&self, id: &str, status: AccommodationStatus) -> Result<()>;
    async fn update_rating(&self, id: &str, rating: f64) -> Result<()>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Accommodation>>;
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Accommodation>>;
    async fn find_all(&self) -> Result<Vec<Accommodation>>;
    async fn delete_by_owner(&self, owner_id: &str) -> Result<usize>;
}
