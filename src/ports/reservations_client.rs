use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::accommodation::AvailabilityPeriod;
use crate::error::Result;

#[async_trait]
pub trait ReservationsClient: Send + Sync {
    /// Ids among `accommodation_ids` with at least one reservation on any of `dates`.
    async fn check_availability(
        &self,
        accommodation_ids: &[String],
        dates: &[NaiveDate],
    ) -> Result<HashSet<String>>;

    async fn register_availability(
        &self,
        accommodation_id: &str,
        availabilities: &[AvailabilityPeriod],
    ) -> Result<()>;
}
