use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::adapters::circuit_breaker::CircuitBreaker;
use crate::adapters::shared::{build_http_client, endpoint, ensure_success, parse_base_url};
use crate::config::types::RemoteServiceConfig;
use crate::domain::accommodation::AvailabilityPeriod;
use crate::domain::date_range::format_dates;
use crate::error::Result;
use crate::ports::reservations_client::ReservationsClient;

const SERVICE: &str = "reservations";
const CHECK_PATH: &str = "api/reservations/availability/check";
const REGISTER_PATH: &str = "api/reservations/availabilities";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityCheckRequest<'a> {
    accommodation_ids: &'a [String],
    dates: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterAvailabilityRequest<'a> {
    accommodation_id: &'a str,
    availabilities: &'a [AvailabilityPeriod],
}

/// HTTP client for the reservations service, guarded by a circuit breaker.
pub struct HttpReservationsClient {
    http: Client,
    base_url: Url,
    breaker: CircuitBreaker,
}

impl HttpReservationsClient {
    pub fn new(config: &RemoteServiceConfig) -> Result<Self> {
        Ok(Self {
            http: build_http_client(config)?,
            base_url: parse_base_url(&config.base_url)?,
            breaker: CircuitBreaker::new(SERVICE, &config.breaker),
        })
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    async fn post_check(&self, body: &AvailabilityCheckRequest<'_>) -> Result<Vec<String>> {
        let url = endpoint(&self.base_url, CHECK_PATH)?;
        debug!(url = %url, ids = body.accommodation_ids.len(), days = body.dates.len(), "Checking availability");
        let response = self.http.post(url).json(body).send().await?;
        let response = ensure_success(SERVICE, response)?;
        let reserved = response.json::<Option<Vec<String>>>().await?;
        Ok(reserved.unwrap_or_default())
    }

    async fn post_register(&self, body: &RegisterAvailabilityRequest<'_>) -> Result<()> {
        let url = endpoint(&self.base_url, REGISTER_PATH)?;
        debug!(url = %url, id = body.accommodation_id, periods = body.availabilities.len(), "Registering availability");
        let response = self.http.post(url).json(body).send().await?;
        ensure_success(SERVICE, response)?;
        Ok(())
    }
}

#[async_trait]
impl ReservationsClient for HttpReservationsClient {
    async fn check_availability(
        &self,
        accommodation_ids: &[String],
        dates: &[NaiveDate],
    ) -> Result<HashSet<String>> {
        if accommodation_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let body = AvailabilityCheckRequest {
            accommodation_ids,
            dates: format_dates(dates),
        };
        let reserved = self.breaker.call(self.post_check(&body)).await?;
        Ok(reserved.into_iter().collect())
    }

    async fn register_availability(
        &self,
        accommodation_id: &str,
        availabilities: &[AvailabilityPeriod],
    ) -> Result<()> {
        let body = RegisterAvailabilityRequest {
            accommodation_id,
            availabilities,
        };
        self.breaker.call(self.post_register(&body)).await
    }
}
