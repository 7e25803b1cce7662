use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::adapters::circuit_breaker::CircuitBreaker;
use crate::adapters::shared::{
    build_http_client, ensure_success, is_not_found, parse_base_url, resource_endpoint,
};
use crate::config::types::RemoteServiceConfig;
use crate::domain::user::UserProfile;
use crate::error::{Result, ServiceError};
use crate::ports::cache::BlobCache;
use crate::ports::user_client::UserClient;

const SERVICE: &str = "users";

/// HTTP client for the user service.
///
/// Profiles are cached as JSON for `profile_ttl`; a zero TTL disables caching.
pub struct HttpUserClient {
    http: Client,
    base_url: Url,
    breaker: CircuitBreaker,
    cache: Arc<dyn BlobCache>,
    profile_ttl: Duration,
}

impl HttpUserClient {
    pub fn new(
        config: &RemoteServiceConfig,
        cache: Arc<dyn BlobCache>,
        profile_ttl_secs: u64,
    ) -> Result<Self> {
        Ok(Self {
            http: build_http_client(config)?,
            base_url: parse_base_url(&config.base_url)?,
            breaker: CircuitBreaker::new(SERVICE, &config.breaker),
            cache,
            profile_ttl: Duration::from_secs(profile_ttl_secs),
        })
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    async fn fetch(&self, id: &str) -> Result<UserProfile> {
        let url = resource_endpoint(&self.base_url, "api/users", id)?;
        debug!(url = %url, "Fetching user profile");
        let response = self.http.get(url).send().await?;
        if is_not_found(&response) {
            return Err(ServiceError::UserNotFound { id: id.to_string() });
        }
        let response = ensure_success(SERVICE, response)?;
        Ok(response.json::<UserProfile>().await?)
    }
}

#[async_trait]
impl UserClient for HttpUserClient {
    async fn get_user_by_id(&self, id: &str) -> Result<UserProfile> {
        if id.trim().is_empty() {
            return Err(ServiceError::UserNotFound { id: id.to_string() });
        }
        let cache_key = format!("user:{id}");
        if let Some(cached) = self.cache.get(&cache_key) {
            debug!(id, "Cache hit for user profile");
            if let Ok(profile) = serde_json::from_slice::<UserProfile>(&cached) {
                return Ok(profile);
            }
        }

        let profile = self.breaker.call(self.fetch(id)).await?;

        if let Ok(serialized) = serde_json::to_vec(&profile) {
            self.cache.put(&cache_key, serialized.into(), self.profile_ttl);
        }

        Ok(profile)
    }
}
