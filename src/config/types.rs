use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "default_reservations")]
    pub reservations: RemoteServiceConfig,
    #[serde(default = "default_users")]
    pub users: RemoteServiceConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub images: ImageConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            reservations: default_reservations(),
            users: default_users(),
            cache: CacheConfig::default(),
            images: ImageConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Connection settings for a downstream service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteServiceConfig {
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub breaker: BreakerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BreakerConfig {
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
    #[serde(default = "default_open_timeout")]
    pub open_timeout_secs: u64,
    #[serde(default = "default_half_open_max_requests")]
    pub half_open_max_requests: u32,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: default_failure_threshold(),
            open_timeout_secs: default_open_timeout(),
            half_open_max_requests: default_half_open_max_requests(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    #[serde(default = "default_profile_ttl")]
    pub profile_ttl_secs: u64,
    #[serde(default = "default_image_ttl")]
    pub image_ttl_secs: u64,
    /// Image cache bounds, kept apart from `max_entries` since images are
    /// far larger than profiles.
    #[serde(default = "default_image_max_entries")]
    pub image_max_entries: usize,
    #[serde(default = "default_image_max_bytes")]
    pub image_max_bytes: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            profile_ttl_secs: default_profile_ttl(),
            image_ttl_secs: default_image_ttl(),
            image_max_entries: default_image_max_entries(),
            image_max_bytes: default_image_max_bytes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageConfig {
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default = "default_owner_lookup_concurrency")]
    pub owner_lookup_concurrency: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            owner_lookup_concurrency: default_owner_lookup_concurrency(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".into()
}

fn default_reservations() -> RemoteServiceConfig {
    RemoteServiceConfig {
        base_url: "http://localhost:8082".into(),
        timeout_secs: default_timeout(),
        breaker: BreakerConfig::default(),
    }
}

fn default_users() -> RemoteServiceConfig {
    RemoteServiceConfig {
        base_url: "http://localhost:8081".into(),
        timeout_secs: default_timeout(),
        breaker: BreakerConfig::default(),
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_failure_threshold() -> u32 {
    5
}

fn default_open_timeout() -> u64 {
    10
}

fn default_half_open_max_requests() -> u32 {
    1
}

fn default_max_entries() -> usize {
    500
}

fn default_profile_ttl() -> u64 {
    60
}

fn default_image_ttl() -> u64 {
    3600
}

fn default_image_max_entries() -> usize {
    64
}

fn default_image_max_bytes() -> usize {
    64 * 1024 * 1024
}

fn default_storage_dir() -> String {
    "./images".into()
}

fn default_owner_lookup_concurrency() -> usize {
    4
}
