use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use accommodations_service::adapters::cache::memory_cache::MemoryCache;
use accommodations_service::adapters::images::file_storage::FileImageStore;
use accommodations_service::adapters::remote::reservations::HttpReservationsClient;
use accommodations_service::adapters::remote::users::HttpUserClient;
use accommodations_service::adapters::store::memory_store::InMemoryAccommodationStore;
use accommodations_service::config::{apply_env_overrides, find_config_path, load_config};
use accommodations_service::http::router::{AppState, routes};
use accommodations_service::ports::accommodation_store::AccommodationStore;
use accommodations_service::ports::cache::BlobCache;
use accommodations_service::ports::reservations_client::ReservationsClient;
use accommodations_service::service::accommodations::AccommodationService;
use accommodations_service::service::search::SearchEngine;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting accommodations service");

    let config_path = find_config_path();
    let mut config = load_config(&config_path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    let profile_cache: Arc<dyn BlobCache> =
        Arc::new(MemoryCache::new(config.cache.max_entries));
    let image_cache: Arc<dyn BlobCache> = Arc::new(
        MemoryCache::new(config.cache.image_max_entries)
            .with_byte_budget(config.cache.image_max_bytes),
    );

    let store: Arc<dyn AccommodationStore> = Arc::new(InMemoryAccommodationStore::new());
    let reservations: Arc<dyn ReservationsClient> = Arc::new(
        HttpReservationsClient::new(&config.reservations)
            .context("failed to build reservations client")?,
    );
    let users = Arc::new(
        HttpUserClient::new(
            &config.users,
            profile_cache,
            config.cache.profile_ttl_secs,
        )
        .context("failed to build user client")?,
    );
    let images = Arc::new(FileImageStore::new(&config.images.storage_dir));

    let accommodations = AccommodationService::new(
        Arc::clone(&store),
        Arc::clone(&reservations),
        images,
        image_cache,
        Duration::from_secs(config.cache.image_ttl_secs),
    );
    let search = SearchEngine::new(store, reservations, users)
        .with_owner_lookup_concurrency(config.search.owner_lookup_concurrency);

    let app = routes(AppState {
        accommodations: Arc::new(accommodations),
        search: Arc::new(search),
    });

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(
        addr = %config.server.bind_addr,
        reservations = %config.reservations.base_url,
        users = %config.users.base_url,
        "Listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Accommodations service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
