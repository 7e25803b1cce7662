pub mod accommodation_store;
pub mod cache;
pub mod image_store;
pub mod reservations_client;
pub mod user_client;
