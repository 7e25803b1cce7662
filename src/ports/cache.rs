use std::sync::Arc;
use std::time::Duration;

/// Shared byte cache with per-entry expiry.
///
/// Values are reference counted so a hit never copies the payload; callers
/// decide how to encode what they store.
pub trait BlobCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Arc<[u8]>>;
    fn put(&self, key: &str, value: Arc<[u8]>, ttl: Duration);
}
