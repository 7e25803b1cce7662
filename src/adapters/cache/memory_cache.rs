use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use lru::LruCache;
use tracing::{debug, warn};

use crate::ports::cache::BlobCache;

const MIN_ENTRIES: NonZeroUsize = NonZeroUsize::MIN;

struct Entry {
    value: Arc<[u8]>,
    expires_at: Instant,
}

struct Inner {
    entries: LruCache<String, Entry>,
    bytes: usize,
}

impl Inner {
    fn remove(&mut self, key: &str) {
        if let Some(old) = self.entries.pop(key) {
            self.bytes -= old.value.len();
        }
    }

    fn evict_lru(&mut self) -> bool {
        match self.entries.pop_lru() {
            Some((_, old)) => {
                self.bytes -= old.value.len();
                true
            }
            None => false,
        }
    }
}

/// In-process LRU byte cache.
///
/// Bounded by entry count and, optionally, by the total size of the stored
/// values. Expired entries are dropped lazily when looked up.
pub struct MemoryCache {
    inner: Mutex<Inner>,
    max_bytes: Option<usize>,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        let cap = NonZeroUsize::new(max_entries).unwrap_or_else(|| {
            warn!("Cache max_entries was 0, keeping a single entry");
            MIN_ENTRIES
        });
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(cap),
                bytes: 0,
            }),
            max_bytes: None,
        }
    }

    /// Cap the summed size of cached values. Values larger than the budget
    /// are never stored.
    #[must_use]
    pub fn with_byte_budget(mut self, max_bytes: usize) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total size of the values currently held.
    pub fn used_bytes(&self) -> usize {
        self.lock().bytes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BlobCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Arc<[u8]>> {
        let mut inner = self.lock();
        let entry = inner.entries.get(key)?;
        if Instant::now() >= entry.expires_at {
            inner.remove(key);
            return None;
        }
        Some(Arc::clone(&entry.value))
    }

    fn put(&self, key: &str, value: Arc<[u8]>, ttl: Duration) {
        if ttl.is_zero() {
            return;
        }
        let size = value.len();
        if self.max_bytes.is_some_and(|max| size > max) {
            debug!(key, size, "Value larger than cache budget, not cached");
            return;
        }

        let mut inner = self.lock();
        inner.remove(key);
        if let Some(max) = self.max_bytes {
            while inner.bytes + size > max && inner.evict_lru() {}
        }
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        if let Some((_, evicted)) = inner.entries.push(key.to_string(), entry) {
            inner.bytes -= evicted.value.len();
        }
        inner.bytes += size;
    }
}
