// src/services/content_cache.rs
// DOCUMENTATION: Cache for rarely-changing public content
// PURPOSE: Keep CMS settings, FAQ and master data off the hot path of every page render

use crate::errors::PortalError;
use crate::services::cache::TtlCache;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Key prefix of everything the CMS admin pages can change
pub const CMS_PREFIX: &str = "cms:";

#[derive(Clone)]
pub struct ContentCache {
    inner: TtlCache<Value>,
    /// Bumped by every invalidation; a fetch that straddles one is not stored
    generation: Arc<AtomicU64>,
}

impl ContentCache {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            inner: TtlCache::new(ttl_seconds),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Cached value for `key`, fetched and stored on a miss
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &str, fetch: F) -> Result<T, PortalError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, PortalError>>,
    {
        if let Some(cached) = self.inner.get(key).await {
            match serde_json::from_value(cached) {
                Ok(value) => return Ok(value),
                Err(e) => log::warn!("Discarding undecodable cache entry {}: {}", key, e),
            }
        }

        let started = self.generation.load(Ordering::Acquire);
        let fresh = fetch().await?;
        if self.generation.load(Ordering::Acquire) != started {
            log::debug!("Content for {} changed while fetching, not caching", key);
            return Ok(fresh);
        }
        match serde_json::to_value(&fresh) {
            Ok(value) => self.inner.set(key.to_string(), value).await,
            Err(e) => log::warn!("Could not cache {}: {}", key, e),
        }
        Ok(fresh)
    }

    /// Forget every entry under the prefix
    pub async fn invalidate(&self, prefix: &str) {
        log::info!("Invalidating content cache entries under {}", prefix);
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.inner.remove_prefix(prefix).await;
    }

    pub fn store(&self) -> TtlCache<Value> {
        self.inner.clone()
    }
}
