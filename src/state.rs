// src/state.rs
// DOCUMENTATION: Shared application state
// PURPOSE: Everything handlers need, built once in main and cloned per worker

use crate::config::Config;
use crate::models::ImageResolver;
use crate::services::{ApiClient, ContentCache, SessionStore, TrackingService};
use crate::views::InFlight;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Anonymous client; handlers derive per-session clients from it
    pub api: ApiClient,
    pub sessions: SessionStore,
    pub content: ContentCache,
    pub tracking: TrackingService,
    pub images: ImageResolver,
    pub in_flight: InFlight,
}

impl AppState {
    pub fn new(config: Config, api: ApiClient) -> Self {
        Self {
            sessions: SessionStore::new(config.session_ttl_seconds, config.device_ttl_seconds),
            content: ContentCache::new(config.settings_cache_ttl_seconds),
            tracking: TrackingService::new(config.tracking_rate_per_second),
            images: ImageResolver::new(
                config.image_base_url.clone(),
                config.image_allowed_hosts.clone(),
            ),
            in_flight: InFlight::default(),
            api,
            config,
        }
    }
}
