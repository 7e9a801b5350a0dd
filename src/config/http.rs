// src/config/http.rs
// DOCUMENTATION: Outbound HTTP client initialization
// PURPOSE: Build the pooled reqwest client shared by every remote API call

use crate::config::Config;
use crate::services::ApiClient;
use reqwest::Client;
use std::time::Duration;

/// Initialize the remote API client
/// DOCUMENTATION: Called once during application startup in main.rs.
/// The inner reqwest client pools connections; clones share it.
pub fn init_api_client(config: &Config) -> Result<ApiClient, reqwest::Error> {
    log::info!("Initializing API client: {}", config.api_base_url);

    let client = Client::builder()
        // Whole-request timeout
        .timeout(Duration::from_secs(config.api_timeout_seconds))
        .connect_timeout(Duration::from_secs(10))
        // Idle keep-alive connections are recycled after 90 seconds
        .pool_idle_timeout(Duration::from_secs(90))
        .user_agent(concat!("brokerage-portal/", env!("CARGO_PKG_VERSION")))
        .build()?;

    Ok(ApiClient::new(client, config.api_base_url.clone()))
}
