// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 8080)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Remote REST API base URL, e.g. https://api.example.com/api/v1
    pub api_base_url: String,

    /// Base URL prepended to relative image paths
    pub image_base_url: String,

    /// Hosts whose absolute image URLs may be rendered as-is
    pub image_allowed_hosts: Vec<String>,

    /// Public site URL, used to build referral links
    pub site_url: String,

    /// Base URL of the short-link redirector
    pub short_link_base_url: String,

    /// Session-storage key holding the bearer token
    pub auth_token_key: String,

    /// Idle lifetime of a browser session, in seconds
    pub session_ttl_seconds: u64,

    /// Lifetime of the device ("local storage") record, in seconds
    pub device_ttl_seconds: u64,

    /// How long CMS settings, FAQ and cities stay cached, in seconds
    pub settings_cache_ttl_seconds: u64,

    /// Outbound request timeout in seconds
    pub api_timeout_seconds: u64,

    /// Maximum number of favorites a customer may keep
    pub favorite_limit: usize,

    /// Tracking POSTs allowed per second across the whole server
    pub tracking_rate_per_second: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_address: "127.0.0.1".to_string(),
            server_port: 8080,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            api_base_url: "http://localhost:8000/api".to_string(),
            image_base_url: "http://localhost:8000/storage".to_string(),
            image_allowed_hosts: vec!["localhost".to_string()],
            site_url: "http://localhost:3000".to_string(),
            short_link_base_url: "http://localhost:3000/s".to_string(),
            auth_token_key: "auth_token".to_string(),
            session_ttl_seconds: 3600 * 8,
            device_ttl_seconds: 3600 * 24 * 30,
            settings_cache_ttl_seconds: 300,
            api_timeout_seconds: 30,
            favorite_limit: 5,
            tracking_rate_per_second: 20,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment, falling back to
    /// the development defaults for anything unset or unparsable
    pub fn from_env() -> Self {
        // Load .env file if it exists
        dotenv().ok();

        let defaults = Config::default();

        Config {
            server_address: env::var("SERVER_ADDRESS").unwrap_or(defaults.server_address),

            server_port: parse_var("SERVER_PORT", defaults.server_port),

            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),

            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),

            api_base_url: env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),

            image_base_url: env::var("IMAGE_BASE_URL").unwrap_or(defaults.image_base_url),

            image_allowed_hosts: env::var("IMAGE_ALLOWED_HOSTS")
                .map(|v| {
                    v.split(',')
                        .map(|h| h.trim().to_lowercase())
                        .filter(|h| !h.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.image_allowed_hosts),

            site_url: env::var("SITE_URL").unwrap_or(defaults.site_url),

            short_link_base_url: env::var("SHORT_LINK_BASE_URL")
                .unwrap_or(defaults.short_link_base_url),

            auth_token_key: env::var("AUTH_TOKEN_KEY").unwrap_or(defaults.auth_token_key),

            session_ttl_seconds: parse_var("SESSION_TTL_SECONDS", defaults.session_ttl_seconds),

            device_ttl_seconds: parse_var("DEVICE_TTL_SECONDS", defaults.device_ttl_seconds),

            settings_cache_ttl_seconds: parse_var(
                "SETTINGS_CACHE_TTL_SECONDS",
                defaults.settings_cache_ttl_seconds,
            ),

            api_timeout_seconds: parse_var("API_TIMEOUT_SECONDS", defaults.api_timeout_seconds),

            favorite_limit: parse_var("FAVORITE_LIMIT", defaults.favorite_limit),

            tracking_rate_per_second: parse_var(
                "TRACKING_RATE_PER_SECOND",
                defaults.tracking_rate_per_second,
            ),
        }
    }

    /// Cookies go out with the Secure flag in production
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.api_base_url.is_empty() {
            return Err("API_BASE_URL is required".to_string());
        }

        if reqwest::Url::parse(&self.api_base_url).is_err() {
            return Err(format!("API_BASE_URL is not a valid URL: {}", self.api_base_url));
        }

        if self.auth_token_key.is_empty() {
            return Err("AUTH_TOKEN_KEY must not be empty".to_string());
        }

        if self.tracking_rate_per_second == 0 {
            return Err("TRACKING_RATE_PER_SECOND must be greater than zero".to_string());
        }

        if self.image_allowed_hosts.is_empty() {
            log::warn!("IMAGE_ALLOWED_HOSTS is empty - only relative image paths will render");
        }

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
