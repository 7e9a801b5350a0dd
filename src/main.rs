// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, remote API client and caches, then start the HTTP server

mod config;
mod errors;
mod handlers;
mod models;
mod services;
mod state;
mod views;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use services::start_cleanup_task;
use state::AppState;
use std::io;

/// How often expired sessions and cached content are swept
const CLEANUP_INTERVAL_SECONDS: u64 = 300;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    let config_error = config.validate().err();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.as_str()
        } else {
            "info,actix_web=info,reqwest=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Some(e) = config_error {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting brokerage-portal...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize the remote API client
    let api = match config::init_api_client(&config) {
        Ok(api) => api,
        Err(e) => {
            log::error!("Failed to build API client: {}", e);
            std::process::exit(1);
        }
    };

    // 5. Session stores and content cache
    let state = AppState::new(config.clone(), api);
    log::info!(
        "Initialized session store (TTL: {}s) and content cache (TTL: {}s)",
        config.session_ttl_seconds,
        config.settings_cache_ttl_seconds
    );

    start_cleanup_task(state.sessions.sessions(), CLEANUP_INTERVAL_SECONDS);
    start_cleanup_task(state.sessions.devices(), CLEANUP_INTERVAL_SECONDS);
    start_cleanup_task(state.content.store(), CLEANUP_INTERVAL_SECONDS);
    log::info!(
        "Started cache cleanup tasks (interval: {}s)",
        CLEANUP_INTERVAL_SECONDS
    );

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().limit(64 * 1024))
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::pages_config)
            .configure(handlers::properties_config)
            .configure(handlers::forms_config)
            .configure(handlers::tracking_config)
            .configure(handlers::auth_config)
            .configure(handlers::dashboard_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
