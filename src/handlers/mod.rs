// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod auth;
pub mod dashboard;
pub mod forms;
pub mod health;
pub mod pages;
pub mod properties;
pub mod session;
pub mod tracking;

pub use auth::config as auth_config;
pub use dashboard::config as dashboard_config;
pub use forms::config as forms_config;
pub use health::config as health_config;
pub use pages::config as pages_config;
pub use properties::config as properties_config;
pub use tracking::config as tracking_config;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::Config;
    use crate::handlers::session::{DEVICE_COOKIE, SESSION_COOKIE};
    use crate::models::User;
    use crate::services::ApiClient;
    use crate::state::AppState;
    use actix_web::cookie::Cookie;
    use wiremock::MockServer;

    /// State whose remote API is the mock server
    pub fn state_for(server: &MockServer) -> AppState {
        let config = Config {
            api_base_url: server.uri(),
            ..Config::default()
        };
        let api = ApiClient::new(reqwest::Client::new(), server.uri());
        AppState::new(config, api)
    }

    /// Signed-in browser with the given role; returns its sid and did cookies
    pub async fn sign_in_cookies(
        state: &AppState,
        role: &str,
    ) -> (Cookie<'static>, Cookie<'static>) {
        let mut browser = state.sessions.load(None, None).await;
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "مستخدم تجريبي",
            "role": role
        }))
        .unwrap();
        browser.sign_in(&state.config.auth_token_key, "test-token", &user);
        state.sessions.persist(&mut browser).await;

        (
            Cookie::new(SESSION_COOKIE, browser.session_id),
            Cookie::new(DEVICE_COOKIE, browser.device_id),
        )
    }
}
