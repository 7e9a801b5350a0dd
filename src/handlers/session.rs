// src/handlers/session.rs
// DOCUMENTATION: Request extractors for browser state and guarded dashboards
// PURPOSE: Load session/device records from cookies, write them back with the response

use crate::errors::PortalError;
use crate::models::Role;
use crate::services::role_guard::{self, GuardDecision};
use crate::services::session::ROLE_KEY;
use crate::services::{ApiClient, BrowserState};
use crate::state::AppState;
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse};
use futures::future::LocalBoxFuture;
use std::ops::{Deref, DerefMut};

/// Per-tab session cookie
pub const SESSION_COOKIE: &str = "sid";
/// Long-lived device cookie
pub const DEVICE_COOKIE: &str = "did";

/// Browser state of the current request
pub struct Browser(pub BrowserState);

impl Deref for Browser {
    type Target = BrowserState;

    fn deref(&self) -> &BrowserState {
        &self.0
    }
}

impl DerefMut for Browser {
    fn deref_mut(&mut self) -> &mut BrowserState {
        &mut self.0
    }
}

impl Browser {
    /// API client authenticated with this browser's token
    pub fn api(&self, state: &AppState) -> ApiClient {
        state
            .api
            .with_token(self.0.token(&state.config.auth_token_key))
    }

    /// In-flight registry key for a list resource
    pub fn fetch_key(&self, resource: &str) -> String {
        format!("{}:{}", self.0.session_id, resource)
    }

    /// Persist changed records and (re)issue cookies on the response
    pub async fn finish(mut self, state: &AppState, mut response: HttpResponse) -> HttpResponse {
        state.sessions.persist(&mut self.0).await;

        if self.0.is_new {
            let secure = state.config.is_production();
            let cookies = [
                build_cookie(
                    SESSION_COOKIE,
                    &self.0.session_id,
                    state.config.session_ttl_seconds,
                    secure,
                ),
                build_cookie(
                    DEVICE_COOKIE,
                    &self.0.device_id,
                    state.config.device_ttl_seconds,
                    secure,
                ),
            ];
            for cookie in cookies {
                if let Err(e) = response.add_cookie(&cookie) {
                    log::error!("Failed to set cookie {}: {}", cookie.name(), e);
                }
            }
        }
        response
    }
}

fn build_cookie(
    name: &'static str,
    value: &str,
    ttl_seconds: u64,
    secure: bool,
) -> Cookie<'static> {
    let max_age = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);
    Cookie::build(name, value.to_string())
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(max_age))
        .finish()
}

fn app_state(req: &HttpRequest) -> Result<web::Data<AppState>, PortalError> {
    req.app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| PortalError::ExternalApiError("Application state not configured".to_string()))
}

fn cookie_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.cookie(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

impl FromRequest for Browser {
    type Error = PortalError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = app_state(req);
        let session_id = cookie_value(req, SESSION_COOKIE);
        let device_id = cookie_value(req, DEVICE_COOKIE);

        Box::pin(async move {
            let state = state?;
            let browser = state
                .sessions
                .load(session_id.as_deref(), device_id.as_deref())
                .await;
            Ok(Browser(browser))
        })
    }
}

/// Browser allowed onto the dashboard it requested
/// DOCUMENTATION: Extraction fails with `PortalError::Redirect` (302) when the
/// stored role is missing or belongs to another dashboard.
pub struct DashboardSession {
    pub browser: Browser,
    pub role: Role,
}

impl Deref for DashboardSession {
    type Target = Browser;

    fn deref(&self) -> &Browser {
        &self.browser
    }
}

impl DerefMut for DashboardSession {
    fn deref_mut(&mut self) -> &mut Browser {
        &mut self.browser
    }
}

impl DashboardSession {
    pub async fn finish(self, state: &AppState, response: HttpResponse) -> HttpResponse {
        self.browser.finish(state, response).await
    }
}

impl FromRequest for DashboardSession {
    type Error = PortalError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let browser = Browser::from_request(req, payload);
        let path = req.path().to_string();

        Box::pin(async move {
            let browser = browser.await?;
            match role_guard::resolve(browser.session.get(ROLE_KEY), &path) {
                GuardDecision::Allow(role) => Ok(DashboardSession { browser, role }),
                GuardDecision::Redirect(target) => Err(PortalError::Redirect(target)),
            }
        })
    }
}

/// Path and query of the current request, used as the retry link
pub fn current_href(req: &HttpRequest) -> String {
    req.uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_is_secure_only_when_asked() {
        let cookie = build_cookie(SESSION_COOKIE, "abc", 3600, true);
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(CookieDuration::seconds(3600)));

        let plain = build_cookie(SESSION_COOKIE, "abc", 3600, false);
        assert_ne!(plain.secure(), Some(true));
    }

    #[test]
    fn huge_ttl_does_not_wrap_negative() {
        let cookie = build_cookie(DEVICE_COOKIE, "d", u64::MAX, false);
        let max_age = cookie.max_age().unwrap();
        assert!(max_age.is_positive());
    }
}
