// src/services/auth_service.rs
// DOCUMENTATION: Authentication against the remote API
// PURPOSE: Sign-in, sign-up, current user and sign-out

use crate::errors::PortalError;
use crate::models::{AuthResponse, SignInRequest, SignUpRequest, User};
use crate::services::ApiClient;

pub struct AuthService;

impl AuthService {
    pub async fn sign_in(api: &ApiClient, req: &SignInRequest) -> Result<AuthResponse, PortalError> {
        let auth: AuthResponse = api.post("/auth/login", req).await?;
        log::info!("User {} signed in", auth.user.id);
        Ok(auth)
    }

    pub async fn sign_up(api: &ApiClient, req: &SignUpRequest) -> Result<AuthResponse, PortalError> {
        let auth: AuthResponse = api.post("/auth/register", req).await?;
        log::info!("User {} registered", auth.user.id);
        Ok(auth)
    }

    pub async fn me(api: &ApiClient) -> Result<User, PortalError> {
        api.get_one("/auth/me").await
    }

    /// Invalidate the token server-side; failures are only logged
    pub async fn sign_out(api: &ApiClient) {
        if !api.has_token() {
            return;
        }
        if let Err(e) = api.post_action("/auth/logout", &serde_json::json!({})).await {
            log::warn!("Remote logout failed: {}", e);
        }
    }
}
