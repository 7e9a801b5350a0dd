// src/handlers/auth.rs
// DOCUMENTATION: Sign-in, sign-up, sign-out and current user
// PURPOSE: Exchange credentials for a token and keep it in the session record

use crate::errors::PortalError;
use crate::handlers::session::Browser;
use crate::models::{AuthResponse, SignInRequest, SignUpRequest, User};
use crate::services::AuthService;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use serde::Serialize;
use validator::Validate;

#[derive(Debug, Serialize)]
pub struct SignedIn {
    pub user: User,
    /// Dashboard of the user's role, home for unknown roles
    pub redirect: &'static str,
}

async fn remember(state: &AppState, browser: &mut Browser, auth: AuthResponse) -> SignedIn {
    state.sessions.rotate(&mut browser.0).await;
    browser.sign_in(&state.config.auth_token_key, &auth.token, &auth.user);
    let redirect = auth
        .user
        .role()
        .map(|role| role.dashboard_prefix())
        .unwrap_or("/");
    SignedIn {
        user: auth.user,
        redirect,
    }
}

/// POST /auth/sign-in
pub async fn sign_in(
    state: web::Data<AppState>,
    mut browser: Browser,
    req: web::Json<SignInRequest>,
) -> Result<HttpResponse, PortalError> {
    req.validate()?;

    let auth = AuthService::sign_in(&state.api, &req).await?;
    let body = remember(&state, &mut browser, auth).await;

    Ok(browser.finish(&state, HttpResponse::Ok().json(body)).await)
}

/// POST /auth/sign-up
pub async fn sign_up(
    state: web::Data<AppState>,
    mut browser: Browser,
    req: web::Json<SignUpRequest>,
) -> Result<HttpResponse, PortalError> {
    req.validate()?;

    let auth = AuthService::sign_up(&state.api, &req).await?;
    let body = remember(&state, &mut browser, auth).await;

    Ok(browser.finish(&state, HttpResponse::Created().json(body)).await)
}

/// POST /auth/sign-out
/// The local session is cleared even when the API call fails
pub async fn sign_out(
    state: web::Data<AppState>,
    mut browser: Browser,
) -> Result<HttpResponse, PortalError> {
    let api = browser.api(&state);
    if api.has_token() {
        AuthService::sign_out(&api).await;
    }
    browser.sign_out(&state.config.auth_token_key);

    Ok(browser.finish(&state, HttpResponse::NoContent().finish()).await)
}

/// GET /auth/me
pub async fn me(
    state: web::Data<AppState>,
    mut browser: Browser,
) -> Result<HttpResponse, PortalError> {
    let token = browser
        .token(&state.config.auth_token_key)
        .ok_or(PortalError::Unauthorized)?;

    let user = AuthService::me(&browser.api(&state)).await?;
    browser.sign_in(&state.config.auth_token_key, &token, &user);

    Ok(browser.finish(&state, HttpResponse::Ok().json(user)).await)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/sign-in", web::post().to(sign_in))
            .route("/sign-up", web::post().to(sign_up))
            .route("/sign-out", web::post().to(sign_out))
            .route("/me", web::get().to(me)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::session::{DEVICE_COOKIE, SESSION_COOKIE};
    use crate::handlers::test_support::state_for;
    use crate::models::Role;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[actix_web::test]
    async fn sign_in_stores_token_and_role() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({"login": "agent@example.com", "password": "secret12"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok-1",
                "user": {"id": 8, "name": "خالد", "role": "agent"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"id": 8, "name": "خالد", "role": "agent"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let state = state_for(&server);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/sign-in")
            .set_json(json!({"login": "agent@example.com", "password": "secret12"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookies: Vec<_> = resp
            .response()
            .cookies()
            .map(|c| c.into_owned())
            .collect();
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["redirect"], "/dashboard/agent");

        let sid = cookies.iter().find(|c| c.name() == SESSION_COOKIE).unwrap();
        let session = state.sessions.sessions().get(sid.value()).await.unwrap();
        assert_eq!(session.get("auth_token"), Some("tok-1"));
        assert_eq!(session.get("role"), Some(Role::Agent.as_str()));

        let mut req = test::TestRequest::get().uri("/auth/me");
        for cookie in cookies {
            req = req.cookie(cookie);
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn sign_in_issues_a_new_session_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "tok-2",
                "user": {"id": 9, "name": "ريم", "role": "customer"}
            })))
            .mount(&server)
            .await;

        let state = state_for(&server);
        let mut anonymous = state.sessions.load(None, None).await;
        state.sessions.persist(&mut anonymous).await;
        let planted = anonymous.session_id.clone();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/sign-in")
            .cookie(actix_web::cookie::Cookie::new(SESSION_COOKIE, planted.clone()))
            .cookie(actix_web::cookie::Cookie::new(
                DEVICE_COOKIE,
                anonymous.device_id.clone(),
            ))
            .set_json(json!({"login": "reem@example.com", "password": "secret12"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let sid = resp
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .unwrap();
        assert_ne!(sid, planted);
        assert!(state.sessions.sessions().get(&planted).await.is_none());
        let session = state.sessions.sessions().get(&sid).await.unwrap();
        assert_eq!(session.get("auth_token"), Some("tok-2"));
    }

    #[actix_web::test]
    async fn me_without_token_is_unauthorized() {
        let server = MockServer::start().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for(&server)))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/auth/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
