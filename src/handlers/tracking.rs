// src/handlers/tracking.rs
// DOCUMENTATION: Tracking capture endpoint
// PURPOSE: Called once per page load with the URL the visitor landed on

use crate::errors::PortalError;
use crate::handlers::session::Browser;
use crate::services::BrowserState;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CaptureRequest {
    /// Current page URL, absolute or path-only
    pub url: String,
    pub referrer: Option<String>,
}

/// POST /tracking/capture
/// Answers with the visitor id and the URL to replace the address bar with
pub async fn capture(
    state: web::Data<AppState>,
    mut browser: Browser,
    req: web::Json<CaptureRequest>,
) -> Result<HttpResponse, PortalError> {
    let api = browser.api(&state);
    let req = req.into_inner();

    let BrowserState { session, local, .. } = &mut browser.0;
    let outcome = state
        .tracking
        .capture(&api, &req.url, req.referrer.as_deref(), session, local)
        .await?;

    Ok(browser.finish(&state, HttpResponse::Ok().json(outcome)).await)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/tracking/capture", web::post().to(capture));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::session::{DEVICE_COOKIE, SESSION_COOKIE};
    use crate::handlers::test_support::state_for;
    use crate::services::session::VISITOR_ID_KEY;
    use actix_web::{test, App};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[actix_web::test]
    async fn visitor_id_survives_into_device_store() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/traffic/visits"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"visitor_id": "v-9"})))
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
            .uri("/tracking/capture")
            .set_json(json!({"url": "/?utm_campaign=eid&lang=ar"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let did = resp
            .response()
            .cookies()
            .find(|c| c.name() == DEVICE_COOKIE)
            .map(|c| c.value().to_string())
            .unwrap();
        assert!(resp
            .response()
            .cookies()
            .any(|c| c.name() == SESSION_COOKIE));

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["clean_url"], "/?lang=ar");
        assert_eq!(body["tracked"], true);

        let device = state.sessions.devices().get(&did).await.unwrap();
        assert_eq!(device.get(VISITOR_ID_KEY), Some("v-9"));
    }
}
