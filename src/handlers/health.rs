// src/handlers/health.rs
// DOCUMENTATION: Health check handler
// PURPOSE: Liveness plus session, content cache and in-flight load occupancy

use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let sessions = state.sessions.sessions().stats().await;
    let content = state.content.store().stats().await;

    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "brokerage-portal",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": sessions,
        "content_cache": content,
        "in_flight_loads": state.in_flight.len(),
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::state_for;
    use actix_web::{test, App};
    use wiremock::MockServer;

    #[actix_web::test]
    async fn reports_ok() {
        let server = MockServer::start().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for(&server)))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["sessions"]["total_entries"], 0);
        assert_eq!(body["in_flight_loads"], 0);
    }
}
