// src/handlers/dashboard/agent.rs
// DOCUMENTATION: Agent dashboard

use crate::errors::PortalError;
use crate::handlers::dashboard::{
    count_query, list_own_appointments, list_own_submissions, notification_routes, total,
    unread_count,
};
use crate::handlers::session::DashboardSession;
use crate::services::{AppointmentService, SubmissionService};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;

/// GET /dashboard/agent
pub async fn overview(
    state: web::Data<AppState>,
    dash: DashboardSession,
) -> Result<HttpResponse, PortalError> {
    let api = dash.api(&state);
    let today = Utc::now().date_naive().to_string();
    let pending = count_query(&[("status", "pending")]);
    let upcoming = count_query(&[("scheduled_from", today.as_str())]);

    let (submissions, appointments, unread) = futures::join!(
        SubmissionService::list(&api, &pending),
        AppointmentService::list(&api, &upcoming),
        unread_count(&api),
    );

    let body = json!({
        "user": dash.user(),
        "stats": {
            "pending_submissions": total("submissions", submissions),
            "upcoming_appointments": total("appointments", appointments),
            "unread_notifications": unread,
        },
    });
    Ok(dash.finish(&state, HttpResponse::Ok().json(body)).await)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    let scope = web::scope("/agent")
        .route("", web::get().to(overview))
        .route("/submissions", web::get().to(list_own_submissions))
        .route("/appointments", web::get().to(list_own_appointments));
    cfg.service(notification_routes(scope));
}

#[cfg(test)]
mod tests {
    use crate::handlers::dashboard;
    use crate::handlers::test_support::{sign_in_cookies, state_for};
    use actix_web::{test, web, App};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[actix_web::test]
    async fn notifications_list_uses_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/notifications"))
            .and(query_param("status", "unread"))
            .and(query_param("sort_by", "created_at"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_records": 1,
                "current_page": 1,
                "per_page": 10,
                "records": [{"id": 3, "title": "طلب معاينة جديد"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let state = state_for(&server);
        let (sid, did) = sign_in_cookies(&state, "agent").await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(dashboard::config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/dashboard/agent/notifications?status=unread")
            .cookie(sid)
            .cookie(did)
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["rows"][0]["is_read"], false);
    }
}
