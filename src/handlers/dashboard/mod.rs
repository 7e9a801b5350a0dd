// src/handlers/dashboard/mod.rs
// DOCUMENTATION: Role dashboards under /dashboard/{role}
// PURPOSE: Guarded routes; pages shared by several roles live here

pub mod admin;
pub mod agent;
pub mod customer;
pub mod marketer;

use crate::errors::PortalError;
use crate::handlers::session::{current_href, DashboardSession};
use crate::models::Page;
use crate::services::{ApiClient, ApiQuery, AppointmentService, NotificationService, SubmissionService};
use crate::state::AppState;
use crate::views::{profiles, to_api_query, ListParams};
use actix_web::{web, HttpRequest, HttpResponse};
use std::collections::HashMap;

type Filters = web::Query<HashMap<String, String>>;

/// Total of a list endpoint, None (logged) when the request failed
pub(crate) fn total<T>(label: &str, result: Result<Page<T>, PortalError>) -> Option<i64> {
    match result {
        Ok(page) => Some(page.total_records),
        Err(e) => {
            log::warn!("Dashboard counter {} unavailable: {}", label, e);
            None
        }
    }
}

/// Query asking only for the total of a filtered list
pub(crate) fn count_query(filters: &[(&str, &str)]) -> ApiQuery {
    filters
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .chain(std::iter::once(("per_page".to_string(), "1".to_string())))
        .collect()
}

/// Unread notifications of the signed-in user
pub(crate) async fn unread_count(api: &ApiClient) -> Option<i64> {
    total(
        "unread notifications",
        NotificationService::list(api, &count_query(&[("status", "unread")])).await,
    )
}

/// GET {dashboard}/notifications
pub async fn list_notifications(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: HttpRequest,
    filters: Filters,
) -> Result<HttpResponse, PortalError> {
    let api = dash.api(&state);
    let query = to_api_query(
        &ListParams::from(filters.into_inner()),
        &profiles::NOTIFICATIONS,
    );
    log::debug!("Loading notifications for the {} dashboard", dash.role.as_str());

    let list = state
        .in_flight
        .run(
            dash.fetch_key("notifications"),
            NotificationService::list(&api, &query),
            &current_href(&req),
            |n| n.to_row(),
        )
        .await;
    Ok(dash.finish(&state, HttpResponse::Ok().json(list)).await)
}

/// PATCH {dashboard}/notifications/{id}/read
pub async fn mark_notification_read(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, PortalError> {
    NotificationService::mark_read(&dash.api(&state), path.into_inner()).await?;
    Ok(dash.finish(&state, HttpResponse::NoContent().finish()).await)
}

/// PATCH {dashboard}/notifications/read-all
pub async fn mark_all_notifications_read(
    state: web::Data<AppState>,
    dash: DashboardSession,
) -> Result<HttpResponse, PortalError> {
    NotificationService::mark_all_read(&dash.api(&state)).await?;
    Ok(dash.finish(&state, HttpResponse::NoContent().finish()).await)
}

/// GET {dashboard}/submissions
/// The API scopes the list to the token's owner
pub async fn list_own_submissions(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: HttpRequest,
    filters: Filters,
) -> Result<HttpResponse, PortalError> {
    let api = dash.api(&state);
    let query = to_api_query(
        &ListParams::from(filters.into_inner()),
        &profiles::SUBMISSIONS,
    );
    log::debug!("Loading submissions for the {} dashboard", dash.role.as_str());

    let list = state
        .in_flight
        .run(
            dash.fetch_key("submissions"),
            SubmissionService::list(&api, &query),
            &current_href(&req),
            |s| s.to_row(),
        )
        .await;
    Ok(dash.finish(&state, HttpResponse::Ok().json(list)).await)
}

/// GET {dashboard}/appointments
pub async fn list_own_appointments(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: HttpRequest,
    filters: Filters,
) -> Result<HttpResponse, PortalError> {
    let api = dash.api(&state);
    let query = to_api_query(
        &ListParams::from(filters.into_inner()),
        &profiles::APPOINTMENTS,
    );
    log::debug!("Loading appointments for the {} dashboard", dash.role.as_str());

    let list = state
        .in_flight
        .run(
            dash.fetch_key("appointments"),
            AppointmentService::list(&api, &query),
            &current_href(&req),
            |a| a.to_row(),
        )
        .await;
    Ok(dash.finish(&state, HttpResponse::Ok().json(list)).await)
}

/// Notification routes, mounted inside a role scope
pub(crate) fn notification_routes(scope: actix_web::Scope) -> actix_web::Scope {
    scope
        .route("/notifications", web::get().to(list_notifications))
        .route(
            "/notifications/read-all",
            web::patch().to(mark_all_notifications_read),
        )
        .route(
            "/notifications/{id}/read",
            web::patch().to(mark_notification_read),
        )
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/dashboard")
            .configure(admin::config)
            .configure(agent::config)
            .configure(marketer::config)
            .configure(customer::config),
    );
}
