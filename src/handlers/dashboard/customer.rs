// src/handlers/dashboard/customer.rs
// DOCUMENTATION: Customer dashboard
// PURPOSE: Favorites, own listing requests, appointments and notifications

use crate::errors::PortalError;
use crate::handlers::dashboard::{
    count_query, list_own_appointments, list_own_submissions, notification_routes, total,
    unread_count,
};
use crate::handlers::properties::{favorites_payload, save_selection};
use crate::handlers::session::DashboardSession;
use crate::models::SaveFavoritesRequest;
use crate::services::{AppointmentService, FavoriteService};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;

/// GET /dashboard/customer
pub async fn overview(
    state: web::Data<AppState>,
    dash: DashboardSession,
) -> Result<HttpResponse, PortalError> {
    let api = dash.api(&state);
    let today = Utc::now().date_naive().to_string();
    let upcoming = count_query(&[("scheduled_from", today.as_str())]);

    let (favorites, appointments, unread) = futures::join!(
        FavoriteService::ids(&api),
        AppointmentService::list(&api, &upcoming),
        unread_count(&api),
    );

    let favorites = match favorites {
        Ok(ids) => Some(ids.len()),
        Err(e) => {
            log::warn!("Favorites counter unavailable: {}", e);
            None
        }
    };

    let body = json!({
        "user": dash.user(),
        "stats": {
            "favorites": favorites,
            "favorite_limit": state.config.favorite_limit,
            "upcoming_appointments": total("appointments", appointments),
            "unread_notifications": unread,
        },
    });
    Ok(dash.finish(&state, HttpResponse::Ok().json(body)).await)
}

pub async fn favorites(
    state: web::Data<AppState>,
    dash: DashboardSession,
) -> Result<HttpResponse, PortalError> {
    let body = favorites_payload(&state, &dash.api(&state)).await?;
    Ok(dash.finish(&state, HttpResponse::Ok().json(body)).await)
}

pub async fn save_favorites(
    state: web::Data<AppState>,
    dash: DashboardSession,
    body: web::Json<SaveFavoritesRequest>,
) -> Result<HttpResponse, PortalError> {
    let report = save_selection(&state, &dash.api(&state), &body.property_ids).await?;
    Ok(dash.finish(&state, HttpResponse::Ok().json(report)).await)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    let scope = web::scope("/customer")
        .route("", web::get().to(overview))
        .route("/favorites", web::get().to(favorites))
        .route("/favorites", web::put().to(save_favorites))
        .route("/submissions", web::get().to(list_own_submissions))
        .route("/appointments", web::get().to(list_own_appointments));
    cfg.service(notification_routes(scope));
}
