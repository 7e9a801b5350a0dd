// src/handlers/forms.rs
// DOCUMENTATION: Public form submissions
// PURPOSE: Viewing appointments and "list your property" requests

use crate::errors::PortalError;
use crate::handlers::session::Browser;
use crate::models::{BookAppointmentRequest, CreateSubmissionRequest};
use crate::services::{AppointmentService, SubmissionService};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use validator::Validate;

/// POST /appointments
pub async fn book_appointment(
    state: web::Data<AppState>,
    browser: Browser,
    req: web::Json<BookAppointmentRequest>,
) -> Result<HttpResponse, PortalError> {
    req.validate()?;

    let api = browser.api(&state);
    let today = Utc::now().date_naive();
    let appointment = AppointmentService::book(&api, &req, today).await?;

    let body = json!({
        "message": "تم استلام طلب المعاينة، سنتواصل معك قريباً",
        "appointment": appointment.to_row(),
    });
    Ok(browser.finish(&state, HttpResponse::Created().json(body)).await)
}

/// POST /listing-requests
pub async fn submit_listing(
    state: web::Data<AppState>,
    browser: Browser,
    req: web::Json<CreateSubmissionRequest>,
) -> Result<HttpResponse, PortalError> {
    req.validate()?;

    let api = browser.api(&state);
    let submission = SubmissionService::create(&api, &req).await?;

    let body = json!({
        "message": "تم إرسال طلب عرض العقار للمراجعة",
        "submission": submission.to_row(),
    });
    Ok(browser.finish(&state, HttpResponse::Created().json(body)).await)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/appointments", web::post().to(book_appointment))
        .route("/listing-requests", web::post().to(submit_listing));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::state_for;
    use actix_web::{http::StatusCode, test, App};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[actix_web::test]
    async fn past_appointment_is_refused_without_calling_api() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/appointments"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for(&server)))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/appointments")
            .set_json(json!({
                "property_id": 3,
                "name": "سارة",
                "phone": "0551234567",
                "scheduled_date": "2020-01-01",
                "scheduled_time": "10:00:00"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn invalid_listing_form_is_rejected() {
        let server = MockServer::start().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for(&server)))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/listing-requests")
            .set_json(json!({
                "owner_name": "س",
                "owner_phone": "05",
                "property_type": "villa",
                "purpose": "sale",
                "city_id": 1
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
