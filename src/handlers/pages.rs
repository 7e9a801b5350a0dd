// src/handlers/pages.rs
// DOCUMENTATION: Public marketing pages
// PURPOSE: Home, about, privacy and contact payloads built from CMS content

use crate::errors::PortalError;
use crate::handlers::session::Browser;
use crate::models::{visible_faq, PropertyCard};
use crate::services::{PropertyService, SettingsService};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use serde_json::json;

/// Cards shown in the home page "featured" strip
const FEATURED_COUNT: usize = 6;

/// GET /
pub async fn home(
    state: web::Data<AppState>,
    browser: Browser,
) -> Result<HttpResponse, PortalError> {
    let api = browser.api(&state);

    let (site, footer, featured) = futures::try_join!(
        SettingsService::site(&api, &state.content),
        SettingsService::footer(&api, &state.content),
        PropertyService::featured(&api, FEATURED_COUNT),
    )?;

    let featured: Vec<PropertyCard> = featured
        .iter()
        .map(|p| p.to_card(&state.images, false))
        .collect();

    let body = json!({
        "site": site,
        "hero_image_url": state.images.resolve(site.hero_image.as_deref()),
        "logo_url": state.images.resolve(site.logo.as_deref()),
        "footer": footer,
        "featured": featured,
    });
    Ok(browser.finish(&state, HttpResponse::Ok().json(body)).await)
}

/// GET /about
pub async fn about(
    state: web::Data<AppState>,
    browser: Browser,
) -> Result<HttpResponse, PortalError> {
    let api = browser.api(&state);
    let site = SettingsService::site(&api, &state.content).await?;

    let body = json!({
        "title": site.about_title,
        "content": site.about_content,
        "image_url": state.images.resolve(site.about_image.as_deref()),
    });
    Ok(browser.finish(&state, HttpResponse::Ok().json(body)).await)
}

/// GET /privacy
pub async fn privacy(
    state: web::Data<AppState>,
    browser: Browser,
) -> Result<HttpResponse, PortalError> {
    let api = browser.api(&state);
    let site = SettingsService::site(&api, &state.content).await?;

    let body = json!({
        "site_name": site.site_name,
        "content": site.privacy_content,
    });
    Ok(browser.finish(&state, HttpResponse::Ok().json(body)).await)
}

/// GET /contact
/// Footer contact details plus the active FAQ entries
pub async fn contact(
    state: web::Data<AppState>,
    browser: Browser,
) -> Result<HttpResponse, PortalError> {
    let api = browser.api(&state);
    let (footer, faq) = futures::try_join!(
        SettingsService::footer(&api, &state.content),
        SettingsService::faq(&api, &state.content),
    )?;

    let body = json!({
        "contact": footer,
        "faq": visible_faq(faq),
    });
    Ok(browser.finish(&state, HttpResponse::Ok().json(body)).await)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/about", web::get().to(about))
        .route("/privacy", web::get().to(privacy))
        .route("/contact", web::get().to(contact));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::state_for;
    use actix_web::{test, App};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[actix_web::test]
    async fn contact_shows_active_faq_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cms/settings/footer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"phone": "0112223333", "email": "info@example.com"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cms/faq"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_records": 3,
                "current_page": 1,
                "per_page": 100,
                "records": [
                    {"id": 1, "question": "كيف أحجز معاينة؟", "answer": "من صفحة العقار", "sort_order": 2},
                    {"id": 2, "question": "هل الخدمة مجانية؟", "answer": "نعم", "sort_order": 1},
                    {"id": 3, "question": "سؤال مخفي", "answer": "-", "is_active": false}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for(&server)))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/contact").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert!(resp
            .response()
            .cookies()
            .any(|c| c.name() == crate::handlers::session::SESSION_COOKIE));

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["contact"]["phone"], "0112223333");
        let ids: Vec<i64> = body["faq"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![2, 1]);

        // FAQ is cached; the mock's expect(1) fails the test if it is fetched twice
        let req = test::TestRequest::get().uri("/contact").to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
    }
}
