// src/handlers/dashboard/marketer.rs
// DOCUMENTATION: Marketer dashboard
// PURPOSE: Referral link, own traffic numbers, campaigns and short links

use crate::errors::PortalError;
use crate::handlers::session::{current_href, DashboardSession};
use crate::models::conversion_rate;
use crate::services::partner_service::referral_link;
use crate::services::{ApiQuery, CampaignService, PartnerService, ShortLinkService};
use crate::state::AppState;
use crate::views::{profiles, to_api_query, ListParams};
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use std::collections::HashMap;

/// GET /dashboard/marketer
pub async fn overview(
    state: web::Data<AppState>,
    dash: DashboardSession,
) -> Result<HttpResponse, PortalError> {
    let api = dash.api(&state);
    let profile = PartnerService::my_profile(&api).await?;

    let link = profile
        .referral_code
        .as_deref()
        .filter(|code| !code.is_empty())
        .and_then(|code| referral_link(&state.config.site_url, code));

    let stats = match PartnerService::partner_stats(&api, profile.id, &ApiQuery::new()).await {
        Ok(stats) => Some(stats),
        Err(e) => {
            log::warn!("Traffic stats unavailable for marketer {}: {}", profile.id, e);
            None
        }
    };
    let rate = stats
        .as_ref()
        .map(|s| conversion_rate(s.conversions, s.unique_visitors));

    let body = json!({
        "profile": profile.to_row(),
        "referral_link": link,
        "stats": stats,
        "conversion_rate": rate,
    });
    Ok(dash.finish(&state, HttpResponse::Ok().json(body)).await)
}

pub async fn list_campaigns(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: HttpRequest,
    filters: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, PortalError> {
    let api = dash.api(&state);
    let query = to_api_query(&ListParams::from(filters.into_inner()), &profiles::CAMPAIGNS);

    let list = state
        .in_flight
        .run(
            dash.fetch_key("campaigns"),
            CampaignService::list(&api, &query),
            &current_href(&req),
            |c| c.to_row(),
        )
        .await;
    Ok(dash.finish(&state, HttpResponse::Ok().json(list)).await)
}

pub async fn list_short_links(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: HttpRequest,
    filters: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, PortalError> {
    let api = dash.api(&state);
    let query = to_api_query(
        &ListParams::from(filters.into_inner()),
        &profiles::SHORT_LINKS,
    );
    let base = &state.config.short_link_base_url;

    let list = state
        .in_flight
        .run(
            dash.fetch_key("short_links"),
            ShortLinkService::list(&api, &query),
            &current_href(&req),
            |s| s.to_row(base),
        )
        .await;
    Ok(dash.finish(&state, HttpResponse::Ok().json(list)).await)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/marketer")
            .route("", web::get().to(overview))
            .route("/campaigns", web::get().to(list_campaigns))
            .route("/short-links", web::get().to(list_short_links)),
    );
}

#[cfg(test)]
mod tests {
    use crate::handlers::dashboard;
    use crate::handlers::test_support::{sign_in_cookies, state_for};
    use actix_web::{test, web, App};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[actix_web::test]
    async fn overview_builds_referral_link() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/marketers/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"id": 12, "name": "نورة", "referral_code": "NOURA10", "status": "active"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/traffic/partners/12/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"total_visits": 40, "unique_visitors": 20, "conversions": 3}
            })))
            .mount(&server)
            .await;

        let state = state_for(&server);
        let (sid, did) = sign_in_cookies(&state, "marketer").await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(dashboard::config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/dashboard/marketer")
            .cookie(sid)
            .cookie(did)
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["referral_link"], "http://localhost:3000/?ref=NOURA10");
        assert_eq!(body["conversion_rate"], "15.0%");
        assert_eq!(body["stats"]["total_visits"], 40);
    }
}
