// src/handlers/properties.rs
// DOCUMENTATION: Public property pages and the favorites page
// PURPOSE: Listing grid with filters, map view, detail, favorites selection

use crate::errors::PortalError;
use crate::handlers::session::{current_href, Browser};
use crate::models::{PropertyCard, Role, SaveFavoritesRequest, SelectOption};
use crate::services::favorite_service::SaveReport;
use crate::services::{ApiClient, FavoriteService, MasterDataService, PropertyService};
use crate::state::AppState;
use crate::views::{profiles, to_api_query, ListParams};
use actix_web::{web, HttpRequest, HttpResponse};
use geojson::FeatureCollection;
use serde_json::json;
use std::collections::{BTreeSet, HashMap};

/// Favorite ids of a signed-in customer, empty for everyone else
async fn favorite_ids(browser: &Browser, api: &ApiClient) -> BTreeSet<i64> {
    if browser.role() != Some(Role::Customer) {
        return BTreeSet::new();
    }
    match FavoriteService::ids(api).await {
        Ok(ids) => ids.into_iter().collect(),
        Err(e) => {
            log::warn!("Could not load favorites for listing badges: {}", e);
            BTreeSet::new()
        }
    }
}

/// GET /properties
pub async fn list_properties(
    state: web::Data<AppState>,
    browser: Browser,
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, PortalError> {
    let params = ListParams::from(query.into_inner());
    let api = browser.api(&state);
    let api_query = to_api_query(&params, &profiles::PROPERTIES);

    let favorites = favorite_ids(&browser, &api).await;
    let list = state
        .in_flight
        .run(
            browser.fetch_key("properties"),
            PropertyService::list(&api, &api_query),
            &current_href(&req),
            |p| p.to_card(&state.images, favorites.contains(&p.id)),
        )
        .await;

    let cities: Vec<SelectOption> = match MasterDataService::cities(&api, &state.content).await {
        Ok(cities) => cities.iter().map(SelectOption::from).collect(),
        Err(e) => {
            log::warn!("City filter unavailable: {}", e);
            Vec::new()
        }
    };

    let areas: Vec<SelectOption> = match params.value("city_id").and_then(|v| v.parse().ok()) {
        Some(city_id) => MasterDataService::areas(&api, &state.content, city_id)
            .await
            .map(|areas| areas.iter().map(SelectOption::from).collect())
            .unwrap_or_default(),
        None => Vec::new(),
    };

    let body = json!({
        "list": list,
        "filters": { "cities": cities, "areas": areas },
    });
    Ok(browser.finish(&state, HttpResponse::Ok().json(body)).await)
}

/// GET /properties/map
/// Same filters as the grid, rendered as a GeoJSON FeatureCollection
pub async fn properties_map(
    state: web::Data<AppState>,
    browser: Browser,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, PortalError> {
    let params = ListParams::from(query.into_inner());
    let api = browser.api(&state);
    let api_query = to_api_query(&params, &profiles::PROPERTIES);

    let page = PropertyService::list(&api, &api_query).await?;
    let features: Vec<geojson::Feature> = page
        .records
        .iter()
        .filter_map(|p| p.to_feature(&state.images))
        .collect();

    log::debug!(
        "Map view: {} of {} properties have coordinates",
        features.len(),
        page.records.len()
    );

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    Ok(browser
        .finish(
            &state,
            HttpResponse::Ok()
                .content_type("application/geo+json")
                .json(collection),
        )
        .await)
}

/// GET /properties/{id}
pub async fn property_detail(
    state: web::Data<AppState>,
    browser: Browser,
    path: web::Path<i64>,
) -> Result<HttpResponse, PortalError> {
    let id = path.into_inner();
    let api = browser.api(&state);

    let property = PropertyService::get(&api, id).await?;
    let favorites = favorite_ids(&browser, &api).await;
    let detail = property.to_detail(&state.images, favorites.contains(&id));

    Ok(browser.finish(&state, HttpResponse::Ok().json(detail)).await)
}

/// Favorites page payload, shared with the customer dashboard
pub(crate) async fn favorites_payload(
    state: &AppState,
    api: &ApiClient,
) -> Result<serde_json::Value, PortalError> {
    let favorites = FavoriteService::list(api).await?;

    let cards: Vec<PropertyCard> = favorites
        .iter()
        .filter_map(|f| f.property.as_ref())
        .map(|p| p.to_card(&state.images, true))
        .collect();
    let ids: Vec<i64> = favorites.iter().map(|f| f.property_id).collect();

    Ok(json!({
        "properties": cards,
        "selected_ids": ids,
        "limit": state.config.favorite_limit,
    }))
}

/// Diff the stored favorites against `selection` and apply the difference
pub(crate) async fn save_selection(
    state: &AppState,
    api: &ApiClient,
    selection: &[i64],
) -> Result<SaveReport, PortalError> {
    let previous = FavoriteService::ids(api).await?;
    FavoriteService::save(api, &previous, selection, state.config.favorite_limit).await
}

/// GET /favorites
pub async fn favorites(
    state: web::Data<AppState>,
    browser: Browser,
) -> Result<HttpResponse, PortalError> {
    let body = favorites_payload(&state, &browser.api(&state)).await?;
    Ok(browser.finish(&state, HttpResponse::Ok().json(body)).await)
}

/// PUT /favorites
/// Body is the full new selection; only the difference is sent to the API
pub async fn save_favorites(
    state: web::Data<AppState>,
    browser: Browser,
    body: web::Json<SaveFavoritesRequest>,
) -> Result<HttpResponse, PortalError> {
    let report = save_selection(&state, &browser.api(&state), &body.property_ids).await?;
    Ok(browser.finish(&state, HttpResponse::Ok().json(report)).await)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/properties")
            .route("", web::get().to(list_properties))
            .route("/map", web::get().to(properties_map))
            .route("/{id}", web::get().to(property_detail)),
    )
    .service(
        web::resource("/favorites")
            .route(web::get().to(favorites))
            .route(web::put().to(save_favorites)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{sign_in_cookies, state_for};
    use actix_web::{test, App};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn property(id: i64, lat: Option<f64>) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("شقة {}", id),
            "price": 850000.0,
            "purpose": "sale",
            "latitude": lat,
            "longitude": lat.map(|_| 46.67),
            "cover_image": "properties/cover.jpg"
        })
    }

    #[actix_web::test]
    async fn map_skips_properties_without_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/properties"))
            .and(query_param("purpose", "rent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_records": 2,
                "current_page": 1,
                "per_page": 10,
                "records": [property(1, Some(24.71)), property(2, None)]
            })))
            .mount(&server)
            .await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for(&server)))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/properties/map?purpose=rent&status=all")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["type"], "FeatureCollection");
        assert_eq!(body["features"].as_array().unwrap().len(), 1);
        assert_eq!(body["features"][0]["id"], 1);
    }

    #[actix_web::test]
    async fn listing_failure_keeps_page_with_retry_link() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/properties"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"message": "الخادم مشغول"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/master-data/cities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "الرياض"}])))
            .mount(&server)
            .await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for(&server)))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/properties?page=2")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["list"]["rows"].as_array().unwrap().len(), 0);
        assert_eq!(body["list"]["error"], "الخادم مشغول");
        assert_eq!(body["list"]["retry_href"], "/properties?page=2");
        assert_eq!(body["filters"]["cities"][0]["label"], "الرياض");
    }

    #[actix_web::test]
    async fn saving_favorites_over_limit_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/favorites"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"records": []})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/favorites"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let state = state_for(&server);
        let (sid, did) = sign_in_cookies(&state, "customer").await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/favorites")
            .cookie(sid)
            .cookie(did)
            .set_json(json!({"property_ids": [1, 2, 3, 4, 5, 6]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNPROCESSABLE_ENTITY);
    }
}
