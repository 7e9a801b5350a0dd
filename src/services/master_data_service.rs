// src/services/master_data_service.rs

use crate::errors::PortalError;
use crate::models::{Area, City, Page};
use crate::services::content_cache::ContentCache;
use crate::services::ApiClient;
use serde::de::DeserializeOwned;

/// Cities and areas used by filters and forms (cached)
pub struct MasterDataService;

impl MasterDataService {
    pub async fn cities(api: &ApiClient, cache: &ContentCache) -> Result<Vec<City>, PortalError> {
        cache
            .get_or_fetch("master:cities", || {
                fetch_all(api, "/master-data/cities", Vec::new())
            })
            .await
    }

    pub async fn areas(
        api: &ApiClient,
        cache: &ContentCache,
        city_id: i64,
    ) -> Result<Vec<Area>, PortalError> {
        cache
            .get_or_fetch(&format!("master:areas:{}", city_id), || {
                fetch_all(
                    api,
                    "/master-data/areas",
                    vec![("city_id".to_string(), city_id.to_string())],
                )
            })
            .await
    }
}

/// Master data endpoints answer either a page or a plain array
async fn fetch_all<T: DeserializeOwned>(
    api: &ApiClient,
    path: &str,
    mut query: Vec<(String, String)>,
) -> Result<Vec<T>, PortalError> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Listing<T> {
        Wrapped { data: Vec<T> },
        Paged(Page<T>),
        Plain(Vec<T>),
    }

    query.push(("per_page".to_string(), "500".to_string()));
    let listing: Listing<T> = api.get(path, &query).await?;
    Ok(match listing {
        Listing::Paged(page) => page.records,
        Listing::Wrapped { data } => data,
        Listing::Plain(items) => items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn accepts_plain_arrays_and_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/master-data/cities"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "الرياض"}])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/master-data/areas"))
            .and(query_param("city_id", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_records": 1, "current_page": 1, "per_page": 500,
                "records": [{"id": 9, "name": "الملقا", "city_id": 1}]
            })))
            .mount(&server)
            .await;

        let api = ApiClient::new(Client::new(), server.uri());
        let cache = ContentCache::new(60);

        let cities = MasterDataService::cities(&api, &cache).await.unwrap();
        assert_eq!(cities[0].name, "الرياض");

        let areas = MasterDataService::areas(&api, &cache, 1).await.unwrap();
        assert_eq!(areas[0].city_id, Some(1));
    }
}
