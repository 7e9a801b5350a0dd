// src/services/client_service.rs

use crate::errors::PortalError;
use crate::models::{Page, StatusUpdateRequest, UpdateClientRequest, User};
use crate::services::{ApiClient, ApiQuery};

/// Customers (clients) administration on /clients
pub struct ClientService;

impl ClientService {
    pub async fn list(api: &ApiClient, query: &ApiQuery) -> Result<Page<User>, PortalError> {
        api.get_page("/clients", query).await
    }

    pub async fn get(api: &ApiClient, id: i64) -> Result<User, PortalError> {
        api.get_one(&format!("/clients/{}", id)).await
    }

    pub async fn update(
        api: &ApiClient,
        id: i64,
        req: &UpdateClientRequest,
    ) -> Result<User, PortalError> {
        api.patch(&format!("/clients/{}", id), req).await
    }

    pub async fn set_status(api: &ApiClient, id: i64, status: &str) -> Result<User, PortalError> {
        if !matches!(status, "active" | "inactive" | "blocked") {
            return Err(PortalError::InvalidInput(format!(
                "Unknown client status: {}",
                status
            )));
        }
        log::info!("Client {} status -> {}", id, status);
        api.patch(
            &format!("/clients/{}/status", id),
            &StatusUpdateRequest {
                status: status.to_string(),
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn update_sends_only_provided_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/clients/7"))
            .and(body_json(json!({"phone": "0559876543"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"id": 7, "name": "خالد", "phone": "0559876543"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(Client::new(), server.uri());
        let req = UpdateClientRequest {
            name: None,
            email: None,
            phone: Some("0559876543".to_string()),
        };
        let client = ClientService::update(&api, 7, &req).await.unwrap();
        assert_eq!(client.phone.as_deref(), Some("0559876543"));
    }

    #[tokio::test]
    async fn unknown_status_is_refused_locally() {
        let server = MockServer::start().await;
        let api = ApiClient::new(Client::new(), server.uri());
        let err = ClientService::set_status(&api, 7, "archived").await.unwrap_err();
        assert!(matches!(err, PortalError::InvalidInput(_)));
    }
}
