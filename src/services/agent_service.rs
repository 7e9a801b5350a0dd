// src/services/agent_service.rs
// DOCUMENTATION: Agents administration
// PURPOSE: CRUD plus KYC and status actions on /agents

use crate::errors::PortalError;
use crate::models::{
    Agent, CreateAgentRequest, KycUpdateRequest, Page, StatusUpdateRequest, UpdateAgentRequest,
};
use crate::services::{ApiClient, ApiQuery};

pub struct AgentService;

impl AgentService {
    pub async fn list(api: &ApiClient, query: &ApiQuery) -> Result<Page<Agent>, PortalError> {
        api.get_page("/agents", query).await
    }

    pub async fn get(api: &ApiClient, id: i64) -> Result<Agent, PortalError> {
        api.get_one(&format!("/agents/{}", id)).await
    }

    pub async fn create(api: &ApiClient, req: &CreateAgentRequest) -> Result<Agent, PortalError> {
        let agent: Agent = api.post("/agents", req).await?;
        log::info!("Agent {} created", agent.id);
        Ok(agent)
    }

    pub async fn update(
        api: &ApiClient,
        id: i64,
        req: &UpdateAgentRequest,
    ) -> Result<Agent, PortalError> {
        api.patch(&format!("/agents/{}", id), req).await
    }

    pub async fn delete(api: &ApiClient, id: i64) -> Result<(), PortalError> {
        api.delete(&format!("/agents/{}", id)).await?;
        log::info!("Agent {} deleted", id);
        Ok(())
    }

    /// Move an agent's KYC review forward
    /// DOCUMENTATION: Loads the agent first and refuses transitions the
    /// dashboard does not offer; the API still has the final word.
    pub async fn set_kyc_status(
        api: &ApiClient,
        id: i64,
        req: &KycUpdateRequest,
    ) -> Result<Agent, PortalError> {
        let agent = Self::get(api, id).await?;
        let current = agent.kyc();
        if !current.can_transition_to(req.kyc_status) {
            return Err(PortalError::InvalidInput(format!(
                "KYC status cannot change from {} to {}",
                current.as_str(),
                req.kyc_status.as_str()
            )));
        }

        log::info!(
            "Agent {} KYC {} -> {}",
            id,
            current.as_str(),
            req.kyc_status.as_str()
        );
        api.patch(&format!("/agents/{}/kyc", id), req).await
    }

    /// Flip active <-> inactive
    pub async fn toggle_status(api: &ApiClient, id: i64) -> Result<Agent, PortalError> {
        let agent = Self::get(api, id).await?;
        let next = match agent.status.as_deref() {
            Some("active") => "inactive",
            _ => "active",
        };
        api.patch(
            &format!("/agents/{}/status", id),
            &StatusUpdateRequest {
                status: next.to_string(),
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KycStatus;
    use reqwest::Client;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_with_agent(kyc: &str, status: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/agents/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"id": 3, "name": "فهد", "kyc_status": kyc, "status": status}
            })))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn refuses_invalid_kyc_transition_without_patching() {
        let server = server_with_agent("approved", "active").await;
        Mock::given(method("PATCH"))
            .and(path("/agents/3/kyc"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let api = ApiClient::new(Client::new(), server.uri());
        let req = KycUpdateRequest {
            kyc_status: KycStatus::Rejected,
            note: None,
        };
        let err = AgentService::set_kyc_status(&api, 3, &req).await.unwrap_err();
        assert!(matches!(err, PortalError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn toggles_active_agent_to_inactive() {
        let server = server_with_agent("approved", "active").await;
        Mock::given(method("PATCH"))
            .and(path("/agents/3/status"))
            .and(body_json(json!({"status": "inactive"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3, "name": "فهد", "status": "inactive"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(Client::new(), server.uri());
        let agent = AgentService::toggle_status(&api, 3).await.unwrap();
        assert_eq!(agent.status.as_deref(), Some("inactive"));
    }
}
