// src/services/campaign_service.rs

use crate::errors::PortalError;
use crate::models::{Campaign, CampaignRequest, Page};
use crate::services::{ApiClient, ApiQuery};
use serde_json::json;

/// Campaigns on /campaigns
pub struct CampaignService;

impl CampaignService {
    pub async fn list(api: &ApiClient, query: &ApiQuery) -> Result<Page<Campaign>, PortalError> {
        api.get_page("/campaigns", query).await
    }

    pub async fn get(api: &ApiClient, id: i64) -> Result<Campaign, PortalError> {
        api.get_one(&format!("/campaigns/{}", id)).await
    }

    pub async fn create(api: &ApiClient, req: &CampaignRequest) -> Result<Campaign, PortalError> {
        let campaign: Campaign = api.post("/campaigns", req).await?;
        log::info!("Campaign {} created", campaign.id);
        Ok(campaign)
    }

    pub async fn update(
        api: &ApiClient,
        id: i64,
        req: &CampaignRequest,
    ) -> Result<Campaign, PortalError> {
        api.patch(&format!("/campaigns/{}", id), req).await
    }

    pub async fn delete(api: &ApiClient, id: i64) -> Result<(), PortalError> {
        api.delete(&format!("/campaigns/{}", id)).await
    }

    /// Publish a draft campaign
    pub async fn publish(api: &ApiClient, id: i64) -> Result<(), PortalError> {
        api.post_action(&format!("/campaigns/{}/publish", id), &json!({}))
            .await?;
        log::info!("Campaign {} published", id);
        Ok(())
    }
}
