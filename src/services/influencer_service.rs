// src/services/influencer_service.rs

use crate::errors::PortalError;
use crate::models::{Influencer, InfluencerRequest, Page};
use crate::services::{ApiClient, ApiQuery};

/// Influencers on /influencers
pub struct InfluencerService;

impl InfluencerService {
    pub async fn list(api: &ApiClient, query: &ApiQuery) -> Result<Page<Influencer>, PortalError> {
        api.get_page("/influencers", query).await
    }

    pub async fn get(api: &ApiClient, id: i64) -> Result<Influencer, PortalError> {
        api.get_one(&format!("/influencers/{}", id)).await
    }

    pub async fn create(
        api: &ApiClient,
        req: &InfluencerRequest,
    ) -> Result<Influencer, PortalError> {
        api.post("/influencers", req).await
    }

    pub async fn update(
        api: &ApiClient,
        id: i64,
        req: &InfluencerRequest,
    ) -> Result<Influencer, PortalError> {
        api.patch(&format!("/influencers/{}", id), req).await
    }

    pub async fn delete(api: &ApiClient, id: i64) -> Result<(), PortalError> {
        api.delete(&format!("/influencers/{}", id)).await
    }
}
