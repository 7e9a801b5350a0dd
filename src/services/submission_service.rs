// src/services/submission_service.rs
// DOCUMENTATION: Property listing requests
// PURPOSE: Public submission and admin review on /property-listing-requests

use crate::errors::PortalError;
use crate::models::{CreateSubmissionRequest, Page, PropertySubmission, RejectSubmissionRequest};
use crate::services::{ApiClient, ApiQuery};
use serde_json::json;

pub struct SubmissionService;

impl SubmissionService {
    pub async fn list(
        api: &ApiClient,
        query: &ApiQuery,
    ) -> Result<Page<PropertySubmission>, PortalError> {
        api.get_page("/property-listing-requests", query).await
    }

    pub async fn get(api: &ApiClient, id: i64) -> Result<PropertySubmission, PortalError> {
        api.get_one(&format!("/property-listing-requests/{}", id))
            .await
    }

    pub async fn create(
        api: &ApiClient,
        req: &CreateSubmissionRequest,
    ) -> Result<PropertySubmission, PortalError> {
        let submission: PropertySubmission = api.post("/property-listing-requests", req).await?;
        log::info!("Listing request {} submitted", submission.id);
        Ok(submission)
    }

    pub async fn approve(api: &ApiClient, id: i64) -> Result<(), PortalError> {
        api.post_action(&format!("/property-listing-requests/{}/approve", id), &json!({}))
            .await?;
        log::info!("Listing request {} approved", id);
        Ok(())
    }

    pub async fn reject(
        api: &ApiClient,
        id: i64,
        req: &RejectSubmissionRequest,
    ) -> Result<(), PortalError> {
        api.post_action(&format!("/property-listing-requests/{}/reject", id), req)
            .await?;
        log::info!("Listing request {} rejected", id);
        Ok(())
    }
}
