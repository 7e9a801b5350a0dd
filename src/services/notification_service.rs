// src/services/notification_service.rs

use crate::errors::PortalError;
use crate::models::{Notification, Page};
use crate::services::{ApiClient, ApiQuery};
use serde_json::json;

/// Notifications of the signed-in user
pub struct NotificationService;

impl NotificationService {
    pub async fn list(
        api: &ApiClient,
        query: &ApiQuery,
    ) -> Result<Page<Notification>, PortalError> {
        api.get_page("/notifications", query).await
    }

    pub async fn mark_read(api: &ApiClient, id: i64) -> Result<(), PortalError> {
        api.patch_action(&format!("/notifications/{}/read", id), &json!({}))
            .await
    }

    pub async fn mark_all_read(api: &ApiClient) -> Result<(), PortalError> {
        api.patch_action("/notifications/read-all", &json!({})).await
    }
}
