// src/services/short_link_service.rs

use crate::errors::PortalError;
use crate::models::{Page, ShortLink, ShortLinkRequest};
use crate::services::{ApiClient, ApiQuery};

/// Short links on /short-links
pub struct ShortLinkService;

impl ShortLinkService {
    pub async fn list(api: &ApiClient, query: &ApiQuery) -> Result<Page<ShortLink>, PortalError> {
        api.get_page("/short-links", query).await
    }

    pub async fn create(api: &ApiClient, req: &ShortLinkRequest) -> Result<ShortLink, PortalError> {
        let link: ShortLink = api.post("/short-links", req).await?;
        log::info!("Short link /{} created", link.slug);
        Ok(link)
    }

    pub async fn update(
        api: &ApiClient,
        id: i64,
        req: &ShortLinkRequest,
    ) -> Result<ShortLink, PortalError> {
        api.patch(&format!("/short-links/{}", id), req).await
    }

    pub async fn delete(api: &ApiClient, id: i64) -> Result<(), PortalError> {
        api.delete(&format!("/short-links/{}", id)).await
    }
}
