// src/services/partner_service.rs
// DOCUMENTATION: Marketers and traffic partners
// PURPOSE: Approval and status of marketer accounts, referral traffic stats

use crate::errors::PortalError;
use crate::models::{Envelope, Marketer, Page, Partner, PartnerStats, StatusUpdateRequest};
use crate::services::{ApiClient, ApiQuery};
use reqwest::Url;
use serde_json::json;

pub struct PartnerService;

impl PartnerService {
    pub async fn list_marketers(
        api: &ApiClient,
        query: &ApiQuery,
    ) -> Result<Page<Marketer>, PortalError> {
        api.get_page("/marketers", query).await
    }

    pub async fn get_marketer(api: &ApiClient, id: i64) -> Result<Marketer, PortalError> {
        api.get_one(&format!("/marketers/{}", id)).await
    }

    /// Marketer profile of the signed-in user
    pub async fn my_profile(api: &ApiClient) -> Result<Marketer, PortalError> {
        api.get_one("/marketers/me").await
    }

    pub async fn approve(api: &ApiClient, id: i64) -> Result<(), PortalError> {
        api.post_action(&format!("/marketers/{}/approve", id), &json!({}))
            .await?;
        log::info!("Marketer {} approved", id);
        Ok(())
    }

    pub async fn set_status(
        api: &ApiClient,
        id: i64,
        status: &str,
    ) -> Result<Marketer, PortalError> {
        if !matches!(status, "active" | "inactive" | "suspended") {
            return Err(PortalError::InvalidInput(format!(
                "Unknown marketer status: {}",
                status
            )));
        }
        api.patch(
            &format!("/marketers/{}/status", id),
            &StatusUpdateRequest {
                status: status.to_string(),
            },
        )
        .await
    }

    pub async fn list_partners(
        api: &ApiClient,
        query: &ApiQuery,
    ) -> Result<Page<Partner>, PortalError> {
        api.get_page("/traffic/partners", query).await
    }

    pub async fn partner_stats(
        api: &ApiClient,
        id: i64,
        query: &ApiQuery,
    ) -> Result<PartnerStats, PortalError> {
        let stats: Envelope<PartnerStats> = api
            .get(&format!("/traffic/partners/{}/stats", id), query)
            .await?;
        Ok(stats.into_inner())
    }
}

/// Link a marketer shares to attribute visits
/// DOCUMENTATION: None when SITE_URL does not parse.
pub fn referral_link(site_url: &str, referral_code: &str) -> Option<String> {
    let mut url = match Url::parse(site_url) {
        Ok(url) => url,
        Err(e) => {
            log::warn!("Cannot build referral link from SITE_URL {}: {}", site_url, e);
            return None;
        }
    };
    url.query_pairs_mut().append_pair("ref", referral_code);
    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_referral_link() {
        assert_eq!(
            referral_link("https://example.com/", "NOURA10").as_deref(),
            Some("https://example.com/?ref=NOURA10")
        );
        assert_eq!(
            referral_link("https://example.com", "A&B 1").as_deref(),
            Some("https://example.com/?ref=A%26B+1")
        );
        assert_eq!(referral_link("not a url", "X"), None);
    }
}
