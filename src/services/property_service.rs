// src/services/property_service.rs

use crate::errors::PortalError;
use crate::models::{Page, Property};
use crate::services::{ApiClient, ApiQuery};

/// Public property listings on /properties
pub struct PropertyService;

impl PropertyService {
    pub async fn list(api: &ApiClient, query: &ApiQuery) -> Result<Page<Property>, PortalError> {
        api.get_page("/properties", query).await
    }

    pub async fn get(api: &ApiClient, id: i64) -> Result<Property, PortalError> {
        api.get_one(&format!("/properties/{}", id)).await
    }

    /// Featured listings for the home page
    pub async fn featured(api: &ApiClient, limit: usize) -> Result<Vec<Property>, PortalError> {
        let query = vec![
            ("is_featured".to_string(), "1".to_string()),
            ("per_page".to_string(), limit.to_string()),
        ];
        let page = Self::list(api, &query).await?;
        Ok(page.records)
    }
}
