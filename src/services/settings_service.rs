// src/services/settings_service.rs
// DOCUMENTATION: CMS content: site settings, footer settings and FAQ
// PURPOSE: Cached reads for public pages, writes from the admin dashboard

use crate::errors::PortalError;
use crate::models::{
    Faq, FaqRequest, FooterSettings, Page, SiteSettings, UpdateFooterSettingsRequest,
    UpdateSiteSettingsRequest,
};
use crate::services::content_cache::{ContentCache, CMS_PREFIX};
use crate::services::ApiClient;

const SITE_KEY: &str = "cms:site";
const FOOTER_KEY: &str = "cms:footer";
const FAQ_KEY: &str = "cms:faq";

pub struct SettingsService;

impl SettingsService {
    pub async fn site(api: &ApiClient, cache: &ContentCache) -> Result<SiteSettings, PortalError> {
        cache
            .get_or_fetch(SITE_KEY, || api.get_one("/cms/settings/site"))
            .await
    }

    pub async fn footer(
        api: &ApiClient,
        cache: &ContentCache,
    ) -> Result<FooterSettings, PortalError> {
        cache
            .get_or_fetch(FOOTER_KEY, || api.get_one("/cms/settings/footer"))
            .await
    }

    /// All FAQ entries, active or not (admin table and public page share it)
    pub async fn faq(api: &ApiClient, cache: &ContentCache) -> Result<Vec<Faq>, PortalError> {
        cache
            .get_or_fetch(FAQ_KEY, || async {
                let query = vec![("per_page".to_string(), "100".to_string())];
                let page: Page<Faq> = api.get_page("/cms/faq", &query).await?;
                Ok(page.records)
            })
            .await
    }

    pub async fn update_site(
        api: &ApiClient,
        cache: &ContentCache,
        req: &UpdateSiteSettingsRequest,
    ) -> Result<SiteSettings, PortalError> {
        let updated: SiteSettings = api.patch("/cms/settings/site", req).await?;
        cache.invalidate(CMS_PREFIX).await;
        log::info!("Site settings updated");
        Ok(updated)
    }

    pub async fn update_footer(
        api: &ApiClient,
        cache: &ContentCache,
        req: &UpdateFooterSettingsRequest,
    ) -> Result<FooterSettings, PortalError> {
        let updated: FooterSettings = api.patch("/cms/settings/footer", req).await?;
        cache.invalidate(CMS_PREFIX).await;
        log::info!("Footer settings updated");
        Ok(updated)
    }

    pub async fn create_faq(
        api: &ApiClient,
        cache: &ContentCache,
        req: &FaqRequest,
    ) -> Result<Faq, PortalError> {
        let faq: Faq = api.post("/cms/faq", req).await?;
        cache.invalidate(CMS_PREFIX).await;
        Ok(faq)
    }

    pub async fn update_faq(
        api: &ApiClient,
        cache: &ContentCache,
        id: i64,
        req: &FaqRequest,
    ) -> Result<Faq, PortalError> {
        let faq: Faq = api.patch(&format!("/cms/faq/{}", id), req).await?;
        cache.invalidate(CMS_PREFIX).await;
        Ok(faq)
    }

    pub async fn delete_faq(
        api: &ApiClient,
        cache: &ContentCache,
        id: i64,
    ) -> Result<(), PortalError> {
        api.delete(&format!("/cms/faq/{}", id)).await?;
        cache.invalidate(CMS_PREFIX).await;
        Ok(())
    }
}
