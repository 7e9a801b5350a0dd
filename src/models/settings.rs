// src/models/settings.rs
// DOCUMENTATION: CMS-managed site, footer and FAQ content
// PURPOSE: Shapes for /cms/settings/site, /cms/settings/footer and /cms/faq

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Site-wide settings rendered on the marketing pages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteSettings {
    pub site_name: Option<String>,
    pub tagline: Option<String>,
    pub logo: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_image: Option<String>,
    pub about_title: Option<String>,
    pub about_content: Option<String>,
    pub about_image: Option<String>,
    pub privacy_content: Option<String>,
    pub meta_description: Option<String>,
}

/// PATCH body for site settings, only provided fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSiteSettingsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 120))]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub hero_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500))]
    pub hero_subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 300))]
    pub meta_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// Footer contact block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FooterSettings {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub address: Option<String>,
    pub working_hours: Option<String>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    pub copyright: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateFooterSettingsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 8, max = 20))]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<Vec<SocialLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub id: i64,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FaqRequest {
    #[validate(length(min = 5, max = 300))]
    pub question: String,
    #[validate(length(min = 2, max = 5000))]
    pub answer: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Active FAQ entries in display order
pub fn visible_faq(mut entries: Vec<Faq>) -> Vec<Faq> {
    entries.retain(|f| f.is_active);
    entries.sort_by_key(|f| (f.sort_order, f.id));
    entries
}
