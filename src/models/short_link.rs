// src/models/short_link.rs
// DOCUMENTATION: Slug-based redirect links used for click tracking
// PURPOSE: Shapes for /short-links

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{format_date, NamedRef};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortLink {
    pub id: i64,
    pub slug: String,
    pub target_url: String,
    #[serde(default)]
    pub clicks_count: i64,
    pub campaign: Option<NamedRef>,
    pub influencer: Option<NamedRef>,
    pub marketer: Option<NamedRef>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize)]
pub struct ShortLinkRow {
    pub id: i64,
    pub slug: String,
    pub short_url: String,
    pub target_url: String,
    pub clicks: i64,
    /// Campaign, influencer or marketer the link is attributed to
    pub owner: String,
    pub is_active: bool,
    pub created_at: Option<String>,
}

impl ShortLink {
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.slug)
    }

    pub fn to_row(&self, base_url: &str) -> ShortLinkRow {
        let owner = [
            self.campaign.as_ref(),
            self.influencer.as_ref(),
            self.marketer.as_ref(),
        ]
        .into_iter()
        .flatten()
        .map(|r| r.name.clone())
        .next()
        .unwrap_or_default();

        ShortLinkRow {
            id: self.id,
            slug: self.slug.clone(),
            short_url: self.short_url(base_url),
            target_url: self.target_url.clone(),
            clicks: self.clicks_count,
            owner,
            is_active: self.is_active,
            created_at: format_date(self.created_at),
        }
    }
}

/// Create/edit form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShortLinkRequest {
    #[validate(length(min = 3, max = 64), custom = "validate_slug")]
    pub slug: String,

    #[validate(url)]
    pub target_url: String,

    pub campaign_id: Option<i64>,

    pub influencer_id: Option<i64>,

    pub marketer_id: Option<i64>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Slugs are lowercase ascii letters, digits and dashes
fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let valid = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.starts_with('-')
        && !slug.ends_with('-');
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_slug"))
    }
}
