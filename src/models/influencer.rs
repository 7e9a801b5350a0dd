// src/models/influencer.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{format_date, status_label};

/// Influencer promoting campaigns on social platforms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Influencer {
    pub id: i64,
    pub name: String,
    pub platform: Option<String>,
    pub handle: Option<String>,
    #[serde(default)]
    pub followers_count: i64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InfluencerRow {
    pub id: i64,
    pub name: String,
    pub platform: String,
    pub handle: String,
    pub followers: String,
    pub status: String,
    pub status_label: &'static str,
    pub created_at: Option<String>,
}

impl Influencer {
    pub fn to_row(&self) -> InfluencerRow {
        let status = self.status.clone().unwrap_or_else(|| "active".to_string());
        InfluencerRow {
            id: self.id,
            name: self.name.clone(),
            platform: self.platform.clone().unwrap_or_default(),
            handle: self
                .handle
                .as_deref()
                .map(|h| format!("@{}", h.trim_start_matches('@')))
                .unwrap_or_default(),
            followers: compact_count(self.followers_count),
            status_label: status_label(&status),
            status,
            created_at: format_date(self.created_at),
        }
    }
}

/// 12500 -> "12.5K", 2300000 -> "2.3M"
fn compact_count(value: i64) -> String {
    match value {
        v if v >= 1_000_000 => format!("{:.1}M", v as f64 / 1_000_000.0),
        v if v >= 1_000 => format!("{:.1}K", v as f64 / 1_000.0),
        v => v.to_string(),
    }
}

/// Create/edit form (PATCH sends the full form)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InfluencerRequest {
    #[validate(length(min = 2, max = 120))]
    pub name: String,

    #[validate(length(min = 2, max = 40))]
    pub platform: String,

    #[validate(length(min = 1, max = 80))]
    pub handle: String,

    #[serde(default)]
    pub followers_count: u64,

    #[validate(email)]
    pub email: Option<String>,

    pub phone: Option<String>,
}
