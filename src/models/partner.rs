// src/models/partner.rs
// DOCUMENTATION: Marketers (referral partners) and their traffic statistics
// PURPOSE: Shapes for /marketers and /traffic/partners

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{format_date, status_label};

/// Marketer account from /marketers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marketer {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub referral_code: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub is_approved: bool,
    pub commission_rate: Option<f64>,
    #[serde(default)]
    pub visits_count: i64,
    #[serde(default)]
    pub conversions_count: i64,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketerRow {
    pub id: i64,
    pub name: String,
    pub contact: String,
    pub referral_code: String,
    pub status: String,
    pub status_label: &'static str,
    pub is_approved: bool,
    pub commission: String,
    pub visits: i64,
    pub conversions: i64,
    pub created_at: Option<String>,
}

impl Marketer {
    pub fn to_row(&self) -> MarketerRow {
        let status = self.status.clone().unwrap_or_else(|| "pending".to_string());
        MarketerRow {
            id: self.id,
            name: self.name.clone(),
            contact: self
                .phone
                .clone()
                .or_else(|| self.email.clone())
                .unwrap_or_default(),
            referral_code: self.referral_code.clone().unwrap_or_default(),
            status_label: status_label(&status),
            status,
            is_approved: self.is_approved,
            commission: self
                .commission_rate
                .map(|rate| format!("{}%", rate))
                .unwrap_or_else(|| "-".to_string()),
            visits: self.visits_count,
            conversions: self.conversions_count,
            created_at: format_date(self.created_at),
        }
    }
}

/// Traffic partner summary from /traffic/partners
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partner {
    pub id: i64,
    pub name: String,
    pub referral_code: Option<String>,
    #[serde(default)]
    pub visits: i64,
    #[serde(default)]
    pub unique_visitors: i64,
    #[serde(default)]
    pub conversions: i64,
    pub last_visit_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartnerRow {
    pub id: i64,
    pub name: String,
    pub referral_code: String,
    pub visits: i64,
    pub unique_visitors: i64,
    pub conversions: i64,
    pub conversion_rate: String,
    pub last_visit_at: Option<String>,
}

impl Partner {
    pub fn to_row(&self) -> PartnerRow {
        PartnerRow {
            id: self.id,
            name: self.name.clone(),
            referral_code: self.referral_code.clone().unwrap_or_default(),
            visits: self.visits,
            unique_visitors: self.unique_visitors,
            conversions: self.conversions,
            conversion_rate: conversion_rate(self.conversions, self.unique_visitors),
            last_visit_at: format_date(self.last_visit_at),
        }
    }
}

/// Daily breakdown from /traffic/partners/{id}/stats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerStats {
    #[serde(default)]
    pub total_visits: i64,
    #[serde(default)]
    pub unique_visitors: i64,
    #[serde(default)]
    pub conversions: i64,
    #[serde(default)]
    pub daily: Vec<DailyTraffic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTraffic {
    pub date: String,
    #[serde(default)]
    pub visits: i64,
    #[serde(default)]
    pub conversions: i64,
}

/// Conversions over unique visitors, one decimal
pub fn conversion_rate(conversions: i64, visitors: i64) -> String {
    if visitors <= 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", conversions as f64 * 100.0 / visitors as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_rate_handles_zero_visitors() {
        assert_eq!(conversion_rate(3, 0), "0%");
        assert_eq!(conversion_rate(1, 8), "12.5%");
    }

    #[test]
    fn marketer_row_defaults_to_pending() {
        let marketer: Marketer =
            serde_json::from_str(r#"{"id":1,"name":"نورة","referral_code":"NOURA10"}"#).unwrap();
        let row = marketer.to_row();
        assert_eq!(row.status, "pending");
        assert!(!row.is_approved);
        assert_eq!(row.commission, "-");
    }
}
