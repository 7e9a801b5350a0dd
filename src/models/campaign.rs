// src/models/campaign.rs
// DOCUMENTATION: Marketing campaigns
// PURPOSE: Shapes for /campaigns, its forms and the campaigns table

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{format_amount, format_date, format_naive_date, status_label, NamedRef};

/// Campaign record from /campaigns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    /// Pre-joined creator
    pub created_by: Option<NamedRef>,
    pub influencer: Option<NamedRef>,
    pub marketer: Option<NamedRef>,
    #[serde(default)]
    pub clicks_count: i64,
    #[serde(default)]
    pub conversions_count: i64,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignRow {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub status_label: &'static str,
    pub is_published: bool,
    pub period: String,
    pub budget: String,
    pub created_by: String,
    pub influencer: String,
    pub clicks: i64,
    pub conversions: i64,
    pub created_at: Option<String>,
}

impl Campaign {
    pub fn to_row(&self) -> CampaignRow {
        let status = self.status.clone().unwrap_or_else(|| "draft".to_string());
        let period = match (
            format_naive_date(self.start_date),
            format_naive_date(self.end_date),
        ) {
            (Some(start), Some(end)) => format!("{} - {}", start, end),
            (Some(start), None) => start,
            (None, Some(end)) => end,
            (None, None) => "-".to_string(),
        };

        CampaignRow {
            id: self.id,
            name: self.name.clone(),
            is_published: status == "published",
            status_label: status_label(&status),
            status,
            period,
            budget: self
                .budget
                .map(format_amount)
                .unwrap_or_else(|| "-".to_string()),
            created_by: self
                .created_by
                .as_ref()
                .map(|u| u.name.clone())
                .unwrap_or_default(),
            influencer: self
                .influencer
                .as_ref()
                .map(|i| i.name.clone())
                .unwrap_or_default(),
            clicks: self.clicks_count,
            conversions: self.conversions_count,
            created_at: format_date(self.created_at),
        }
    }
}

/// Campaign create/edit form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "campaign_period_is_ordered"))]
pub struct CampaignRequest {
    #[validate(length(min = 2, max = 150))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    #[validate(range(min = 0.0))]
    pub budget: Option<f64>,

    pub influencer_id: Option<i64>,

    pub marketer_id: Option<i64>,
}

fn campaign_period_is_ordered(req: &CampaignRequest) -> Result<(), validator::ValidationError> {
    if let (Some(start), Some(end)) = (req.start_date, req.end_date) {
        if end < start {
            return Err(validator::ValidationError::new("end_before_start"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_end_before_start() {
        let req = CampaignRequest {
            name: "حملة الصيف".to_string(),
            description: None,
            start_date: NaiveDate::from_ymd_opt(2024, 6, 10),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            budget: Some(5000.0),
            influencer_id: None,
            marketer_id: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn campaign_row_mapping() {
        let campaign: Campaign = serde_json::from_str(
            r#"{
                "id": 5,
                "name": "حملة الصيف",
                "status": "published",
                "start_date": "2024-06-01",
                "end_date": "2024-06-30",
                "budget": 15000,
                "created_by": {"id": 1, "name": "المدير"},
                "clicks_count": 320
            }"#,
        )
        .unwrap();
        let row = campaign.to_row();
        assert!(row.is_published);
        assert_eq!(row.period, "2024-06-01 - 2024-06-30");
        assert_eq!(row.budget, "15,000");
        assert_eq!(row.created_by, "المدير");
        assert_eq!(row.influencer, "");
    }
}
