// src/models/agent.rs
// DOCUMENTATION: Brokerage agents and their KYC verification state
// PURPOSE: Shapes for /agents and the admin agents table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::{format_date, status_label, NamedRef};

/// Know-Your-Customer verification state of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    Pending,
    #[serde(alias = "verified")]
    Approved,
    Rejected,
}

impl KycStatus {
    pub fn parse(value: &str) -> Option<KycStatus> {
        match value {
            "pending" => Some(KycStatus::Pending),
            "approved" | "verified" => Some(KycStatus::Approved),
            "rejected" => Some(KycStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::Pending => "pending",
            KycStatus::Approved => "approved",
            KycStatus::Rejected => "rejected",
        }
    }

    /// Transitions the dashboard offers
    /// DOCUMENTATION: A pending review is decided either way; a rejected agent
    /// may resubmit (back to pending). An approved agent stays approved.
    pub fn can_transition_to(&self, next: KycStatus) -> bool {
        matches!(
            (self, next),
            (KycStatus::Pending, KycStatus::Approved)
                | (KycStatus::Pending, KycStatus::Rejected)
                | (KycStatus::Rejected, KycStatus::Pending)
        )
    }
}

/// Unknown KYC values decode to None instead of failing the page
fn kyc_from_api<'de, D>(deserializer: D) -> Result<Option<KycStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let parsed = KycStatus::parse(&value);
        if parsed.is_none() {
            log::warn!("Unknown KYC status from API: {}", value);
        }
        parsed
    }))
}

/// Agent record from /agents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    #[serde(default, deserialize_with = "kyc_from_api")]
    pub kyc_status: Option<KycStatus>,
    pub status: Option<String>,
    pub avatar: Option<String>,
    pub city: Option<NamedRef>,
    #[serde(default)]
    pub properties_count: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Table row for the admin agents page
#[derive(Debug, Clone, Serialize)]
pub struct AgentRow {
    pub id: i64,
    pub name: String,
    pub contact: String,
    pub license_number: String,
    pub city: String,
    pub kyc_status: &'static str,
    pub kyc_label: &'static str,
    pub status: String,
    pub status_label: &'static str,
    pub is_active: bool,
    pub properties_count: i64,
    pub created_at: Option<String>,
}

impl Agent {
    pub fn kyc(&self) -> KycStatus {
        self.kyc_status.unwrap_or(KycStatus::Pending)
    }

    pub fn to_row(&self) -> AgentRow {
        let status = self.status.clone().unwrap_or_else(|| "inactive".to_string());
        let kyc = self.kyc();
        AgentRow {
            id: self.id,
            name: self.name.clone(),
            contact: self
                .phone
                .clone()
                .or_else(|| self.email.clone())
                .unwrap_or_default(),
            license_number: self.license_number.clone().unwrap_or_default(),
            city: self.city.as_ref().map(|c| c.name.clone()).unwrap_or_default(),
            kyc_status: kyc.as_str(),
            kyc_label: status_label(kyc.as_str()),
            is_active: status == "active",
            status_label: status_label(&status),
            status,
            properties_count: self.properties_count,
            created_at: format_date(self.created_at),
        }
    }
}

/// Admin form: create an agent
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAgentRequest {
    #[validate(length(min = 2, max = 120))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 20))]
    pub phone: String,

    #[validate(length(max = 50))]
    pub license_number: Option<String>,

    pub city_id: Option<i64>,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Admin form: edit an agent, only provided fields are sent
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateAgentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 120))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 8, max = 20))]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<i64>,
}

/// Body of PATCH /agents/{id}/kyc
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KycUpdateRequest {
    pub kyc_status: KycStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Page;

    #[test]
    fn kyc_transitions() {
        assert!(KycStatus::Pending.can_transition_to(KycStatus::Approved));
        assert!(KycStatus::Pending.can_transition_to(KycStatus::Rejected));
        assert!(KycStatus::Rejected.can_transition_to(KycStatus::Pending));
        assert!(!KycStatus::Approved.can_transition_to(KycStatus::Rejected));
        assert!(!KycStatus::Rejected.can_transition_to(KycStatus::Approved));
        assert!(!KycStatus::Pending.can_transition_to(KycStatus::Pending));
    }

    #[test]
    fn unexpected_kyc_values_do_not_fail_the_page() {
        let page: Page<Agent> = serde_json::from_str(
            r#"{
                "total_records": 3,
                "records": [
                    {"id": 1, "name": "سارة", "kyc_status": "pending"},
                    {"id": 2, "name": "خالد", "kyc_status": "verified"},
                    {"id": 3, "name": "ريم", "kyc_status": "on_hold"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(page.records.len(), 3);
        assert_eq!(page.records[0].kyc_status, Some(KycStatus::Pending));
        assert_eq!(page.records[1].kyc_status, Some(KycStatus::Approved));
        assert_eq!(page.records[2].kyc_status, None);
    }

    #[test]
    fn agent_row_mapping() {
        let agent: Agent = serde_json::from_str(
            r#"{
                "id": 12,
                "name": "فهد",
                "email": "fahad@example.com",
                "phone": null,
                "kyc_status": "approved",
                "status": "active",
                "city": {"id": 1, "name": "جدة"},
                "properties_count": 4,
                "created_at": "2024-03-01T10:00:00Z"
            }"#,
        )
        .unwrap();

        let row = agent.to_row();
        assert_eq!(row.contact, "fahad@example.com");
        assert_eq!(row.city, "جدة");
        assert_eq!(row.kyc_status, "approved");
        assert!(row.is_active);
        assert_eq!(row.created_at.as_deref(), Some("2024-03-01"));
    }
}
