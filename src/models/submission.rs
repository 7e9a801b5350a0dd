// src/models/submission.rs
// DOCUMENTATION: Property listing requests submitted by owners
// PURPOSE: Shapes for /property-listing-requests

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{format_amount, format_date, lenient_enum, status_label, NamedRef, Purpose};

/// Listing request record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySubmission {
    pub id: i64,
    pub owner_name: String,
    pub owner_phone: Option<String>,
    pub property_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub purpose: Option<Purpose>,
    pub city: Option<NamedRef>,
    pub area: Option<NamedRef>,
    pub address: Option<String>,
    pub expected_price: Option<f64>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub rejection_reason: Option<String>,
    /// Submitting account, when signed in
    pub user: Option<NamedRef>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRow {
    pub id: i64,
    pub owner_name: String,
    pub owner_phone: String,
    pub property_type: String,
    pub purpose_label: &'static str,
    pub location: String,
    pub expected_price: String,
    pub status: String,
    pub status_label: &'static str,
    pub can_review: bool,
    pub rejection_reason: Option<String>,
    pub submitted_at: Option<String>,
}

impl PropertySubmission {
    pub fn to_row(&self) -> SubmissionRow {
        let status = self.status.clone().unwrap_or_else(|| "pending".to_string());
        let location = [self.area.as_ref(), self.city.as_ref()]
            .into_iter()
            .flatten()
            .map(|r| r.name.clone())
            .collect::<Vec<_>>()
            .join("، ");

        SubmissionRow {
            id: self.id,
            owner_name: self.owner_name.clone(),
            owner_phone: self.owner_phone.clone().unwrap_or_default(),
            property_type: self.property_type.clone().unwrap_or_default(),
            purpose_label: self.purpose.map(|p| p.label()).unwrap_or(""),
            location,
            expected_price: self
                .expected_price
                .map(format_amount)
                .unwrap_or_else(|| "-".to_string()),
            can_review: status == "pending",
            status_label: status_label(&status),
            status,
            rejection_reason: self.rejection_reason.clone(),
            submitted_at: format_date(self.created_at),
        }
    }
}

/// Public "list your property" form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSubmissionRequest {
    #[validate(length(min = 2, max = 120))]
    pub owner_name: String,

    #[validate(length(min = 8, max = 20))]
    pub owner_phone: String,

    #[validate(length(min = 2, max = 40))]
    pub property_type: String,

    pub purpose: Purpose,

    pub city_id: i64,

    pub area_id: Option<i64>,

    #[validate(length(max = 255))]
    pub address: Option<String>,

    #[validate(range(min = 0.0))]
    pub expected_price: Option<f64>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// Body of POST /property-listing-requests/{id}/reject
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RejectSubmissionRequest {
    #[validate(length(min = 3, max = 500))]
    pub reason: String,
}
