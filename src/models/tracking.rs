// src/models/tracking.rs
// DOCUMENTATION: Referral/UTM visit payloads
// PURPOSE: Body and answer of POST /traffic/visits

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Recorded visit: the recognized query parameters plus where it landed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisitPayload {
    /// Recognized parameter -> value, e.g. utm_source -> instagram
    #[serde(flatten)]
    pub params: BTreeMap<String, String>,
    pub landing_page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisitResponse {
    pub visitor_id: String,
}
