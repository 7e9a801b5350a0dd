// src/models/common.rs
// DOCUMENTATION: Response envelopes and shared helpers for every resource
// PURPOSE: Decode the API's list/single shapes and format values for rows

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Paginated list as returned by every list endpoint
/// DOCUMENTATION: `{ total_records, current_page, per_page, records }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub total_records: i64,

    #[serde(default = "first_page")]
    pub current_page: i64,

    #[serde(default)]
    pub per_page: i64,

    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
}

fn first_page() -> i64 {
    1
}

/// Enum field that decodes to None on values this build does not know
/// DOCUMENTATION: One record with a new enum value must not fail the whole page.
pub fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::warn!("Ignoring unknown enum value {}", value);
            None
        }
    }))
}

/// Single-resource response
/// DOCUMENTATION: Mutations answer either `{ "data": record }` or the bare record
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(record) => record,
        }
    }
}

/// Pre-joined foreign key reference (`{ id, name }`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedRef {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// Body for the `/status` action endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// Arabic label for the status values the API uses across resources
pub fn status_label(status: &str) -> &'static str {
    match status {
        "active" => "نشط",
        "inactive" => "غير نشط",
        "blocked" | "suspended" => "موقوف",
        "pending" => "قيد المراجعة",
        "approved" => "مقبول",
        "rejected" => "مرفوض",
        "draft" => "مسودة",
        "published" => "منشور",
        "ended" | "completed" => "منتهي",
        "confirmed" => "مؤكد",
        "cancelled" => "ملغي",
        _ => "غير معروف",
    }
}

/// Date part of a timestamp, as shown in tables
pub fn format_date(value: Option<DateTime<Utc>>) -> Option<String> {
    value.map(|v| v.format("%Y-%m-%d").to_string())
}

pub fn format_naive_date(value: Option<NaiveDate>) -> Option<String> {
    value.map(|v| v.format("%Y-%m-%d").to_string())
}

/// Group digits in thousands: 1250000 -> "1,250,000"
pub fn format_amount(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0 {
        out.insert(0, '-');
    }
    out
}

/// Turns image paths from the API into URLs the browser can load
/// DOCUMENTATION: Relative paths are served from the image base URL.
/// Absolute URLs render only when their host is allow-listed.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    base_url: String,
    allowed_hosts: Vec<String>,
}

impl ImageResolver {
    pub fn new(base_url: impl Into<String>, allowed_hosts: Vec<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            allowed_hosts,
        }
    }

    pub fn resolve(&self, path: Option<&str>) -> Option<String> {
        let path = path.map(str::trim).filter(|p| !p.is_empty())?;

        if path.starts_with("http://") || path.starts_with("https://") {
            let url = reqwest::Url::parse(path).ok()?;
            let host = url.host_str()?.to_lowercase();
            if self.allowed_hosts.iter().any(|allowed| allowed == &host) {
                return Some(path.to_string());
            }
            log::debug!("Dropping image from non allow-listed host: {}", host);
            return None;
        }

        Some(format!("{}/{}", self.base_url, path.trim_start_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_accepts_both_shapes() {
        let wrapped: Envelope<NamedRef> =
            serde_json::from_str(r#"{"data":{"id":3,"name":"الرياض"}}"#).unwrap();
        let bare: Envelope<NamedRef> = serde_json::from_str(r#"{"id":3,"name":"الرياض"}"#).unwrap();
        assert_eq!(wrapped.into_inner(), bare.into_inner());
    }

    #[test]
    fn page_defaults_missing_fields() {
        let page: Page<NamedRef> = serde_json::from_str(r#"{"records":[]}"#).unwrap();
        assert_eq!(page.total_records, 0);
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn formats_amounts() {
        assert_eq!(format_amount(1_250_000.0), "1,250,000");
        assert_eq!(format_amount(950.0), "950");
        assert_eq!(format_amount(-12_000.4), "-12,000");
    }

    #[test]
    fn resolves_images() {
        let resolver = ImageResolver::new(
            "https://cdn.example.com/storage/",
            vec!["images.example.com".to_string()],
        );
        assert_eq!(
            resolver.resolve(Some("/properties/1.jpg")).as_deref(),
            Some("https://cdn.example.com/storage/properties/1.jpg")
        );
        assert_eq!(
            resolver
                .resolve(Some("https://images.example.com/a.png"))
                .as_deref(),
            Some("https://images.example.com/a.png")
        );
        assert!(resolver.resolve(Some("https://evil.test/a.png")).is_none());
        assert!(resolver.resolve(Some("  ")).is_none());
        assert!(resolver.resolve(None).is_none());
    }
}
