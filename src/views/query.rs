// src/views/query.rs
// DOCUMENTATION: URL filter state -> API query parameters
// PURPOSE: One deterministic mapping per resource for status, sort, dates, paging and search

use crate::services::ApiQuery;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Sentinel the filter dropdowns use for "no filter"
pub const ALL: &str = "all";

/// Upper bound for page size
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn parse(value: &str) -> Option<SortDir> {
        match value.to_lowercase().as_str() {
            "asc" => Some(SortDir::Asc),
            "desc" => Some(SortDir::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }
}

/// How one resource's list page maps its URL onto the API
#[derive(Debug, Clone, Copy)]
pub struct QueryProfile {
    pub default_sort: &'static str,
    pub default_dir: SortDir,
    /// Columns the API accepts in `sort_by`
    pub sortable: &'static [&'static str],
    /// Accepted `status` values; anything else is dropped
    pub statuses: &'static [&'static str],
    /// Resource-specific keys copied through unchanged
    pub passthrough: &'static [&'static str],
    /// API names of the `from` / `to` date bounds
    pub date_from_key: &'static str,
    pub date_to_key: &'static str,
}

/// Query profiles of every list page
pub mod profiles {
    use super::{QueryProfile, SortDir};

    const CREATED: &str = "created_at";

    pub const AGENTS: QueryProfile = QueryProfile {
        default_sort: CREATED,
        default_dir: SortDir::Desc,
        sortable: &["created_at", "name", "properties_count"],
        statuses: &["active", "inactive"],
        passthrough: &["kyc_status", "city_id"],
        date_from_key: "created_from",
        date_to_key: "created_to",
    };

    pub const CLIENTS: QueryProfile = QueryProfile {
        default_sort: CREATED,
        default_dir: SortDir::Desc,
        sortable: &["created_at", "name"],
        statuses: &["active", "inactive", "blocked"],
        passthrough: &[],
        date_from_key: "created_from",
        date_to_key: "created_to",
    };

    pub const CAMPAIGNS: QueryProfile = QueryProfile {
        default_sort: "start_date",
        default_dir: SortDir::Desc,
        sortable: &["start_date", "end_date", "created_at", "name", "clicks_count"],
        statuses: &["draft", "published", "ended"],
        passthrough: &["influencer_id", "marketer_id"],
        date_from_key: "start_date_from",
        date_to_key: "start_date_to",
    };

    pub const INFLUENCERS: QueryProfile = QueryProfile {
        default_sort: CREATED,
        default_dir: SortDir::Desc,
        sortable: &["created_at", "name", "followers_count"],
        statuses: &["active", "inactive"],
        passthrough: &["platform"],
        date_from_key: "created_from",
        date_to_key: "created_to",
    };

    pub const MARKETERS: QueryProfile = QueryProfile {
        default_sort: CREATED,
        default_dir: SortDir::Desc,
        sortable: &["created_at", "name", "visits_count", "conversions_count"],
        statuses: &["pending", "active", "inactive", "suspended"],
        passthrough: &["is_approved"],
        date_from_key: "created_from",
        date_to_key: "created_to",
    };

    pub const PARTNERS: QueryProfile = QueryProfile {
        default_sort: "visits",
        default_dir: SortDir::Desc,
        sortable: &["visits", "conversions", "name"],
        statuses: &[],
        passthrough: &[],
        date_from_key: "date_from",
        date_to_key: "date_to",
    };

    pub const SHORT_LINKS: QueryProfile = QueryProfile {
        default_sort: CREATED,
        default_dir: SortDir::Desc,
        sortable: &["created_at", "clicks_count", "slug"],
        statuses: &["active", "inactive"],
        passthrough: &["campaign_id", "influencer_id", "marketer_id"],
        date_from_key: "created_from",
        date_to_key: "created_to",
    };

    pub const SUBMISSIONS: QueryProfile = QueryProfile {
        default_sort: CREATED,
        default_dir: SortDir::Desc,
        sortable: &["created_at", "expected_price"],
        statuses: &["pending", "approved", "rejected"],
        passthrough: &["city_id", "purpose"],
        date_from_key: "created_from",
        date_to_key: "created_to",
    };

    pub const PROPERTIES: QueryProfile = QueryProfile {
        default_sort: CREATED,
        default_dir: SortDir::Desc,
        sortable: &["created_at", "price", "area_sqm"],
        statuses: &[],
        passthrough: &[
            "purpose",
            "property_type",
            "city_id",
            "area_id",
            "min_price",
            "max_price",
            "bedrooms",
        ],
        date_from_key: "created_from",
        date_to_key: "created_to",
    };

    pub const NOTIFICATIONS: QueryProfile = QueryProfile {
        default_sort: CREATED,
        default_dir: SortDir::Desc,
        sortable: &["created_at"],
        statuses: &["read", "unread"],
        passthrough: &[],
        date_from_key: "created_from",
        date_to_key: "created_to",
    };

    pub const APPOINTMENTS: QueryProfile = QueryProfile {
        default_sort: "scheduled_date",
        default_dir: SortDir::Asc,
        sortable: &["scheduled_date", "created_at"],
        statuses: &["pending", "confirmed", "cancelled", "completed"],
        passthrough: &["property_id"],
        date_from_key: "scheduled_from",
        date_to_key: "scheduled_to",
    };
}

/// URL search parameters of a list page
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    values: HashMap<String, String>,
}

impl From<HashMap<String, String>> for ListParams {
    fn from(values: HashMap<String, String>) -> Self {
        ListParams { values }
    }
}

impl ListParams {
    /// Value that counts as "set": non-blank and not the `all` sentinel
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
    }

    pub fn date(&self, key: &str) -> Option<NaiveDate> {
        self.value(key)
            .and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
    }

    pub fn page(&self) -> Option<u32> {
        self.value("page")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|p| *p > 0)
    }

    pub fn limit(&self) -> Option<u32> {
        self.value("limit")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|l| *l > 0)
            .map(|l| l.min(MAX_LIMIT))
    }
}

/// Translate a list page's URL state into API query parameters
/// DOCUMENTATION: Only explicitly set filters are emitted. Sort and direction
/// always appear, falling back to the profile defaults.
pub fn to_api_query(params: &ListParams, profile: &QueryProfile) -> ApiQuery {
    let mut query = ApiQuery::new();

    if let Some(status) = params.value("status") {
        if profile.statuses.contains(&status) {
            query.push(("status".to_string(), status.to_string()));
        }
    }

    for key in profile.passthrough {
        if let Some(value) = params.value(key) {
            query.push((key.to_string(), value.to_string()));
        }
    }

    if let Some(search) = params.value("search") {
        query.push(("search".to_string(), search.to_string()));
    }

    if let Some(from) = params.date("from") {
        query.push((profile.date_from_key.to_string(), from.to_string()));
    }
    if let Some(to) = params.date("to") {
        query.push((profile.date_to_key.to_string(), to.to_string()));
    }

    let sort = params
        .value("sort")
        .filter(|s| profile.sortable.contains(s))
        .unwrap_or(profile.default_sort);
    let dir = params
        .value("dir")
        .and_then(SortDir::parse)
        .unwrap_or(profile.default_dir);
    query.push(("sort_by".to_string(), sort.to_string()));
    query.push(("sort_dir".to_string(), dir.as_str().to_string()));

    if let Some(page) = params.page() {
        query.push(("page".to_string(), page.to_string()));
    }
    if let Some(limit) = params.limit() {
        query.push(("per_page".to_string(), limit.to_string()));
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ListParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>()
            .into()
    }

    fn keys(query: &ApiQuery) -> Vec<&str> {
        query.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn empty_url_yields_only_default_sort() {
        let query = to_api_query(&ListParams::default(), &profiles::AGENTS);
        assert_eq!(
            query,
            vec![
                ("sort_by".to_string(), "created_at".to_string()),
                ("sort_dir".to_string(), "desc".to_string()),
            ]
        );
    }

    #[test]
    fn all_sentinels_and_blanks_are_dropped() {
        let query = to_api_query(
            &params(&[
                ("status", "all"),
                ("kyc_status", "ALL"),
                ("search", "   "),
                ("city_id", ""),
            ]),
            &profiles::AGENTS,
        );
        assert_eq!(keys(&query), vec!["sort_by", "sort_dir"]);
    }

    #[test]
    fn maps_every_explicit_filter() {
        let query = to_api_query(
            &params(&[
                ("status", "active"),
                ("kyc_status", "pending"),
                ("search", " فهد "),
                ("from", "2024-01-01"),
                ("to", "2024-01-31"),
                ("sort", "name"),
                ("dir", "ASC"),
                ("page", "3"),
                ("limit", "500"),
                ("unrelated", "x"),
            ]),
            &profiles::AGENTS,
        );
        assert_eq!(
            query,
            vec![
                ("status".to_string(), "active".to_string()),
                ("kyc_status".to_string(), "pending".to_string()),
                ("search".to_string(), "فهد".to_string()),
                ("created_from".to_string(), "2024-01-01".to_string()),
                ("created_to".to_string(), "2024-01-31".to_string()),
                ("sort_by".to_string(), "name".to_string()),
                ("sort_dir".to_string(), "asc".to_string()),
                ("page".to_string(), "3".to_string()),
                ("per_page".to_string(), "100".to_string()),
            ]
        );
    }

    #[test]
    fn unset_or_invalid_dates_are_omitted() {
        let query = to_api_query(
            &params(&[("from", "2024-13-40"), ("to", "")]),
            &profiles::CAMPAIGNS,
        );
        assert!(!keys(&query).contains(&"start_date_from"));
        assert!(!keys(&query).contains(&"start_date_to"));

        let query = to_api_query(&params(&[("to", "2024-06-30")]), &profiles::CAMPAIGNS);
        assert!(keys(&query).contains(&"start_date_to"));
        assert!(!keys(&query).contains(&"start_date_from"));
    }

    #[test]
    fn unknown_sort_status_and_paging_fall_back() {
        let query = to_api_query(
            &params(&[
                ("sort", "password"),
                ("dir", "sideways"),
                ("status", "deleted"),
                ("page", "0"),
                ("limit", "-5"),
            ]),
            &profiles::CAMPAIGNS,
        );
        assert_eq!(
            query,
            vec![
                ("sort_by".to_string(), "start_date".to_string()),
                ("sort_dir".to_string(), "desc".to_string()),
            ]
        );
    }
}
