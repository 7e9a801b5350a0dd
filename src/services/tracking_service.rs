// src/services/tracking_service.rs
// DOCUMENTATION: Referral / UTM tracking capture
// PURPOSE: Record the first attributed visit of a browser and remember its visitor id

use crate::errors::PortalError;
use crate::models::{VisitPayload, VisitResponse};
use crate::services::session::{KvStore, VISITOR_ID_KEY};
use crate::services::ApiClient;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Url;
use serde::Serialize;
use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::sync::Arc;

/// Query parameters that attribute a visit
pub const TRACKING_PARAMS: [&str; 7] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "ref",
    "campaign",
];

/// Base used to parse path-only URLs
const RELATIVE_BASE: &str = "http://relative.invalid";

/// Result of a capture attempt
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CaptureOutcome {
    /// Visitor id now known for this browser, if any
    pub visitor_id: Option<String>,
    /// URL the browser should show (tracking keys stripped after a recorded visit)
    pub clean_url: String,
    /// Whether a visit was POSTed
    pub tracked: bool,
}

/// Tracking service
/// DOCUMENTATION: One instance per server; the limiter caps outbound visit POSTs
#[derive(Clone)]
pub struct TrackingService {
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl TrackingService {
    pub fn new(rate_per_second: u32) -> Self {
        let rate = NonZeroU32::new(rate_per_second).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(rate))),
        }
    }

    /// Recognized tracking parameters present on the URL, empty values ignored
    pub fn recognized_params(url: &Url) -> BTreeMap<String, String> {
        url.query_pairs()
            .filter(|(key, value)| is_tracking_key(key) && !value.trim().is_empty())
            .map(|(key, value)| (key.into_owned(), value.trim().to_string()))
            .collect()
    }

    /// Same URL without the recognized tracking parameters
    pub fn strip_params(url: &Url) -> Url {
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| !is_tracking_key(key))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut stripped = url.clone();
        if kept.is_empty() {
            stripped.set_query(None);
        } else {
            stripped.query_pairs_mut().clear().extend_pairs(kept);
        }
        stripped
    }

    /// Run the capture for one page view
    /// DOCUMENTATION:
    /// 1. A stored visitor id (session, then local) is reused; nothing is POSTed.
    /// 2. Without recognized parameters nothing is POSTed.
    /// 3. Otherwise the visit is POSTed, the returned id is stored in both
    ///    storage areas and the parameters are stripped from the URL.
    pub async fn capture(
        &self,
        api: &ApiClient,
        page_url: &str,
        referrer: Option<&str>,
        session: &mut KvStore,
        local: &mut KvStore,
    ) -> Result<CaptureOutcome, PortalError> {
        if let Some(visitor_id) = Self::stored_visitor_id(session, local) {
            // Fill whichever store lacks it
            if session.get(VISITOR_ID_KEY).is_none() {
                session.set(VISITOR_ID_KEY, visitor_id.clone());
            }
            if local.get(VISITOR_ID_KEY).is_none() {
                local.set(VISITOR_ID_KEY, visitor_id.clone());
            }
            return Ok(CaptureOutcome {
                visitor_id: Some(visitor_id),
                clean_url: page_url.to_string(),
                tracked: false,
            });
        }

        let (url, is_relative) = parse_page_url(page_url)?;
        let params = Self::recognized_params(&url);
        if params.is_empty() {
            return Ok(CaptureOutcome {
                visitor_id: None,
                clean_url: page_url.to_string(),
                tracked: false,
            });
        }

        if self.limiter.check().is_err() {
            log::warn!("Tracking rate limit reached, skipping capture for {}", page_url);
            return Ok(CaptureOutcome {
                visitor_id: None,
                clean_url: page_url.to_string(),
                tracked: false,
            });
        }

        let clean = Self::strip_params(&url);
        let payload = VisitPayload {
            params,
            landing_page: render_url(&clean, is_relative),
            referrer: referrer.filter(|r| !r.is_empty()).map(str::to_string),
        };

        log::info!("Recording attributed visit: {:?}", payload.params);
        let response: VisitResponse = api.post("/traffic/visits", &payload).await?;
        let visitor_id = response.visitor_id;

        session.set(VISITOR_ID_KEY, visitor_id.clone());
        local.set(VISITOR_ID_KEY, visitor_id.clone());

        Ok(CaptureOutcome {
            visitor_id: Some(visitor_id),
            clean_url: render_url(&clean, is_relative),
            tracked: true,
        })
    }

    fn stored_visitor_id(session: &KvStore, local: &KvStore) -> Option<String> {
        session
            .get(VISITOR_ID_KEY)
            .or_else(|| local.get(VISITOR_ID_KEY))
            .filter(|id| !id.trim().is_empty())
            .map(str::to_string)
    }
}

fn is_tracking_key(key: &str) -> bool {
    TRACKING_PARAMS.contains(&key)
}

fn parse_page_url(page_url: &str) -> Result<(Url, bool), PortalError> {
    if let Ok(url) = Url::parse(page_url) {
        return Ok((url, false));
    }
    let base = Url::parse(RELATIVE_BASE)
        .map_err(|e| PortalError::InvalidInput(format!("Invalid base URL: {}", e)))?;
    base.join(page_url)
        .map(|url| (url, true))
        .map_err(|e| PortalError::InvalidInput(format!("Invalid page URL: {}", e)))
}

/// Relative URLs go back out as path + query + fragment
fn render_url(url: &Url, is_relative: bool) -> String {
    if !is_relative {
        return url.to_string();
    }
    let mut out = url.path().to_string();
    if let Some(query) = url.query() {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = url.fragment() {
        out.push('#');
        out.push_str(fragment);
    }
    out
}
