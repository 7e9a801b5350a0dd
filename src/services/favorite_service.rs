// src/services/favorite_service.rs
// DOCUMENTATION: Customer favorites
// PURPOSE: Load favorites and save a new selection as a set of toggle calls

use crate::errors::PortalError;
use crate::models::{AddFavoriteRequest, Favorite, Page};
use crate::services::ApiClient;
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeSet;

/// Set difference between the stored favorites and a new selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteDiff {
    /// In the selection, not yet stored
    pub added: Vec<i64>,
    /// Stored, dropped from the selection
    pub removed: Vec<i64>,
}

impl FavoriteDiff {
    pub fn between(previous: &[i64], selection: &[i64]) -> Self {
        let previous: BTreeSet<i64> = previous.iter().copied().collect();
        let selection: BTreeSet<i64> = selection.iter().copied().collect();

        FavoriteDiff {
            added: selection.difference(&previous).copied().collect(),
            removed: previous.difference(&selection).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// One toggle that did not go through
#[derive(Debug, Clone, Serialize)]
pub struct FailedToggle {
    pub property_id: i64,
    pub favorite: bool,
    pub message: String,
}

/// Outcome of a save
#[derive(Debug, Clone, Serialize)]
pub struct SaveReport {
    pub added: Vec<i64>,
    pub removed: Vec<i64>,
    pub failed: Vec<FailedToggle>,
}

pub struct FavoriteService;

impl FavoriteService {
    /// Favorites of the signed-in customer, properties pre-joined
    pub async fn list(api: &ApiClient) -> Result<Vec<Favorite>, PortalError> {
        let query = vec![("per_page".to_string(), "100".to_string())];
        let page: Page<Favorite> = api.get_page("/favorites", &query).await?;
        Ok(page.records)
    }

    /// Property ids currently stored as favorites
    pub async fn ids(api: &ApiClient) -> Result<Vec<i64>, PortalError> {
        let favorites = Self::list(api).await?;
        Ok(favorites.iter().map(|f| f.property_id).collect())
    }

    /// Mark (true) or unmark (false) one property
    pub async fn toggle(
        api: &ApiClient,
        property_id: i64,
        favorite: bool,
    ) -> Result<(), PortalError> {
        if favorite {
            api.post_action("/favorites", &AddFavoriteRequest { property_id })
                .await
        } else {
            api.delete(&format!("/favorites/{}", property_id)).await
        }
    }

    /// Save a new selection
    /// DOCUMENTATION: One toggle(true) per added id, one toggle(false) per
    /// removed id, all in flight together. Unchanged ids cause no call.
    /// A selection above `limit` is rejected before anything is sent.
    pub async fn save(
        api: &ApiClient,
        previous: &[i64],
        selection: &[i64],
        limit: usize,
    ) -> Result<SaveReport, PortalError> {
        let distinct: BTreeSet<i64> = selection.iter().copied().collect();
        if distinct.len() > limit {
            return Err(PortalError::ValidationError(format!(
                "At most {} favorites are allowed, got {}",
                limit,
                distinct.len()
            )));
        }

        let diff = FavoriteDiff::between(previous, selection);
        if diff.is_empty() {
            log::debug!("Favorites unchanged, nothing to save");
            return Ok(SaveReport {
                added: Vec::new(),
                removed: Vec::new(),
                failed: Vec::new(),
            });
        }

        log::info!(
            "Saving favorites: {} to add, {} to remove",
            diff.added.len(),
            diff.removed.len()
        );

        let changes: Vec<(i64, bool)> = diff
            .added
            .iter()
            .map(|id| (*id, true))
            .chain(diff.removed.iter().map(|id| (*id, false)))
            .collect();

        let results = join_all(
            changes
                .iter()
                .map(|(id, favorite)| Self::toggle(api, *id, *favorite)),
        )
        .await;

        let mut report = SaveReport {
            added: Vec::new(),
            removed: Vec::new(),
            failed: Vec::new(),
        };

        for ((property_id, favorite), result) in changes.into_iter().zip(results) {
            match result {
                Ok(()) if favorite => report.added.push(property_id),
                Ok(()) => report.removed.push(property_id),
                Err(e) => {
                    log::warn!("Favorite toggle failed for {}: {}", property_id, e);
                    report.failed.push(FailedToggle {
                        property_id,
                        favorite,
                        message: e.localized_message(),
                    });
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn diff_is_plain_set_difference() {
        let diff = FavoriteDiff::between(&[1, 2, 3], &[3, 4, 4, 5]);
        assert_eq!(diff.added, vec![4, 5]);
        assert_eq!(diff.removed, vec![1, 2]);
        assert!(FavoriteDiff::between(&[2, 1], &[1, 2]).is_empty());
    }

    #[tokio::test]
    async fn save_toggles_only_changed_ids() {
        let server = MockServer::start().await;

        for id in [4, 5] {
            Mock::given(method("POST"))
                .and(path("/favorites"))
                .and(body_json(json!({ "property_id": id })))
                .respond_with(ResponseTemplate::new(201))
                .expect(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("DELETE"))
            .and(path("/favorites/1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        // 3 is unchanged and must not be touched
        Mock::given(method("DELETE"))
            .and(path("/favorites/3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let api = ApiClient::new(Client::new(), server.uri());
        let report = FavoriteService::save(&api, &[1, 3], &[3, 4, 5], 5)
            .await
            .unwrap();

        assert_eq!(report.added, vec![4, 5]);
        assert_eq!(report.removed, vec![1]);
        assert!(report.failed.is_empty());
    }

    #[tokio::test]
    async fn save_reports_failed_toggles() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/favorites"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(json!({"message": "العقار غير متاح"})),
            )
            .mount(&server)
            .await;

        let api = ApiClient::new(Client::new(), server.uri());
        let report = FavoriteService::save(&api, &[], &[9], 5).await.unwrap();

        assert!(report.added.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].message, "العقار غير متاح");
    }

    #[tokio::test]
    async fn save_rejects_selection_over_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let api = ApiClient::new(Client::new(), server.uri());
        let err = FavoriteService::save(&api, &[], &[1, 2, 3, 4, 5, 6], 5)
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::ValidationError(_)));
    }
}
