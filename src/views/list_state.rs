// src/views/list_state.rs
// DOCUMENTATION: State of a paginated list page
// PURPOSE: Load one page of rows with abort-on-supersede semantics

use crate::errors::PortalError;
use crate::models::Page;
use futures::future::{AbortHandle, AbortRegistration, Abortable, Aborted};
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// What a list page renders
#[derive(Debug, Clone, Serialize)]
pub struct ListState<R> {
    pub rows: Vec<R>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    /// Localized message when the load failed
    pub error: Option<String>,
    /// Link that reloads the same filters
    pub retry_href: Option<String>,
}

impl<R> ListState<R> {
    pub fn empty() -> Self {
        ListState {
            rows: Vec::new(),
            total: 0,
            page: 1,
            per_page: 0,
            error: None,
            retry_href: None,
        }
    }

    fn failed(error: &PortalError, retry_href: &str) -> Self {
        ListState {
            error: Some(error.localized_message()),
            retry_href: Some(retry_href.to_string()),
            ..Self::empty()
        }
    }
}

/// Await `fetch` unless it gets aborted through `registration`
/// DOCUMENTATION: An aborted load yields no rows and no error.
pub async fn load_list<T, R, Fut, F>(
    fetch: Fut,
    registration: AbortRegistration,
    retry_href: &str,
    map: F,
) -> ListState<R>
where
    Fut: Future<Output = Result<Page<T>, PortalError>>,
    F: FnMut(T) -> R,
{
    match Abortable::new(fetch, registration).await {
        Ok(Ok(page)) => ListState {
            total: page.total_records,
            page: page.current_page,
            per_page: page.per_page,
            rows: page.records.into_iter().map(map).collect(),
            error: None,
            retry_href: None,
        },
        Err(Aborted) => {
            log::debug!("List load aborted");
            ListState::empty()
        }
        Ok(Err(e)) => {
            log::error!("List load failed: {}", e);
            ListState::failed(&e, retry_href)
        }
    }
}

/// Outstanding list loads, one per (session, resource)
#[derive(Clone, Default)]
pub struct InFlight {
    handles: Arc<Mutex<HashMap<String, (u64, AbortHandle)>>>,
    next_id: Arc<AtomicU64>,
}

/// Keeps a load registered while it runs; dropping it unregisters
/// DOCUMENTATION: Dropped on completion and also when actix drops the handler
/// future of a disconnected client.
pub struct InFlightGuard {
    registry: InFlight,
    key: String,
    id: u64,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry.release(&self.key, self.id);
    }
}

impl InFlight {
    /// Register a new load under `key`, aborting the one it supersedes
    pub fn begin(&self, key: impl Into<String>) -> (InFlightGuard, AbortRegistration) {
        let key = key.into();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (handle, registration) = AbortHandle::new_pair();

        if let Ok(mut handles) = self.handles.lock() {
            if let Some((_, previous)) = handles.insert(key.clone(), (id, handle)) {
                log::debug!("Superseding in-flight load for {}", key);
                previous.abort();
            }
        }

        let guard = InFlightGuard {
            registry: self.clone(),
            key,
            id,
        };
        (guard, registration)
    }

    /// Drop the registration unless a newer load already replaced it
    fn release(&self, key: &str, id: u64) {
        if let Ok(mut handles) = self.handles.lock() {
            if handles.get(key).map(|(current, _)| *current) == Some(id) {
                handles.remove(key);
            }
        }
    }

    /// Loads currently registered
    pub fn len(&self) -> usize {
        self.handles.lock().map(|h| h.len()).unwrap_or(0)
    }

    /// begin + load_list; the guard unregisters however the load ends
    pub async fn run<T, R, Fut, F>(
        &self,
        key: impl Into<String>,
        fetch: Fut,
        retry_href: &str,
        map: F,
    ) -> ListState<R>
    where
        Fut: Future<Output = Result<Page<T>, PortalError>>,
        F: FnMut(T) -> R,
    {
        let (_guard, registration) = self.begin(key);
        load_list(fetch, registration, retry_href, map).await
    }
}
