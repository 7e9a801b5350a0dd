// src/services/session.rs
// DOCUMENTATION: Server-side "session storage" and "local storage"
// PURPOSE: Key/value records per browser tab session (sid cookie) and per device (did cookie)

use crate::models::{Role, User};
use crate::services::cache::TtlCache;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

/// Key of the cached user object
pub const USER_KEY: &str = "user";
/// Key of the dashboard role
pub const ROLE_KEY: &str = "role";
/// Key of the tracking visitor id (same key in both stores)
pub const VISITOR_ID_KEY: &str = "visitor_id";

/// One key/value record, the server-side twin of a browser storage area
#[derive(Debug, Clone, Default, Serialize)]
pub struct KvStore {
    entries: HashMap<String, String>,
    #[serde(skip)]
    dirty: bool,
}

impl KvStore {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
        self.dirty = true;
    }

    pub fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

/// Everything one request knows about its browser
#[derive(Debug, Clone)]
pub struct BrowserState {
    pub session_id: String,
    pub device_id: String,
    /// Cookies must be (re)issued because an id was just minted
    pub is_new: bool,
    pub session: KvStore,
    pub local: KvStore,
}

impl BrowserState {
    /// Bearer token stored under the configured key
    pub fn token(&self, token_key: &str) -> Option<String> {
        self.session.get(token_key).map(str::to_string)
    }

    pub fn role(&self) -> Option<Role> {
        self.session.get(ROLE_KEY).and_then(Role::parse)
    }

    pub fn user(&self) -> Option<User> {
        self.session
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str(raw).ok())
    }

    /// Store the outcome of a successful sign-in
    pub fn sign_in(&mut self, token_key: &str, token: &str, user: &User) {
        self.session.set(token_key, token);
        if let Ok(raw) = serde_json::to_string(user) {
            self.session.set(USER_KEY, raw);
        }
        match user.role() {
            Some(role) => self.session.set(ROLE_KEY, role.as_str()),
            None => self.session.remove(ROLE_KEY),
        }
    }

    /// Forget the signed-in user; the visitor id survives
    pub fn sign_out(&mut self, token_key: &str) {
        self.session.remove(token_key);
        self.session.remove(USER_KEY);
        self.session.remove(ROLE_KEY);
    }
}

/// Session and device records keyed by their cookie ids
#[derive(Clone)]
pub struct SessionStore {
    sessions: TtlCache<KvStore>,
    devices: TtlCache<KvStore>,
    session_ttl: Duration,
    device_ttl: Duration,
}

impl SessionStore {
    pub fn new(session_ttl_seconds: u64, device_ttl_seconds: u64) -> Self {
        Self {
            sessions: TtlCache::new(session_ttl_seconds),
            devices: TtlCache::new(device_ttl_seconds),
            session_ttl: Duration::from_secs(session_ttl_seconds),
            device_ttl: Duration::from_secs(device_ttl_seconds),
        }
    }

    /// Load (or mint) the records for the given cookie values
    pub async fn load(&self, session_id: Option<&str>, device_id: Option<&str>) -> BrowserState {
        let mut is_new = false;

        let (session_id, session) = match session_id {
            Some(id) => match self.sessions.get(id).await {
                Some(record) => (id.to_string(), record),
                None => {
                    is_new = true;
                    (Uuid::new_v4().to_string(), KvStore::default())
                }
            },
            None => {
                is_new = true;
                (Uuid::new_v4().to_string(), KvStore::default())
            }
        };

        let (device_id, local) = match device_id {
            Some(id) => (
                id.to_string(),
                self.devices.get(id).await.unwrap_or_default(),
            ),
            None => {
                is_new = true;
                (Uuid::new_v4().to_string(), KvStore::default())
            }
        };

        BrowserState {
            session_id,
            device_id,
            is_new,
            session,
            local,
        }
    }

    /// Move the session record to a freshly minted id
    /// DOCUMENTATION: Called before a sign-in stores a token, so a session id
    /// handed out while anonymous never becomes an authenticated one.
    pub async fn rotate(&self, state: &mut BrowserState) {
        let previous = std::mem::replace(&mut state.session_id, Uuid::new_v4().to_string());
        self.sessions.remove(&previous).await;
        state.is_new = true;
        log::debug!("Rotated session id");
    }

    /// Write back whatever changed; sessions slide on every write
    pub async fn persist(&self, state: &mut BrowserState) {
        if state.session.is_dirty() || state.is_new {
            state.session.mark_clean();
            self.sessions
                .set_with_ttl(state.session_id.clone(), state.session.clone(), self.session_ttl)
                .await;
        }
        if state.local.is_dirty() {
            state.local.mark_clean();
            self.devices
                .set_with_ttl(state.device_id.clone(), state.local.clone(), self.device_ttl)
                .await;
        }
    }

    pub fn sessions(&self) -> TtlCache<KvStore> {
        self.sessions.clone()
    }

    pub fn devices(&self) -> TtlCache<KvStore> {
        self.devices.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> User {
        serde_json::from_value(serde_json::json!({"id": 1, "name": "هند", "role": role})).unwrap()
    }

    #[tokio::test]
    async fn mints_ids_for_unknown_browsers() {
        let store = SessionStore::new(60, 60);
        let state = store.load(Some("stale"), None).await;
        assert!(state.is_new);
        assert_ne!(state.session_id, "stale");
        assert!(!state.device_id.is_empty());
    }

    #[tokio::test]
    async fn rotation_moves_the_record_to_a_new_id() {
        let store = SessionStore::new(60, 60);
        let mut state = store.load(None, None).await;
        state.session.set(VISITOR_ID_KEY, "v-1");
        store.persist(&mut state).await;
        let old_id = state.session_id.clone();

        let mut state = store.load(Some(old_id.as_str()), Some(state.device_id.as_str())).await;
        store.rotate(&mut state).await;
        store.persist(&mut state).await;

        assert_ne!(state.session_id, old_id);
        assert!(store.sessions().get(&old_id).await.is_none());
        let moved = store.sessions().get(&state.session_id).await.unwrap();
        assert_eq!(moved.get(VISITOR_ID_KEY), Some("v-1"));
    }

    #[tokio::test]
    async fn persists_and_reloads() {
        let store = SessionStore::new(60, 60);
        let mut state = store.load(None, None).await;
        state.sign_in("auth_token", "tok", &user("agent"));
        state.local.set(VISITOR_ID_KEY, "v-1");
        store.persist(&mut state).await;

        let again = store
            .load(Some(&state.session_id), Some(&state.device_id))
            .await;
        assert!(!again.is_new);
        assert_eq!(again.token("auth_token").as_deref(), Some("tok"));
        assert_eq!(again.role(), Some(Role::Agent));
        assert_eq!(again.user().map(|u| u.name), Some("هند".to_string()));
        assert_eq!(again.local.get(VISITOR_ID_KEY), Some("v-1"));
    }

    #[tokio::test]
    async fn sign_out_keeps_visitor_id() {
        let mut state = SessionStore::new(60, 60).load(None, None).await;
        state.sign_in("auth_token", "tok", &user("admin"));
        state.session.set(VISITOR_ID_KEY, "v-2");
        state.sign_out("auth_token");

        assert!(state.token("auth_token").is_none());
        assert!(state.role().is_none());
        assert_eq!(state.session.get(VISITOR_ID_KEY), Some("v-2"));
    }
}
