// src/models/notification.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub body: Option<String>,
    pub link: Option<String>,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationRow {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub link: Option<String>,
    pub is_read: bool,
    pub created_at: Option<String>,
}

impl Notification {
    pub fn to_row(&self) -> NotificationRow {
        NotificationRow {
            id: self.id,
            title: self.title.clone(),
            body: self.body.clone().unwrap_or_default(),
            link: self.link.clone(),
            is_read: self.read_at.is_some(),
            created_at: self
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string()),
        }
    }
}
