// src/models/favorite.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Property;

/// Favorite from /favorites, with the property pre-joined
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i64,
    pub property_id: i64,
    pub property: Option<Property>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of PUT /favorites: the full new selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFavoritesRequest {
    pub property_ids: Vec<i64>,
}

/// Body of POST /favorites
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFavoriteRequest {
    pub property_id: i64,
}
