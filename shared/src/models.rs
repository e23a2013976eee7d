//! Data models for the Cafetify application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public view of a user account; the password digest never leaves the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A cafe with its ratings and tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cafe {
    pub id: i64,
    /// Owner of the record; only this user may edit or delete it
    pub user_id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub ratings: Vec<PersonalRating>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One user's impression of a cafe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalRating {
    pub id: i64,
    pub user_id: i64,
    pub cafe_id: i64,
    pub ambience_rating: i32,
    pub service_rating: i32,
    pub price_level: String,
    pub menu_variety: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Free-text label, unique by name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}
