//! API request and response types

use crate::models::{Cafe, PersonalRating, Tag, User};
use serde::{Deserialize, Serialize};

/// Default page size for cafe listings
pub const DEFAULT_PAGE_LIMIT: i64 = 50;
/// Largest page a client may request
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Account Types
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response; the token is also set as a cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// Current user's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: User,
}

/// Profile update; empty or missing fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Profile update response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileResponse {
    pub message: String,
    pub user: User,
}

/// Password change request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

// ============================================================================
// Cafe Types
// ============================================================================

/// Create a cafe together with the creator's first rating
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCafeRequest {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    pub ambience_rating: i32,
    pub service_rating: i32,
    pub price_level: String,
    pub menu_variety: String,
    #[serde(default)]
    pub notes: String,
    /// Comma-separated tag names, e.g. "Cozy, WiFi, Quiet"
    #[serde(default)]
    pub tags_input: Option<String>,
}

/// Partial cafe update; also updates the caller's own rating
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCafeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub ambience_rating: Option<i32>,
    #[serde(default)]
    pub service_rating: Option<i32>,
    #[serde(default)]
    pub price_level: Option<String>,
    #[serde(default)]
    pub menu_variety: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags_input: Option<String>,
}

/// Add a rating to an existing cafe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateCafeRequest {
    pub ambience_rating: i32,
    pub service_rating: i32,
    pub price_level: String,
    pub menu_variety: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags_input: Option<String>,
}

/// Cafe listing filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CafeListQuery {
    /// Exact tag name
    #[serde(default)]
    pub tag: Option<String>,
    /// Case-insensitive substring of the cafe name
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Normalized listing filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CafeFilter {
    pub tag: Option<String>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl CafeListQuery {
    /// Blank filters are dropped, limit is clamped to 1..=100, offset to >= 0
    pub fn normalize(self) -> CafeFilter {
        let non_blank = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        CafeFilter {
            tag: non_blank(self.tag),
            search: non_blank(self.search),
            limit: self
                .limit
                .unwrap_or(DEFAULT_PAGE_LIMIT)
                .clamp(1, MAX_PAGE_LIMIT),
            offset: self.offset.unwrap_or(0).max(0),
        }
    }
}

/// Single cafe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CafeResponse {
    pub cafe: Cafe,
}

/// Create/update acknowledgement with the resulting cafe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CafeMutationResponse {
    pub message: String,
    pub cafe: Cafe,
}

/// Paginated cafe listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CafeListResponse {
    pub cafes: Vec<Cafe>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Rating acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingResponse {
    pub message: String,
    pub rating: PersonalRating,
}

/// All known tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagListResponse {
    pub tags: Vec<Tag>,
}
