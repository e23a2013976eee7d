//! Authentication gate
//!
//! `AuthUser` is an axum extractor: adding it to a handler's arguments makes
//! the route protected. The gate runs once per request:
//!
//! 1. find the token (session cookie first, then `Authorization: Bearer`)
//! 2. verify signature and algorithm
//! 3. check expiry
//! 4. resolve the user through the credential store
//!
//! Each failed step is a 401 with its own reason code.

use crate::auth::jwt::{JwtService, TokenError};
use crate::error::ApiError;
use crate::repositories::{CredentialStore, UserRecord};
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use axum_extra::extract::CookieJar;
use cafetify_shared::AuthError;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "Authorization";

/// Authenticated user resolved from the session token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: UserRecord,
}

impl AuthUser {
    /// ID of the authenticated user
    #[inline]
    pub fn id(&self) -> i64 {
        self.user.id
    }
}

/// Pull the session token from the cookie or the `Authorization` header.
///
/// An empty cookie falls through to the header. A `Bearer ` prefix and
/// surrounding whitespace are stripped from the header value.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    let header = headers.get(AUTHORIZATION)?.to_str().ok()?.trim_start();
    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Run the gate for an already-extracted token
pub async fn authenticate(
    store: &dyn CredentialStore,
    jwt: &JwtService,
    token: Option<&str>,
    now: DateTime<Utc>,
) -> Result<UserRecord, ApiError> {
    let token = token.ok_or(AuthError::MissingToken)?;

    let claims = jwt.verify(token, now).map_err(|e| {
        warn!(error = %e, "Rejected session token");
        match e {
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::BadSignature | TokenError::Malformed => AuthError::InvalidToken,
        }
    })?;

    let user_id = claims.user_id().ok_or(AuthError::InvalidToken)?;

    let user = store.find_by_id(user_id).await?.ok_or_else(|| {
        warn!(user_id, "Valid token for unknown user");
        AuthError::UserNotFound
    })?;

    debug!(user_id, "Request authenticated");
    Ok(user)
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let token = extract_token(&parts.headers);

        let user = authenticate(
            app_state.users(),
            app_state.jwt(),
            token.as_deref(),
            Utc::now(),
        )
        .await?;

        Ok(AuthUser { user })
    }
}
