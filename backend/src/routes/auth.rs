//! Authentication routes
//!
//! Registration, login and logout. Login sets the session cookie and also
//! returns the token in the body for clients that prefer the header.

use crate::auth::SESSION_COOKIE;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use super::extract::AppJson;
use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cafetify_shared::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use chrono::Utc;

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

/// POST /register
async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> ApiResult<Json<MessageResponse>> {
    UserService::register(state.users(), req).await?;
    Ok(Json(MessageResponse::new("Registration successful")))
}

/// POST /login
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(req): AppJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let token = UserService::login(
        state.users(),
        state.jwt(),
        &req.email,
        &req.password,
        Utc::now(),
    )
    .await?;

    let jar = jar.add(session_cookie(token.clone(), state.jwt().session_ttl_secs()));

    Ok((
        jar,
        Json(LoginResponse {
            message: "Login successful".to_string(),
            token,
        }),
    ))
}

/// POST /logout
///
/// Tokens are stateless, so this only tells the browser to drop the cookie.
async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Json(MessageResponse::new("Logout successful")))
}

fn session_cookie(token: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}
