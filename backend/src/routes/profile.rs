//! Profile and password routes for the signed-in user

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use super::extract::AppJson;
use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use cafetify_shared::{
    ChangePasswordRequest, MessageResponse, ProfileResponse, UpdateProfileRequest,
    UpdateProfileResponse,
};

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/change-password", put(change_password))
}

/// GET /profile
async fn get_profile(auth: AuthUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        user: auth.user.to_user(),
    })
}

/// PUT /profile
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<UpdateProfileRequest>,
) -> ApiResult<Json<UpdateProfileResponse>> {
    let user = UserService::update_profile(state.users(), auth.id(), req).await?;
    Ok(Json(UpdateProfileResponse {
        message: "Profile updated".to_string(),
        user: user.to_user(),
    }))
}

/// PUT /change-password
async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    UserService::change_password(state.users(), &auth.user, req.old_password, req.new_password)
        .await?;
    Ok(Json(MessageResponse::new("Password changed successfully")))
}
