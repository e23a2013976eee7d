//! Cafe routes
//!
//! Listing and reading are public; writes need a session, and update and
//! delete additionally need ownership of the cafe.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::CafeService;
use crate::state::AppState;
use super::extract::{AppJson, AppPath, AppQuery};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use cafetify_shared::{
    CafeListQuery, CafeListResponse, CafeMutationResponse, CafeResponse, CreateCafeRequest,
    MessageResponse, RateCafeRequest, RatingResponse, UpdateCafeRequest,
};

/// Create cafe routes
pub fn cafe_routes() -> Router<AppState> {
    Router::new()
        .route("/cafes", get(list_cafes).post(create_cafe))
        .route(
            "/cafes/:id",
            get(get_cafe).put(update_cafe).delete(delete_cafe),
        )
        .route("/cafes/:id/rate", post(rate_cafe))
}

/// POST /cafes
async fn create_cafe(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<CreateCafeRequest>,
) -> ApiResult<Json<CafeMutationResponse>> {
    let cafe = CafeService::create(state.db(), auth.id(), req).await?;
    Ok(Json(CafeMutationResponse {
        message: "Cafe added successfully".to_string(),
        cafe,
    }))
}

/// GET /cafes?tag=&search=&limit=&offset=
async fn list_cafes(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CafeListQuery>,
) -> ApiResult<Json<CafeListResponse>> {
    let response = CafeService::list(state.db(), query).await?;
    Ok(Json(response))
}

/// GET /cafes/:id
async fn get_cafe(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<CafeResponse>> {
    let cafe = CafeService::get(state.db(), id).await?;
    Ok(Json(CafeResponse { cafe }))
}

/// PUT /cafes/:id
async fn update_cafe(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateCafeRequest>,
) -> ApiResult<Json<CafeMutationResponse>> {
    let cafe = CafeService::update(state.db(), auth.id(), id, req).await?;
    Ok(Json(CafeMutationResponse {
        message: "Cafe updated successfully".to_string(),
        cafe,
    }))
}

/// DELETE /cafes/:id
async fn delete_cafe(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    CafeService::delete(state.db(), auth.id(), id).await?;
    Ok(Json(MessageResponse::new("Cafe deleted successfully")))
}

/// POST /cafes/:id/rate
async fn rate_cafe(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<RateCafeRequest>,
) -> ApiResult<Json<RatingResponse>> {
    let rating = CafeService::rate(state.db(), auth.id(), id, req).await?;
    Ok(Json(RatingResponse {
        message: "Rating added successfully".to_string(),
        rating,
    }))
}
