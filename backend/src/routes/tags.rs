//! Tag listing

use crate::error::ApiResult;
use crate::repositories::TagRepository;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use cafetify_shared::TagListResponse;

/// Create tag routes
pub fn tag_routes() -> Router<AppState> {
    Router::new().route("/tags", get(list_tags))
}

/// GET /tags
async fn list_tags(State(state): State<AppState>) -> ApiResult<Json<TagListResponse>> {
    let tags = TagRepository::list_all(state.db())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(TagListResponse { tags }))
}
