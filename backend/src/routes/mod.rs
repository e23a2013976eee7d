//! Route definitions for the Cafetify API
//!
//! All routes are mounted at the root. Middleware is applied here once.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod cafes;
mod extract;
mod health;
mod profile;
mod tags;

#[cfg(test)]
mod auth_tests;

pub use auth::auth_routes;
pub use cafes::cafe_routes;
pub use health::health_routes;
pub use profile::profile_routes;
pub use tags::tag_routes;

/// Create the application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::health_routes())
        .merge(auth::auth_routes())
        .merge(profile::profile_routes())
        .merge(cafes::cafe_routes())
        .merge(tags::tag_routes())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
