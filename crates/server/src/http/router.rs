use super::handlers::{admin, comments, pages};
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState, allowed_origins: &str) -> Router {
    let cors = if allowed_origins == "*" {
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST])
            .allow_origin(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse::<HeaderValue>().ok())
            .collect();

        if origins.is_empty() {
            tracing::warn!("CORS config is invalid or empty, falling back to allow ANY.");
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_origin(Any)
                .allow_headers(Any)
        } else {
            tracing::info!("CORS enabled for origins: {:?}", origins);
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_origin(origins)
                .allow_headers(Any)
        }
    };

    Router::new()
        .route("/api/recent-comments", get(comments::recent))
        .route("/api/admin/pages", post(admin::create_page))
        .route(
            "/api/admin/pages/:id/comments-enabled",
            post(admin::set_comments_enabled),
        )
        .route("/api/admin/comments/:id/approve", post(admin::approve_comment))
        .route("/api/admin/comments/:id", delete(admin::delete_comment))
        // everything else is a page URL, a paginated variant of one, or a
        // comment POST target
        .route("/*path", get(pages::show).post(comments::submit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
