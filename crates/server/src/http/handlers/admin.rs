use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use domain::{Comment, Page};
use serde::Deserialize;

use crate::state::AppState;

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or((
            StatusCode::UNAUTHORIZED,
            "Missing Authorization header".to_string(),
        ))?;
    let expected_token = format!("Bearer {}", state.admin_token);
    if auth_header != expected_token {
        return Err((StatusCode::FORBIDDEN, "Invalid Admin Token".to_string()));
    }
    Ok(())
}

#[derive(Deserialize)]
pub struct CreatePageRequest {
    pub slug: String,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_true")]
    pub comments_enabled: bool,
}

fn default_true() -> bool {
    true
}

/// Register an external page so comments can hang off it.
pub async fn create_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreatePageRequest>,
) -> Result<Json<Page>, (StatusCode, String)> {
    authorize(&state, &headers)?;

    if !payload.url.starts_with('/') || !payload.url.ends_with('/') {
        return Err((
            StatusCode::BAD_REQUEST,
            "Page URL must start and end with '/'".to_string(),
        ));
    }

    let page = state
        .db
        .create_page(&payload.slug, &payload.url, &payload.title, payload.comments_enabled)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(page))
}

#[derive(Deserialize)]
pub struct CommentsEnabledRequest {
    pub enabled: bool,
}

/// Open or close a page for new comments.
pub async fn set_comments_enabled(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(page_id): Path<i64>,
    Json(payload): Json<CommentsEnabledRequest>,
) -> Result<Json<Page>, (StatusCode, String)> {
    authorize(&state, &headers)?;

    let page = state
        .db
        .set_comments_enabled(page_id, payload.enabled)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((StatusCode::NOT_FOUND, "Page not found".to_string()))?;
    Ok(Json(page))
}

pub async fn approve_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comment_id): Path<i64>,
) -> Result<Json<Comment>, (StatusCode, String)> {
    authorize(&state, &headers)?;

    let comment = state
        .db
        .set_approved(comment_id, true)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((StatusCode::NOT_FOUND, "Comment not found".to_string()))?;
    Ok(Json(comment))
}

/// Moderation rejection is deletion; there is no distinct rejected state.
pub async fn delete_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comment_id): Path<i64>,
) -> Result<Json<&'static str>, (StatusCode, String)> {
    authorize(&state, &headers)?;

    let deleted = state
        .db
        .delete_comment(comment_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Comment not found".to_string()));
    }
    Ok(Json("Deleted"))
}
