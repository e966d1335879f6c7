use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::Html,
};
use domain::pagination::{self, Overrides};
use render::{CommentWindow, PageContext, RenderContext};

use super::error_response;
use crate::state::AppState;
use crate::view;

/// GET for a page URL or its paginated variant: resolve the window from the
/// path, fetch the slice, render.
pub async fn show(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Html<String>, (StatusCode, String)> {
    let path = uri.path();
    let page = state
        .db
        .find_page_by_request_path(path, &state.comments.pagination_segment)
        .await
        .map_err(|e| error_response(e.into()))?
        .ok_or((StatusCode::NOT_FOUND, "Page not found".to_string()))?;

    render_page_response(&state, PageContext::new(page), path).await
}

/// Shared terminal render for GETs and non-redirecting POST outcomes. The
/// request path carries the page number; `page_ctx` carries any
/// request-scoped selected/failed comment.
pub(crate) async fn render_page_response(
    state: &AppState,
    page_ctx: PageContext,
    request_path: &str,
) -> Result<Html<String>, (StatusCode, String)> {
    let spec = pagination::resolve(
        &Overrides::default(),
        request_path,
        &page_ctx.page.url,
        &state.pagination_defaults(),
    )
    .map_err(error_response)?;

    let comments = state
        .db
        .approved_window(page_ctx.page.id, &spec)
        .await
        .map_err(|e| error_response(e.into()))?;
    let total = state
        .db
        .count_approved(page_ctx.page.id)
        .await
        .map_err(|e| error_response(e.into()))?;

    let ctx = RenderContext {
        page_ctx,
        window: CommentWindow {
            spec,
            comments,
            total,
        },
        settings: state.render_settings(),
    };

    Ok(Html(view::render_page(&ctx, &state.comments)))
}
