use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use domain::{Comment, CommentDraft, Page};
use render::PageContext;
use serde::{Deserialize, Serialize};

use super::{error_response, pages::render_page_response};
use crate::pipeline::{self, SubmissionOutcome};
use crate::state::AppState;

/// Comment POST payload, using the original wire names.
#[derive(Deserialize)]
pub struct CommentForm {
    #[serde(rename = "comment[author]", default)]
    pub author: String,
    #[serde(rename = "comment[author_email]", default)]
    pub author_email: String,
    #[serde(rename = "comment[author_url]", default)]
    pub author_url: Option<String>,
    #[serde(rename = "comment[content]", default)]
    pub content: String,
    #[serde(rename = "comment[filter_id]", default)]
    pub filter_id: Option<String>,
    #[serde(rename = "comment[spam_answer]", default)]
    pub spam_answer: String,
    #[serde(rename = "comment[valid_spam_answer]", default)]
    pub valid_spam_answer: String,
}

impl From<CommentForm> for CommentDraft {
    fn from(form: CommentForm) -> Self {
        CommentDraft {
            author: form.author,
            author_email: form.author_email,
            author_url: form.author_url,
            content: form.content,
            filter_id: form.filter_id,
            spam_answer: form.spam_answer,
            valid_spam_answer: form.valid_spam_answer,
        }
    }
}

/// POST of a comment to the page URL (post_to_page) or `<pageUrl>comments`.
pub async fn submit(
    State(state): State<AppState>,
    uri: Uri,
    Form(form): Form<CommentForm>,
) -> Response {
    let path = uri.path();
    let page = match resolve_post_target(&state, path).await {
        Ok(Some(page)) => page,
        Ok(None) => return (StatusCode::NOT_FOUND, "Page not found".to_string()).into_response(),
        Err(e) => return error_response(e.into()).into_response(),
    };

    // A page with comments switched off ignores the payload and renders as
    // on any other request.
    if !page.comments_enabled {
        let url = page.url.clone();
        return render_page_response(&state, PageContext::new(page), &url)
            .await
            .into_response();
    }

    let mut page_ctx = PageContext::new(page);
    let draft: CommentDraft = form.into();

    match pipeline::submit(&state, &page_ctx.page, draft).await {
        // 303 so a refresh of the result never resubmits the form.
        Ok(SubmissionOutcome::Redirect(location)) => Redirect::to(&location).into_response(),
        Ok(SubmissionOutcome::RenderPending(comment)) => {
            page_ctx.selected_comment = Some(comment);
            let url = page_ctx.page.url.clone();
            render_page_response(&state, page_ctx, &url).await.into_response()
        }
        Ok(SubmissionOutcome::Invalid(failed)) => {
            page_ctx.last_comment = Some(failed);
            let url = page_ctx.page.url.clone();
            render_page_response(&state, page_ctx, &url).await.into_response()
        }
        Err(e) => error_response(e).into_response(),
    }
}

#[derive(Deserialize)]
pub struct RecentParams {
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct RecentComment {
    pub comment: Comment,
    pub page: Page,
}

/// The newest approved comments across every page, paired with the owning
/// page, newest first.
pub async fn recent(
    State(state): State<AppState>,
    Query(params): Query<RecentParams>,
) -> Result<Json<Vec<RecentComment>>, (StatusCode, String)> {
    let limit = params.limit.unwrap_or(10).clamp(1, 100);
    let recent = state
        .db
        .recent_approved(limit)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(
        recent
            .into_iter()
            .map(|(comment, page)| RecentComment { comment, page })
            .collect(),
    ))
}

/// Both POST targets resolve to the same page identity: the page URL
/// itself, or the page URL with a `comments` suffix.
async fn resolve_post_target(state: &AppState, path: &str) -> anyhow::Result<Option<Page>> {
    if let Some(page) = state.db.find_page_by_url(path).await? {
        return Ok(Some(page));
    }
    if let Some(base) = path.strip_suffix("comments") {
        return state.db.find_page_by_url(base).await;
    }
    Ok(None)
}
