//! The submission pipeline: validate a posted comment, persist it at most
//! once, decide the response shape, and hand the notification to the
//! decoupled worker.

use domain::{validate, Comment, CommentDraft, CommentsError, NewComment, NotificationEvent, Page};
use render::FailedSubmission;

use crate::state::AppState;

/// Terminal outcome of one comment POST.
pub enum SubmissionOutcome {
    /// Approved immediately: 303 to the comment's in-page anchor.
    Redirect(String),
    /// Persisted but awaiting moderation: re-render with the comment
    /// selected so its author sees it.
    RenderPending(Comment),
    /// Validation failed: nothing persisted, re-render the form with the
    /// submitted values and errors.
    Invalid(FailedSubmission),
}

pub async fn submit(
    state: &AppState,
    page: &Page,
    draft: CommentDraft,
) -> Result<SubmissionOutcome, CommentsError> {
    let mut errors = validate::validate(&draft, &state.validation_config());

    // The duplicate probe needs storage, so it runs here rather than in
    // field validation. Only bother when the fields themselves are fine.
    if errors.is_empty()
        && state
            .db
            .has_duplicate(page.id, draft.author_email.trim(), draft.content.trim())
            .await?
    {
        errors.add("content", "has already been submitted");
    }

    if !errors.is_empty() {
        return Ok(SubmissionOutcome::Invalid(FailedSubmission { draft, errors }));
    }

    let content = draft.content.trim().to_string();
    let filter_id = draft
        .filter_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    let new = NewComment {
        page_id: page.id,
        author: draft.author.trim().to_string(),
        author_email: draft.author_email.trim().to_string(),
        author_url: draft
            .author_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string),
        content_html: state.filters.render(filter_id.as_deref(), &content),
        content,
        filter_id,
        approved: state.comments.auto_approve,
    };

    let comment = state.db.insert_comment(&new).await?;
    tracing::info!(
        comment_id = comment.id,
        page = %page.url,
        approved = comment.approved,
        "comment persisted"
    );

    if state.comments.notification && (comment.approved || state.comments.notify_unapproved) {
        let event = NotificationEvent::CommentPosted {
            page: page.clone(),
            comment: comment.clone(),
        };
        if state.notify.try_send(event).is_err() {
            tracing::warn!("notification queue unavailable, dropping comment notification");
        }
    }

    if comment.approved {
        Ok(SubmissionOutcome::Redirect(format!(
            "{}#{}",
            page.url,
            comment.anchor()
        )))
    } else {
        Ok(SubmissionOutcome::RenderPending(comment))
    }
}
