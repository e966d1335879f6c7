use std::sync::Arc;

use domain::filters::FilterRegistry;
use domain::pagination::{self, WindowSpec};
use domain::{Comment, CommentDraft, FieldErrors, Page};

/// A submission that failed validation, held for one response so the form
/// can be redisplayed with the submitted values and their errors.
#[derive(Debug, Clone)]
pub struct FailedSubmission {
    pub draft: CommentDraft,
    pub errors: FieldErrors,
}

/// Request-scoped view of a page. `selected_comment` and `last_comment`
/// exist only for the lifetime of one response and are never persisted.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub page: Page,
    /// The comment just submitted in this request, still pending approval.
    /// Shown to its author only.
    pub selected_comment: Option<Comment>,
    /// The most recent failed submission attempt in this request.
    pub last_comment: Option<FailedSubmission>,
}

impl PageContext {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            selected_comment: None,
            last_comment: None,
        }
    }
}

/// The resolved slice of approved comments for the current comment page.
#[derive(Debug, Clone)]
pub struct CommentWindow {
    pub spec: WindowSpec,
    pub comments: Vec<Comment>,
    /// Total approved comments on the page, across all windows.
    pub total: i64,
}

impl CommentWindow {
    pub fn total_pages(&self) -> u32 {
        pagination::total_pages(self.total, self.spec.per_page)
    }
}

/// Configuration the fragment builders need.
#[derive(Clone)]
pub struct RenderSettings {
    /// Comment POSTs target the page URL itself rather than `<url>comments`.
    pub post_to_page: bool,
    pub pagination_segment: String,
    /// Expected answer for the spam challenge, digested fresh per render.
    pub spam_answer: String,
    pub filters: Arc<FilterRegistry>,
}

/// Everything the presentation layer may read while expanding comment
/// markup. Immutable for the duration of one render.
#[derive(Clone)]
pub struct RenderContext {
    pub page_ctx: PageContext,
    pub window: CommentWindow,
    pub settings: RenderSettings,
}

impl RenderContext {
    pub fn page(&self) -> &Page {
        &self.page_ctx.page
    }

    pub fn comments_enabled(&self) -> bool {
        self.page_ctx.page.comments_enabled
    }

    /// At least one approved comment, or the author's own just-submitted
    /// pending one.
    pub fn has_visible_comments(&self) -> bool {
        self.window.total > 0 || self.page_ctx.selected_comment.is_some()
    }

    /// Approved-comment count. The selected pending comment never counts.
    pub fn visible_comment_count(&self) -> i64 {
        self.window.total
    }

    /// The comments to iterate for the current window, zero-indexed. The
    /// submitter's own pending comment is appended so they see it at once.
    pub fn each_comment(&self) -> Vec<(usize, &Comment)> {
        let mut out: Vec<&Comment> = self.window.comments.iter().collect();
        if let Some(selected) = &self.page_ctx.selected_comment {
            if !selected.is_approved() {
                out.push(selected);
            }
        }
        out.into_iter().enumerate().collect()
    }

    pub fn is_selected(&self, comment: &Comment) -> bool {
        self.page_ctx
            .selected_comment
            .as_ref()
            .is_some_and(|sel| sel.id == comment.id)
    }

    /// Value a named form field should echo after a failed submission.
    pub fn last_value(&self, field: &str) -> Option<&str> {
        self.page_ctx
            .last_comment
            .as_ref()
            .and_then(|failed| failed.draft.field(field))
    }

    pub fn error_on(&self, field: &str) -> Option<&str> {
        self.page_ctx
            .last_comment
            .as_ref()
            .and_then(|failed| failed.errors.on(field))
    }

    pub fn has_errors(&self) -> bool {
        self.page_ctx
            .last_comment
            .as_ref()
            .is_some_and(|failed| !failed.errors.is_empty())
    }

    /// Where the comment form posts to.
    pub fn form_action(&self) -> String {
        if self.settings.post_to_page {
            self.page_ctx.page.url.clone()
        } else {
            format!("{}comments", self.page_ctx.page.url)
        }
    }

    /// Canonical URL for comment page `n` of this page.
    pub fn page_link(&self, page_number: u32) -> String {
        pagination::page_url(
            &self.page_ctx.page.url,
            &self.settings.pagination_segment,
            page_number,
        )
    }
}
