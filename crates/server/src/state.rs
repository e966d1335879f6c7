use std::sync::Arc;

use axum::extract::FromRef;
use domain::filters::FilterRegistry;
use domain::pagination::PaginationDefaults;
use domain::validate::ValidationConfig;
use domain::NotificationEvent;
use render::RenderSettings;
use storage::Db;
use tokio::sync::mpsc;

use crate::config::CommentSettings;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub comments: CommentSettings,
    pub filters: Arc<FilterRegistry>,
    pub notify: mpsc::Sender<NotificationEvent>,
    pub admin_token: String,
}

impl AppState {
    pub fn pagination_defaults(&self) -> PaginationDefaults {
        PaginationDefaults {
            per_page: self.comments.per_page,
            segment: self.comments.pagination_segment.clone(),
        }
    }

    pub fn validation_config(&self) -> ValidationConfig {
        ValidationConfig {
            simple_spam_filter: self.comments.simple_spam_filter,
            max_links: self.comments.max_links,
        }
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            post_to_page: self.comments.post_to_page,
            pagination_segment: self.comments.pagination_segment.clone(),
            spam_answer: self.comments.spam_answer.clone(),
            filters: Arc::clone(&self.filters),
        }
    }
}

impl FromRef<AppState> for Db {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
