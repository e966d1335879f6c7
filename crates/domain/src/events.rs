use crate::models::{Comment, Page};
use serde::{Deserialize, Serialize};

/// Events handed to the notification worker. Dispatch is fire-and-forget:
/// a full queue or a failing mailer never touches the HTTP outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NotificationEvent {
    CommentPosted { page: Page, comment: Comment },
}
