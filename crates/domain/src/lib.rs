mod errors;
mod events;
mod models;
pub mod filters;
pub mod html;
pub mod pagination;
pub mod spam;
pub mod validate;

pub use errors::{CommentsError, FieldErrors};
pub use events::NotificationEvent;
pub use models::{Comment, CommentDraft, NewComment, Page};
