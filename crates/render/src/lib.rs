//! Read-only rendering context over a page's comment state, plus the small
//! HTML fragments the presentation layer composes: field accessors, form
//! builders, the spam-challenge pair, and windowed pagination links.

mod context;
pub mod fields;
pub mod forms;
pub mod paginate;

pub use context::{
    CommentWindow, FailedSubmission, PageContext, RenderContext, RenderSettings,
};
