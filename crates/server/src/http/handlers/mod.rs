pub mod admin;
pub mod comments;
pub mod pages;

use axum::http::StatusCode;
use domain::CommentsError;

/// HTTP mapping for pipeline/render faults. A misconfigured template is the
/// operator's problem and says so; storage faults stay generic.
pub(crate) fn error_response(e: CommentsError) -> (StatusCode, String) {
    match e {
        CommentsError::InvalidPaginationConfig(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        CommentsError::Storage(source) => {
            tracing::error!("storage failure: {source:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
        CommentsError::ValidationFailed(errors) => {
            // the pipeline recovers validation failures before they get here
            tracing::error!("unhandled validation failure: {errors}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}
