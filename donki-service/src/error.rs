use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Body of every failed `/donki-notifications` response.
pub const RETRIEVAL_FAILED_MESSAGE: &str = "Failed to retrieve DONKI notifications";

/// What callers get when the upstream call fails. The cause is logged by the
/// fetcher and never reaches the HTTP response.
#[derive(Debug, Error)]
pub enum DonkiError {
    #[error("Failed to retrieve DONKI data.")]
    RetrievalFailed,
}

impl IntoResponse for DonkiError {
    fn into_response(self) -> Response {
        match self {
            DonkiError::RetrievalFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": RETRIEVAL_FAILED_MESSAGE })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retrieval_failure_is_a_500() {
        let response = DonkiError::RetrievalFailed.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
