use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

/// Failure categories surfaced by the API. Display strings double as the
/// client-facing `message` bodies, so they are part of the wire contract.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Email already in use")]
    DuplicateEmail,
    #[error("Username already in use")]
    DuplicateUsername,
    #[error("User not found")]
    UserNotFound,
    #[error("Credentials incorrect")]
    InvalidCredentials,
    #[error("Access to resource denied")]
    AccessDenied,
    #[error("Bookmark not found")]
    BookmarkNotFound,
    /// A lookup table resolved to a user_id with no matching user record.
    /// The two structures are written together, so this means they disagree.
    #[error("lookup entry resolves to missing user {0}")]
    Integrity(Uuid),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::DuplicateEmail
            | ApiError::DuplicateUsername
            | ApiError::UserNotFound
            | ApiError::InvalidCredentials
            | ApiError::AccessDenied
            | ApiError::Integrity(_) => StatusCode::FORBIDDEN,
            ApiError::BookmarkNotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Store(e) => {
                error!(error = %e, "storage failure");
                "Internal server error".to_string()
            }
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                "Internal server error".to_string()
            }
            // Logged with the real cause; the caller sees a plain not-found.
            ApiError::Integrity(user_id) => {
                error!(%user_id, "lookup entry points at a missing user record");
                ApiError::UserNotFound.to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_message(err: ApiError) -> (StatusCode, String) {
        let res = err.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), 4096).await.expect("read body");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        (status, value["message"].as_str().unwrap_or_default().to_string())
    }

    #[tokio::test]
    async fn duplicate_email_is_forbidden_with_exact_message() {
        let (status, message) = body_message(ApiError::DuplicateEmail).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(message, "Email already in use");
    }

    #[tokio::test]
    async fn duplicate_username_is_forbidden_with_exact_message() {
        let (status, message) = body_message(ApiError::DuplicateUsername).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(message, "Username already in use");
    }

    #[tokio::test]
    async fn signin_failures_keep_their_distinct_messages() {
        let (status, message) = body_message(ApiError::UserNotFound).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(message, "User not found");

        let (status, message) = body_message(ApiError::InvalidCredentials).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(message, "Credentials incorrect");
    }

    #[tokio::test]
    async fn integrity_violation_is_reported_as_not_found() {
        let (status, message) = body_message(ApiError::Integrity(Uuid::new_v4())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(message, "User not found");
    }

    #[tokio::test]
    async fn validation_is_bad_request() {
        let (status, message) =
            body_message(ApiError::Validation("email must not be empty".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "email must not be empty");
    }

    #[tokio::test]
    async fn store_failure_hides_details_from_the_client() {
        let (status, message) = body_message(ApiError::Store(sqlx::Error::PoolClosed)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error");
    }
}
