use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{db::StoreError, game::GameError};

/// Errors returned to API callers. None of them are retried by the server.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand to clients. Internal details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<GameError> for ApiError {
    fn from(e: GameError) -> Self {
        ApiError::InvalidRequest(e.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateUser(_) => ApiError::Conflict("A User with that name already exists!".to_string()),
            StoreError::StaleGame(_) => ApiError::Conflict(
                "Game was updated by another request, reload it and try again".to_string(),
            ),
            StoreError::GameNotFound(_) => ApiError::NotFound("Game not found!".to_string()),
            StoreError::Database(_) | StoreError::Serialization(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self);
        }
        (status, Json(json!({ "error": self.client_message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_game_errors_are_bad_requests() {
        let err: ApiError = GameError::AlreadyFlipped { row: 1, column: 2 }.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "Card has already been flipped");
    }

    #[test]
    fn test_store_error_mapping() {
        let dup: ApiError = StoreError::DuplicateUser("alice".to_string()).into();
        assert_eq!(dup.status(), StatusCode::CONFLICT);

        let stale: ApiError = StoreError::StaleGame(Uuid::new_v4()).into();
        assert_eq!(stale.status(), StatusCode::CONFLICT);

        let missing: ApiError = StoreError::GameNotFound(Uuid::new_v4()).into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_errors_are_sanitized() {
        let err: ApiError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "Internal server error");
    }
}
