// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for the Chirpy HTTP API

use crate::validator::ValidationError;
use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

/// Application error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed request")]
    MalformedRequest(#[from] serde_json::Error),

    #[error("malformed request")]
    BodyRejected(#[from] BytesRejection),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("invalid user id")]
    InvalidUserId(#[source] uuid::Error),

    #[error("invalid chirp id")]
    InvalidChirpId(#[source] uuid::Error),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error envelope written for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedRequest(_)
            | Self::Validation(_)
            | Self::InvalidUserId(_)
            | Self::InvalidChirpId(_) => StatusCode::BAD_REQUEST,
            Self::BodyRejected(rejection) => rejection.status(),
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self, "Request failed");
            "internal server error".to_string()
        } else {
            info!(error = ?self, "Request rejected");
            self.to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let malformed = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            ApiError::MalformedRequest(malformed).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Validation(ValidationError::TooLong { length: 141, max: 140 }).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound("chirp").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Persistence(sqlx::Error::PoolClosed).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        let bad_id = "nope".parse::<uuid::Uuid>().unwrap_err();
        assert_eq!(ApiError::InvalidUserId(bad_id).to_string(), "invalid user id");
        assert_eq!(
            ApiError::Validation(ValidationError::TooLong { length: 141, max: 140 }).to_string(),
            "too long"
        );
        assert_eq!(ApiError::NotFound("chirp").to_string(), "chirp not found");
    }
}
