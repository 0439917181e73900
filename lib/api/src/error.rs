use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use embedquest_storage::{ServiceError, StorageError};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not enough words in database to generate puzzle")]
    NotEnoughWords,

    #[error("Database error - please ensure embeddings have been imported. Run: embedquest import")]
    Database,

    #[error("Failed to generate puzzle")]
    PuzzleFailed,

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        if e.is_insufficient_words() {
            return ApiError::NotEnoughWords;
        }
        error!("Error generating puzzle: {}", e);
        match e {
            ServiceError::Storage(_) => ApiError::Database,
            ServiceError::Puzzle(_) => ApiError::PuzzleFailed,
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::InvalidName(msg) => ApiError::BadRequest(msg),
            other => {
                error!("Storage error: {}", other);
                ApiError::Internal
            }
        }
    }
}
