use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("missing form field `{0}`")]
    MissingField(&'static str),

    #[error("invalid multipart payload: {}", .0.body_text())]
    Multipart(#[from] MultipartError),

    #[error("Failed to process PDF: {0}")]
    DocumentProcessing(String),

    #[error("Failed to answer question: {0}")]
    Generation(String),
}

impl ApiError {
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::MissingField(_) => "MissingField",
            ApiError::Multipart(_) => "Multipart",
            ApiError::DocumentProcessing(_) => "DocumentProcessing",
            ApiError::Generation(_) => "Generation",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Multipart(e) => e.status(),
            ApiError::DocumentProcessing(_) | ApiError::Generation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}: {}", self.error_type(), self);
        } else {
            log::warn!("Rejected request: {}", self);
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
            error_type: Some(self.error_type().to_string()),
        });

        (status, body).into_response()
    }
}
