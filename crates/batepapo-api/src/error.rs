use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::validate::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("participant '{0}' already exists")]
    Conflict(String),

    #[error("participant '{0}' not found")]
    NotFound(String),

    #[error("sender '{0}' is not a participant")]
    UnknownSender(String),

    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::UnknownSender(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            // Storage details stay in the log.
            Self::Storage(e) => {
                error!("{:#}", e);
                "storage failure".to_string()
            }
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}
