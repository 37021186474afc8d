//! Mapping from service errors to HTTP responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use disaster_map_server_models::{ApiErrorBody, RequestError};
use disaster_map_service::ServiceError;
use thiserror::Error;

/// Error returned by every handler.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] ServiceError);

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        Self(ServiceError::InvalidInput(err.to_string()))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {self}");
        } else {
            log::debug!("Request rejected: {self}");
        }
        HttpResponse::build(status).json(ApiErrorBody {
            error: self.to_string(),
        })
    }
}
