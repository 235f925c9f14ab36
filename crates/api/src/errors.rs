use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use doh_relay_domain::DomainError;
use tracing::error;

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed. Use GET or POST.";
pub const INVALID_ENDPOINT_MESSAGE: &str = "Invalid endpoint. Use /dns-query";

/// Plain-text error response for the DoH surface.
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DomainError::MissingParameter | DomainError::InvalidQuery(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }

            DomainError::MethodNotAllowed(_) => (
                StatusCode::METHOD_NOT_ALLOWED,
                METHOD_NOT_ALLOWED_MESSAGE.to_string(),
            ),

            DomainError::AllProvidersUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, self.0.to_string())
            }

            other => {
                error!(error = %other, "Unexpected error while serving DNS query");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}
