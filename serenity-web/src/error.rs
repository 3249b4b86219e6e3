use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use serenity_core::CoreError;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    /// The booking backend answered with an error; its status and message are relayed
    Upstream { status: StatusCode, message: String },
    BadGateway(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::Upstream { status, message } => (status, message),
            AppError::BadGateway(msg) => {
                tracing::warn!("Booking backend unavailable: {}", msg);
                (StatusCode::BAD_GATEWAY, "Booking service unavailable".to_string())
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(msg) => AppError::ValidationError(msg),
            CoreError::Unauthenticated => AppError::AuthenticationError(err.to_string()),
            CoreError::SubmissionInFlight => AppError::ConflictError(err.to_string()),
            CoreError::BackendRejected { status, message } => {
                // Only client errors are the guest's to see
                match StatusCode::from_u16(status) {
                    Ok(code) if code.is_client_error() => AppError::Upstream { status: code, message },
                    _ => AppError::BadGateway(format!("{}: {}", status, message)),
                }
            }
            CoreError::NetworkError(msg) | CoreError::MalformedResponse(msg) => AppError::BadGateway(msg),
            CoreError::SessionStorage(_) | CoreError::InternalError(_) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}
