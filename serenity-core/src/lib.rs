pub mod account;
pub mod catalog;
pub mod repository;
pub mod reservation;
pub mod search;
pub mod session;

use serde::de::DeserializeOwned;
use serenity_booking::{DraftError, RosterError};

pub use repository::BookingBackend;
pub use search::RoomSearchQuery;
pub use session::{MemorySessionPersistence, Session, SessionPersistence, SessionStore};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Sign in required")]
    Unauthenticated,
    #[error("{message}")]
    BackendRejected { status: u16, message: String },
    #[error("Network failure: {0}")]
    NetworkError(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("A reservation is already being submitted")]
    SubmissionInFlight,
    #[error("Session storage failed: {0}")]
    SessionStorage(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

impl From<DraftError> for CoreError {
    fn from(err: DraftError) -> Self {
        CoreError::ValidationError(err.to_string())
    }
}

impl From<RosterError> for CoreError {
    fn from(err: RosterError) -> Self {
        CoreError::ValidationError(err.to_string())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Parse a backend response body, reporting missing or ill-typed fields as `MalformedResponse`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> CoreResult<T> {
    serde_json::from_slice(body).map_err(|e| CoreError::MalformedResponse(e.to_string()))
}
