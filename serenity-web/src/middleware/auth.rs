use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serenity_core::CoreError;

use crate::{error::AppError, state::AppState};

// ============================================================================
// Session guard
// ============================================================================

/// Rejects requests with 401 unless a guest is signed in, and hands the
/// session to handlers through request extensions.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = state.session.current().ok_or(CoreError::Unauthenticated)?;
    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}
