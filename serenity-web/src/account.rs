use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use serenity_catalog::RoomCatalog;
use serenity_core::account::ProfileUpdate;
use serenity_core::reservation::ReservationSummary;
use serenity_core::Session;
use serenity_shared::AccountProfile;
use tracing::{info, warn};

use crate::{error::AppError, middleware::auth::require_session, state::AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingHistory {
    pub bookings: Vec<ReservationSummary>,
    pub active_count: usize,
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/account/profile", get(get_profile).put(update_profile).delete(delete_account))
        .route("/account/bookings", get(my_bookings))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

/// GET /account/profile
/// Fresh profile from the backend; the stored session is refreshed with it
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<AccountProfile>, AppError> {
    let profile = state.backend.profile(session.token.expose()).await?;
    state.session.update_profile(profile.clone())?;
    Ok(Json(profile))
}

/// PUT /account/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<AccountProfile>, AppError> {
    if update.is_empty() {
        return Ok(Json(session.profile));
    }

    let stored = state
        .backend
        .update_profile(session.token.expose(), &update)
        .await?
        .unwrap_or_else(|| update.apply_to(&session.profile));
    state.session.update_profile(stored.clone())?;

    info!("Profile updated for {}", stored.email);
    Ok(Json(stored))
}

/// DELETE /account/profile
/// Deletes the account and ends the session
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<StatusCode, AppError> {
    state.backend.delete_account(session.token.expose()).await?;
    state.session.sign_out()?;

    info!("Account deleted for {}", session.profile.email);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /account/bookings
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<BookingHistory>, AppError> {
    let records = state.backend.my_reservations(session.token.expose()).await?;

    // Room names are a nicety; the history still renders without them
    let catalog: Option<RoomCatalog> = match state.catalog().await {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            warn!("Booking history without room names: {}", e);
            None
        }
    };

    let bookings: Vec<ReservationSummary> = records
        .iter()
        .map(|record| ReservationSummary::from_record(record, catalog.as_ref()))
        .collect();
    let active_count = bookings.iter().filter(|b| b.status.is_active()).count();

    Ok(Json(BookingHistory { bookings, active_count }))
}
