use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::post,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use serenity_booking::{Booker, CompanionRecord, CompanionRoster, ReservationDraft};
use serenity_catalog::{format_amount, DateRange, GuestParty, PricingCalculator, Quote, RoomTypeId};
use serenity_core::reservation::CreateReservationRequest;
use serenity_core::{CoreError, Session};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{error::AppError, middleware::auth::require_session, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub room_type_id: RoomTypeId,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    #[serde(default = "one")]
    pub rooms: u32,
}

fn one() -> u32 { 1 }

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub room_name: String,
    pub quote: Quote,
    pub total_label: String,
    pub can_submit: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionsRequest {
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub companions: Vec<CompanionRecord>,
    #[serde(default = "first_tab")]
    pub active_tab: usize,
}

fn first_tab() -> usize { 1 }

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionEditRequest {
    pub companions: Vec<CompanionRecord>,
    #[serde(default = "first_tab")]
    pub active_tab: usize,
    /// Zero-based position of the record to edit
    pub index: usize,
    pub field: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionsResponse {
    pub required: usize,
    #[serde(flatten)]
    pub roster: CompanionRoster,
}

impl From<CompanionRoster> for CompanionsResponse {
    fn from(roster: CompanionRoster) -> Self {
        Self { required: roster.len(), roster }
    }
}

/// Booker fields the guest may change on the booking form; the rest comes from the profile
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookerOverrides {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBookingRequest {
    pub room_type_id: RoomTypeId,
    pub check_in: String,
    pub check_out: String,
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default = "one")]
    pub rooms: u32,
    #[serde(default)]
    pub companions: Vec<CompanionRecord>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub booker: BookerOverrides,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub draft_id: Uuid,
    pub reservation_id: i64,
    pub message: String,
    pub total: f64,
    pub total_label: String,
}

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/booking", post(submit_booking))
        .route_layer(middleware::from_fn_with_state(state, require_session));

    Router::new()
        .route("/booking/quote", post(quote))
        .route("/booking/companions", post(resize_companions).patch(edit_companion))
        .merge(protected)
}

fn booker_for(session: &Session, overrides: BookerOverrides) -> Booker {
    let mut booker = Booker::from_profile(&session.profile);
    if let Some(v) = overrides.full_name {
        booker.full_name = v;
    }
    if let Some(v) = overrides.email {
        booker.email = v;
    }
    if let Some(v) = overrides.phone_number {
        booker.phone_number = v;
    }
    if let Some(v) = overrides.address {
        booker.address = Some(v);
    }
    booker
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /booking/quote
/// Price of a stay, including the signed-in guest's surcharge
pub async fn quote(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    state.bounded_party(GuestParty::new(1, 0, req.rooms))?;
    let catalog = state.catalog().await?;
    let room = catalog
        .get(req.room_type_id)
        .ok_or_else(|| AppError::NotFoundError(format!("Room type not found: {}", req.room_type_id)))?;

    let quote = match DateRange::parse(req.check_in.as_deref(), req.check_out.as_deref()) {
        Some(range) => PricingCalculator::quote(room.nightly_rate, &range, req.rooms, state.session.surcharge_rate()),
        // Missing dates price as zero nights
        None => Quote {
            nights: 0,
            room_count: req.rooms.max(1),
            nightly_rate: room.nightly_rate,
            subtotal: 0.0,
            surcharge: 0.0,
            total: 0.0,
        },
    };

    Ok(Json(QuoteResponse {
        room_name: room.name.clone(),
        total_label: format!("${}", format_amount(quote.total)),
        can_submit: quote.is_billable() && !room.is_sold_out() && !state.submission.is_busy(),
        quote,
    }))
}

/// POST /booking/companions
/// Re-derive the companion roster after the guest count changed
pub async fn resize_companions(
    State(state): State<AppState>,
    Json(req): Json<CompanionsRequest>,
) -> Result<Json<CompanionsResponse>, AppError> {
    let party = state.bounded_party(GuestParty::new(req.adults, req.children, 1))?;
    let template = state.session.companion_template();
    let total = party.total_guests();
    let roster = CompanionRoster::from_parts(req.companions, req.active_tab)
        .sync_with_guests(total, template.as_ref());

    Ok(Json(roster.into()))
}

/// PATCH /booking/companions
/// Change one field of one companion
pub async fn edit_companion(Json(req): Json<CompanionEditRequest>) -> Result<Json<CompanionsResponse>, AppError> {
    let roster = CompanionRoster::from_parts(req.companions, req.active_tab)
        .update_named_field(req.index, &req.field, &req.value)
        .map_err(CoreError::from)?;

    Ok(Json(roster.into()))
}

/// POST /booking
/// Validate the draft and submit it; only one submission may be outstanding
pub async fn submit_booking(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<SubmitBookingRequest>,
) -> Result<(StatusCode, Json<BookingConfirmation>), AppError> {
    let _ticket = state.submission.try_begin().ok_or(CoreError::SubmissionInFlight)?;
    let party = state.bounded_party(GuestParty::new(req.adults, req.children, req.rooms))?;

    let catalog = state.catalog().await?;
    let room = catalog
        .get(req.room_type_id)
        .cloned()
        .ok_or_else(|| AppError::NotFoundError(format!("Room type not found: {}", req.room_type_id)))?;

    let range = DateRange::parse(Some(req.check_in.as_str()), Some(req.check_out.as_str()))
        .ok_or_else(|| AppError::ValidationError("Check-in and check-out dates are required".to_string()))?;
    let roster = CompanionRoster::from_parts(req.companions, 1);

    let draft = ReservationDraft::new(booker_for(&session, req.booker), room, range, party)
        .with_companions(&roster)
        .with_note(req.note);
    draft.validate(&state.capacity).map_err(CoreError::from)?;

    let total = draft.quote(session.profile.surcharge_rate).total;
    let request = CreateReservationRequest::from(&draft);

    info!(draft_id = %draft.id, room = %draft.room.name, nights = draft.range.night_count(), "Submitting reservation");
    let created = state
        .backend
        .create_reservation(session.token.expose(), &request)
        .await
        .inspect_err(|e| warn!(draft_id = %draft.id, "Reservation failed: {}", e))?;
    info!(draft_id = %draft.id, reservation_id = created.reservation_id, "Reservation created");

    Ok((
        StatusCode::CREATED,
        Json(BookingConfirmation {
            draft_id: draft.id,
            reservation_id: created.reservation_id,
            message: created
                .message
                .unwrap_or_else(|| "Your reservation has been received".to_string()),
            total,
            total_label: format!("${}", format_amount(total)),
        }),
    ))
}
