use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serenity_catalog::{
    format_price, stay::format_short_date, AvailabilityNotice, DateRange, GuestParty, PartyField,
    PricingCalculator, Quote, RoomType,
};
use serenity_core::RoomSearchQuery;
use serenity_shared::GuestType;

use crate::{error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeResponse {
    pub code: AvailabilityNotice,
    pub message: &'static str,
}

impl From<AvailabilityNotice> for NoticeResponse {
    fn from(notice: AvailabilityNotice) -> Self {
        Self { code: notice, message: notice.message() }
    }
}

/// Room card on the listing page
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCard {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub size: Option<String>,
    pub beds: Option<String>,
    pub note: Option<String>,
    pub max_guests: u32,
    pub capacity_label: String,
    pub nightly_rate: f64,
    pub price_label: String,
    pub scarcity_label: Option<String>,
    pub sold_out: bool,
    /// Price of the searched stay, when the search carries billable dates
    pub stay_total: Option<f64>,
    pub detail_link: String,
}

impl RoomCard {
    fn new(room: &RoomType, range: Option<&DateRange>, party: &GuestParty, query: &str, extra_child_capacities: &[u32]) -> Self {
        let stay_total = range
            .filter(|r| r.is_billable())
            .map(|r| PricingCalculator::total_price(room.nightly_rate, r, party.rooms));
        let slug = room.slug();
        let detail_link = if query.is_empty() {
            format!("/rooms/{}", slug)
        } else {
            format!("/rooms/{}?{}", slug, query)
        };

        Self {
            id: room.id,
            slug,
            name: room.name.clone(),
            size: room.size.clone(),
            beds: room.beds.clone(),
            note: room.note.clone(),
            max_guests: room.max_guests,
            capacity_label: room.capacity_label(extra_child_capacities),
            nightly_rate: room.nightly_rate,
            price_label: format_price(room.nightly_rate),
            scarcity_label: room.scarcity_label(),
            sold_out: room.is_sold_out(),
            stay_total,
            detail_link,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomListing {
    pub query: RoomSearchQuery,
    pub party: GuestParty,
    pub party_label: String,
    pub nights: u32,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub notice: Option<NoticeResponse>,
    pub rooms: Vec<RoomCard>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetail {
    pub room: RoomCard,
    pub party_label: String,
    /// Whether the searched party may book this room
    pub bookable: bool,
    pub quote: Option<Quote>,
    pub booking_link: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyCounter {
    Adults,
    Children,
    Rooms,
}

impl From<PartyCounter> for PartyField {
    fn from(counter: PartyCounter) -> Self {
        match counter {
            PartyCounter::Adults => PartyField::Adults,
            PartyCounter::Children => PartyField::Children,
            PartyCounter::Rooms => PartyField::Rooms,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyStep {
    Increment,
    Decrement,
}

/// One click on the guest selector
#[derive(Debug, Deserialize)]
pub struct PartyAdjustRequest {
    #[serde(default)]
    pub party: Option<GuestParty>,
    pub field: PartyCounter,
    pub step: PartyStep,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyResponse {
    pub party: GuestParty,
    pub label: String,
    pub valid: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(list_rooms))
        .route("/rooms/party", post(adjust_party))
        .route("/rooms/{slug}", get(room_detail))
        .route("/guest-types", get(guest_types))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /rooms
/// Rooms that fit the searched party, in catalog order
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(query): Query<RoomSearchQuery>,
) -> Result<Json<RoomListing>, AppError> {
    let party = state.bounded_party(query.party())?;
    let catalog = state.catalog().await?;
    let range = query.range();
    let availability = state.capacity.search(&catalog.rooms, &party);
    let carried = query.to_query_string();

    let rooms = availability
        .rooms
        .iter()
        .map(|room| RoomCard::new(room, range.as_ref(), &party, &carried, &state.capacity.extra_child_capacities))
        .collect();

    Ok(Json(RoomListing {
        party_label: party.label(),
        nights: serenity_catalog::stay::night_count(range.as_ref()),
        check_in: range.map(|r| format_short_date(r.check_in)),
        check_out: range.map(|r| format_short_date(r.check_out)),
        notice: availability.notice.map(NoticeResponse::from),
        party,
        rooms,
        query,
    }))
}

/// GET /rooms/{slug}
pub async fn room_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<RoomSearchQuery>,
) -> Result<Json<RoomDetail>, AppError> {
    let catalog = state.catalog().await?;
    let room = catalog
        .find_by_slug(&slug)
        .ok_or_else(|| AppError::NotFoundError(format!("Room not found: {}", slug)))?;

    let party = state.bounded_party(query.party())?;
    let range = query.range();
    let carried = query.to_query_string();
    let surcharge_rate = state.session.surcharge_rate();

    let mut booking_link = format!("/booking?roomTypeId={}", room.id);
    if !carried.is_empty() {
        booking_link.push('&');
        booking_link.push_str(&carried);
    }

    Ok(Json(RoomDetail {
        room: RoomCard::new(room, range.as_ref(), &party, &carried, &state.capacity.extra_child_capacities),
        party_label: party.label(),
        bookable: state.capacity.is_bookable(room, &party),
        quote: range.map(|r| PricingCalculator::quote(room.nightly_rate, &r, party.rooms, surcharge_rate)),
        booking_link,
    }))
}

/// POST /rooms/party
/// Apply one guest-selector step
pub async fn adjust_party(
    State(state): State<AppState>,
    Json(req): Json<PartyAdjustRequest>,
) -> Result<Json<PartyResponse>, AppError> {
    let party = state.bounded_party(req.party.unwrap_or_default())?;
    let field = PartyField::from(req.field);
    let party = match req.step {
        PartyStep::Increment => party.increment(field, state.max_party_members),
        PartyStep::Decrement => party.decrement(field),
    };

    Ok(Json(PartyResponse {
        label: party.label(),
        valid: party.is_valid(),
        party,
    }))
}

/// GET /guest-types
pub async fn guest_types(State(state): State<AppState>) -> Result<Json<Vec<GuestType>>, AppError> {
    Ok(Json(state.backend.guest_types().await?))
}
