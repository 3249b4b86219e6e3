use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serenity_booking::{CompanionRecord, ReservationDraft};
use serenity_catalog::pricing::format_price;
use serenity_catalog::stay::{format_long_date, parse_date};
use serenity_catalog::{DateRange, PricingCalculator, RoomCatalog, RoomTypeId};
use serenity_shared::GuestTypeId;

// ============================================================================
// Create reservation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanionPayload {
    pub full_name: String,
    pub id_card: String,
    pub address: String,
    pub guest_type_id: Option<GuestTypeId>,
}

impl From<&CompanionRecord> for CompanionPayload {
    fn from(record: &CompanionRecord) -> Self {
        Self {
            full_name: record.full_name.clone(),
            id_card: record.id_number.clone(),
            address: record.address.clone(),
            guest_type_id: record.guest_type_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub guest_fullname: String,
    pub guest_phone: String,
    pub guest_email: String,
    pub guest_address: Option<String>,
    pub guest_type_id: Option<GuestTypeId>,
    pub guest_id_card: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub room_type_id: RoomTypeId,
    pub number_of_rooms: u32,
    pub adults: u32,
    pub children: u32,
    pub reservation_note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub companions: Vec<CompanionPayload>,
}

impl From<&ReservationDraft> for CreateReservationRequest {
    fn from(draft: &ReservationDraft) -> Self {
        let non_empty = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        Self {
            guest_fullname: draft.booker.full_name.trim().to_string(),
            guest_phone: draft.booker.phone_number.trim().to_string(),
            guest_email: draft.booker.email.trim().to_string(),
            guest_address: draft.booker.address.as_deref().and_then(non_empty),
            guest_type_id: draft.booker.guest_type_id,
            guest_id_card: non_empty(&draft.booker.id_number),
            check_in: draft.range.check_in,
            check_out: draft.range.check_out,
            room_type_id: draft.room.id,
            number_of_rooms: draft.party.rooms,
            adults: draft.party.adults,
            children: draft.party.children,
            reservation_note: non_empty(&draft.note),
            companions: draft.companions.iter().map(CompanionPayload::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationCreated {
    pub reservation_id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// Booking history
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Declined,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl ReservationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::Completed => "Completed",
            ReservationStatus::Declined => "Declined",
            ReservationStatus::Canceled => "Canceled",
            ReservationStatus::Unknown => "Unknown",
        }
    }

    /// Still upcoming or in progress
    pub fn is_active(&self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }
}

/// Reservation as listed by the "my bookings" endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub reservation_id: i64,
    pub guest_fullname: String,
    pub guest_phone: String,
    pub guest_email: String,
    #[serde(default)]
    pub guest_address: Option<String>,
    #[serde(default)]
    pub guest_type_id: Option<GuestTypeId>,
    pub check_in: String,
    pub check_out: String,
    pub room_type_id: RoomTypeId,
    pub number_of_rooms: u32,
    pub adults: u32,
    pub children: u32,
    #[serde(default)]
    pub reservation_note: Option<String>,
    #[serde(default)]
    pub recommended_rooms: Option<String>,
    #[serde(default)]
    pub status: Option<ReservationStatus>,
    #[serde(default)]
    pub guest_id_card: Option<String>,
}

impl ReservationRecord {
    /// Stay dates; the backend may send plain dates or full timestamps.
    pub fn range(&self) -> Option<DateRange> {
        let date = |raw: &str| parse_date(raw.get(..10).unwrap_or(raw));
        Some(DateRange::new(date(&self.check_in)?, date(&self.check_out)?))
    }

    pub fn status(&self) -> ReservationStatus {
        self.status.unwrap_or(ReservationStatus::Unknown)
    }
}

/// Booking card on the "my bookings" page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSummary {
    pub id: i64,
    pub room_type: String,
    pub name: String,
    pub mobile: String,
    pub check_in: String,
    pub check_out: String,
    pub nights: u32,
    pub price: Option<String>,
    pub status: ReservationStatus,
    pub status_label: String,
    pub confirmation_number: String,
}

impl ReservationSummary {
    /// Room name and price are filled in when the room type is known to `catalog`.
    pub fn from_record(record: &ReservationRecord, catalog: Option<&RoomCatalog>) -> Self {
        let range = record.range();
        let room = catalog.and_then(|c| c.get(record.room_type_id));

        let long_date = |raw: &str, date: Option<NaiveDate>| date.map(format_long_date).unwrap_or_else(|| raw.to_string());

        let price = match (room, range.as_ref()) {
            (Some(room), Some(range)) => Some(format!(
                "{} USD",
                format_price(PricingCalculator::total_price(room.nightly_rate, range, record.number_of_rooms))
            )),
            _ => None,
        };

        Self {
            id: record.reservation_id,
            room_type: room
                .map(|r| r.name.clone())
                .unwrap_or_else(|| format!("Room Type {}", record.room_type_id)),
            name: record.guest_fullname.clone(),
            mobile: record.guest_phone.clone(),
            check_in: long_date(&record.check_in, range.map(|r| r.check_in)),
            check_out: long_date(&record.check_out, range.map(|r| r.check_out)),
            nights: range.map(|r| r.night_count()).unwrap_or(0),
            price,
            status: record.status(),
            status_label: record.status().label().to_string(),
            confirmation_number: record.reservation_id.to_string(),
        }
    }
}
