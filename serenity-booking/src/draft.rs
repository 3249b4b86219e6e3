use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serenity_catalog::{CapacityRules, DateRange, GuestParty, PricingCalculator, Quote, RoomType};
use serenity_shared::{AccountProfile, GuestTypeId};
use uuid::Uuid;

use crate::models::CompanionRecord;
use crate::roster::{required_companions, CompanionRoster};

/// Primary booker's identity and contact details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booker {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub id_number: String,
    pub address: Option<String>,
    pub guest_type_id: Option<GuestTypeId>,
}

impl Booker {
    pub fn from_profile(profile: &AccountProfile) -> Self {
        Self {
            full_name: profile.full_name.clone(),
            email: profile.email.clone(),
            phone_number: profile.phone_number.clone(),
            id_number: profile.id_number.clone(),
            address: profile.address.clone(),
            guest_type_id: profile.guest_type_id,
        }
    }
}

/// The assembled, not-yet-submitted booking request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationDraft {
    pub id: Uuid,
    pub booker: Booker,
    pub room: RoomType,
    pub range: DateRange,
    pub party: GuestParty,
    pub companions: Vec<CompanionRecord>,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

impl ReservationDraft {
    pub fn new(booker: Booker, room: RoomType, range: DateRange, party: GuestParty) -> Self {
        Self {
            id: Uuid::new_v4(),
            booker,
            room,
            range,
            party,
            companions: Vec::new(),
            note: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_companions(mut self, roster: &CompanionRoster) -> Self {
        self.companions = roster.companions.clone();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Price shown next to the submit button
    pub fn quote(&self, surcharge_rate: Option<f64>) -> Quote {
        PricingCalculator::quote(self.room.nightly_rate, &self.range, self.party.rooms, surcharge_rate)
    }

    /// Submittable only for a billable stay in a room that is bookable for the party
    pub fn validate(&self, rules: &CapacityRules) -> Result<(), DraftError> {
        if self.booker.full_name.trim().is_empty() {
            return Err(DraftError::IncompleteBooker("full name"));
        }
        if self.booker.email.trim().is_empty() {
            return Err(DraftError::IncompleteBooker("email"));
        }
        if self.booker.phone_number.trim().is_empty() {
            return Err(DraftError::IncompleteBooker("phone number"));
        }

        if !self.range.is_billable() {
            return Err(DraftError::NotBillable {
                check_in: self.range.check_in.to_string(),
                check_out: self.range.check_out.to_string(),
            });
        }

        if !self.party.is_valid() {
            return Err(DraftError::UnaccompaniedChildren);
        }

        if self.room.is_sold_out() {
            return Err(DraftError::RoomSoldOut(self.room.name.clone()));
        }

        if !rules.fits(&self.room, &self.party) {
            return Err(DraftError::RoomTooSmall {
                room: self.room.name.clone(),
                guests: self.party.total_guests(),
            });
        }

        let expected = required_companions(self.party.total_guests());
        if self.companions.len() != expected {
            return Err(DraftError::CompanionMismatch {
                expected,
                actual: self.companions.len(),
            });
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Booker {0} is required")]
    IncompleteBooker(&'static str),

    #[error("Check-out ({check_out}) must be after check-in ({check_in})")]
    NotBillable { check_in: String, check_out: String },

    #[error("Children cannot stay alone. At least one adult is required.")]
    UnaccompaniedChildren,

    #[error("{0} is sold out")]
    RoomSoldOut(String),

    #[error("{room} cannot accommodate {guests} guests")]
    RoomTooSmall { room: String, guests: u32 },

    #[error("Expected {expected} companion records, got {actual}")]
    CompanionMismatch { expected: usize, actual: usize },
}
