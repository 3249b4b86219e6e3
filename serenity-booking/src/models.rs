use serde::{Deserialize, Serialize};
use serenity_shared::{AccountProfile, GuestTypeId};
use std::str::FromStr;

/// Identity record for an occupant beyond the primary booker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanionRecord {
    pub full_name: String,
    pub id_number: String,
    pub address: String,

    /// References an entry of the backend guest-type list
    pub guest_type_id: Option<GuestTypeId>,
}

impl CompanionRecord {
    /// Record pre-filled from the signed-in booker's identity.
    pub fn from_profile(profile: &AccountProfile) -> Self {
        Self {
            full_name: profile.full_name.clone(),
            id_number: profile.id_number.clone(),
            address: profile.address.clone().unwrap_or_default(),
            guest_type_id: profile.guest_type_id,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.full_name.is_empty()
            && self.id_number.is_empty()
            && self.address.is_empty()
            && self.guest_type_id.is_none()
    }
}

/// Editable fields of a companion record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompanionField {
    FullName,
    IdNumber,
    Address,
    GuestType,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown companion field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for CompanionField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fullName" | "full_name" => Ok(CompanionField::FullName),
            "id" | "idNumber" | "id_number" => Ok(CompanionField::IdNumber),
            "address" => Ok(CompanionField::Address),
            "type" | "guestType" | "guest_type" | "guestTypeId" => Ok(CompanionField::GuestType),
            other => Err(UnknownField(other.to_string())),
        }
    }
}
