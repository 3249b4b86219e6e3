use serde::{Deserialize, Serialize};
use serenity_catalog::{RoomType, RoomTypeId};

use crate::{CoreError, CoreResult};

/// Numeric columns sometimes arrive as JSON strings (e.g. `"399.00"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            NumberOrText::Number(n) => Some(*n),
            NumberOrText::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Room type as served by the catalog endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTypeRecord {
    #[serde(alias = "room_type_id")]
    pub id: RoomTypeId,
    #[serde(alias = "room_type_name")]
    pub name: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default, alias = "beds")]
    pub bed: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    pub max_guests: u32,
    #[serde(alias = "price_per_night", alias = "nightly_rate")]
    pub price: NumberOrText,
    #[serde(default, alias = "available_rooms")]
    pub remaining_rooms: Option<u32>,
}

impl TryFrom<RoomTypeRecord> for RoomType {
    type Error = CoreError;

    fn try_from(record: RoomTypeRecord) -> CoreResult<Self> {
        let nightly_rate = record.price.to_f64().ok_or_else(|| {
            CoreError::MalformedResponse(format!("room type {} has a non-numeric price", record.id))
        })?;

        let room = RoomType {
            id: record.id,
            name: record.name,
            size: record.size,
            beds: record.bed,
            note: record.note.filter(|n| !n.trim().is_empty()),
            max_guests: record.max_guests,
            nightly_rate,
            remaining_rooms: record.remaining_rooms,
        };
        room.validate()
            .map_err(|e| CoreError::MalformedResponse(e.to_string()))?;
        Ok(room)
    }
}

/// Convert a whole catalog response; one bad record rejects the response.
pub fn parse_room_types(records: Vec<RoomTypeRecord>) -> CoreResult<Vec<RoomType>> {
    records.into_iter().map(RoomType::try_from).collect()
}
