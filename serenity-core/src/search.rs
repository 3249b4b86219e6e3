use serde::{Deserialize, Serialize};
use serenity_catalog::{DateRange, GuestParty};

/// Room search as carried between the search form, the listing and the room detail page.
///
/// Every field is optional; missing party fields fall back to 1 adult, 0 children, 1 room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSearchQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adults: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<u32>,
}

impl RoomSearchQuery {
    pub fn from_parts(range: Option<&DateRange>, party: &GuestParty) -> Self {
        Self {
            check_in: range.map(|r| r.check_in.to_string()),
            check_out: range.map(|r| r.check_out.to_string()),
            adults: Some(party.adults),
            children: Some(party.children),
            rooms: Some(party.rooms),
        }
    }

    pub fn party(&self) -> GuestParty {
        let default = GuestParty::default();
        GuestParty::new(
            self.adults.unwrap_or(default.adults),
            self.children.unwrap_or(default.children),
            self.rooms.unwrap_or(default.rooms),
        )
    }

    /// `None` unless both dates are present and parse.
    pub fn range(&self) -> Option<DateRange> {
        DateRange::parse(self.check_in.as_deref(), self.check_out.as_deref())
    }

    /// Query string for links that carry the search forward, e.g. to `/rooms/{slug}`.
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(v) = &self.check_in {
            pairs.push(format!("checkIn={}", v));
        }
        if let Some(v) = &self.check_out {
            pairs.push(format!("checkOut={}", v));
        }
        if let Some(v) = self.adults {
            pairs.push(format!("adults={}", v));
        }
        if let Some(v) = self.children {
            pairs.push(format!("children={}", v));
        }
        if let Some(v) = self.rooms {
            pairs.push(format!("rooms={}", v));
        }
        pairs.join("&")
    }
}
