use serde::{Deserialize, Serialize};

use crate::party::GuestParty;
use crate::room::RoomType;

/// Capacity fit rules.
///
/// A room fits when the party's total head count is within its capacity. Rooms
/// whose capacity is listed in `extra_child_capacities` additionally accept a
/// party of exactly `max_guests` adults plus one child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityRules {
    pub extra_child_capacities: Vec<u32>,
}

impl Default for CapacityRules {
    fn default() -> Self {
        Self {
            extra_child_capacities: vec![2],
        }
    }
}

impl CapacityRules {
    pub fn new(extra_child_capacities: Vec<u32>) -> Self {
        Self { extra_child_capacities }
    }

    pub fn fits(&self, room: &RoomType, party: &GuestParty) -> bool {
        if party.total_guests() <= room.max_guests {
            return true;
        }
        self.extra_child_capacities.contains(&room.max_guests)
            && party.adults == room.max_guests
            && party.children == 1
    }

    /// In stock and large enough for a valid party.
    pub fn is_bookable(&self, room: &RoomType, party: &GuestParty) -> bool {
        party.is_valid() && !room.is_sold_out() && self.fits(room, party)
    }

    /// Rooms that can host `party`, in catalog order.
    ///
    /// An invalid party (children without adults) always yields an empty list.
    pub fn available_rooms(&self, catalog: &[RoomType], party: &GuestParty) -> Vec<RoomType> {
        if !party.is_valid() {
            return Vec::new();
        }
        catalog
            .iter()
            .filter(|room| !room.is_sold_out())
            .filter(|room| self.fits(room, party))
            .cloned()
            .collect()
    }

    /// Availability listing together with the advisory shown above it.
    pub fn search(&self, catalog: &[RoomType], party: &GuestParty) -> Availability {
        let rooms = self.available_rooms(catalog, party);
        let notice = if !party.is_valid() {
            Some(AvailabilityNotice::UnaccompaniedChildren)
        } else if rooms.is_empty() {
            Some(AvailabilityNotice::NoCapacityMatch)
        } else {
            None
        };
        Availability { rooms, notice }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityNotice {
    UnaccompaniedChildren,
    NoCapacityMatch,
}

impl AvailabilityNotice {
    pub fn message(&self) -> &'static str {
        match self {
            AvailabilityNotice::UnaccompaniedChildren => {
                "Children cannot stay alone. At least one adult is required."
            }
            AvailabilityNotice::NoCapacityMatch => {
                "No rooms available for your group size. Consider booking multiple rooms or selecting rooms with higher capacity."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub rooms: Vec<RoomType>,
    pub notice: Option<AvailabilityNotice>,
}
