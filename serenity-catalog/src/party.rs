use serde::{Deserialize, Serialize};

/// Upper bound the guest selector applies to each counter.
pub const DEFAULT_MAX_PER_FIELD: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyField {
    Adults,
    Children,
    Rooms,
}

impl PartyField {
    fn floor(self) -> u32 {
        match self {
            PartyField::Adults | PartyField::Rooms => 1,
            PartyField::Children => 0,
        }
    }
}

/// Adults, children and requested room count for a prospective booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestParty {
    pub adults: u32,
    pub children: u32,
    pub rooms: u32,
}

impl Default for GuestParty {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            rooms: 1,
        }
    }
}

impl GuestParty {
    pub fn new(adults: u32, children: u32, rooms: u32) -> Self {
        Self {
            adults,
            children,
            rooms: rooms.max(1),
        }
    }

    pub fn total_guests(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    /// Whether any counter is above `max`.
    pub fn exceeds(&self, max: u32) -> bool {
        self.adults > max || self.children > max || self.rooms > max
    }

    /// Children cannot stay without at least one adult.
    pub fn is_valid(&self) -> bool {
        !(self.children > 0 && self.adults == 0)
    }

    pub fn get(&self, field: PartyField) -> u32 {
        match field {
            PartyField::Adults => self.adults,
            PartyField::Children => self.children,
            PartyField::Rooms => self.rooms,
        }
    }

    /// Selector "+" button: one more, capped at `max`.
    pub fn increment(self, field: PartyField, max: u32) -> Self {
        let value = self.get(field).saturating_add(1).min(max.max(field.floor()));
        self.with(field, value)
    }

    /// Selector "-" button: one fewer, never below the field's floor.
    pub fn decrement(self, field: PartyField) -> Self {
        let value = self.get(field).saturating_sub(1).max(field.floor());
        self.with(field, value)
    }

    fn with(mut self, field: PartyField, value: u32) -> Self {
        match field {
            PartyField::Adults => self.adults = value,
            PartyField::Children => self.children = value,
            PartyField::Rooms => self.rooms = value,
        }
        self
    }

    /// Summary such as `2 Adults, 1 Child, 1 Room`.
    pub fn label(&self) -> String {
        format!(
            "{} Adult{}, {} Child{}, {} Room{}",
            self.adults,
            if self.adults != 1 { "s" } else { "" },
            self.children,
            if self.children != 1 { "ren" } else { "" },
            self.rooms,
            if self.rooms != 1 { "s" } else { "" },
        )
    }
}
