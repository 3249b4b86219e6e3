use serde::{Deserialize, Serialize};

pub type RoomTypeId = i64;

/// A bookable category of room sharing one nightly rate and capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    pub id: RoomTypeId,
    pub name: String,
    pub size: Option<String>,
    pub beds: Option<String>,
    pub note: Option<String>,
    pub max_guests: u32,
    pub nightly_rate: f64,

    /// `Some(0)` means sold out; `None` means inventory is not reported.
    pub remaining_rooms: Option<u32>,
}

/// Room validation errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CatalogError {
    #[error("Invalid nightly rate for room {id}: {rate}")]
    InvalidRate { id: RoomTypeId, rate: f64 },

    #[error("Invalid guest capacity for room {id}: {max_guests}")]
    InvalidCapacity { id: RoomTypeId, max_guests: u32 },

    #[error("Room not found: {0}")]
    NotFound(String),
}

impl RoomType {
    pub fn new(id: RoomTypeId, name: &str, max_guests: u32, nightly_rate: f64) -> Result<Self, CatalogError> {
        let room = Self {
            id,
            name: name.to_string(),
            size: None,
            beds: None,
            note: None,
            max_guests,
            nightly_rate,
            remaining_rooms: None,
        };
        room.validate()?;
        Ok(room)
    }

    /// Rates must be finite and non-negative, capacity at least one guest.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.nightly_rate.is_finite() || self.nightly_rate < 0.0 {
            return Err(CatalogError::InvalidRate {
                id: self.id,
                rate: self.nightly_rate,
            });
        }
        if self.max_guests == 0 {
            return Err(CatalogError::InvalidCapacity {
                id: self.id,
                max_guests: self.max_guests,
            });
        }
        Ok(())
    }

    pub fn with_remaining(mut self, remaining: u32) -> Self {
        self.remaining_rooms = Some(remaining);
        self
    }

    pub fn with_details(mut self, size: &str, beds: &str, note: &str) -> Self {
        self.size = Some(size.to_string());
        self.beds = Some(beds.to_string());
        self.note = (!note.is_empty()).then(|| note.to_string());
        self
    }

    pub fn is_sold_out(&self) -> bool {
        self.remaining_rooms == Some(0)
    }

    /// URL slug, e.g. `Deluxe Room` -> `deluxe-room`.
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// Capacity line shown on room cards.
    pub fn capacity_label(&self, extra_child_capacities: &[u32]) -> String {
        if extra_child_capacities.contains(&self.max_guests) {
            format!(
                "Up to {} guests (or {} adults + 1 child)",
                self.max_guests, self.max_guests
            )
        } else {
            format!("Up to {} guests", self.max_guests)
        }
    }

    /// Low-stock badge; `None` when there is nothing worth flagging.
    pub fn scarcity_label(&self) -> Option<String> {
        match self.remaining_rooms? {
            0 => Some("Sold out".to_string()),
            1 => Some("Last room!".to_string()),
            2 => Some("2 rooms left".to_string()),
            _ => None,
        }
    }
}

pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Ordered room-type catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomCatalog {
    pub rooms: Vec<RoomType>,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<RoomType>) -> Self {
        Self { rooms }
    }

    pub fn get(&self, id: RoomTypeId) -> Option<&RoomType> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&RoomType> {
        self.rooms.iter().find(|r| r.slug() == slug)
    }

    /// Built-in Serenity Hotel listing, used when the catalog source is `static`.
    pub fn serenity_default() -> Self {
        let seed: [(RoomTypeId, &str, f64, &str, &str, u32, &str, u32); 8] = [
            (1, "Deluxe Room", 349.0, "1 Queen Bed", "32 m²", 2, "Balcony", 3),
            (2, "Executive Suite", 499.0, "1 King Bed", "45 m²", 2, "Kitchenette, Balcony", 1),
            (3, "Presidential Suite", 699.0, "1 King Bed", "65 m²", 4, "Kitchenette, Balcony", 2),
            (4, "Superior Room", 299.0, "1 Queen Bed", "28 m²", 2, "", 5),
            (5, "Family Suite", 549.0, "2 Queen Beds", "55 m²", 4, "Kitchenette, Balcony", 2),
            (6, "Standard Double Room", 299.0, "2 Double Beds", "35 m²", 4, "Balcony", 4),
            (7, "Family Studio", 499.0, "2 Queen Beds", "55 m²", 4, "Kitchenette", 1),
            (8, "Standard Room", 149.0, "Double Beds", "28 m²", 2, "", 3),
        ];

        let rooms = seed
            .into_iter()
            .map(|(id, name, rate, beds, size, max_guests, note, remaining)| RoomType {
                id,
                name: name.to_string(),
                size: None,
                beds: None,
                note: None,
                max_guests,
                nightly_rate: rate,
                remaining_rooms: None,
            }
            .with_details(size, beds, note)
            .with_remaining(remaining))
            .collect();

        Self { rooms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_validation() {
        assert!(RoomType::new(1, "Deluxe Room", 2, 399.0).is_ok());
        assert_eq!(
            RoomType::new(1, "Deluxe Room", 0, 399.0),
            Err(CatalogError::InvalidCapacity { id: 1, max_guests: 0 })
        );
        assert!(matches!(
            RoomType::new(2, "Broken", 2, -1.0),
            Err(CatalogError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_slug() {
        assert_eq!(slugify("Deluxe Room"), "deluxe-room");
        assert_eq!(slugify("  Standard  Double Room "), "standard-double-room");
    }

    #[test]
    fn test_labels() {
        let room = RoomType::new(1, "Deluxe Room", 2, 349.0).unwrap();
        assert_eq!(room.capacity_label(&[2]), "Up to 2 guests (or 2 adults + 1 child)");
        assert_eq!(room.capacity_label(&[]), "Up to 2 guests");
        assert_eq!(room.scarcity_label(), None);

        assert_eq!(room.clone().with_remaining(1).scarcity_label().as_deref(), Some("Last room!"));
        assert_eq!(room.clone().with_remaining(2).scarcity_label().as_deref(), Some("2 rooms left"));
        assert_eq!(room.clone().with_remaining(5).scarcity_label(), None);
        assert!(room.with_remaining(0).is_sold_out());
    }

    #[test]
    fn test_default_catalog_is_consistent() {
        let catalog = RoomCatalog::serenity_default();
        assert_eq!(catalog.rooms.len(), 8);
        assert!(catalog.rooms.iter().all(|r| r.validate().is_ok()));
        assert_eq!(catalog.find_by_slug("presidential-suite").map(|r| r.id), Some(3));
        assert_eq!(catalog.get(8).map(|r| r.nightly_rate), Some(149.0));
        assert_eq!(catalog.get(4).and_then(|r| r.note.clone()), None);
    }
}
