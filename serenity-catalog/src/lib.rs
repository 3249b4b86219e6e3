pub mod availability;
pub mod party;
pub mod pricing;
pub mod room;
pub mod stay;

pub use availability::{Availability, AvailabilityNotice, CapacityRules};
pub use party::{GuestParty, PartyField};
pub use pricing::{format_amount, format_price, PricingCalculator, Quote};
pub use room::{CatalogError, RoomCatalog, RoomType, RoomTypeId};
pub use stay::DateRange;
