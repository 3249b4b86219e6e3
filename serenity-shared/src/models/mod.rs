pub mod account;
pub mod guest_type;

pub use account::{AccountProfile, Gender};
pub use guest_type::{GuestType, GuestTypeId};
