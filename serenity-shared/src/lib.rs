pub mod models;
pub mod pii;

pub use models::{AccountProfile, Gender, GuestType, GuestTypeId};
pub use pii::Masked;
