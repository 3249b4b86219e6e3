pub mod draft;
pub mod models;
pub mod roster;
pub mod submission;

pub use draft::{Booker, DraftError, ReservationDraft};
pub use models::{CompanionField, CompanionRecord};
pub use roster::{required_companions, CompanionRoster, RosterError};
pub use submission::{SubmissionGate, SubmissionTicket};
