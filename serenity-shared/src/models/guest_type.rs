use serde::{Deserialize, Serialize};

pub type GuestTypeId = i64;

/// Guest classification served by the backend (e.g. domestic / international).
///
/// Every form that asks for a classification references one of these by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestType {
    pub id: GuestTypeId,
    pub name: String,

    /// Fractional surcharge applied to stays booked under this classification (0.1 = 10%).
    #[serde(default)]
    pub surcharge_rate: Option<f64>,
}

impl GuestType {
    pub fn find<'a>(types: &'a [GuestType], id: GuestTypeId) -> Option<&'a GuestType> {
        types.iter().find(|t| t.id == id)
    }
}
