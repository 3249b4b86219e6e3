use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::guest_type::GuestTypeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// Account profile of a signed-in guest, as returned by sign-in and the profile endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,

    /// National identification number.
    #[serde(rename = "cccd")]
    pub id_number: String,

    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub address: Option<String>,

    pub guest_type_name: String,
    #[serde(default)]
    pub guest_type_id: Option<GuestTypeId>,
    #[serde(default)]
    pub surcharge_rate: Option<f64>,
}

impl AccountProfile {
    /// Birthday as a calendar date; accepts `YYYY-MM-DD` or a full ISO timestamp.
    pub fn birthday_date(&self) -> Option<NaiveDate> {
        let raw = self.birthday.as_deref()?;
        let date_part = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }

    pub fn initial(&self) -> Option<char> {
        self.full_name.chars().next()
    }
}
