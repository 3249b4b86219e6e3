use serde::{Deserialize, Serialize};

use crate::models::{CompanionField, CompanionRecord, UnknownField};

/// Companions required for a party: everyone except the primary booker.
pub fn required_companions(total_guests: u32) -> usize {
    total_guests.saturating_sub(1) as usize
}

/// Companion records of a reservation form plus the tab currently shown.
///
/// All transitions return a new roster and leave `self` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionRoster {
    pub companions: Vec<CompanionRecord>,

    /// 1-based, always within `[1, max(1, companions.len())]`
    pub active_tab: usize,
}

impl Default for CompanionRoster {
    fn default() -> Self {
        Self {
            companions: Vec::new(),
            active_tab: 1,
        }
    }
}

impl CompanionRoster {
    /// Roster sized for `total_guests`, every record defaulted from `template`.
    pub fn for_guests(total_guests: u32, template: Option<&CompanionRecord>) -> Self {
        Self::default().resize(required_companions(total_guests), template)
    }

    /// Rebuild from client-held state, clamping an out-of-range tab.
    pub fn from_parts(companions: Vec<CompanionRecord>, active_tab: usize) -> Self {
        let max_tab = companions.len().max(1);
        Self {
            companions,
            active_tab: active_tab.clamp(1, max_tab),
        }
    }

    pub fn len(&self) -> usize {
        self.companions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CompanionRecord> {
        self.companions.get(index)
    }

    /// Record shown under the active tab, if any.
    pub fn active(&self) -> Option<&CompanionRecord> {
        self.active_tab
            .checked_sub(1)
            .and_then(|index| self.companions.get(index))
    }

    /// Grow or shrink to exactly `required` records.
    ///
    /// Kept records are neither modified nor reordered. Trailing records are
    /// dropped on shrink; new records are cloned from `template` or blank.
    pub fn resize(&self, required: usize, template: Option<&CompanionRecord>) -> Self {
        let mut companions: Vec<CompanionRecord> =
            self.companions.iter().take(required).cloned().collect();

        let fill = template.cloned().unwrap_or_default();
        companions.resize(required, fill);

        let active_tab = if self.active_tab > required {
            required.max(1)
        } else {
            self.active_tab.max(1)
        };

        Self { companions, active_tab }
    }

    /// Re-derive the roster after the party's guest count changed.
    pub fn sync_with_guests(&self, total_guests: u32, template: Option<&CompanionRecord>) -> Self {
        let required = required_companions(total_guests);
        if required == self.len() {
            return self.clone();
        }
        self.resize(required, template)
    }

    /// Replace one field of one record; every other record and field stays as-is.
    pub fn update_field(&self, index: usize, field: CompanionField, value: &str) -> Result<Self, RosterError> {
        if index >= self.companions.len() {
            return Err(RosterError::IndexOutOfRange {
                index,
                len: self.companions.len(),
            });
        }

        let mut updated = self.clone();
        let record = &mut updated.companions[index];
        match field {
            CompanionField::FullName => record.full_name = value.to_string(),
            CompanionField::IdNumber => record.id_number = value.to_string(),
            CompanionField::Address => record.address = value.to_string(),
            CompanionField::GuestType => {
                let trimmed = value.trim();
                record.guest_type_id = if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.parse().map_err(|_| RosterError::InvalidGuestType(value.to_string()))?)
                };
            }
        }
        Ok(updated)
    }

    /// Same as [`update_field`](Self::update_field) with the field given by name.
    pub fn update_named_field(&self, index: usize, field_name: &str, value: &str) -> Result<Self, RosterError> {
        let field: CompanionField = field_name.parse()?;
        self.update_field(index, field, value)
    }

    /// Switch the displayed companion (1-based tab).
    pub fn select_tab(&self, tab: usize) -> Result<Self, RosterError> {
        let max_tab = self.companions.len().max(1);
        if tab == 0 || tab > max_tab {
            return Err(RosterError::TabOutOfRange { tab, max: max_tab });
        }
        Ok(Self {
            companions: self.companions.clone(),
            active_tab: tab,
        })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("Companion index {index} out of range for roster of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Companion tab {tab} out of range (1..={max})")]
    TabOutOfRange { tab: usize, max: usize },

    #[error("Invalid guest type id: {0}")]
    InvalidGuestType(String),

    #[error(transparent)]
    UnknownField(#[from] UnknownField),
}
