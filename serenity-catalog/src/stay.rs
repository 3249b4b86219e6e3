use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format carried in search links and request bodies.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Check-in / check-out pair for a stay.
///
/// Both ends are calendar dates anchored at local midnight; no timezone
/// normalization is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl DateRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self { check_in, check_out }
    }

    /// Build a range from raw `YYYY-MM-DD` inputs. Missing or unparseable dates give `None`.
    pub fn parse(check_in: Option<&str>, check_out: Option<&str>) -> Option<Self> {
        let check_in = parse_date(check_in?)?;
        let check_out = parse_date(check_out?)?;
        Some(Self { check_in, check_out })
    }

    /// A range is billable only when check-out is strictly after check-in.
    pub fn is_billable(&self) -> bool {
        self.check_out > self.check_in
    }

    /// Number of nights; zero for empty or inverted ranges, never negative.
    pub fn night_count(&self) -> u32 {
        if !self.is_billable() {
            return 0;
        }
        let days = (self.check_out - self.check_in).num_days();
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    /// Replace the check-in date (date-field edit).
    pub fn with_check_in(self, check_in: NaiveDate) -> Self {
        Self { check_in, ..self }
    }

    /// Replace the check-out date (date-field edit).
    pub fn with_check_out(self, check_out: NaiveDate) -> Self {
        Self { check_out, ..self }
    }
}

/// Night count for an optional range; a missing range has zero nights.
pub fn night_count(range: Option<&DateRange>) -> u32 {
    range.map(DateRange::night_count).unwrap_or(0)
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), ISO_DATE_FORMAT).ok()
}

/// `30/05/2025` style, used on the booking summary.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `Friday, May 30, 2025` style, used on the booking history.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
