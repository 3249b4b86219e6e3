use serde::{Deserialize, Serialize};

use crate::stay::DateRange;

/// Price breakdown shown on the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub nights: u32,
    pub room_count: u32,
    pub nightly_rate: f64,

    /// `rate * nights * rooms`
    pub subtotal: f64,

    /// Guest-type surcharge on top of the subtotal
    pub surcharge: f64,

    pub total: f64,
}

impl Quote {
    /// Submission is only possible for a priced stay.
    pub fn is_billable(&self) -> bool {
        self.nights > 0
    }
}

/// Turns a nightly rate, a stay and a room count into a price.
pub struct PricingCalculator;

impl PricingCalculator {
    /// `rate * nights * room_count`; exactly zero whenever the range has no nights.
    pub fn total_price(rate: f64, range: &DateRange, room_count: u32) -> f64 {
        let nights = range.night_count();
        if nights == 0 {
            return 0.0;
        }
        rate.max(0.0) * f64::from(nights) * f64::from(room_count.max(1))
    }

    /// Full breakdown including the signed-in guest's classification surcharge.
    pub fn quote(rate: f64, range: &DateRange, room_count: u32, surcharge_rate: Option<f64>) -> Quote {
        let nights = range.night_count();
        let room_count = room_count.max(1);
        let subtotal = Self::total_price(rate, range, room_count);

        let surcharge_rate = surcharge_rate.filter(|r| r.is_finite() && *r > 0.0).unwrap_or(0.0);
        let surcharge = subtotal * surcharge_rate;

        Quote {
            nights,
            room_count,
            nightly_rate: rate.max(0.0),
            subtotal,
            surcharge,
            total: subtotal + surcharge,
        }
    }
}

/// Locale-grouped amount: `1,596` for whole amounts, `1,234.50` otherwise.
pub fn format_amount(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    if fraction == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{:02}", sign, grouped, fraction)
    }
}

/// `$1,596` price tag.
pub fn format_price(amount: f64) -> String {
    format!("${}", format_amount(amount))
}
