//! Calendar helpers.

use chrono::{NaiveDate, Utc};

/// Return today's date in UTC.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
