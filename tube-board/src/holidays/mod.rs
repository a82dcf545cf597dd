//! Bank holiday calendar.
//!
//! Timetables publish a separate schedule for public holidays. The calendar
//! is fetched from gov.uk, kept on disk for a day, and treated as optional:
//! when it cannot be loaded, every date is of unknown holiday status and
//! timetabling falls back to the ordinary weekday buckets.

mod cache;
mod client;
mod error;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use cache::{HolidayCache, HolidayCacheConfig};
pub use client::{ENGLAND_AND_WALES, HolidayClient, HolidayClientConfig};
pub use error::HolidayError;

/// Answers "is this date a public holiday?".
pub trait HolidayCalendar: Send + Sync {
    /// `None` when the calendar is unavailable.
    fn is_public_holiday(&self, date: NaiveDate) -> Option<bool>;
}

/// A calendar that never knows.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownCalendar;

impl HolidayCalendar for UnknownCalendar {
    fn is_public_holiday(&self, _date: NaiveDate) -> Option<bool> {
        None
    }
}

/// One division's holidays, as published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayDivision {
    pub division: String,
    #[serde(default)]
    pub events: Vec<PublicHoliday>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    pub title: String,
    /// ISO date, "yyyy-mm-dd".
    pub date: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub bunting: bool,
}

impl HolidayCalendar for HolidayDivision {
    fn is_public_holiday(&self, date: NaiveDate) -> Option<bool> {
        let date = date.format("%Y-%m-%d").to_string();
        Some(self.events.iter().any(|e| e.date == date))
    }
}

impl<T: HolidayCalendar> HolidayCalendar for Option<T> {
    fn is_public_holiday(&self, date: NaiveDate) -> Option<bool> {
        self.as_ref()?.is_public_holiday(date)
    }
}

/// Load the calendar, preferring a fresh disk copy.
///
/// On a cache miss the feed is fetched and written back. If the fetch fails
/// an expired disk copy is used; if there is none the calendar is unknown.
pub async fn load_calendar(client: &HolidayClient, cache: &HolidayCache) -> Option<HolidayDivision> {
    if let Some(division) = cache.load() {
        debug!(events = division.events.len(), "Loaded holidays from cache");
        return Some(division);
    }

    match client.fetch().await {
        Ok(division) => {
            if let Err(e) = cache.save(&division) {
                warn!(path = %cache.path().display(), error = %e, "Failed to cache holidays");
            }
            Some(division)
        }
        Err(e) => {
            warn!(error = %e, "Failed to fetch holidays, trying stale cache");
            cache.load_stale()
        }
    }
}
