//! Where raw daily events come from, and how they become an [`EventTable`].

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::table::{DayRecord, Event, EventTable, days_in_year, first_day_of_year};

/// The five events of one date as absolute UTC instants.
///
/// `None` means the event does not happen because the light it would start
/// or end persists through the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawDayEvents {
    pub twilight_begin: Option<DateTime<Utc>>,
    pub sunrise: Option<DateTime<Utc>>,
    pub noon: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub twilight_end: Option<DateTime<Utc>>,
}

/// Provider of daily events for one fixed place.
#[cfg_attr(test, mockall::automock)]
pub trait EventSource {
    fn day_events(&self, date: NaiveDate) -> Result<RawDayEvents>;

    /// Short description for logs, e.g. coordinates.
    fn describe(&self) -> String;
}

/// Seconds between the UTC midnight starting `date` and `instant`.
///
/// Instants far away from the date (such as the 1970 epoch some services
/// return for events that do not happen) fall below the sentinel threshold
/// and become [`Event::NeverOccurs`].
pub fn event_from_instant(date: NaiveDate, instant: Option<DateTime<Utc>>) -> Event {
    let midnight = date.and_time(chrono::NaiveTime::MIN).and_utc();
    match instant {
        Some(t) => Event::from_raw_seconds((t - midnight).num_seconds() as f64),
        None => Event::NeverOccurs,
    }
}

/// Convert one day of raw events into a record.
pub fn day_record(date: NaiveDate, raw: &RawDayEvents) -> DayRecord {
    DayRecord {
        date,
        twilight_begin: event_from_instant(date, raw.twilight_begin),
        sunrise: event_from_instant(date, raw.sunrise),
        noon: event_from_instant(date, raw.noon),
        sunset: event_from_instant(date, raw.sunset),
        twilight_end: event_from_instant(date, raw.twilight_end),
    }
}

/// Ask the source for every date of `year` and validate the result.
pub fn build_table(source: &dyn EventSource, year: i32) -> Result<EventTable> {
    let first = first_day_of_year(year);
    let mut days = Vec::with_capacity(days_in_year(year));

    for offset in 0..days_in_year(year) {
        let date = first + Duration::days(offset as i64);
        let raw = source
            .day_events(date)
            .with_context(|| format!("{} has no events for {date}", source.describe()))?;
        days.push(day_record(date, &raw));
    }

    EventTable::new(days)
        .with_context(|| format!("{} produced an incomplete table", source.describe()))
}
