//! Which days of the year are light at a fixed clock time.

use serde::Serialize;

use crate::constants::MONTHS_PER_YEAR;
use crate::table::{DayRecord, Event, EventTable};

use super::{Light, MonthlyAggregate};

/// Per-month day counts for one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InstantCounts {
    pub sunlit: MonthlyAggregate,
    pub twilight: MonthlyAggregate,
}

/// Whether `instant` is at or after an event that starts a light period.
///
/// A start that never happens means the light was already there.
fn has_begun(event: Event, instant: i64) -> bool {
    event.seconds().is_none_or(|s| instant >= s)
}

/// Whether `instant` is at or after an event that ends a light period.
///
/// An end that never happens has not happened yet.
fn has_ended(event: Event, instant: i64) -> bool {
    event.seconds().is_some_and(|s| instant >= s)
}

/// Light at `instant` seconds from midnight on one day.
///
/// Sunlight takes precedence over twilight.
pub fn classify_day(day: &DayRecord, instant: i64) -> Light {
    let sunlit = has_begun(day.sunrise, instant) && !has_ended(day.sunset, instant);
    if sunlit {
        return Light::Daylight;
    }
    let twilight =
        has_begun(day.twilight_begin, instant) && !has_ended(day.twilight_end, instant);
    if twilight {
        Light::Twilight
    } else {
        Light::Night
    }
}

/// Count, per month, the days on which `instant` falls in sunlight or twilight.
///
/// Any instant is accepted; values before midnight or past 24:00 simply
/// compare against the day's events.
pub fn classify_instant(table: &EventTable, instant: i64) -> InstantCounts {
    let mut sunlit = [0.0; MONTHS_PER_YEAR];
    let mut twilight = [0.0; MONTHS_PER_YEAR];

    for day in table.days() {
        let Some(month) = table.month_of(day) else {
            continue;
        };
        match classify_day(day, instant) {
            Light::Daylight => sunlit[month] += 1.0,
            Light::Twilight => twilight[month] += 1.0,
            Light::Night => {}
        }
    }

    InstantCounts {
        sunlit: MonthlyAggregate::new(sunlit),
        twilight: MonthlyAggregate::new(twilight),
    }
}
