//! The yearly event table: one record of astronomical events per calendar day.
//!
//! ## Structure
//!
//! - [`event`]: the tagged [`Event`] value replacing the numeric sentinel
//! - [`store`]: JSON persistence of whole tables with locking and atomic writes
//!
//! An [`EventTable`] built through [`EventTable::new`] is guaranteed to hold
//! exactly one record per day of its year, in ascending order, without gaps.
//! The engines rely on that and never re-validate. Tables derived by clock
//! shifting or by re-attributing records to the previous day keep the source table's
//! year and ordering but are produced by the crate itself, never by callers.

pub mod event;
pub mod store;

pub use event::Event;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::MONTHS_PER_YEAR;
use crate::error::{DaylightError, TableDefect};

/// Which of the five daily events a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    TwilightBegin,
    Sunrise,
    Noon,
    Sunset,
    TwilightEnd,
}

/// Events for a single date, as seconds from that date's UTC midnight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    #[serde(deserialize_with = "event::required")]
    pub twilight_begin: Event,
    #[serde(deserialize_with = "event::required")]
    pub sunrise: Event,
    #[serde(deserialize_with = "event::required")]
    pub noon: Event,
    #[serde(deserialize_with = "event::required")]
    pub sunset: Event,
    #[serde(deserialize_with = "event::required")]
    pub twilight_end: Event,
}

impl DayRecord {
    pub fn event(&self, kind: EventKind) -> Event {
        match kind {
            EventKind::TwilightBegin => self.twilight_begin,
            EventKind::Sunrise => self.sunrise,
            EventKind::Noon => self.noon,
            EventKind::Sunset => self.sunset,
            EventKind::TwilightEnd => self.twilight_end,
        }
    }

    /// Same date, every event moved by `by_seconds`.
    pub fn shifted(&self, by_seconds: i64) -> Self {
        Self {
            date: self.date,
            twilight_begin: self.twilight_begin.shifted(by_seconds),
            sunrise: self.sunrise.shifted(by_seconds),
            noon: self.noon.shifted(by_seconds),
            sunset: self.sunset.shifted(by_seconds),
            twilight_end: self.twilight_end.shifted(by_seconds),
        }
    }

    /// Month index of the record's date (January = 0).
    pub fn month_index(&self) -> usize {
        self.date.month0() as usize
    }
}

/// Ordered, gap-free set of day records for exactly one calendar year.
#[derive(Debug, Clone, PartialEq)]
pub struct EventTable {
    year: i32,
    days: Vec<DayRecord>,
}

impl EventTable {
    /// Build a table, rejecting anything that is not one complete year.
    ///
    /// The year is taken from the first record. The table must then start on
    /// January 1st and contain every following day exactly once.
    pub fn new(days: Vec<DayRecord>) -> Result<Self, DaylightError> {
        let year = days.first().map(|d| d.date.year()).unwrap_or_default();
        let expected = days_in_year(year);

        if days.len() != expected {
            return Err(TableDefect::WrongRecordCount {
                year,
                expected,
                found: days.len(),
            }
            .into());
        }

        let mut expected_date = first_day_of_year(year);
        for (index, day) in days.iter().enumerate() {
            if day.date.year() != year {
                return Err(TableDefect::WrongYear {
                    index,
                    found: day.date,
                    year,
                }
                .into());
            }
            if day.date != expected_date {
                return Err(TableDefect::OutOfSequence {
                    index,
                    found: day.date,
                    expected: expected_date,
                }
                .into());
            }
            expected_date += Duration::days(1);
        }

        Ok(Self { year, days })
    }

    /// Derived tables skip validation; only the crate builds them.
    pub(crate) fn derived(year: i32, days: Vec<DayRecord>) -> Self {
        Self { year, days }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn days(&self) -> &[DayRecord] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn is_leap_year(&self) -> bool {
        days_in_year(self.year) == 366
    }

    /// Number of days in each month of the table's year.
    pub fn month_lengths(&self) -> [u32; MONTHS_PER_YEAR] {
        month_lengths(self.year)
    }

    /// Month of a record for aggregation purposes.
    ///
    /// Records whose date lies outside the table's year (possible after
    /// re-attribution to the previous day) belong to no month.
    pub fn month_of(&self, day: &DayRecord) -> Option<usize> {
        (day.date.year() == self.year).then(|| day.month_index())
    }

    /// Index of the first record dated on or after `date` (like a sorted search).
    pub fn position_of(&self, date: NaiveDate) -> usize {
        self.days.partition_point(|d| d.date < date)
    }

    /// Every record re-attributed to the day before its date.
    ///
    /// Used to credit the small hours after midnight to the day on which the
    /// person woke up rather than to the day whose midnight they crossed.
    pub fn shift_back_one_day(&self) -> EventTable {
        let days = self
            .days
            .iter()
            .map(|d| DayRecord {
                date: d.date - Duration::days(1),
                ..*d
            })
            .collect();
        EventTable::derived(self.year, days)
    }

    /// Noon of every day in minutes from midnight, `None` where it never occurs.
    pub fn noon_minutes(&self) -> Vec<Option<f64>> {
        self.days
            .iter()
            .map(|d| d.noon.seconds().map(|s| s as f64 / 60.0))
            .collect()
    }
}

pub fn first_day_of_year(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default()
}

pub fn days_in_year(year: i32) -> usize {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366
    } else {
        365
    }
}

pub fn month_lengths(year: i32) -> [u32; MONTHS_PER_YEAR] {
    let february = if days_in_year(year) == 366 { 29 } else { 28 };
    [31, february, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_complete_year_is_accepted() {
        let table = uniform_table(2018, ordinary_events());
        assert_eq!(table.len(), 365);
        assert_eq!(table.year(), 2018);
        assert!(!table.is_leap_year());

        let leap = uniform_table(2020, ordinary_events());
        assert_eq!(leap.len(), 366);
        assert_eq!(leap.month_lengths()[1], 29);
    }

    #[test]
    fn test_missing_day_is_rejected() {
        let table = uniform_table(2018, ordinary_events());
        let mut days = table.days().to_vec();
        days.remove(40);
        let err = EventTable::new(days).unwrap_err();
        assert!(matches!(
            err,
            DaylightError::MalformedTable(TableDefect::WrongRecordCount { found: 364, .. })
        ));
    }

    #[test]
    fn test_gap_and_duplicate_are_rejected() {
        let table = uniform_table(2018, ordinary_events());
        let mut days = table.days().to_vec();
        // Duplicate Feb 10 in place of Feb 11: count stays right, order breaks.
        days[41] = days[40];
        let err = EventTable::new(days).unwrap_err();
        assert_eq!(
            err,
            DaylightError::MalformedTable(TableDefect::OutOfSequence {
                index: 41,
                found: date(2018, 2, 10),
                expected: date(2018, 2, 11),
            })
        );
    }

    #[test]
    fn test_table_must_start_on_january_first() {
        let table = uniform_table(2018, ordinary_events());
        let mut days = table.days().to_vec();
        days.rotate_left(1);
        assert!(EventTable::new(days).is_err());
        assert!(EventTable::new(Vec::new()).is_err());
    }

    #[test]
    fn test_shift_back_one_day_moves_dates_not_events() {
        let table = uniform_table(2018, ordinary_events());
        let shifted = table.shift_back_one_day();
        assert_eq!(shifted.days()[0].date, date(2017, 12, 31));
        assert_eq!(shifted.days()[0].sunrise, table.days()[0].sunrise);
        assert_eq!(shifted.month_of(&shifted.days()[0]), None);
        assert_eq!(shifted.month_of(&shifted.days()[1]), Some(0));
        assert_eq!(shifted.month_of(&shifted.days()[31]), Some(0));
        assert_eq!(shifted.month_of(&shifted.days()[32]), Some(1));
    }

    #[test]
    fn test_position_of_matches_sorted_search() {
        let table = uniform_table(2018, ordinary_events());
        assert_eq!(table.position_of(date(2018, 1, 1)), 0);
        assert_eq!(table.position_of(date(2018, 3, 25)), 83);
        assert_eq!(table.position_of(date(2017, 6, 1)), 0);
        assert_eq!(table.position_of(date(2019, 1, 1)), 365);
    }
}
