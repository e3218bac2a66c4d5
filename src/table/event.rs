//! A single astronomical event as an explicit tagged value.
//!
//! Raw data sources encode "this event does not happen today" as a large
//! negative offset. Inside the crate that convention is replaced by
//! [`Event::NeverOccurs`], and only the (de)serialization boundary still
//! understands the numeric sentinel.

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{NEVER_OCCURS_THRESHOLD, SECONDS_PER_MINUTE};

/// Time of an event in seconds from the UTC midnight of the record's date.
///
/// `NeverOccurs` on an *ending* event (sunset, end of twilight) means the light
/// persists through the end of the day; on a *beginning* event (sunrise, start
/// of twilight) it means the light was already there when the day began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<i64>")]
pub enum Event {
    Occurs(i64),
    NeverOccurs,
}

impl Event {
    /// Interpret a raw seconds offset using the sentinel convention.
    ///
    /// Non-finite values and anything below −86400 s become `NeverOccurs`.
    /// Fractional seconds are rounded to the nearest second.
    pub fn from_raw_seconds(raw: f64) -> Self {
        if !raw.is_finite() || raw < NEVER_OCCURS_THRESHOLD as f64 {
            Event::NeverOccurs
        } else {
            Event::Occurs(raw.round() as i64)
        }
    }

    pub fn seconds(self) -> Option<i64> {
        match self {
            Event::Occurs(s) => Some(s),
            Event::NeverOccurs => None,
        }
    }

    pub fn occurs(self) -> bool {
        matches!(self, Event::Occurs(_))
    }

    /// Move the event by a clock offset. Sentinels are not moved.
    pub fn shifted(self, by_seconds: i64) -> Self {
        match self {
            Event::Occurs(s) => Event::Occurs(s + by_seconds),
            Event::NeverOccurs => Event::NeverOccurs,
        }
    }

    /// Whole minutes from midnight, rounding half to even.
    pub fn minutes(self) -> Option<i64> {
        self.seconds()
            .map(|s| (s as f64 / SECONDS_PER_MINUTE as f64).round_ties_even() as i64)
    }
}

/// Field deserializer for events that must be present in the input.
///
/// `null` is accepted and means `NeverOccurs`; a missing key is an error.
pub(crate) fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Event, D::Error> {
    Event::deserialize(deserializer)
}

impl From<Option<f64>> for Event {
    fn from(raw: Option<f64>) -> Self {
        raw.map_or(Event::NeverOccurs, Event::from_raw_seconds)
    }
}

impl From<Event> for Option<i64> {
    fn from(event: Event) -> Self {
        event.seconds()
    }
}
