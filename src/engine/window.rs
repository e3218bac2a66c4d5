//! Average daylight and twilight inside a daily wake/sleep window.
//!
//! The window is given in seconds from midnight on the clock the table is
//! expressed in. A window may run past midnight (`stop > 86400`); the part
//! after midnight is then evaluated against the table re-attributed to the
//! previous day, so that the small hours count toward the day on which the
//! person woke up.
//!
//! Within one day, the window is cut into five disjoint segments:
//!
//! ```text
//! start                                                             stop
//!   |-- yesterday's light --|-- yesterday's twilight --| ... |-- twilight --|-- light --|-- twilight --|
//!       (last_sunset)           (last_twiend)          twibegin   sunrise     sunset     twiend
//! ```
//!
//! Every boundary is clamped into the window so the segments never overlap,
//! and "never happens" events are replaced by infinities before clamping.

use serde::Serialize;

use crate::constants::{MONTHS_PER_YEAR, SECONDS_PER_DAY, SECONDS_PER_HOUR};
use crate::error::DaylightError;
use crate::table::{DayRecord, Event, EventTable};

use super::MonthlyAggregate;

/// A validated wake/sleep window in seconds from midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: i64,
    pub stop: i64,
}

impl Window {
    /// Validate an explicit `[start, stop)` pair.
    pub fn new(start: i64, stop: i64) -> Result<Self, DaylightError> {
        let reason = if start < 0 {
            Some("start must not be negative")
        } else if start >= SECONDS_PER_DAY {
            Some("start must be before midnight")
        } else if stop <= start {
            Some("stop must be after start")
        } else if stop - start > SECONDS_PER_DAY {
            Some("window must not be longer than one day")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DaylightError::InvalidWindow {
                start,
                stop,
                reason,
            }),
            None => Ok(Self { start, stop }),
        }
    }

    /// Build a window from wall-clock wake and sleep times.
    ///
    /// A sleep time at or before the wake time is taken to be after midnight,
    /// so `wake == sleep` describes a full day.
    pub fn from_wake_sleep(wake: i64, sleep: i64) -> Result<Self, DaylightError> {
        let stop = if sleep <= wake {
            sleep + SECONDS_PER_DAY
        } else {
            sleep
        };
        Self::new(wake, stop)
    }

    pub fn crosses_midnight(&self) -> bool {
        self.stop > SECONDS_PER_DAY
    }

    pub fn duration_hours(&self) -> f64 {
        (self.stop - self.start) as f64 / SECONDS_PER_HOUR as f64
    }
}

/// Monthly mean hours of sunlight and twilight inside a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DaylightAverages {
    pub sunlight: MonthlyAggregate,
    pub twilight: MonthlyAggregate,
}

/// Light inside the window on one day, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayExposure {
    pub sunlight: f64,
    pub twilight: f64,
}

/// Average hours of sunlight and twilight per month for `[start, stop)`.
///
/// Fails with [`DaylightError::InvalidWindow`] before doing any work if the
/// window is empty, reversed, starts outside the first day, or is longer than
/// a day.
pub fn average_daylight(
    table: &EventTable,
    start: i64,
    stop: i64,
) -> Result<DaylightAverages, DaylightError> {
    let window = Window::new(start, stop)?;
    Ok(average_in_window(table, window))
}

/// Same as [`average_daylight`] for an already validated window.
pub fn average_in_window(table: &EventTable, window: Window) -> DaylightAverages {
    if window.crosses_midnight() {
        let evening = average_single_day(table, window.start, SECONDS_PER_DAY);
        let after_midnight = average_single_day(
            &table.shift_back_one_day(),
            0,
            window.stop - SECONDS_PER_DAY,
        );
        DaylightAverages {
            sunlight: evening.sunlight + after_midnight.sunlight,
            twilight: evening.twilight + after_midnight.twilight,
        }
    } else {
        average_single_day(table, window.start, window.stop)
    }
}

fn average_single_day(table: &EventTable, start: i64, stop: i64) -> DaylightAverages {
    let mut sunlight = [0.0; MONTHS_PER_YEAR];
    let mut twilight = [0.0; MONTHS_PER_YEAR];
    let mut counts = [0usize; MONTHS_PER_YEAR];

    for day in table.days() {
        let Some(month) = table.month_of(day) else {
            continue;
        };
        let exposure = day_exposure(day, start, stop);
        sunlight[month] += exposure.sunlight;
        twilight[month] += exposure.twilight;
        counts[month] += 1;
    }

    let scale = SECONDS_PER_HOUR as f64;
    DaylightAverages {
        sunlight: MonthlyAggregate::from_sums(sunlight, counts, scale),
        twilight: MonthlyAggregate::from_sums(twilight, counts, scale),
    }
}

/// Clamp like a vectorized clip: raise to `lo`, then cap at `hi`.
fn clip(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

fn seconds_or(event: Event, never: f64) -> f64 {
    event.seconds().map_or(never, |s| s as f64)
}

/// Sunlight and twilight seconds of one day inside `[start, stop]`, `stop <= 86400`.
pub fn day_exposure(day: &DayRecord, start: i64, stop: i64) -> DayExposure {
    let start = start as f64;
    let stop = stop as f64;
    let day_length = SECONDS_PER_DAY as f64;

    // Light that was already there when the day began.
    let twilight_begin = seconds_or(day.twilight_begin, f64::NEG_INFINITY);
    let sunrise = seconds_or(day.sunrise, f64::NEG_INFINITY);
    // Light that never ends lasts through the window.
    let sunset = seconds_or(day.sunset, f64::INFINITY);
    let twilight_end = seconds_or(day.twilight_end, stop);

    // Tail of yesterday's evening, modelled by today's events a day earlier.
    let last_sunset = sunset - day_length;
    let last_twilight_end = twilight_end - day_length;

    let sunrise = clip(sunrise, start, stop);
    let sunset = clip(sunset, start, stop);
    let last_sunset = clip(last_sunset, start, sunrise);
    let last_twilight_end = clip(last_twilight_end, last_sunset, stop);
    let twilight_begin = clip(twilight_begin, last_twilight_end, stop);
    let twilight_end = clip(twilight_end, start, stop);

    let segment = |from: f64, to: f64| (to - from).max(0.0);

    DayExposure {
        sunlight: segment(start, last_sunset) + segment(sunrise, sunset),
        twilight: segment(last_sunset, last_twilight_end)
            + segment(twilight_begin, sunrise)
            + segment(sunset, twilight_end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_support::*;

    const H: i64 = 3_600;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_window_validation() {
        assert!(Window::new(7 * H, 23 * H).is_ok());
        assert!(Window::new(7 * H, 7 * H).is_err());
        assert!(Window::new(7 * H, 6 * H).is_err());
        assert!(Window::new(-1, 6 * H).is_err());
        assert!(Window::new(24 * H, 25 * H).is_err());
        assert!(Window::new(7 * H, 31 * H + 1).is_err());
        assert!(Window::new(0, 24 * H).is_ok());
    }

    #[test]
    fn test_sleep_before_wake_means_after_midnight() {
        let w = Window::from_wake_sleep(7 * H, H).unwrap();
        assert_eq!(w.stop, 25 * H);
        assert!(w.crosses_midnight());
        assert_eq!(w.duration_hours(), 18.0);

        let full = Window::from_wake_sleep(0, 0).unwrap();
        assert_eq!((full.start, full.stop), (0, 24 * H));
    }

    #[test]
    fn test_invalid_window_fails_before_any_work() {
        let table = uniform_table(2018, ordinary_events());
        let err = average_daylight(&table, 10 * H, 9 * H).unwrap_err();
        assert!(matches!(err, DaylightError::InvalidWindow { .. }));
    }

    #[test]
    fn test_ordinary_day_segments() {
        let table = uniform_table(2018, ordinary_events());
        let day = &table.days()[0];

        // 07:00-23:00: sunlight 07-18, twilight 18-18:30.
        let e = day_exposure(day, 7 * H, 23 * H);
        assert!(approx(e.sunlight, 11.0 * H as f64));
        assert!(approx(e.twilight, 0.5 * H as f64));

        // 05:00-12:00: morning twilight 06:00-06:30, sunlight 06:30-12:00.
        let e = day_exposure(day, 5 * H, 12 * H);
        assert!(approx(e.twilight, 0.5 * H as f64));
        assert!(approx(e.sunlight, 5.5 * H as f64));
    }

    #[test]
    fn test_yesterdays_evening_leaks_past_midnight() {
        // Sunset at 24:30 and twilight end at 25:15 of the same date.
        let events = [
            Event::Occurs(3 * H),
            Event::Occurs(4 * H),
            Event::Occurs(12 * H),
            Event::Occurs(24 * H + 1800),
            Event::Occurs(25 * H + 900),
        ];
        let table = uniform_table(2018, events);
        let e = day_exposure(&table.days()[10], 0, 24 * H);
        // 00:00-00:30 sun, 00:30-01:15 twilight, 03-04 twilight, 04-24 sun.
        assert!(approx(e.sunlight, 0.5 * H as f64 + 20.0 * H as f64));
        assert!(approx(e.twilight, 0.75 * H as f64 + 1.0 * H as f64));
    }

    #[test]
    fn test_permanent_daylight_fills_window() {
        let table = uniform_table(2018, polar_day_events());
        let avg = average_daylight(&table, 7 * H, 23 * H).unwrap();
        for month in 0..12 {
            assert!(approx(avg.sunlight[month], 16.0));
            assert!(approx(avg.twilight[month], 0.0));
        }
    }

    #[test]
    fn test_permanent_night_is_dark() {
        // Dark all day: light events collapse onto noon.
        let noon = Event::Occurs(12 * H);
        let table = uniform_table(2018, [noon; 5]);
        let avg = average_daylight(&table, 0, 24 * H).unwrap();
        assert!(avg.sunlight.iter().all(|v| v == 0.0));
        assert!(avg.twilight.iter().all(|v| v == 0.0));
    }

    #[test]
    fn test_no_segment_goes_negative_near_sentinels() {
        // Sunset never happens but twilight begins after sunrise: inconsistent
        // records like this appear right at the polar boundary.
        let events = [
            Event::Occurs(11 * H),
            Event::Occurs(10 * H),
            Event::Occurs(12 * H),
            Event::NeverOccurs,
            Event::Occurs(2 * H),
        ];
        let table = uniform_table(2018, events);
        let e = day_exposure(&table.days()[0], 7 * H, 23 * H);
        assert!(e.sunlight >= 0.0 && e.twilight >= 0.0);
        assert!(e.sunlight + e.twilight <= 16.0 * H as f64 + 1e-9);
    }

    #[test]
    fn test_midnight_window_is_sum_of_halves() {
        let table = table_from_fn(2018, |i, _| {
            let drift = (i as i64 % 50) * 60;
            [
                Event::Occurs(5 * H + drift),
                Event::Occurs(6 * H + drift),
                Event::Occurs(12 * H),
                Event::Occurs(22 * H + drift),
                Event::Occurs(23 * H + 1800 + drift),
            ]
        });
        let whole = average_daylight(&table, 20 * H, 26 * H).unwrap();
        let evening = average_daylight(&table, 20 * H, 24 * H).unwrap();
        let night = average_daylight(&table.shift_back_one_day(), 0, 2 * H).unwrap();
        for month in 0..12 {
            assert!(approx(whole.sunlight[month], evening.sunlight[month] + night.sunlight[month]));
            assert!(approx(whole.twilight[month], evening.twilight[month] + night.twilight[month]));
        }
    }

    #[test]
    fn test_residual_drops_record_before_the_year() {
        // Only Jan 1 has light after midnight; re-attributed to Dec 31 of the
        // previous year, it must not show up in any month.
        let table = table_from_fn(2018, |i, _| {
            let mut events = ordinary_events();
            if i == 0 {
                events[0] = Event::Occurs(0);
                events[1] = Event::Occurs(0);
            }
            events
        });
        let night = average_daylight(&table.shift_back_one_day(), 0, 2 * H).unwrap();
        assert!(night.sunlight.iter().all(|v| v == 0.0));
    }
}
