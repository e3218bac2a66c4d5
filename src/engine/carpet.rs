//! The daylight carpet: light state for every minute of every day of a year.
//!
//! The year is laid out as one flat "thread" of `days × 1440` minutes, day
//! after day, so that a light period which starts on one date and ends on the
//! next is simply a contiguous range. Rendering code reads it back as a grid of
//! 1440 rows (minutes) by one column per day.
//!
//! Days are painted from the last to the first. When a day's end event never
//! happens, its light runs on until wherever the following day's light began,
//! which the previous iteration has just worked out. When a begin event never
//! happens, the light started at the previous day's end event. If that is
//! missing too, the day's light starts at its own midnight and the previous
//! day, having no end either, paints up to that midnight; a whole run of such
//! days thus forms one unbroken ribbon. Daylight is painted after twilight and
//! wins where the two overlap.

use std::ops::Range;

use crate::constants::{DST_SHIFT_MINUTES, MINUTES_PER_DAY};
use crate::table::{DayRecord, Event, EventTable};

use super::Light;

/// Minute-resolution light grid for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct Carpet {
    days: usize,
    thread: Vec<Light>,
    unresolved_boundaries: usize,
}

/// Weave the carpet for a table.
pub fn weave(table: &EventTable) -> Carpet {
    let days = table.len();
    let mut carpet = Carpet {
        days,
        thread: vec![Light::Night; days * MINUTES_PER_DAY],
        unresolved_boundaries: 0,
    };

    carpet.paint(
        table.days(),
        |d| (d.twilight_begin, d.twilight_end),
        Light::Twilight,
    );
    carpet.paint(table.days(), |d| (d.sunrise, d.sunset), Light::Daylight);
    carpet
}

impl Carpet {
    /// Paint one kind of light period for every day, last day first.
    fn paint(
        &mut self,
        records: &[DayRecord],
        bounds: impl Fn(&DayRecord) -> (Event, Event),
        light: Light,
    ) {
        let day_minutes = MINUTES_PER_DAY as i64;
        let len = self.thread.len() as i64;
        // Where the later day's light began; the year's end before any day is seen.
        let mut carried = len;

        for (day, record) in records.iter().enumerate().rev() {
            let origin = day as i64 * day_minutes;
            let (begin, end) = bounds(record);

            let stop = end.minutes().map_or(carried, |m| origin + m);

            let start = match begin.minutes() {
                Some(m) => origin + m,
                None if day == 0 => 0,
                None => {
                    let (_, previous_end) = bounds(&records[day - 1]);
                    match previous_end.minutes() {
                        Some(m) => origin - day_minutes + m,
                        None => {
                            self.unresolved_boundaries += 1;
                            origin
                        }
                    }
                }
            };
            carried = start;

            let from = start.clamp(0, len) as usize;
            let to = stop.clamp(0, len) as usize;
            if from < to {
                self.thread[from..to].fill(light);
            }
        }
    }

    pub fn days(&self) -> usize {
        self.days
    }

    /// Light at `minute` of `day`.
    pub fn get(&self, minute: usize, day: usize) -> Light {
        self.thread[day * MINUTES_PER_DAY + minute]
    }

    /// The 1440 minutes of one day.
    pub fn column(&self, day: usize) -> &[Light] {
        let start = day * MINUTES_PER_DAY;
        &self.thread[start..start + MINUTES_PER_DAY]
    }

    /// The whole year as one minute sequence.
    pub fn thread(&self) -> &[Light] {
        &self.thread
    }

    /// Day boundaries whose begin and the previous day's end were both missing.
    ///
    /// Each of these was resolved by starting the day's light at its own
    /// midnight, where the previous day's light runs up to.
    pub fn unresolved_boundaries(&self) -> usize {
        self.unresolved_boundaries
    }

    /// Grid of light codes, one row per minute of the day, one column per day.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        (0..MINUTES_PER_DAY)
            .map(|minute| (0..self.days).map(|day| self.get(minute, day).code()).collect())
            .collect()
    }

    /// Count of minutes per light state over the whole year.
    pub fn minute_totals(&self) -> [usize; 3] {
        let mut totals = [0; 3];
        for light in &self.thread {
            totals[light.code() as usize] += 1;
        }
        totals
    }

    /// Move every minute later by `minutes`, wrapping around the year.
    pub fn shifted(&self, minutes: i64) -> Carpet {
        let n = self.thread.len();
        if n == 0 {
            return self.clone();
        }
        let shift = minutes.rem_euclid(n as i64) as usize;
        let mut thread = self.thread.clone();
        thread.rotate_right(shift);
        Carpet {
            thread,
            ..*self
        }
    }

    /// Apply daylight saving time to the given ranges of days.
    ///
    /// Every minute inside a range takes the value the unshifted carpet had
    /// one hour earlier. The first hour of a range therefore repeats the hour
    /// before the switch and the hour after the range is never shown.
    pub fn with_dst(&self, day_ranges: &[Range<usize>]) -> Carpet {
        let minute_ranges: Vec<Range<usize>> = day_ranges
            .iter()
            .map(|r| r.start * MINUTES_PER_DAY..r.end * MINUTES_PER_DAY)
            .collect();
        self.with_minute_offset(&minute_ranges, DST_SHIFT_MINUTES)
    }

    fn with_minute_offset(&self, minute_ranges: &[Range<usize>], offset: i64) -> Carpet {
        let n = self.thread.len() as i64;
        let mut thread = self.thread.clone();
        for range in minute_ranges {
            let end = range.end.min(self.thread.len());
            for i in range.start.min(end)..end {
                let source = (i as i64 - offset).rem_euclid(n) as usize;
                thread[i] = self.thread[source];
            }
        }
        Carpet { thread, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_support::*;

    const H: i64 = 3_600;

    #[test]
    fn test_ordinary_day_painting() {
        let carpet = weave(&uniform_table(2018, ordinary_events()));
        assert_eq!(carpet.days(), 365);
        assert_eq!(carpet.get(359, 0), Light::Night);
        assert_eq!(carpet.get(360, 0), Light::Twilight);
        assert_eq!(carpet.get(389, 0), Light::Twilight);
        assert_eq!(carpet.get(390, 0), Light::Daylight);
        assert_eq!(carpet.get(1079, 100), Light::Daylight);
        assert_eq!(carpet.get(1080, 100), Light::Twilight);
        assert_eq!(carpet.get(1110, 364), Light::Night);
        assert_eq!(carpet.minute_totals(), [365 * 690, 365 * 60, 365 * 690]);
        assert_eq!(carpet.unresolved_boundaries(), 0);
    }

    #[test]
    fn test_permanent_daylight_is_all_daylight() {
        let carpet = weave(&uniform_table(2020, polar_day_events()));
        assert!(carpet.thread().iter().all(|&l| l == Light::Daylight));
        // Every day but the first carries an unresolved begin, in both passes.
        assert_eq!(carpet.unresolved_boundaries(), 2 * 365);
    }

    #[test]
    fn test_light_past_midnight_continues_into_next_column() {
        let events = [
            Event::Occurs(3 * H),
            Event::Occurs(4 * H),
            Event::Occurs(12 * H),
            Event::Occurs(24 * H + 1800),
            Event::Occurs(25 * H),
        ];
        let carpet = weave(&uniform_table(2018, events));
        assert_eq!(carpet.get(10, 1), Light::Daylight);
        assert_eq!(carpet.get(45, 1), Light::Twilight);
        assert_eq!(carpet.get(90, 1), Light::Night);
        // Nothing bleeds into a day before the first.
        assert_eq!(carpet.get(10, 0), Light::Night);
    }

    #[test]
    fn test_run_of_midnight_sun_days_is_continuous() {
        // Days 100..=104 have no sunrise or sunset at all; day 99 has a sunrise
        // but no sunset and day 105 a sunset but no sunrise.
        let table = table_from_fn(2018, |i, _| {
            let mut events = ordinary_events();
            match i {
                99 => events[3] = Event::NeverOccurs,
                100..=104 => {
                    events[1] = Event::NeverOccurs;
                    events[3] = Event::NeverOccurs;
                }
                105 => events[1] = Event::NeverOccurs,
                _ => {}
            }
            events
        });
        let carpet = weave(&table);

        let start = 99 * MINUTES_PER_DAY + 390;
        let end = 105 * MINUTES_PER_DAY + 1080;
        assert!(carpet.thread()[start..end].iter().all(|&l| l == Light::Daylight));
        assert_eq!(carpet.thread()[start - 1], Light::Twilight);
        assert_eq!(carpet.thread()[end], Light::Twilight);
        // Days 100..=105 each look back at a day that has no sunset either.
        assert_eq!(carpet.unresolved_boundaries(), 6);
    }

    #[test]
    fn test_missing_end_on_last_day_runs_to_year_end() {
        let table = table_from_fn(2018, |i, _| {
            let mut events = ordinary_events();
            if i == 364 {
                events[3] = Event::NeverOccurs;
            }
            events
        });
        let carpet = weave(&table);
        assert_eq!(carpet.get(1439, 364), Light::Daylight);
    }

    #[test]
    fn test_missing_begin_on_first_day_starts_at_year_start() {
        let table = table_from_fn(2018, |i, _| {
            let mut events = ordinary_events();
            if i == 0 {
                events[1] = Event::NeverOccurs;
            }
            events
        });
        let carpet = weave(&table);
        assert_eq!(carpet.get(0, 0), Light::Daylight);
        assert_eq!(carpet.get(1079, 0), Light::Daylight);
        assert_eq!(carpet.unresolved_boundaries(), 0);
    }

    #[test]
    fn test_shift_rolls_around_the_year() {
        let carpet = weave(&uniform_table(2018, ordinary_events()));
        let local = carpet.shifted(-60);
        // Twilight began at 06:00 UTC, so at 05:00 on a UTC-1 clock.
        assert_eq!(local.get(300, 10), Light::Twilight);
        assert_eq!(local.get(299, 10), Light::Night);
        // The first hour of the year wraps to the end.
        assert_eq!(local.get(1439, 364), carpet.get(59, 0));
        assert_eq!(carpet.shifted(0), carpet);
        assert_eq!(carpet.shifted(365 * 1440), carpet);
    }

    #[test]
    fn test_dst_copies_one_hour_earlier_inside_the_window() {
        let carpet = weave(&uniform_table(2018, ordinary_events()));
        let dst = carpet.with_dst(&[83..300]);

        // Outside the window nothing changes.
        assert_eq!(dst.column(82), carpet.column(82));
        assert_eq!(dst.column(300), carpet.column(300));
        // Inside, twilight starts at 07:00.
        assert_eq!(dst.get(419, 150), Light::Night);
        assert_eq!(dst.get(420, 150), Light::Twilight);
        // The first hour of the window repeats the last hour of the day before.
        assert_eq!(dst.get(0, 83), carpet.get(1380, 82));
    }

    #[test]
    fn test_dst_at_year_start_copies_from_year_end() {
        let carpet = weave(&uniform_table(2018, ordinary_events()));
        let dst = carpet.with_dst(&[0..10]);
        assert_eq!(dst.get(30, 0), carpet.get(1410, 364));
    }

    #[test]
    fn test_rows_are_minutes_by_days() {
        let carpet = weave(&uniform_table(2018, ordinary_events()));
        let rows = carpet.rows();
        assert_eq!(rows.len(), 1440);
        assert_eq!(rows[0].len(), 365);
        assert_eq!(rows[400][7], 2);
        assert_eq!(rows[370][7], 1);
        assert_eq!(rows[0][7], 0);
    }
}
