//! Daylight saving time windows.

use chrono::{Duration, NaiveDate, NaiveTime, Offset, TimeZone};
use chrono_tz::Tz;
use std::ops::Range;

use crate::error::DaylightError;
use crate::table::{EventTable, days_in_year, first_day_of_year};

/// Dates on which the clock runs one hour ahead of standard time.
///
/// `start` is the first date on DST and `end` the first date back on standard
/// time. When `end` comes before `start` the window wraps over New Year, as it
/// does in the southern hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DstWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DaylightError> {
        if start == end {
            return Err(DaylightError::InvalidDstWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn wraps_year_end(&self) -> bool {
        self.end < self.start
    }

    /// Index ranges of the table's days that fall inside the window.
    ///
    /// Dates are located the way a sorted search would, so a window reaching
    /// beyond the table is cut at the table's edges.
    pub fn day_ranges(&self, table: &EventTable) -> Vec<Range<usize>> {
        let start = table.position_of(self.start);
        let end = table.position_of(self.end);
        if self.wraps_year_end() {
            vec![start..table.len(), 0..end]
        } else {
            vec![start..end]
        }
        .into_iter()
        .filter(|r| !r.is_empty())
        .collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if self.wraps_year_end() {
            date >= self.start || date < self.end
        } else {
            date >= self.start && date < self.end
        }
    }
}

/// Standard offset and DST window a timezone uses during one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneYear {
    /// Winter (standard) offset from UTC in seconds.
    pub standard_offset: i64,
    pub dst: Option<DstWindow>,
    /// How far DST moves the clock, in seconds. Usually one hour.
    pub dst_delta: i64,
}

fn offset_at_noon(tz: Tz, date: NaiveDate) -> i64 {
    let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default());
    i64::from(tz.offset_from_utc_datetime(&noon).fix().local_minus_utc())
}

/// Work out the standard offset and DST window of `tz` for `year`.
///
/// Each date is judged by its offset at noon UTC, so the date of a switch
/// counts as already switched. If the zone changes more than twice a year,
/// the first DST period found is used.
pub fn zone_year(tz: Tz, year: i32) -> ZoneYear {
    let first = first_day_of_year(year);
    let offsets: Vec<i64> = (0..days_in_year(year))
        .map(|i| offset_at_noon(tz, first + Duration::days(i as i64)))
        .collect();

    let standard_offset = offsets.iter().copied().min().unwrap_or_default();
    let summer_offset = offsets.iter().copied().max().unwrap_or_default();
    let on_dst: Vec<bool> = offsets.iter().map(|&o| o > standard_offset).collect();

    let n = on_dst.len();
    let previous = |i: usize| on_dst[(i + n - 1) % n];
    let start = (0..n).find(|&i| on_dst[i] && !previous(i));
    let end = start.and_then(|s| {
        (1..=n)
            .map(|k| (s + k) % n)
            .find(|&i| !on_dst[i] && previous(i))
    });

    let dst = match (start, end) {
        (Some(s), Some(e)) => {
            let date = |i: usize| first + Duration::days(i as i64);
            DstWindow::new(date(s), date(e)).ok()
        }
        _ => None,
    };

    ZoneYear {
        standard_offset,
        dst,
        dst_delta: if dst.is_some() {
            summer_offset - standard_offset
        } else {
            0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_support::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_window_is_rejected() {
        let d = date(2018, 3, 25);
        assert_eq!(
            DstWindow::new(d, d).unwrap_err(),
            DaylightError::InvalidDstWindow { start: d, end: d }
        );
    }

    #[test]
    fn test_day_ranges_follow_sorted_search() {
        let table = uniform_table(2018, ordinary_events());
        let window = DstWindow::new(date(2018, 3, 25), date(2018, 10, 28)).unwrap();
        assert_eq!(window.day_ranges(&table), vec![83..300]);
        assert!(window.contains(date(2018, 3, 25)));
        assert!(!window.contains(date(2018, 10, 28)));
    }

    #[test]
    fn test_wrapping_window_covers_both_year_ends() {
        let table = uniform_table(2018, ordinary_events());
        let window = DstWindow::new(date(2018, 9, 30), date(2018, 4, 1)).unwrap();
        assert!(window.wraps_year_end());
        assert_eq!(window.day_ranges(&table), vec![272..365, 0..90]);
        assert!(window.contains(date(2018, 1, 5)));
        assert!(!window.contains(date(2018, 6, 5)));
    }

    #[test]
    fn test_european_zone_year() {
        let zone = zone_year(chrono_tz::Europe::Berlin, 2018);
        assert_eq!(zone.standard_offset, 3600);
        assert_eq!(zone.dst_delta, 3600);
        assert_eq!(
            zone.dst,
            Some(DstWindow {
                start: date(2018, 3, 25),
                end: date(2018, 10, 28),
            })
        );
    }

    #[test]
    fn test_southern_zone_year_wraps() {
        let zone = zone_year(chrono_tz::Australia::Sydney, 2018);
        assert_eq!(zone.standard_offset, 10 * 3600);
        let dst = zone.dst.unwrap();
        assert!(dst.wraps_year_end());
        assert_eq!(dst.start, date(2018, 10, 7));
        assert_eq!(dst.end, date(2018, 4, 1));
    }

    #[test]
    fn test_zone_without_dst() {
        let zone = zone_year(chrono_tz::Atlantic::Reykjavik, 2018);
        assert_eq!(zone.standard_offset, 0);
        assert_eq!(zone.dst, None);
        assert_eq!(zone.dst_delta, 0);
    }
}
