//! Clock shifting: from UTC event tables to what a wall clock shows.
//!
//! Tables are recorded in UTC. A place runs its clocks at a fixed offset from
//! UTC, and possibly one hour further ahead during a DST window. From one
//! table this module derives the three variants compared everywhere else:
//! plain UTC, the local standard clock, and the local clock with DST.
//!
//! Shifting never changes a record's date, only its event offsets. An event
//! pushed past midnight simply gets an offset above 86400 (or below zero),
//! which the engines already handle. Carpets are shifted after weaving
//! instead, by rolling the minute thread.

pub mod dst;

pub use dst::{DstWindow, ZoneYear, zone_year};

use chrono_tz::Tz;
use std::fmt;
use std::ops::Range;

use crate::constants::{DST_SHIFT_SECONDS, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use crate::engine::{Carpet, weave};
use crate::table::{DayRecord, EventTable};

/// Which clock a table, carpet or report is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockVariant {
    Utc,
    Local,
    Dst,
}

impl ClockVariant {
    pub const ALL: [ClockVariant; 3] = [ClockVariant::Utc, ClockVariant::Local, ClockVariant::Dst];
}

/// Explicit clock rules for one place and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockSettings {
    /// Standard (winter) offset from UTC in seconds.
    pub utc_offset: i64,
    pub dst: Option<DstWindow>,
}

impl ClockSettings {
    pub fn utc() -> Self {
        Self::default()
    }

    pub fn new(utc_offset: i64, dst: Option<DstWindow>) -> Self {
        Self { utc_offset, dst }
    }

    /// Rules a timezone follows during `year`.
    pub fn from_timezone(tz: Tz, year: i32) -> Self {
        let zone = zone_year(tz, year);
        Self::new(zone.standard_offset, zone.dst)
    }

    pub fn utc_offset_minutes(&self) -> i64 {
        self.utc_offset / SECONDS_PER_MINUTE
    }

    /// Day ranges of the table that are on DST; empty without a window.
    pub fn dst_ranges(&self, table: &EventTable) -> Vec<Range<usize>> {
        self.dst
            .map(|window| window.day_ranges(table))
            .unwrap_or_default()
    }

    /// The table as shown by the local standard clock.
    pub fn local_table(&self, table: &EventTable) -> EventTable {
        shift_table(table, self.utc_offset)
    }

    /// The table as shown by the local clock with DST applied.
    pub fn dst_table(&self, table: &EventTable) -> EventTable {
        let local = self.local_table(table);
        let ranges = self.dst_ranges(table);
        if ranges.is_empty() {
            return local;
        }

        let days = local
            .days()
            .iter()
            .enumerate()
            .map(|(i, day)| {
                if ranges.iter().any(|r| r.contains(&i)) {
                    day.shifted(DST_SHIFT_SECONDS)
                } else {
                    *day
                }
            })
            .collect();
        EventTable::derived(table.year(), days)
    }

    /// One table per clock variant, all from the same UTC table.
    pub fn tables(&self, table: &EventTable) -> TableVariants {
        TableVariants {
            utc: table.clone(),
            local: self.local_table(table),
            dst: self.dst_table(table),
        }
    }

    /// One carpet per clock variant, woven once in UTC and then shifted.
    pub fn carpets(&self, table: &EventTable) -> CarpetVariants {
        let utc = weave(table);
        let local = utc.shifted(self.utc_offset_minutes());
        let dst = local.with_dst(&self.dst_ranges(table));
        CarpetVariants { utc, local, dst }
    }

    /// Human-readable name of a variant, e.g. `UTC-1 + DST`.
    pub fn label(&self, variant: ClockVariant) -> String {
        match variant {
            ClockVariant::Utc => "UTC".to_string(),
            ClockVariant::Local => format_offset(self.utc_offset),
            ClockVariant::Dst => format!("{} + DST", format_offset(self.utc_offset)),
        }
    }
}

/// Every event of every day moved by a constant number of seconds.
pub fn shift_table(table: &EventTable, by_seconds: i64) -> EventTable {
    let days: Vec<DayRecord> = table.days().iter().map(|d| d.shifted(by_seconds)).collect();
    EventTable::derived(table.year(), days)
}

/// `UTC`, `UTC+1`, `UTC-3:30`.
pub fn format_offset(seconds: i64) -> String {
    if seconds == 0 {
        return "UTC".to_string();
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.abs();
    let hours = abs / SECONDS_PER_HOUR;
    let minutes = (abs % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    if minutes == 0 {
        format!("UTC{sign}{hours}")
    } else {
        format!("UTC{sign}{hours}:{minutes:02}")
    }
}

/// The same year of events in all three clocks.
#[derive(Debug, Clone)]
pub struct TableVariants {
    pub utc: EventTable,
    pub local: EventTable,
    pub dst: EventTable,
}

impl TableVariants {
    pub fn get(&self, variant: ClockVariant) -> &EventTable {
        match variant {
            ClockVariant::Utc => &self.utc,
            ClockVariant::Local => &self.local,
            ClockVariant::Dst => &self.dst,
        }
    }
}

/// The same carpet in all three clocks.
#[derive(Debug, Clone)]
pub struct CarpetVariants {
    pub utc: Carpet,
    pub local: Carpet,
    pub dst: Carpet,
}

impl CarpetVariants {
    pub fn get(&self, variant: ClockVariant) -> &Carpet {
        match variant {
            ClockVariant::Utc => &self.utc,
            ClockVariant::Local => &self.local,
            ClockVariant::Dst => &self.dst,
        }
    }
}

impl fmt::Display for ClockVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClockVariant::Utc => "utc",
            ClockVariant::Local => "local",
            ClockVariant::Dst => "dst",
        };
        write!(f, "{name}")
    }
}
