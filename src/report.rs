//! Numeric payloads handed to renderers.
//!
//! Nothing here knows about charts. Each report is plain data serialized to
//! JSON: monthly series for bar charts, minute grids plus a noon line for
//! carpet plots, and yearly totals for comparison tables.

use serde::Serialize;

use crate::clock::{ClockSettings, ClockVariant, TableVariants};
use crate::constants::MONTHS_PER_YEAR;
use crate::engine::{Carpet, DaylightAverages, InstantCounts};
use crate::table::EventTable;

/// Where and when a report applies.
#[derive(Debug, Clone, Serialize)]
pub struct ReportHeader {
    pub place: String,
    pub location_name: String,
    pub year: i32,
}

/// Sunlight and twilight per month for one clock.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub clock: String,
    pub label: String,
    pub sunlight: [f64; MONTHS_PER_YEAR],
    pub twilight: [f64; MONTHS_PER_YEAR],
    pub total_sunlight: f64,
    pub total_twilight: f64,
}

impl MonthlyReport {
    /// Average hours per month; totals are hours over the whole year.
    pub fn from_averages(
        variant: ClockVariant,
        label: String,
        averages: &DaylightAverages,
        month_lengths: &[u32; MONTHS_PER_YEAR],
    ) -> Self {
        Self {
            clock: variant.to_string(),
            label,
            sunlight: *averages.sunlight.values(),
            twilight: *averages.twilight.values(),
            total_sunlight: averages.sunlight.weighted_total(month_lengths),
            total_twilight: averages.twilight.weighted_total(month_lengths),
        }
    }

    /// Day counts per month; totals are days over the whole year.
    pub fn from_counts(variant: ClockVariant, label: String, counts: &InstantCounts) -> Self {
        Self {
            clock: variant.to_string(),
            label,
            sunlight: *counts.sunlit.values(),
            twilight: *counts.twilight.values(),
            total_sunlight: counts.sunlit.total(),
            total_twilight: counts.twilight.total(),
        }
    }

    pub fn total_light(&self) -> f64 {
        self.total_sunlight + self.total_twilight
    }
}

/// Window averages for all three clocks.
#[derive(Debug, Clone, Serialize)]
pub struct HoursReport {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub wake: String,
    pub sleep: String,
    pub awake_hours: f64,
    /// Axis labels for the monthly series.
    pub months: [&'static str; MONTHS_PER_YEAR],
    pub clocks: Vec<MonthlyReport>,
}

/// Instant day counts for all three clocks.
#[derive(Debug, Clone, Serialize)]
pub struct MorningsReport {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub time: String,
    pub months: [&'static str; MONTHS_PER_YEAR],
    pub clocks: Vec<MonthlyReport>,
}

/// One carpet as rows of minute codes plus that clock's noon line.
#[derive(Debug, Clone, Serialize)]
pub struct CarpetReport {
    pub clock: String,
    pub label: String,
    /// 1440 rows, one column per day; 0 night, 1 twilight, 2 daylight.
    pub rows: Vec<Vec<u8>>,
    /// Solar noon per day in minutes from midnight on this clock.
    pub noon: Vec<Option<f64>>,
    pub minutes_of_night: usize,
    pub minutes_of_twilight: usize,
    pub minutes_of_daylight: usize,
}

impl CarpetReport {
    pub fn new(variant: ClockVariant, label: String, carpet: &Carpet, table: &EventTable) -> Self {
        let [night, twilight, daylight] = carpet.minute_totals();
        Self {
            clock: variant.to_string(),
            label,
            rows: carpet.rows(),
            noon: table.noon_minutes(),
            minutes_of_night: night,
            minutes_of_twilight: twilight,
            minutes_of_daylight: daylight,
        }
    }
}

/// Carpets for all three clocks, with the wake/sleep lines to draw over them.
#[derive(Debug, Clone, Serialize)]
pub struct CarpetSet {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub wake_minute: i64,
    pub sleep_minute: i64,
    pub unresolved_boundaries: usize,
    pub clocks: Vec<CarpetReport>,
}

/// Yearly totals of one comparison, one value per clock in UTC/local/DST order.
#[derive(Debug, Clone, Serialize)]
pub struct SweepRow {
    pub from_hour: u32,
    pub to_hour: Option<u32>,
    pub totals: [f64; 3],
}

/// Wake-time sweep: mornings, waking hours and hours after work.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub labels: [String; 3],
    pub sunny_mornings: Vec<SweepRow>,
    pub bright_waking_hours: Vec<SweepRow>,
    pub daylight_after_work: Vec<SweepRow>,
}

impl SweepReport {
    /// Text tables with UTC values and the other clocks as differences from UTC.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (title, rows) in [
            ("Sunny mornings", &self.sunny_mornings),
            ("Bright waking hours", &self.bright_waking_hours),
            ("Daylight after work", &self.daylight_after_work),
        ] {
            out.push_str(&format!("\n{title}:\n"));
            out.push_str(&render_comparison(&self.labels, rows));
        }
        out
    }
}

fn render_comparison(labels: &[String; 3], rows: &[SweepRow]) -> String {
    let hours: Vec<String> = rows
        .iter()
        .map(|r| match r.to_hour {
            Some(to) => format!("{:02}-{:02}", r.from_hour, to),
            None => format!("{:02}", r.from_hour),
        })
        .collect();
    let mut out = format!("hours, {}\n", hours.join(", "));

    let utc: Vec<String> = rows
        .iter()
        .map(|r| format!("{}", r.totals[0].round() as i64))
        .collect();
    out.push_str(&format!("{}, {}\n", labels[0], utc.join(", ")));

    for clock in 1..3 {
        let diffs: Vec<String> = rows
            .iter()
            .map(|r| format!("{:+}", (r.totals[clock] - r.totals[0]).round() as i64))
            .collect();
        out.push_str(&format!("{}, {}\n", labels[clock], diffs.join(", ")));
    }
    out
}

/// Window averages for each clock variant.
pub fn monthly_hours(
    settings: &ClockSettings,
    tables: &TableVariants,
    averages: impl Fn(&EventTable) -> DaylightAverages,
) -> Vec<MonthlyReport> {
    ClockVariant::ALL
        .iter()
        .map(|&variant| {
            let table = tables.get(variant);
            MonthlyReport::from_averages(
                variant,
                settings.label(variant),
                &averages(table),
                &table.month_lengths(),
            )
        })
        .collect()
}

/// Instant counts for each clock variant.
pub fn monthly_counts(
    settings: &ClockSettings,
    tables: &TableVariants,
    counts: impl Fn(&EventTable) -> InstantCounts,
) -> Vec<MonthlyReport> {
    ClockVariant::ALL
        .iter()
        .map(|&variant| {
            MonthlyReport::from_counts(variant, settings.label(variant), &counts(tables.get(variant)))
        })
        .collect()
}
