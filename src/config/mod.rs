//! Configuration system for daylight with validation and clock resolution.
//!
//! This module handles the TOML configuration file: where it lives, what it
//! may contain, how it is validated and how its values are turned into the
//! explicit settings the computations take. Nothing below the command layer
//! reads configuration; commands resolve a [`Config`] into plain values
//! (coordinates, year, window seconds, [`ClockSettings`]) and pass those in.
//!
//! ## Configuration Sources
//!
//! The file is `daylight.toml`, looked up in this order:
//! 1. `<dir>/daylight.toml` when `--config <dir>` is given
//! 2. **XDG_CONFIG_HOME**/daylight/daylight.toml
//!
//! A commented default file is written the first time none exists.
//!
//! ## Configuration Structure
//!
//! ```toml
//! #[Location]
//! place = "RVK"                 # Short code used in cache file names
//! location_name = "Reykjavík"   # Display name used in reports
//! latitude = 64.130000          # Geographic latitude (-90 to 90)
//! longitude = -21.820000        # Geographic longitude (-180 to 180)
//! year = 2018                   # Calendar year to analyse (1900-2200)
//!
//! #[Clock]
//! timezone = "Atlantic/Reykjavik"  # IANA timezone (detected from coordinates if unset)
//! utc_offset = -1               # Fixed offset in hours, overrides timezone
//! dst_start = "03-25"           # First day of DST when utc_offset is used
//! dst_end = "10-28"             # First day back on standard time
//!
//! #[Day]
//! wake = "07:00"                # Wake-up time (HH:MM)
//! sleep = "23:00"               # Bed time (HH:MM), after midnight if before wake
//! ```
//!
//! ## Clock Resolution
//!
//! The standard offset and DST window come from, in order of precedence:
//! an explicit `utc_offset` (with `dst_start`/`dst_end` if given), the named
//! `timezone`, the timezone found at the coordinates, and finally plain UTC.

pub mod builder;
pub mod loading;
pub mod validation;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;

use crate::clock::{ClockSettings, DstWindow, ZoneYear, format_offset, zone_year};
use crate::constants::*;
use crate::geo::{parse_timezone, timezone_for_coordinates};
use crate::utils::{format_clock_time, parse_clock_time, private_path};

pub use builder::create_default_config;
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

/// Configuration structure for daylight settings.
///
/// Every field is optional; accessors such as [`Config::year`] apply the
/// defaults from `constants.rs`. Values are validated when the file is loaded,
/// so the accessors only fail where a value must be parsed.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Short code used in cache file names, e.g. `RVK`.
    pub place: Option<String>,
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub year: Option<i32>,

    /// IANA timezone name, e.g. `Atlantic/Reykjavik`.
    pub timezone: Option<String>,
    /// Standard offset from UTC in hours. Takes precedence over `timezone`.
    pub utc_offset: Option<f64>,
    /// First date on DST, `YYYY-MM-DD` or `MM-DD`. Only used with `utc_offset`.
    pub dst_start: Option<String>,
    /// First date back on standard time.
    pub dst_end: Option<String>,

    pub wake: Option<String>,
    pub sleep: Option<String>,

    /// Where computed event tables are cached.
    pub data_dir: Option<String>,
}

/// Where the clock rules of a run came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ClockSource {
    Offset,
    Timezone(String),
    Detected(String),
}

impl Config {
    /// Load configuration using the module's load function
    pub fn load() -> Result<Self> {
        load()
    }

    /// Load from path using the module's load_from_path function
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        load_from_path(path)
    }

    /// Get configuration path using the module's get_config_path function
    pub fn get_config_path() -> Result<PathBuf> {
        get_config_path()
    }

    pub fn place(&self) -> &str {
        self.place.as_deref().unwrap_or(DEFAULT_PLACE)
    }

    pub fn location_name(&self) -> &str {
        self.location_name.as_deref().unwrap_or(DEFAULT_LOCATION_NAME)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude.unwrap_or(DEFAULT_LATITUDE)
    }

    pub fn longitude(&self) -> f64 {
        self.longitude.unwrap_or(DEFAULT_LONGITUDE)
    }

    pub fn year(&self) -> i32 {
        self.year.unwrap_or(DEFAULT_YEAR)
    }

    /// Wake-up time in seconds from midnight.
    pub fn wake_seconds(&self) -> Result<i64> {
        parse_clock_time(self.wake.as_deref().unwrap_or(DEFAULT_WAKE)).context("Invalid wake time")
    }

    /// Bed time in seconds from midnight, as written; not yet moved past midnight.
    pub fn sleep_seconds(&self) -> Result<i64> {
        parse_clock_time(self.sleep.as_deref().unwrap_or(DEFAULT_SLEEP))
            .context("Invalid sleep time")
    }

    /// Cache directory for event tables.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(expand_home(dir));
        }
        let cache = dirs::cache_dir().context("Could not determine cache directory")?;
        Ok(cache.join(APP_DIR_NAME))
    }

    /// Resolve the clock rules for the configured year.
    pub fn clock_settings(&self) -> Result<(ClockSettings, ClockSource)> {
        let year = self.year();

        if let Some(hours) = self.utc_offset {
            let offset = (hours * SECONDS_PER_HOUR as f64).round() as i64;
            let dst = self.explicit_dst_window(year)?;
            return Ok((ClockSettings::new(offset, dst), ClockSource::Offset));
        }

        if let Some(name) = &self.timezone {
            let tz = parse_timezone(name)
                .with_context(|| format!("Unknown timezone '{name}' in configuration"))?;
            let zone = zone_year(tz, year);
            warn_unusual_dst(&zone);
            return Ok((settings_from_zone(&zone), ClockSource::Timezone(name.clone())));
        }

        let tz = timezone_for_coordinates(self.latitude(), self.longitude());
        let zone = zone_year(tz, year);
        warn_unusual_dst(&zone);
        Ok((
            settings_from_zone(&zone),
            ClockSource::Detected(tz.name().to_string()),
        ))
    }

    /// DST window from `dst_start`/`dst_end`, placed in `year`.
    fn explicit_dst_window(&self, year: i32) -> Result<Option<DstWindow>> {
        match (&self.dst_start, &self.dst_end) {
            (Some(start), Some(end)) => {
                let start = parse_config_date(start, year)?;
                let end = parse_config_date(end, year)?;
                Ok(Some(DstWindow::new(start, end)?))
            }
            _ => Ok(None),
        }
    }

    /// Print the effective configuration as a log block.
    pub fn log_config(&self, clock: &ClockSettings, source: &ClockSource) {
        log_block_start!("Loaded configuration");

        let lat = self.latitude();
        let lon = self.longitude();
        log_indented!(
            "Location: {} ({}) at {:.3}°{}, {:.3}°{}",
            self.location_name(),
            self.place(),
            lat.abs(),
            if lat >= 0.0 { "N" } else { "S" },
            lon.abs(),
            if lon >= 0.0 { "E" } else { "W" }
        );
        log_indented!("Year: {}", self.year());

        let clock_origin = match source {
            ClockSource::Offset => "configured offset".to_string(),
            ClockSource::Timezone(name) => name.clone(),
            ClockSource::Detected(name) => format!("{name}, detected"),
        };
        log_indented!(
            "Clock: {} ({clock_origin})",
            format_offset(clock.utc_offset)
        );
        match clock.dst {
            Some(window) => log_indented!("DST: {} to {}", window.start, window.end),
            None => log_indented!("DST: none"),
        }

        if let (Ok(wake), Ok(sleep)) = (self.wake_seconds(), self.sleep_seconds()) {
            log_indented!(
                "Day: awake {} to {}",
                format_clock_time(wake),
                format_clock_time(sleep)
            );
        }
        if let Ok(dir) = self.data_dir() {
            log_indented!("Cache: {}", private_path(&dir));
        }
    }
}

fn settings_from_zone(zone: &ZoneYear) -> ClockSettings {
    ClockSettings::new(zone.standard_offset, zone.dst)
}

fn warn_unusual_dst(zone: &ZoneYear) {
    if zone.dst.is_some() && zone.dst_delta != DST_SHIFT_SECONDS {
        log_warning!(
            "Timezone moves clocks by {} minutes in summer; DST is modelled as one hour",
            zone.dst_delta / SECONDS_PER_MINUTE
        );
    }
}

/// Parse `YYYY-MM-DD`, or `MM-DD` placed in `year`.
///
/// A full date is moved into `year` as well, so a single configuration can
/// be reused across years.
pub fn parse_config_date(text: &str, year: i32) -> Result<NaiveDate> {
    let text = text.trim();
    let parts: Vec<&str> = text.split('-').collect();
    if let [y, _, _] = parts.as_slice()
        && y.parse::<i32>().is_err()
    {
        anyhow::bail!("Invalid year in date '{text}'");
    }
    let (month, day) = match parts.as_slice() {
        [_, m, d] | [m, d] => (
            m.parse::<u32>()
                .with_context(|| format!("Invalid month in date '{text}'"))?,
            d.parse::<u32>()
                .with_context(|| format!("Invalid day in date '{text}'"))?,
        ),
        _ => anyhow::bail!("Invalid date '{text}' (expected YYYY-MM-DD or MM-DD)"),
    };
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("Date '{text}' does not exist in {year}"))
}

fn expand_home(dir: &str) -> PathBuf {
    if let Some(rest) = dir.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(dir)
}
