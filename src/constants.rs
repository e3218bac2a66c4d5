//! Application-wide constants and defaults.
//!
//! Time constants shared by the engine, default configuration values, and
//! validation limits live here so that every layer agrees on them.

// # Time Units

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const MINUTES_PER_DAY: usize = 1_440;

/// Raw offsets below this value mean "the event does not happen that day".
pub const NEVER_OCCURS_THRESHOLD: i64 = -SECONDS_PER_DAY;

/// Clock offset applied inside the daylight saving window.
pub const DST_SHIFT_SECONDS: i64 = SECONDS_PER_HOUR;
pub const DST_SHIFT_MINUTES: i64 = DST_SHIFT_SECONDS / SECONDS_PER_MINUTE;

pub const MONTHS_PER_YEAR: usize = 12;
pub const MONTH_ABBREVIATIONS: [&str; MONTHS_PER_YEAR] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// # Solar Thresholds

/// Sun elevation (degrees) at which sunrise/sunset happen.
pub const HORIZON_ELEVATION: f64 = 0.0;
/// Sun elevation (degrees) bounding civil twilight.
pub const CIVIL_TWILIGHT_ELEVATION: f64 = -6.0;

// # Configuration Defaults

pub const DEFAULT_PLACE: &str = "RVK";
pub const DEFAULT_LOCATION_NAME: &str = "Reykjavík";
pub const DEFAULT_LATITUDE: f64 = 64.13;
pub const DEFAULT_LONGITUDE: f64 = -21.82;
pub const DEFAULT_YEAR: i32 = 2018;
pub const DEFAULT_WAKE: &str = "07:00";
pub const DEFAULT_SLEEP: &str = "23:00";

pub const CONFIG_FILE_NAME: &str = "daylight.toml";
pub const APP_DIR_NAME: &str = "daylight";

// # Validation Limits

pub const MINIMUM_YEAR: i32 = 1900;
pub const MAXIMUM_YEAR: i32 = 2200;
pub const MINIMUM_UTC_OFFSET: f64 = -12.0;
pub const MAXIMUM_UTC_OFFSET: f64 = 14.0;

// # Sweep Defaults

/// Wake hours compared by the sweep command.
pub const SWEEP_WAKE_HOURS: std::ops::RangeInclusive<u32> = 5..=11;
/// Hours between waking and going to sleep.
pub const SWEEP_AWAKE_HOURS: u32 = 16;
/// Working day starts this many hours after waking...
pub const SWEEP_WORK_START_OFFSET: u32 = 9;
/// ...and ends this many hours after waking.
pub const SWEEP_WORK_END_OFFSET: u32 = 15;

// # Exit Codes

pub const EXIT_FAILURE: i32 = 1;
