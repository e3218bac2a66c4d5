//! Small helpers shared by configuration, arguments and commands.

use anyhow::{Context, Result, bail};
use chrono::{NaiveTime, Timelike};
use std::path::Path;

use crate::constants::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Replace the home directory prefix with `~` for display.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(rest) = path.strip_prefix(&home)
    {
        return format!("~/{}", rest.display());
    }
    path.display().to_string()
}

/// Parse a wall-clock time into seconds from midnight.
///
/// Accepts `HH`, `HH:MM` and `HH:MM:SS`. `24` and `24:00` mean midnight at
/// the end of the day.
pub fn parse_clock_time(text: &str) -> Result<i64> {
    let text = text.trim();
    if text == "24" || text == "24:00" || text == "24:00:00" {
        return Ok(SECONDS_PER_DAY);
    }

    let time = match text.matches(':').count() {
        0 => {
            let hour: u32 = text
                .parse()
                .with_context(|| format!("Invalid hour '{text}'"))?;
            NaiveTime::from_hms_opt(hour, 0, 0)
        }
        1 => NaiveTime::parse_from_str(text, "%H:%M").ok(),
        2 => NaiveTime::parse_from_str(text, "%H:%M:%S").ok(),
        _ => None,
    };

    match time {
        Some(t) => Ok(i64::from(t.num_seconds_from_midnight())),
        None => bail!("Invalid time '{text}' (expected HH, HH:MM or HH:MM:SS)"),
    }
}

/// Build a time from separate hour and minute arguments.
pub fn clock_time_from_parts(hour: &str, minute: &str) -> Result<i64> {
    let hour: i64 = hour
        .trim()
        .parse()
        .with_context(|| format!("Invalid hour '{hour}'"))?;
    let minute: i64 = minute
        .trim()
        .parse()
        .with_context(|| format!("Invalid minute '{minute}'"))?;
    if !(0..=24).contains(&hour) || !(0..60).contains(&minute) || (hour == 24 && minute > 0) {
        bail!("Invalid time {hour:02}:{minute:02}");
    }
    Ok(hour * SECONDS_PER_HOUR + minute * SECONDS_PER_MINUTE)
}

/// `HH:MM` for a number of seconds, wrapping at midnight.
pub fn format_clock_time(seconds: i64) -> String {
    let seconds = seconds.rem_euclid(SECONDS_PER_DAY);
    format!(
        "{:02}:{:02}",
        seconds / SECONDS_PER_HOUR,
        (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_clock_time_forms() {
        assert_eq!(parse_clock_time("7").unwrap(), 25_200);
        assert_eq!(parse_clock_time("07:30").unwrap(), 27_000);
        assert_eq!(parse_clock_time("23:00:15").unwrap(), 82_815);
        assert_eq!(parse_clock_time("24").unwrap(), 86_400);
        assert!(parse_clock_time("25").is_err());
        assert!(parse_clock_time("7:61").is_err());
        assert!(parse_clock_time("seven").is_err());
    }

    #[test]
    fn test_clock_time_from_parts() {
        assert_eq!(clock_time_from_parts("7", "15").unwrap(), 26_100);
        assert_eq!(clock_time_from_parts("24", "0").unwrap(), 86_400);
        assert!(clock_time_from_parts("24", "30").is_err());
        assert!(clock_time_from_parts("7", "60").is_err());
    }

    #[test]
    fn test_format_clock_time_wraps() {
        assert_eq!(format_clock_time(25_200), "07:00");
        assert_eq!(format_clock_time(90_000), "01:00");
        assert_eq!(format_clock_time(-3_600), "23:00");
    }

    #[test]
    fn test_private_path_outside_home() {
        let path = PathBuf::from("/var/cache/daylight");
        assert_eq!(private_path(&path), "/var/cache/daylight");
    }
}
