//! Configuration validation functionality.
//!
//! Rejects values that cannot describe a place, a year or a day before any
//! table is computed, with messages naming the offending field.

use anyhow::{Context, Result};

use super::{Config, parse_config_date};
use crate::constants::*;
use crate::geo::parse_timezone;
use crate::utils::parse_clock_time;

/// Validate every configured field.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(place) = &config.place {
        validate_place(place)?;
    }

    if let Some(lat) = config.latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        anyhow::bail!("latitude must be between -90 and 90 degrees (got {})", lat);
    }

    if let Some(lon) = config.longitude
        && !(-180.0..=180.0).contains(&lon)
    {
        anyhow::bail!(
            "longitude must be between -180 and 180 degrees (got {})",
            lon
        );
    }

    if let Some(year) = config.year
        && !(MINIMUM_YEAR..=MAXIMUM_YEAR).contains(&year)
    {
        anyhow::bail!(
            "year ({}) must be between {} and {}",
            year,
            MINIMUM_YEAR,
            MAXIMUM_YEAR
        );
    }

    if let Some(offset) = config.utc_offset
        && !(MINIMUM_UTC_OFFSET..=MAXIMUM_UTC_OFFSET).contains(&offset)
    {
        anyhow::bail!(
            "utc_offset ({}) must be between {} and {} hours",
            offset,
            MINIMUM_UTC_OFFSET,
            MAXIMUM_UTC_OFFSET
        );
    }

    if let Some(name) = &config.timezone
        && parse_timezone(name).is_none()
    {
        anyhow::bail!("timezone '{}' is not a known IANA timezone", name);
    }

    validate_dst_dates(config)?;

    if let Some(wake) = &config.wake {
        let seconds = parse_clock_time(wake).context("Invalid wake time")?;
        if seconds >= SECONDS_PER_DAY {
            anyhow::bail!("wake ({}) must be before 24:00", wake);
        }
    }
    if let Some(sleep) = &config.sleep {
        parse_clock_time(sleep).context("Invalid sleep time")?;
    }

    if let Some(dir) = &config.data_dir
        && dir.trim().is_empty()
    {
        anyhow::bail!("data_dir must not be empty");
    }

    Ok(())
}

/// Place codes end up in file names.
fn validate_place(place: &str) -> Result<()> {
    if place.is_empty() {
        anyhow::bail!("place must not be empty");
    }
    if !place
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        anyhow::bail!(
            "place '{}' may only contain letters, digits, '_' and '-'",
            place
        );
    }
    Ok(())
}

fn validate_dst_dates(config: &Config) -> Result<()> {
    let year = config.year.unwrap_or(DEFAULT_YEAR);
    match (&config.dst_start, &config.dst_end) {
        (None, None) => Ok(()),
        (Some(start), Some(end)) => {
            if config.utc_offset.is_none() {
                log_warning!("dst_start and dst_end are only used together with utc_offset");
            }
            let start = parse_config_date(start, year).context("Invalid dst_start")?;
            let end = parse_config_date(end, year).context("Invalid dst_end")?;
            if start == end {
                anyhow::bail!("dst_start and dst_end must differ (both {})", start);
            }
            Ok(())
        }
        _ => anyhow::bail!("dst_start and dst_end must be given together"),
    }
}
