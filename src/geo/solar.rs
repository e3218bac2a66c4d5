//! Offline event source computing the sun's daily events from coordinates.
//!
//! Event times come from the `sunrise` crate. That crate has no notion of a
//! day on which the sun never crosses a threshold, so this module first
//! decides from the sun's declination whether a crossing happens at all:
//!
//! - the sun stays above the threshold all day: the pair of events never
//!   happens (persistent light),
//! - the sun stays below it all day: both events are placed at solar noon,
//!   giving a light period of zero length.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use sunrise::{Coordinates, DawnType, SolarDay, SolarEvent};

use super::source::{EventSource, RawDayEvents};
use crate::constants::{CIVIL_TWILIGHT_ELEVATION, HORIZON_ELEVATION, SECONDS_PER_DAY};

/// Maximum declination of the sun, degrees.
const AXIAL_TILT: f64 = 23.44;
/// Seconds of clock time per degree of longitude.
const SECONDS_PER_DEGREE: f64 = 240.0;

/// How the sun relates to one elevation threshold on one day.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Crossing {
    Times(DateTime<Utc>, DateTime<Utc>),
    AlwaysAbove,
    AlwaysBelow,
}

/// The two elevations whose crossings make up a day's events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Threshold {
    Horizon,
    CivilTwilight,
}

impl Threshold {
    fn elevation(self) -> f64 {
        match self {
            Threshold::Horizon => HORIZON_ELEVATION,
            Threshold::CivilTwilight => CIVIL_TWILIGHT_ELEVATION,
        }
    }

    fn events(self) -> (SolarEvent, SolarEvent) {
        match self {
            Threshold::Horizon => (SolarEvent::Sunrise, SolarEvent::Sunset),
            Threshold::CivilTwilight => (
                SolarEvent::Dawn(DawnType::Civil),
                SolarEvent::Dusk(DawnType::Civil),
            ),
        }
    }
}

/// Computes events for a fixed latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarEventSource {
    latitude: f64,
    longitude: f64,
}

impl SolarEventSource {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        coordinates(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    fn crossing(&self, date: NaiveDate, threshold: Threshold) -> Result<Crossing> {
        let elevation = threshold.elevation();
        let crosses = hour_angle_cosine(self.latitude, date, elevation).abs() <= 1.0;

        if crosses {
            let day = SolarDay::new(coordinates(self.latitude, self.longitude)?, date);
            let (rise_event, set_event) = threshold.events();
            let rise = day.event_time(rise_event);
            let set = day.event_time(set_event);
            if is_near(date, rise) && is_near(date, set) && rise <= set {
                return Ok(Crossing::Times(rise, set));
            }
        }

        Ok(if noon_elevation(self.latitude, date) > elevation {
            Crossing::AlwaysAbove
        } else {
            Crossing::AlwaysBelow
        })
    }

    /// Solar noon by longitude alone.
    fn mean_noon(&self, date: NaiveDate) -> DateTime<Utc> {
        let seconds = (SECONDS_PER_DAY as f64 / 2.0 - self.longitude * SECONDS_PER_DEGREE).round();
        midnight(date) + Duration::seconds(seconds as i64)
    }
}

fn coordinates(latitude: f64, longitude: f64) -> Result<Coordinates> {
    Coordinates::new(latitude, longitude)
        .ok_or_else(|| anyhow!("Invalid coordinates: {latitude}, {longitude}"))
}

impl EventSource for SolarEventSource {
    fn day_events(&self, date: NaiveDate) -> Result<RawDayEvents> {
        let daylight = self.crossing(date, Threshold::Horizon)?;
        let twilight = self.crossing(date, Threshold::CivilTwilight)?;

        let noon = match (daylight, twilight) {
            (Crossing::Times(rise, set), _) | (_, Crossing::Times(rise, set)) => {
                rise + (set - rise) / 2
            }
            _ => self.mean_noon(date),
        };

        let pair = |crossing: Crossing| match crossing {
            Crossing::Times(rise, set) => (Some(rise), Some(set)),
            Crossing::AlwaysAbove => (None, None),
            Crossing::AlwaysBelow => (Some(noon), Some(noon)),
        };
        let (sunrise, sunset) = pair(daylight);
        let (twilight_begin, twilight_end) = pair(twilight);

        Ok(RawDayEvents {
            twilight_begin,
            sunrise,
            noon: Some(noon),
            sunset,
            twilight_end,
        })
    }

    fn describe(&self) -> String {
        format!("solar events at {:.4}°, {:.4}°", self.latitude, self.longitude)
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Events more than a day away from the date are artefacts of a missed crossing.
fn is_near(date: NaiveDate, instant: DateTime<Utc>) -> bool {
    let offset = (instant - midnight(date)).num_seconds();
    offset > -SECONDS_PER_DAY && offset < 2 * SECONDS_PER_DAY
}

/// Approximate solar declination in degrees.
fn declination(date: NaiveDate) -> f64 {
    let day_of_year = f64::from(date.ordinal0());
    -AXIAL_TILT * (360.0 / 365.0 * (day_of_year + 10.0)).to_radians().cos()
}

fn noon_elevation(latitude: f64, date: NaiveDate) -> f64 {
    90.0 - (latitude - declination(date)).abs()
}

/// Cosine of the hour angle at which the sun reaches `elevation`.
///
/// Outside [-1, 1] the sun never reaches that elevation on this day.
fn hour_angle_cosine(latitude: f64, date: NaiveDate, elevation: f64) -> f64 {
    let phi = latitude.to_radians();
    let delta = declination(date).to_radians();
    let h = elevation.to_radians();
    (h.sin() - phi.sin() * delta.sin()) / (phi.cos() * delta.cos())
}
