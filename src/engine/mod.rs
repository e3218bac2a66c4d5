//! Interval arithmetic over event tables.
//!
//! - [`window`]: average sunlight and twilight inside a wake/sleep window
//! - [`instant`]: day counts of light at one clock time
//! - [`carpet`]: per-minute light codes over the whole year
//! - [`monthly`]: the twelve-value result type shared by the first two
//!
//! All functions here are pure: they borrow a table and return fresh values.

pub mod carpet;
pub mod instant;
pub mod monthly;
pub mod window;

pub use carpet::{Carpet, weave};
pub use instant::{InstantCounts, classify_day, classify_instant};
pub use monthly::MonthlyAggregate;
pub use window::{DaylightAverages, Window, average_daylight, average_in_window};

use serde::Serialize;

/// Light state of one moment, ordered from darkest to brightest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Light {
    #[default]
    Night = 0,
    Twilight = 1,
    Daylight = 2,
}

impl Light {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<Light> for u8 {
    fn from(light: Light) -> u8 {
        light.code()
    }
}
