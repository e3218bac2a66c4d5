//! # Daylight Library
//!
//! Daylight and twilight exposure statistics over a calendar year.
//!
//! Given one year of daily solar events for a place (civil dawn, sunrise,
//! solar noon, sunset, civil dusk), the library answers how much light falls
//! inside a person's waking hours, on how many days it is light at a given
//! clock time, and what the whole year looks like minute by minute. Every
//! answer is produced for three clocks: UTC, the local standard clock, and
//! the local clock with daylight saving time.
//!
//! ## Architecture
//!
//! - **Data**: `table` holds the validated yearly event table and its JSON cache
//! - **Engines**: `engine` computes window averages, instant counts and carpets
//! - **Clocks**: `clock` derives local and DST variants from a UTC table
//! - **Sources**: `geo` computes event tables from coordinates and finds timezones
//! - **Output**: `report` shapes results into serializable payloads
//! - **Application**: `config`, `args` and `commands` make up the CLI
//! - **Infrastructure**: logging, errors, constants and small utilities

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod clock;
pub mod commands;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod geo;
pub mod report;
pub mod table;
pub mod utils;

pub use error::{DaylightError, TableDefect};
