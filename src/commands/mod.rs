//! Command-line command handlers for daylight.
//!
//! Each command lives in its own submodule. They share the steps in this
//! module: loading the configuration, resolving the clock, getting the year's
//! event table from the cache (computing it when missing), and writing the
//! finished report as JSON.

pub mod carpet;
pub mod fetch;
pub mod help;
pub mod hours;
pub mod mornings;
pub mod sweep;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::args::GlobalOptions;
use crate::clock::{ClockSettings, ClockVariant};
use crate::config::{ClockSource, Config};
use crate::geo::{SolarEventSource, build_table};
use crate::report::ReportHeader;
use crate::table::{EventTable, store};
use crate::utils::private_path;

/// Everything a report command needs, resolved from the configuration.
pub(crate) struct Session {
    pub config: Config,
    pub clock: ClockSettings,
    pub table: EventTable,
    pub debug_enabled: bool,
}

impl Session {
    /// Load the configuration and the year's table.
    pub fn open(options: &GlobalOptions) -> Result<Self> {
        let (config, clock, clock_source) = load_config()?;
        config.log_config(&clock, &clock_source);

        let table = load_or_compute_table(&config, options.debug_enabled)?;
        let session = Self {
            config,
            clock,
            table,
            debug_enabled: options.debug_enabled,
        };
        session.log_clock_details();
        Ok(session)
    }

    pub fn header(&self) -> ReportHeader {
        ReportHeader {
            place: self.config.place().to_string(),
            location_name: self.config.location_name().to_string(),
            year: self.table.year(),
        }
    }

    fn log_clock_details(&self) {
        if !self.debug_enabled {
            return;
        }
        for variant in ClockVariant::ALL {
            log_debug!("Clock {}: {}", variant, self.clock.label(variant));
        }
        for range in self.clock.dst_ranges(&self.table) {
            log_debug!("DST covers days {} to {}", range.start, range.end - 1);
        }
    }
}

/// Load the configuration and resolve its clock rules.
pub(crate) fn load_config() -> Result<(Config, ClockSettings, ClockSource)> {
    let config = Config::load()?;
    let (clock, source) = config.clock_settings()?;
    Ok((config, clock, source))
}

/// The cached table for the configured place and year, computed and saved
/// first if there is none.
pub(crate) fn load_or_compute_table(config: &Config, debug_enabled: bool) -> Result<EventTable> {
    let path = store::cache_path(&config.data_dir()?, config.place(), config.year());

    if let Some(table) = store::load_if_present(&path)? {
        log_block_start!("Loaded event table from {}", private_path(&path));
        if debug_enabled {
            log_debug!("{} days in {}", table.len(), table.year());
        }
        return Ok(table);
    }

    log_block_start!("No cached event table for {}", config.year());
    compute_and_save(config, &path)
}

/// Compute the table from the configured coordinates and write it to `path`.
pub(crate) fn compute_and_save(config: &Config, path: &Path) -> Result<EventTable> {
    let source = SolarEventSource::new(config.latitude(), config.longitude())?;
    log_decorated!("Computing solar events for {}", config.year());

    let table = build_table(&source, config.year())?;
    store::save(&table, path)?;
    log_indented!("Saved {} days to {}", table.len(), private_path(path));
    Ok(table)
}

/// Write a report as JSON to `output`, or to standard output.
pub(crate) fn write_report<T: Serialize>(report: &T, output: Option<&str>) -> Result<()> {
    match output {
        Some(file) => {
            let path = Path::new(file);
            let handle = File::create(path)
                .with_context(|| format!("Failed to create {}", private_path(path)))?;
            let mut writer = BufWriter::new(handle);
            serde_json::to_writer_pretty(&mut writer, report)
                .context("Failed to serialize report")?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            log_block_start!("Report written to {}", private_path(path));
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            serde_json::to_writer_pretty(&mut writer, report)
                .context("Failed to serialize report")?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
    }
    Ok(())
}
