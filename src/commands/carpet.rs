//! Implementation of the carpet command.
//!
//! Weaves the minute-by-minute light carpet once in UTC, derives the local
//! and DST carpets from it, and reports all three with their noon lines.

use anyhow::Result;

use super::Session;
use crate::args::GlobalOptions;
use crate::clock::ClockVariant;
use crate::constants::SECONDS_PER_MINUTE;
use crate::report::{CarpetReport, CarpetSet};

/// Handle the carpet command.
pub fn handle_carpet_command(options: &GlobalOptions) -> Result<()> {
    log_version!();

    let session = Session::open(options)?;
    let wake = session.config.wake_seconds()?;
    let sleep = session.config.sleep_seconds()?;

    log_block_start!("Weaving daylight carpets");
    let carpets = session.clock.carpets(&session.table);
    let tables = session.clock.tables(&session.table);

    let unresolved = carpets.utc.unresolved_boundaries();
    if unresolved > 0 {
        log_pipe!();
        log_warning!(
            "{} light boundaries could not be located and were set to midnight",
            unresolved
        );
        log_indented!("Adjacent days both lack the event that bounds the light period");
    }

    let clocks: Vec<CarpetReport> = ClockVariant::ALL
        .iter()
        .map(|&variant| {
            let carpet = carpets.get(variant);
            let report = CarpetReport::new(
                variant,
                session.clock.label(variant),
                carpet,
                tables.get(variant),
            );
            log_indented!(
                "{:<12} {} minutes of daylight, {} of twilight",
                report.label,
                report.minutes_of_daylight,
                report.minutes_of_twilight
            );
            report
        })
        .collect();

    let report = CarpetSet {
        header: session.header(),
        wake_minute: wake / SECONDS_PER_MINUTE,
        sleep_minute: sleep / SECONDS_PER_MINUTE,
        unresolved_boundaries: unresolved,
        clocks,
    };
    super::write_report(&report, options.output.as_deref())?;

    log_end!();
    Ok(())
}

/// Display detailed help for the carpet command (help subcommand)
pub fn display_help() {
    log_version!();
    log_block_start!("carpet - Per-minute daylight carpet for all clocks");
    log_block_start!("Usage: daylight carpet");
    log_block_start!("Description:");
    log_indented!("Produces, for UTC, the local standard clock and the local");
    log_indented!("clock with DST, a grid of 1440 rows (minutes of the day) by");
    log_indented!("one column per day. Cells are 0 for night, 1 for twilight");
    log_indented!("and 2 for daylight. Each carpet comes with the solar noon of");
    log_indented!("every day on that clock, and the configured wake and sleep");
    log_indented!("minutes are included for drawing guide lines.");
    log_block_start!("Examples:");
    log_indented!("daylight carpet -o carpet.json");
    log_end!();
}
