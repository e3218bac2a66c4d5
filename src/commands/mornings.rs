//! Implementation of the mornings command.
//!
//! Counts, per month, the days on which it is already light at a given clock
//! time, on each of the three clocks.

use anyhow::Result;

use super::Session;
use crate::args::GlobalOptions;
use crate::constants::MONTH_ABBREVIATIONS;
use crate::engine::classify_instant;
use crate::report::{MorningsReport, monthly_counts};
use crate::utils::format_clock_time;

/// Handle the mornings command; `time` overrides the configured wake time.
pub fn handle_mornings_command(options: &GlobalOptions, time: Option<i64>) -> Result<()> {
    log_version!();

    let session = Session::open(options)?;
    let time = match time {
        Some(seconds) => seconds,
        None => session.config.wake_seconds()?,
    };

    log_block_start!("Light at {}", format_clock_time(time));

    let tables = session.clock.tables(&session.table);
    let clocks = monthly_counts(&session.clock, &tables, |table| {
        classify_instant(table, time)
    });
    super::hours::log_totals(&clocks, "days");

    let report = MorningsReport {
        header: session.header(),
        time: format_clock_time(time),
        months: MONTH_ABBREVIATIONS,
        clocks,
    };
    super::write_report(&report, options.output.as_deref())?;

    log_end!();
    Ok(())
}

/// Display detailed help for the mornings command (help subcommand)
pub fn display_help() {
    log_version!();
    log_block_start!("mornings - Days per month with light at a clock time");
    log_block_start!("Usage: daylight mornings [TIME]");
    log_block_start!("Arguments:");
    log_indented!("TIME  Clock time as HH or HH:MM (default: configured wake time)");
    log_block_start!("Description:");
    log_indented!("Counts the days of each month on which the sun is up at TIME,");
    log_indented!("and those on which it is twilight, for UTC, the local standard");
    log_indented!("clock and the local clock with DST.");
    log_block_start!("Examples:");
    log_indented!("# Is it light when the alarm goes off at 07:30?");
    log_indented!("daylight mornings 07:30");
    log_end!();
}
