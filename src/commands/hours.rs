//! Implementation of the hours command.
//!
//! Averages the hours of sunlight and twilight that fall between waking up
//! and going to sleep, per month, on each of the three clocks.

use anyhow::Result;

use super::Session;
use crate::args::GlobalOptions;
use crate::constants::MONTH_ABBREVIATIONS;
use crate::engine::{Window, average_in_window};
use crate::report::{HoursReport, MonthlyReport, monthly_hours};
use crate::utils::format_clock_time;

/// Handle the hours command; `wake`/`sleep` override the configured times.
pub fn handle_hours_command(
    options: &GlobalOptions,
    wake: Option<i64>,
    sleep: Option<i64>,
) -> Result<()> {
    log_version!();

    let session = Session::open(options)?;
    let wake = match wake {
        Some(seconds) => seconds,
        None => session.config.wake_seconds()?,
    };
    let sleep = match sleep {
        Some(seconds) => seconds,
        None => session.config.sleep_seconds()?,
    };
    let window = Window::from_wake_sleep(wake, sleep)?;

    log_block_start!(
        "Light between {} and {} ({:.1} hours awake)",
        format_clock_time(window.start),
        format_clock_time(window.stop),
        window.duration_hours()
    );

    let tables = session.clock.tables(&session.table);
    let clocks = monthly_hours(&session.clock, &tables, |table| {
        average_in_window(table, window)
    });
    log_totals(&clocks, "hours");

    let report = HoursReport {
        header: session.header(),
        wake: format_clock_time(window.start),
        sleep: format_clock_time(window.stop),
        awake_hours: window.duration_hours(),
        months: MONTH_ABBREVIATIONS,
        clocks,
    };
    super::write_report(&report, options.output.as_deref())?;

    log_end!();
    Ok(())
}

/// One summary line per clock.
pub(crate) fn log_totals(clocks: &[MonthlyReport], unit: &str) {
    for clock in clocks {
        log_indented!(
            "{:<12} sunlight {:>8.1} {unit}, twilight {:>7.1} {unit}",
            clock.label,
            clock.total_sunlight,
            clock.total_twilight
        );
    }
}

/// Display detailed help for the hours command (help subcommand)
pub fn display_help() {
    log_version!();
    log_block_start!("hours - Average daylight and twilight hours per month");
    log_block_start!("Usage: daylight hours [WAKE SLEEP]");
    log_indented!("       daylight hours [WAKE_H WAKE_M SLEEP_H SLEEP_M]");
    log_block_start!("Arguments:");
    log_indented!("WAKE   Wake-up time as HH or HH:MM (default from config)");
    log_indented!("SLEEP  Bed time as HH or HH:MM; taken as after midnight");
    log_indented!("       when it is not later than WAKE");
    log_block_start!("Description:");
    log_indented!("For every month, reports the mean hours of sunlight and of");
    log_indented!("twilight between waking and sleeping, in UTC, on the local");
    log_indented!("standard clock and on the local clock with DST. Yearly");
    log_indented!("totals weight each month by its number of days.");
    log_block_start!("Examples:");
    log_indented!("# Awake from 07:00 to 23:00");
    log_indented!("daylight hours 7 23");
    log_pipe!();
    log_indented!("# Awake from 06:45 until 01:00, report to a file");
    log_indented!("daylight hours 6 45 1 0 -o hours.json");
    log_end!();
}
