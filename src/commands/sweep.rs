//! Implementation of the sweep command.
//!
//! Compares the three clocks over a range of wake-up hours. For each hour it
//! totals, over the year, the days that are light on waking, the light hours
//! while awake, and the light hours between the end of work and bed time.

use anyhow::Result;

use super::Session;
use crate::args::GlobalOptions;
use crate::clock::{ClockSettings, TableVariants};
use crate::constants::*;
use crate::engine::{Window, average_in_window, classify_instant};
use crate::report::{MonthlyReport, SweepReport, SweepRow, monthly_counts, monthly_hours};

/// Handle the sweep command.
pub fn handle_sweep_command(options: &GlobalOptions) -> Result<()> {
    log_version!();

    let session = Session::open(options)?;
    let tables = session.clock.tables(&session.table);

    log_block_start!(
        "Sweeping wake hours {:02} to {:02}",
        SWEEP_WAKE_HOURS.start(),
        SWEEP_WAKE_HOURS.end()
    );

    let mut sunny_mornings = Vec::new();
    let mut bright_waking_hours = Vec::new();
    let mut daylight_after_work = Vec::new();

    for wake in SWEEP_WAKE_HOURS {
        let sleep = (wake + SWEEP_AWAKE_HOURS) % 24;
        let work_end = (wake + SWEEP_WORK_START_OFFSET) % 24;
        let home = (wake + SWEEP_WORK_END_OFFSET) % 24;

        let mornings = monthly_counts(&session.clock, &tables, |table| {
            classify_instant(table, hour_seconds(wake))
        });
        sunny_mornings.push(row(wake, None, &mornings));

        let awake = window_totals(&session.clock, &tables, wake, sleep)?;
        bright_waking_hours.push(row(wake, Some(sleep), &awake));

        let evening = window_totals(&session.clock, &tables, work_end, home)?;
        daylight_after_work.push(row(work_end, Some(home), &evening));

        if session.debug_enabled {
            log_debug!(
                "Wake {:02}: {:.0} light days, {:.0} h awake, {:.0} h after work (UTC)",
                wake,
                mornings[0].total_light(),
                awake[0].total_light(),
                evening[0].total_light()
            );
        }
    }

    let report = SweepReport {
        header: session.header(),
        labels: [
            session.clock.label(crate::clock::ClockVariant::Utc),
            session.clock.label(crate::clock::ClockVariant::Local),
            session.clock.label(crate::clock::ClockVariant::Dst),
        ],
        sunny_mornings,
        bright_waking_hours,
        daylight_after_work,
    };

    for line in report.render_text().lines().filter(|l| !l.is_empty()) {
        log_indented!("{}", line);
    }
    super::write_report(&report, options.output.as_deref())?;

    log_end!();
    Ok(())
}

fn hour_seconds(hour: u32) -> i64 {
    i64::from(hour) * SECONDS_PER_HOUR
}

fn window_totals(
    clock: &ClockSettings,
    tables: &TableVariants,
    from_hour: u32,
    to_hour: u32,
) -> Result<Vec<MonthlyReport>> {
    let window = Window::from_wake_sleep(hour_seconds(from_hour), hour_seconds(to_hour))?;
    Ok(monthly_hours(clock, tables, |table| {
        average_in_window(table, window)
    }))
}

/// Sunlight plus twilight over the year, one value per clock.
fn row(from_hour: u32, to_hour: Option<u32>, clocks: &[MonthlyReport]) -> SweepRow {
    let mut totals = [0.0; 3];
    for (total, clock) in totals.iter_mut().zip(clocks) {
        *total = clock.total_light();
    }
    SweepRow {
        from_hour,
        to_hour,
        totals,
    }
}

/// Display detailed help for the sweep command (help subcommand)
pub fn display_help() {
    log_version!();
    log_block_start!("sweep - Yearly light totals across wake-up hours");
    log_block_start!("Usage: daylight sweep");
    log_block_start!("Description:");
    log_indented!(
        "For each wake-up hour from {:02} to {:02}, totals over the year:",
        SWEEP_WAKE_HOURS.start(),
        SWEEP_WAKE_HOURS.end()
    );
    log_pipe!();
    log_indented!("- Sunny mornings: days with light at the wake-up hour");
    log_indented!(
        "- Bright waking hours: light hours while awake ({} hours)",
        SWEEP_AWAKE_HOURS
    );
    log_indented!(
        "- Daylight after work: light hours from {} to {} hours after waking",
        SWEEP_WORK_START_OFFSET,
        SWEEP_WORK_END_OFFSET
    );
    log_pipe!();
    log_indented!("UTC values are absolute; the local clocks are shown as the");
    log_indented!("difference from UTC. Light means sunlight plus twilight.");
    log_block_start!("Examples:");
    log_indented!("daylight sweep -o sweep.json");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_support::*;

    #[test]
    fn test_row_sums_light_per_clock() {
        let table = uniform_table(2018, ordinary_events());
        let clock = ClockSettings::new(-3600, None);
        let tables = clock.tables(&table);

        let totals = window_totals(&clock, &tables, 7, 23).unwrap();
        let sweep_row = row(7, Some(23), &totals);

        // 06:00-18:30 light on UTC: 11.5 h inside 07-23.
        assert!((sweep_row.totals[0] - 11.5 * 365.0).abs() < 1e-6);
        // One hour earlier on the local clock: 05:00-17:30, 10.5 h inside.
        assert!((sweep_row.totals[1] - 10.5 * 365.0).abs() < 1e-6);
        assert_eq!(sweep_row.totals[1], sweep_row.totals[2]);
    }

    #[test]
    fn test_evening_window_wraps_midnight() {
        let table = uniform_table(2018, ordinary_events());
        let clock = ClockSettings::utc();
        let tables = clock.tables(&table);

        // Wake at 11: work ends 20:00, bed at 02:00. No light after 18:30.
        let totals = window_totals(&clock, &tables, 20, 2).unwrap();
        assert_eq!(row(20, Some(2), &totals).totals, [0.0; 3]);
    }
}
