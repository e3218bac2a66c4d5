//! Implementation of the fetch command.
//!
//! Computes the event table for the configured place and year and writes it
//! to the cache, replacing any table already there.

use anyhow::Result;

use crate::args::GlobalOptions;
use crate::table::store;

/// Handle the fetch command.
pub fn handle_fetch_command(options: &GlobalOptions) -> Result<()> {
    log_version!();

    let (config, clock, source) = super::load_config()?;
    config.log_config(&clock, &source);

    let path = store::cache_path(&config.data_dir()?, config.place(), config.year());
    if path.exists() {
        log_block_start!("Replacing cached event table");
    } else {
        log_block_start!("Creating event table");
    }

    let table = super::compute_and_save(&config, &path)?;

    if options.debug_enabled {
        let polar_days = table
            .days()
            .iter()
            .filter(|d| !d.sunrise.occurs() || !d.sunset.occurs())
            .count();
        log_debug!("{} days without a sunrise or sunset", polar_days);
    }

    log_end!();
    Ok(())
}

/// Display detailed help for the fetch command (help subcommand)
pub fn display_help() {
    log_version!();
    log_block_start!("fetch - Compute the year's event table and cache it");
    log_block_start!("Usage: daylight fetch");
    log_block_start!("Description:");
    log_indented!("Calculates civil dawn, sunrise, solar noon, sunset and civil");
    log_indented!("dusk for every date of the configured year and stores them as");
    log_indented!("<place><year>.json in the data directory.");
    log_pipe!();
    log_indented!("Other commands compute the table on first use; fetch forces a");
    log_indented!("fresh computation, e.g. after changing coordinates.");
    log_block_start!("Examples:");
    log_indented!("# Rebuild the cached table");
    log_indented!("daylight fetch");
    log_pipe!();
    log_indented!("# Use another configuration directory");
    log_indented!("daylight --config ~/places/tromso fetch");
    log_end!();
}
