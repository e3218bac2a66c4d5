//! Help command implementation for daylight.
//!
//! This module provides a dispatcher for the help command that shows
//! command-specific help or general help based on the arguments provided.

use anyhow::Result;

/// Run the help command (dispatcher)
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = general help)
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => display_general_help(),
        Some("carpet") | Some("c") => super::carpet::display_help(),
        Some("fetch") | Some("f") => super::fetch::display_help(),
        Some("help") | Some("h") => display_help_help(),
        Some("hours") | Some("H") => super::hours::display_help(),
        Some("mornings") | Some("m") => super::mornings::display_help(),
        Some("sweep") | Some("s") => super::sweep::display_help(),
        Some(unknown) => {
            log_warning!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
    Ok(())
}

/// Display general help focused on commands (for the help command)
fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("carpet, c               Per-minute daylight carpet for all clocks");
    log_indented!("fetch, f                Compute the year's event table and cache it");
    log_indented!("help, h [COMMAND]       Show detailed help for a command");
    log_indented!("hours, H [WAKE SLEEP]   Average daylight hours per month");
    log_indented!("mornings, m [TIME]      Days per month with light at a clock time");
    log_indented!("sweep, s                Yearly totals across wake-up hours");
    log_pipe!();
    log_info!("Use 'daylight help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'daylight --help' to see all options and general usage.");
    log_end!();
}

/// Display help for the help command itself
fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: daylight help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  Optional command to get help for");
    log_indented!("         If omitted, shows general help");
    log_block_start!("Examples:");
    log_indented!("# Show general help");
    log_indented!("daylight help");
    log_pipe!();
    log_indented!("# Show help for specific commands");
    log_indented!("daylight help hours");
    log_indented!("daylight help carpet");
    log_end!();
}
