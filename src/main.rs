//! Main application entry point and command dispatch.
//!
//! Parses the command line, points the configuration loader at a custom
//! directory when one was given, and hands over to the command handlers in
//! the library. Every handler draws its own log block; a failure is reported
//! as the block's closing line and ends the process with a non-zero status.

use anyhow::Result;

use daylight::args::{self, CliAction, GlobalOptions, ParsedArgs};
use daylight::commands;
use daylight::config;
use daylight::constants::EXIT_FAILURE;
use daylight::log_error_exit;
use daylight::logger::Log;

fn main() -> Result<()> {
    let parsed_args = ParsedArgs::from_env();

    match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Help { command } => commands::help::run_help_command(command.as_deref()),
        action => {
            if let Err(e) = run_command(action) {
                log_error_exit!("{:#}", e);
                std::process::exit(EXIT_FAILURE);
            }
            Ok(())
        }
    }
}

/// Run one of the report commands.
fn run_command(action: CliAction) -> Result<()> {
    match action {
        CliAction::Fetch(options) => {
            prepare(&options, false)?;
            commands::fetch::handle_fetch_command(&options)
        }
        CliAction::Hours {
            options,
            wake,
            sleep,
        } => {
            prepare(&options, true)?;
            commands::hours::handle_hours_command(&options, wake, sleep)
        }
        CliAction::Mornings { options, time } => {
            prepare(&options, true)?;
            commands::mornings::handle_mornings_command(&options, time)
        }
        CliAction::Carpet(options) => {
            prepare(&options, true)?;
            commands::carpet::handle_carpet_command(&options)
        }
        CliAction::Sweep(options) => {
            prepare(&options, true)?;
            commands::sweep::handle_sweep_command(&options)
        }
        CliAction::Help { .. }
        | CliAction::ShowHelp
        | CliAction::ShowHelpDueToError
        | CliAction::ShowVersion => Ok(()),
    }
}

/// Apply global options before a command starts logging.
fn prepare(options: &GlobalOptions, writes_report: bool) -> Result<()> {
    // A report on stdout must not be interleaved with the log.
    if writes_report && options.output.is_none() {
        Log::set_stderr(true);
    }
    config::set_config_dir(options.config_dir.clone())
}
