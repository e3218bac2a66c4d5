//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main application logic. Options may appear anywhere on
//! the line; the first bare word is the command and the words after it are
//! its arguments.

use crate::utils::{clock_time_from_parts, parse_clock_time};

/// Options shared by every command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalOptions {
    pub debug_enabled: bool,
    pub config_dir: Option<String>,
    /// File to write the report to; standard output when absent.
    pub output: Option<String>,
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Compute and cache the year's event table
    Fetch(GlobalOptions),
    /// Monthly window averages; wake and sleep in seconds, from config when absent
    Hours {
        options: GlobalOptions,
        wake: Option<i64>,
        sleep: Option<i64>,
    },
    /// Monthly day counts at a clock time, in seconds
    Mornings {
        options: GlobalOptions,
        time: Option<i64>,
    },
    /// Minute carpets for the three clocks
    Carpet(GlobalOptions),
    /// Yearly totals across wake hours
    Sweep(GlobalOptions),
    /// Detailed help for one command, or the command overview
    Help { command: Option<String> },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown or malformed arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first item is the program name and is skipped. Without a command
    /// the `hours` report is produced from the configured wake and sleep times.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut options = GlobalOptions::default();
        let mut display_help = false;
        let mut display_version = false;
        let mut unknown_arg_found = false;
        let mut words: Vec<String> = Vec::new();

        let mut i = 0;
        while i < args_vec.len() {
            let arg = &args_vec[i];
            match arg.as_str() {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => options.debug_enabled = true,
                "--config" | "-c" => {
                    if let Some(dir) = args_vec.get(i + 1).filter(|a| !a.starts_with('-')) {
                        options.config_dir = Some(dir.clone());
                        i += 1;
                    } else {
                        log_warning!("Missing directory for --config. Usage: --config <directory>");
                        unknown_arg_found = true;
                    }
                }
                "--output" | "-o" => {
                    if let Some(file) = args_vec.get(i + 1).filter(|a| !a.starts_with('-')) {
                        options.output = Some(file.clone());
                        i += 1;
                    } else {
                        log_warning!("Missing file for --output. Usage: --output <file>");
                        unknown_arg_found = true;
                    }
                }
                flag if flag.starts_with('-') && flag.len() > 1 && !is_number(flag) => {
                    log_warning!("Unknown argument: {}", flag);
                    unknown_arg_found = true;
                }
                _ => words.push(arg.clone()),
            }
            i += 1;
        }

        // Version takes precedence over everything, help over commands.
        if display_version {
            return ParsedArgs {
                action: CliAction::ShowVersion,
            };
        }
        if unknown_arg_found {
            return ParsedArgs {
                action: CliAction::ShowHelpDueToError,
            };
        }
        if display_help {
            return ParsedArgs {
                action: CliAction::ShowHelp,
            };
        }

        let action = match words.split_first() {
            None => CliAction::Hours {
                options,
                wake: None,
                sleep: None,
            },
            Some((command, rest)) => parse_command(command, rest, options),
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

fn parse_command(command: &str, rest: &[String], options: GlobalOptions) -> CliAction {
    match command {
        "fetch" | "f" => no_arguments(command, rest, CliAction::Fetch(options)),
        "carpet" | "c" => no_arguments(command, rest, CliAction::Carpet(options)),
        "sweep" | "s" => no_arguments(command, rest, CliAction::Sweep(options)),
        "hours" | "H" => match parse_window(rest) {
            Ok((wake, sleep)) => CliAction::Hours {
                options,
                wake,
                sleep,
            },
            Err(message) => {
                log_warning!("{}. Usage: daylight hours [WAKE SLEEP]", message);
                CliAction::ShowHelpDueToError
            }
        },
        "mornings" | "m" => match rest {
            [] => CliAction::Mornings {
                options,
                time: None,
            },
            [time] => match parse_clock_time(time) {
                Ok(seconds) => CliAction::Mornings {
                    options,
                    time: Some(seconds),
                },
                Err(e) => {
                    log_warning!("{}. Usage: daylight mornings [TIME]", e);
                    CliAction::ShowHelpDueToError
                }
            },
            _ => {
                log_warning!("Too many arguments. Usage: daylight mornings [TIME]");
                CliAction::ShowHelpDueToError
            }
        },
        "help" | "h" => match rest {
            [] => CliAction::Help { command: None },
            [name] => CliAction::Help {
                command: Some(name.clone()),
            },
            _ => {
                log_warning!("Too many arguments. Usage: daylight help [COMMAND]");
                CliAction::ShowHelpDueToError
            }
        },
        unknown => {
            log_warning!("Unknown command: {}", unknown);
            CliAction::ShowHelpDueToError
        }
    }
}

fn no_arguments(command: &str, rest: &[String], action: CliAction) -> CliAction {
    if rest.is_empty() {
        action
    } else {
        log_warning!("'{}' takes no arguments (got '{}')", command, rest.join(" "));
        CliAction::ShowHelpDueToError
    }
}

/// `[]`, `[WAKE SLEEP]` as clock times, or `[H M H M]` as separate numbers.
fn parse_window(rest: &[String]) -> Result<(Option<i64>, Option<i64>), String> {
    match rest {
        [] => Ok((None, None)),
        [wake, sleep] => {
            let wake = parse_clock_time(wake).map_err(|e| e.to_string())?;
            let sleep = parse_clock_time(sleep).map_err(|e| e.to_string())?;
            Ok((Some(wake), Some(sleep)))
        }
        [wake_h, wake_m, sleep_h, sleep_m] => {
            let wake = clock_time_from_parts(wake_h, wake_m).map_err(|e| e.to_string())?;
            let sleep = clock_time_from_parts(sleep_h, sleep_m).map_err(|e| e.to_string())?;
            Ok((Some(wake), Some(sleep)))
        }
        _ => Err(format!("Expected 0, 2 or 4 time values, got {}", rest.len())),
    }
}

fn is_number(arg: &str) -> bool {
    arg.parse::<f64>().is_ok()
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    crate::logger::write_line("┗ ", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!("{}", env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("daylight [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-o, --output <file>    Write the report to a file instead of stdout");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("fetch, f               Compute the year's event table and cache it");
    log_indented!("hours, H [WAKE SLEEP]  Average daylight hours per month (default)");
    log_indented!("mornings, m [TIME]     Days per month with light at a clock time");
    log_indented!("carpet, c              Per-minute daylight carpet for all clocks");
    log_indented!("sweep, s               Yearly totals for wake hours 05 to 11");
    log_indented!("help, h [COMMAND]      Show detailed help for a command");
    log_end!();
}
