//! Default configuration file creation.
//!
//! The default file is assembled with a small builder that keeps every
//! comment aligned to the same column, whatever the values are.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::constants::*;

/// Create a default config file at `path`, creating parent directories.
///
/// Clock settings are left commented out, so the timezone is detected from
/// the coordinates until the user picks one.
pub fn create_default_config(path: &PathBuf) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(path, default_config_content()).context("Failed to write default config file")?;
    Ok(())
}

/// Text of the default configuration file.
pub(crate) fn default_config_content() -> String {
    ConfigBuilder::new()
        .add_section("Location")
        .add_setting(
            "place",
            &format!("\"{DEFAULT_PLACE}\""),
            "Short code used in cache file names",
        )
        .add_setting(
            "location_name",
            &format!("\"{DEFAULT_LOCATION_NAME}\""),
            "Display name used in reports",
        )
        .add_setting(
            "latitude",
            &format!("{DEFAULT_LATITUDE:.6}"),
            "Geographic latitude (-90 to 90)",
        )
        .add_setting(
            "longitude",
            &format!("{DEFAULT_LONGITUDE:.6}"),
            "Geographic longitude (-180 to 180)",
        )
        .add_setting(
            "year",
            &DEFAULT_YEAR.to_string(),
            &format!("Calendar year to analyse ({MINIMUM_YEAR}-{MAXIMUM_YEAR})"),
        )
        .add_section("Clock")
        .add_comment(
            "timezone = \"Atlantic/Reykjavik\"",
            "IANA timezone (detected from coordinates if unset)",
        )
        .add_comment(
            "utc_offset = 0",
            &format!(
                "Fixed offset in hours ({MINIMUM_UTC_OFFSET} to {MAXIMUM_UTC_OFFSET}), overrides timezone"
            ),
        )
        .add_comment("dst_start = \"03-25\"", "First day of DST when utc_offset is used")
        .add_comment("dst_end = \"10-28\"", "First day back on standard time")
        .add_section("Day")
        .add_setting(
            "wake",
            &format!("\"{DEFAULT_WAKE}\""),
            "Wake-up time (HH:MM)",
        )
        .add_setting(
            "sleep",
            &format!("\"{DEFAULT_SLEEP}\""),
            "Bed time (HH:MM), after midnight if earlier than wake",
        )
        .build()
}

/// Builder for creating properly formatted configuration files.
///
/// Keeps comment alignment by measuring the widest setting line and padding
/// every other line to match.
struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    /// A setting that is shown but commented out.
    fn add_comment(mut self, line: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("# {line}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.chars().count()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut result = Vec::new();
        let mut first_section = true;

        for entry in self.entries {
            match entry {
                ConfigEntry::Section(title) => {
                    if !first_section {
                        result.push(String::new());
                    }
                    result.push(title);
                    first_section = false;
                }
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.chars().count());
                    result.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        result.push(String::new());
        result.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_are_aligned() {
        let content = default_config_content();
        let columns: Vec<usize> = content
            .lines()
            .filter(|l| !l.starts_with("#[") && !l.is_empty())
            .map(|l| l[..l.rfind("# ").unwrap()].chars().count())
            .collect();
        assert!(!columns.is_empty());
        assert!(columns.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_default_content_parses() {
        let config: super::super::Config = toml::from_str(&default_config_content()).unwrap();
        assert_eq!(config.place.as_deref(), Some(DEFAULT_PLACE));
        assert_eq!(config.year, Some(DEFAULT_YEAR));
        assert!(config.timezone.is_none());
        assert!(config.utc_offset.is_none());
    }
}
