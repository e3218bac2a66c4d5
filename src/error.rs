//! Error types for the table, engine and clock layers.
//!
//! Everything above these layers (configuration, storage, commands) works with
//! `anyhow::Result` and wraps these errors with context.

use chrono::NaiveDate;

/// Error type for all fallible operations on event tables and their derivatives.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DaylightError {
    /// The table does not describe exactly one complete calendar year.
    #[error("malformed event table: {0}")]
    MalformedTable(TableDefect),

    /// A wake/sleep window that cannot be evaluated.
    #[error("invalid window [{start}s, {stop}s): {reason}")]
    InvalidWindow {
        start: i64,
        stop: i64,
        reason: &'static str,
    },

    /// A DST window that covers no dates.
    #[error("DST window starting {start} and ending {end} is empty")]
    InvalidDstWindow { start: NaiveDate, end: NaiveDate },
}

/// What exactly is wrong with a rejected table.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableDefect {
    #[error("{year} needs {expected} records, found {found}")]
    WrongRecordCount {
        year: i32,
        expected: usize,
        found: usize,
    },

    #[error("record {index} is dated {found}, expected {expected}")]
    OutOfSequence {
        index: usize,
        found: NaiveDate,
        expected: NaiveDate,
    },

    #[error("record {index} is dated {found}, outside {year}")]
    WrongYear {
        index: usize,
        found: NaiveDate,
        year: i32,
    },
}

impl From<TableDefect> for DaylightError {
    fn from(defect: TableDefect) -> Self {
        DaylightError::MalformedTable(defect)
    }
}
