//! JSON cache for computed event tables.
//!
//! A table is expensive enough to compute (or, historically, to download) that
//! it is kept between runs in `<data_dir>/<place><year>.json`. Readers take a
//! shared lock and writers an exclusive lock on a sibling `.lock` file, and
//! writes go through a temporary file that is persisted over the target so
//! that a crash never leaves a half-written table behind.

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{DayRecord, EventTable};

/// On-disk layout of a cached table.
#[derive(Debug, Serialize, Deserialize)]
struct StoredTable {
    year: i32,
    days: Vec<DayRecord>,
}

/// Path of the cache file for a place and year.
pub fn cache_path(data_dir: &Path, place: &str, year: i32) -> PathBuf {
    data_dir.join(format!("{place}{year}.json"))
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".lock");
    path.with_file_name(name)
}

fn open_lock(path: &Path) -> Result<File> {
    let lock = lock_path(path);
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock)
        .with_context(|| format!("Failed to open lock file {}", lock.display()))
}

/// Write a table to `path`, replacing any existing file atomically.
pub fn save(table: &EventTable, path: &Path) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create data directory {}", dir.display()))?;

    let lock = open_lock(path)?;
    lock.lock_exclusive()
        .with_context(|| format!("Failed to lock {}", path.display()))?;

    let stored = StoredTable {
        year: table.year(),
        days: table.days().to_vec(),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, &stored)
            .context("Failed to serialize event table")?;
        writer.flush()?;
    }
    temp.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    FileExt::unlock(&lock)?;
    Ok(())
}

/// Read and re-validate a table previously written by [`save`].
pub fn load(path: &Path) -> Result<EventTable> {
    let lock = open_lock(path)?;
    lock.lock_shared()
        .with_context(|| format!("Failed to lock {}", path.display()))?;

    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let stored: StoredTable = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse event table {}", path.display()))?;

    FileExt::unlock(&lock)?;

    let table = EventTable::new(stored.days)
        .with_context(|| format!("Cached table {} is unusable", path.display()))?;

    if table.year() != stored.year {
        anyhow::bail!(
            "Cached table {} claims year {} but its records are from {}",
            path.display(),
            stored.year,
            table.year()
        );
    }

    Ok(table)
}

/// Load the table if a cache file exists, `None` otherwise.
pub fn load_if_present(path: &Path) -> Result<Option<EventTable>> {
    if !path.exists() {
        return Ok(None);
    }
    load(path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DaylightError, TableDefect};
    use crate::table::Event;
    use crate::table::test_support::*;
    use tempfile::tempdir;

    #[test]
    fn test_cache_path_uses_place_and_year() {
        let path = cache_path(Path::new("/data"), "RVK", 2018);
        assert_eq!(path, PathBuf::from("/data/RVK2018.json"));
        assert_eq!(lock_path(&path), PathBuf::from("/data/RVK2018.json.lock"));
    }

    #[test]
    fn test_save_then_load_preserves_sentinels() {
        let dir = tempdir().unwrap();
        let path = cache_path(dir.path(), "TOS", 2020);
        let table = table_from_fn(2020, |i, _| {
            if i < 30 {
                polar_day_events()
            } else {
                ordinary_events()
            }
        });

        save(&table, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, table);
        assert_eq!(loaded.days()[0].sunset, Event::NeverOccurs);
        assert_eq!(loaded.days()[30].sunset, Event::Occurs(18 * 3600));
    }

    #[test]
    fn test_numeric_sentinels_in_file_are_understood() {
        let dir = tempdir().unwrap();
        let path = cache_path(dir.path(), "X", 2018);
        let table = uniform_table(2018, ordinary_events());
        save(&table, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let patched = text.replacen("\"sunset\": 64800", "\"sunset\": -1500000000", 1);
        assert_ne!(text, patched);
        fs::write(&path, patched).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.days()[0].sunset, Event::NeverOccurs);
        assert_eq!(loaded.days()[1].sunset, Event::Occurs(64_800));
    }

    #[test]
    fn test_truncated_cache_is_rejected() {
        let dir = tempdir().unwrap();
        let path = cache_path(dir.path(), "X", 2018);
        let stored = StoredTable {
            year: 2018,
            days: uniform_table(2018, ordinary_events()).days()[..100].to_vec(),
        };
        fs::write(&path, serde_json::to_string(&stored).unwrap()).unwrap();

        let err = load(&path).unwrap_err();
        let defect = err.downcast_ref::<DaylightError>().unwrap();
        assert!(matches!(
            defect,
            DaylightError::MalformedTable(TableDefect::WrongRecordCount { found: 100, .. })
        ));
    }

    #[test]
    fn test_missing_field_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(
            &path,
            r#"{"year": 2018, "days": [{"date": "2018-01-01", "sunrise": 1}]}"#,
        )
        .unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse event table"));
    }

    #[test]
    fn test_load_if_present() {
        let dir = tempdir().unwrap();
        let path = cache_path(dir.path(), "RVK", 2018);
        assert!(load_if_present(&path).unwrap().is_none());

        save(&uniform_table(2018, ordinary_events()), &path).unwrap();
        assert!(load_if_present(&path).unwrap().is_some());
    }
}
