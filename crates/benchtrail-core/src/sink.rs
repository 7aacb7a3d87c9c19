// Benchtrail - Criterion benchmark history tracker
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Append-only CSV history with identity-key deduplication.
//!
//! The table is read once when opened to collect known identity keys, then
//! appended to. Nothing is ever rewritten. There is no locking: two
//! concurrent exports against the same file can both append the same key.
//!
//! # State
//!
//! A destination is either absent/empty (no header) or populated (header
//! plus zero or more rows). The header is written by the first append that
//! carries at least one new record; an append with nothing new leaves the
//! file untouched.

use crate::error::{Error, Result};
use crate::record::{IdentityKey, Record};
use std::collections::{HashMap, HashSet};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Counts reported by [`HistoryTable::append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportSummary {
    /// Records appended to the table
    pub written: usize,
    /// Records dropped because their identity key was already known
    pub skipped: usize,
}

/// A history CSV opened for deduplicated appends.
#[derive(Debug)]
pub struct HistoryTable {
    path: PathBuf,
    known: HashSet<IdentityKey>,
}

impl HistoryTable {
    /// Open `path`, loading the identity keys it already holds.
    ///
    /// Never fails: a missing file has no keys, and an unreadable or
    /// corrupt one is logged and treated as having no keys.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let known = load_existing_keys(&path);
        Self { path, known }
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of identity keys known, including those appended so far.
    pub fn known_len(&self) -> usize {
        self.known.len()
    }

    /// Whether `key` is already present.
    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.known.contains(key)
    }

    /// Append the records whose identity key is not yet known.
    ///
    /// Records are written in input order. A key repeated within `records`
    /// is written once. The header is written first when the destination is
    /// absent or empty, and parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Any I/O or serialization failure while writing is returned. Rows
    /// already flushed before the failure stay in the file.
    pub fn append(&mut self, records: &[Record]) -> Result<ExportSummary> {
        let mut fresh = Vec::new();
        let mut skipped = 0;
        for record in records {
            if self.known.insert(record.key()) {
                fresh.push(record);
            } else {
                skipped += 1;
            }
        }

        if fresh.is_empty() {
            debug!(path = %self.path.display(), skipped, "no new records to append");
            return Ok(ExportSummary {
                written: 0,
                skipped,
            });
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io_error(parent, e))?;
        }

        let write_header = fs::metadata(&self.path).map_or(true, |m| m.len() == 0);
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::io_error(&self.path, e))?;

        // A hand-edited table may have lost its final newline.
        if !write_header {
            let terminated =
                ends_with_newline(&mut file).map_err(|e| Error::io_error(&self.path, e))?;
            if !terminated {
                debug!(path = %self.path.display(), "terminating last row before appending");
                file.write_all(b"\n")
                    .map_err(|e| Error::io_error(&self.path, e))?;
            }
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        for record in &fresh {
            writer
                .serialize(record)
                .map_err(|e| Error::csv_error(&self.path, e))?;
        }
        writer
            .flush()
            .map_err(|e| Error::io_error(&self.path, e))?;

        Ok(ExportSummary {
            written: fresh.len(),
            skipped,
        })
    }
}

fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    if file.seek(SeekFrom::End(0))? == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Identity keys present in an existing history table.
///
/// Only the `run_id` and `test_name` columns are consulted, wherever they
/// sit in the header. Rows with fewer fields contribute empty components.
pub fn load_existing_keys(path: &Path) -> HashSet<IdentityKey> {
    match try_load_keys(path) {
        Ok(keys) => keys,
        Err(reason) => {
            warn!(
                path = %path.display(),
                error = %reason,
                "could not read existing history, duplicates may be re-exported"
            );
            HashSet::new()
        }
    }
}

fn try_load_keys(path: &Path) -> std::result::Result<HashSet<IdentityKey>, String> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashSet::new()),
        Err(e) => return Err(e.to_string()),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers().map_err(|e| e.to_string())?.clone();
    if headers.is_empty() {
        return Ok(HashSet::new());
    }

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| format!("missing '{}' column", name))
    };
    let run_idx = column("run_id")?;
    let test_idx = column("test_name")?;

    let mut keys = HashSet::new();
    for row in reader.records() {
        let row = row.map_err(|e| e.to_string())?;
        keys.insert(IdentityKey::new(
            row.get(run_idx).unwrap_or_default(),
            row.get(test_idx).unwrap_or_default(),
        ));
    }
    Ok(keys)
}

/// Load every record from a history table.
///
/// A missing file yields no records.
///
/// # Errors
///
/// Returns [`Error::Csv`] when a row cannot be decoded as a record.
pub fn read_history(path: &Path) -> Result<Vec<Record>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io_error(path, e)),
    };

    csv::Reader::from_reader(file)
        .deserialize()
        .collect::<std::result::Result<Vec<Record>, _>>()
        .map_err(|e| Error::csv_error(path, e))
}

/// Keep only the most recent run of each `(benchmark, test_name)`.
///
/// `run_id` orders chronologically as text. On a tie the later row wins.
/// Survivors keep their relative order.
pub fn latest_runs(records: Vec<Record>) -> Vec<Record> {
    let mut newest: HashMap<(&str, &str), usize> = HashMap::new();
    for (idx, record) in records.iter().enumerate() {
        let key = (record.benchmark.as_str(), record.test_name.as_str());
        match newest.get(&key) {
            Some(&best) if records[best].run_id > record.run_id => {}
            _ => {
                newest.insert(key, idx);
            }
        }
    }

    let keep: HashSet<usize> = newest.into_values().collect();
    records
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| keep.contains(idx))
        .map(|(_, record)| record)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimates::Estimates;
    use crate::naming::TestIdentity;
    use crate::record::COLUMNS;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(second: u32, test_name: &str) -> Record {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, second)
            .unwrap();
        Record::new(
            "compare_get",
            TestIdentity::from_test_name(test_name),
            Estimates {
                median_ns: 500.0,
                mean_ns: 520.0,
            },
            &at,
            "",
        )
    }

    fn header_count(content: &str) -> usize {
        content
            .lines()
            .filter(|l| l.starts_with("run_id,"))
            .count()
    }

    #[test]
    fn test_header_written_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");

        let mut table = HistoryTable::open(&path);
        let summary = table
            .append(&[record(0, "insert/100"), record(0, "insert/1000")])
            .unwrap();
        assert_eq!(summary, ExportSummary { written: 2, skipped: 0 });

        let mut table = HistoryTable::open(&path);
        let summary = table.append(&[record(1, "insert/100")]).unwrap();
        assert_eq!(summary, ExportSummary { written: 1, skipped: 0 });

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(header_count(&content), 1);
        assert_eq!(content.lines().count(), 4);
        assert_eq!(content.lines().next().unwrap(), COLUMNS.join(","));
    }

    #[test]
    fn test_second_export_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        let batch = [record(0, "insert/100"), record(0, "lookup")];

        HistoryTable::open(&path).append(&batch).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let summary = HistoryTable::open(&path).append(&batch).unwrap();
        assert_eq!(summary, ExportSummary { written: 0, skipped: 2 });
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_duplicates_within_batch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");

        let mut other = record(0, "insert/100");
        other.median_ns = 1.0;
        let summary = HistoryTable::open(&path)
            .append(&[record(0, "insert/100"), other])
            .unwrap();
        assert_eq!(summary, ExportSummary { written: 1, skipped: 1 });
    }

    #[test]
    fn test_nothing_new_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");

        let summary = HistoryTable::open(&path).append(&[]).unwrap();
        assert_eq!(summary, ExportSummary::default());
        assert!(!path.exists());
    }

    #[test]
    fn test_unterminated_last_row_is_not_joined() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(
            &path,
            format!(
                "{}\n20240101_115959,g,old,old,N/A,1.0,1.0,1.0,x,t,",
                COLUMNS.join(",")
            ),
        )
        .unwrap();

        let summary = HistoryTable::open(&path).append(&[record(0, "t")]).unwrap();
        assert_eq!(summary, ExportSummary { written: 1, skipped: 0 });

        let summary = HistoryTable::open(&path).append(&[record(0, "t")]).unwrap();
        assert_eq!(summary, ExportSummary { written: 0, skipped: 1 });

        let history = read_history(&path).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].test_name, "old");
        assert_eq!(history[1].test_name, "t");
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_empty_file_gets_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(&path, "").unwrap();

        HistoryTable::open(&path).append(&[record(0, "t")]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(header_count(&content), 1);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bench_analysis/nested/history.csv");

        HistoryTable::open(&path).append(&[record(0, "t")]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_keys_found_regardless_of_column_position() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(&path, "tag,test_name,run_id\nx,insert/100,20240101_120000\n").unwrap();

        let keys = load_existing_keys(&path);
        assert!(keys.contains(&IdentityKey::new("20240101_120000", "insert/100")));
    }

    #[test]
    fn test_table_without_key_columns_has_no_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(&path, "benchmark,median_ns\ng,1.0\n").unwrap();

        assert!(load_existing_keys(&path).is_empty());
    }

    #[test]
    fn test_corrupt_table_has_no_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(&path, b"run_id,test_name\n\xff\xfe,\x80\n").unwrap();

        assert!(load_existing_keys(&path).is_empty());
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be.
        let path = dir.path().join("history.csv");
        fs::create_dir(&path).unwrap();

        let err = HistoryTable::open(&path)
            .append(&[record(0, "t")])
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_read_history_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        let batch = vec![record(0, "insert/100"), record(0, "lookup")];

        HistoryTable::open(&path).append(&batch).unwrap();
        assert_eq!(read_history(&path).unwrap(), batch);
        assert!(read_history(&dir.path().join("absent.csv")).unwrap().is_empty());
    }

    #[test]
    fn test_latest_runs_keeps_newest_per_test() {
        let mut slow = record(5, "insert/100");
        slow.median_ns = 900.0;
        let mut other_bench = record(0, "insert/100");
        other_bench.benchmark = "compare_put".to_string();

        let latest = latest_runs(vec![
            record(0, "insert/100"),
            record(0, "lookup"),
            slow.clone(),
            other_bench.clone(),
        ]);

        assert_eq!(latest, vec![record(0, "lookup"), slow, other_bench]);
    }

    #[test]
    fn test_latest_runs_ignores_row_order() {
        let newer = record(5, "t");
        let latest = latest_runs(vec![newer.clone(), record(0, "t")]);
        assert_eq!(latest, vec![newer]);
    }
}
