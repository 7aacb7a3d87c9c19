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

//! Modification-time source for run identities.
//!
//! The modification time of an estimates file is the only timestamp a record
//! carries. It is read through [`ModifiedTime`] so tests can pin it.

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Format of the `run_id` column (one-second resolution).
pub const RUN_ID_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Provides the local wall-clock modification time of a file.
pub trait ModifiedTime {
    /// Modification time of `path` in local time.
    fn modified(&self, path: &Path) -> io::Result<NaiveDateTime>;
}

/// Reads modification times from file metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemClock;

impl ModifiedTime for FileSystemClock {
    fn modified(&self, path: &Path) -> io::Result<NaiveDateTime> {
        let modified = fs::metadata(path)?.modified()?;
        Ok(DateTime::<Local>::from(modified).naive_local())
    }
}

/// Returns the same instant for every file, or per-path overrides.
#[derive(Debug, Clone)]
pub struct FixedClock {
    default: NaiveDateTime,
    overrides: HashMap<PathBuf, NaiveDateTime>,
}

impl FixedClock {
    /// Clock reporting `at` for every path.
    pub fn new(at: NaiveDateTime) -> Self {
        Self {
            default: at,
            overrides: HashMap::new(),
        }
    }

    /// Report `at` for `path` instead of the default instant.
    pub fn with_override(mut self, path: impl Into<PathBuf>, at: NaiveDateTime) -> Self {
        self.overrides.insert(path.into(), at);
        self
    }
}

impl ModifiedTime for FixedClock {
    fn modified(&self, path: &Path) -> io::Result<NaiveDateTime> {
        Ok(self.overrides.get(path).copied().unwrap_or(self.default))
    }
}

/// Render the `run_id` for a modification time.
///
/// ```
/// use benchtrail_core::clock::run_id;
/// use chrono::NaiveDate;
///
/// let at = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// assert_eq!(run_id(&at), "20240101_120000");
/// ```
pub fn run_id(at: &NaiveDateTime) -> String {
    at.format(RUN_ID_FORMAT).to_string()
}

/// Render an ISO-8601 timestamp without offset.
///
/// Sub-second precision is microseconds and is omitted entirely when zero.
pub fn iso_timestamp(at: &NaiveDateTime) -> String {
    if at.nanosecond() / 1_000 == 0 {
        at.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(h: u32, m: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_micro_opt(h, m, s, micro)
            .unwrap()
    }

    #[test]
    fn test_run_id_drops_subseconds() {
        assert_eq!(run_id(&at(12, 0, 0, 999_999)), "20240101_120000");
        assert_eq!(run_id(&at(23, 59, 59, 0)), "20240101_235959");
    }

    #[test]
    fn test_iso_timestamp() {
        assert_eq!(iso_timestamp(&at(12, 0, 0, 0)), "2024-01-01T12:00:00");
        assert_eq!(iso_timestamp(&at(12, 0, 0, 250)), "2024-01-01T12:00:00.000250");
    }

    #[test]
    fn test_fixed_clock_overrides() {
        let clock = FixedClock::new(at(12, 0, 0, 0)).with_override("/b", at(13, 0, 0, 0));
        assert_eq!(clock.modified(Path::new("/a")).unwrap(), at(12, 0, 0, 0));
        assert_eq!(clock.modified(Path::new("/b")).unwrap(), at(13, 0, 0, 0));
    }

    #[test]
    fn test_file_system_clock_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(FileSystemClock
            .modified(&dir.path().join("absent.json"))
            .is_err());
    }

    #[test]
    fn test_file_system_clock_reads_metadata() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("estimates.json");
        fs::write(&path, "{}").unwrap();
        assert!(FileSystemClock.modified(&path).is_ok());
    }
}
