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

//! Discovery of Criterion results under a variable-depth layout.
//!
//! Criterion writes one of two shapes below its output directory:
//!
//! ```text
//! <root>/<group>/<test>/<source>/estimates.json
//! <root>/<group>/<test>/<parameter>/<source>/estimates.json
//! ```
//!
//! Each test directory is probed for the shallow shape first. Only when that
//! file is absent are its subdirectories probed as parameters, so a test
//! never contributes records from both shapes.
//!
//! The walk never fails. Unreadable directories and unusable estimates files
//! are logged, collected in [`Discovery::skipped`] and passed over.
//! Directory entries are visited in name order.

use crate::clock::{FileSystemClock, ModifiedTime};
use crate::config::DiscoveryConfig;
use crate::error::EstimatesError;
use crate::estimates::{read_estimates, ESTIMATES_FILE};
use crate::naming::TestIdentity;
use crate::record::Record;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An estimates file that was found but could not be turned into a record.
#[derive(Debug)]
pub struct SkippedFile {
    /// Path of the rejected file
    pub path: PathBuf,
    /// Why it was rejected
    pub reason: EstimatesError,
}

/// Outcome of one discovery pass.
#[derive(Debug, Default)]
pub struct Discovery {
    /// One record per usable estimates file
    pub records: Vec<Record>,
    /// Files that matched the layout but were unusable
    pub skipped: Vec<SkippedFile>,
}

impl Discovery {
    /// Whether nothing usable was found.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Discover results using real file modification times.
pub fn discover(config: &DiscoveryConfig) -> Discovery {
    discover_with_clock(config, &FileSystemClock)
}

/// Discover results, reading modification times from `clock`.
///
/// A missing root directory yields an empty [`Discovery`].
pub fn discover_with_clock<C: ModifiedTime + ?Sized>(
    config: &DiscoveryConfig,
    clock: &C,
) -> Discovery {
    let mut walker = Walker {
        config,
        clock,
        out: Discovery::default(),
    };

    if !config.root.exists() {
        debug!(root = %config.root.display(), "criterion directory does not exist");
        return walker.out;
    }

    for (group, group_dir) in subdirectories(&config.root) {
        if !config.matches_group(&group) {
            debug!(group = %group, "skipping group not matching filter");
            continue;
        }
        for (test, test_dir) in subdirectories(&group_dir) {
            walker.probe_test(&group, &test, &test_dir);
        }
    }

    walker.out
}

struct Walker<'a, C: ?Sized> {
    config: &'a DiscoveryConfig,
    clock: &'a C,
    out: Discovery,
}

impl<C: ModifiedTime + ?Sized> Walker<'_, C> {
    fn probe_test(&mut self, group: &str, test: &str, test_dir: &Path) {
        let shallow = self.estimates_path(test_dir);
        if shallow.is_file() {
            self.ingest(group, TestIdentity::new(test, None), &shallow);
            return;
        }

        for (param, param_dir) in subdirectories(test_dir) {
            let deep = self.estimates_path(&param_dir);
            if deep.is_file() {
                self.ingest(group, TestIdentity::new(test, Some(&param)), &deep);
            }
        }
    }

    fn estimates_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.config.source.as_str()).join(ESTIMATES_FILE)
    }

    fn ingest(&mut self, group: &str, identity: TestIdentity, path: &Path) {
        match self.build(group, identity, path) {
            Ok(record) => {
                debug!(path = %path.display(), test = %record.test_name, "parsed estimates");
                self.out.records.push(record);
            }
            Err(reason) => {
                warn!(path = %path.display(), error = %reason, "skipping estimates file");
                self.out.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    reason,
                });
            }
        }
    }

    fn build(
        &self,
        group: &str,
        identity: TestIdentity,
        path: &Path,
    ) -> Result<Record, EstimatesError> {
        let estimates = read_estimates(path, self.config.max_file_size)?;
        let modified = self
            .clock
            .modified(path)
            .map_err(|e| EstimatesError::Timestamp(e.to_string()))?;
        Ok(Record::new(
            group,
            identity,
            estimates,
            &modified,
            &self.config.tag,
        ))
    }
}

/// Immediate subdirectories of `dir` as `(name, path)`, sorted by name.
///
/// Non-directories are ignored. An unreadable directory is logged and
/// treated as empty.
fn subdirectories(dir: &Path) -> Vec<(String, PathBuf)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot list directory");
            return Vec::new();
        }
    };

    let mut dirs: Vec<(String, PathBuf)> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "cannot read directory entry");
                None
            }
        })
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().into_owned();
            Some((name, path))
        })
        .collect();

    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    dirs
}
