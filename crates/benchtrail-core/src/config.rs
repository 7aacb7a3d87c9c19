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

//! Discovery configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default limit on the size of a single estimates file (16 MiB).
///
/// Criterion writes files of a few kilobytes; anything larger is not one of
/// its outputs.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Environment variable overriding [`DEFAULT_MAX_FILE_SIZE`].
pub const MAX_FILE_SIZE_ENV: &str = "BENCHTRAIL_MAX_FILE_SIZE";

/// Which Criterion run directory to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceLabel {
    /// The most recent run (`new/`)
    #[default]
    New,
    /// The saved baseline (`base/`)
    Base,
}

impl SourceLabel {
    /// Directory name Criterion uses for this source.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceLabel::New => "new",
            SourceLabel::Base => "base",
        }
    }
}

impl fmt::Display for SourceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(SourceLabel::New),
            "base" => Ok(SourceLabel::Base),
            other => Err(format!(
                "unknown source '{}', expected 'new' or 'base'",
                other
            )),
        }
    }
}

/// Everything the discoverer needs, passed explicitly.
///
/// # Examples
///
/// ```
/// use benchtrail_core::config::{DiscoveryConfig, SourceLabel};
///
/// let config = DiscoveryConfig::new("target/criterion")
///     .with_source(SourceLabel::Base)
///     .with_filter(Some("compare_get".to_string()))
///     .with_tag("before optimization");
/// assert!(config.matches_group("compare_get_small"));
/// assert!(!config.matches_group("compare_put"));
/// ```
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Criterion output directory (usually `target/criterion`)
    pub root: PathBuf,
    /// Run directory to read inside each test
    pub source: SourceLabel,
    /// Case-sensitive substring a group name must contain
    pub bench_filter: Option<String>,
    /// Annotation copied into every record
    pub tag: String,
    /// Largest estimates file that will be read
    pub max_file_size: u64,
}

impl DiscoveryConfig {
    /// Configuration for `root` with defaults for everything else.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            source: SourceLabel::default(),
            bench_filter: None,
            tag: String::new(),
            max_file_size: max_file_size_from_env(),
        }
    }

    /// Select the run directory.
    pub fn with_source(mut self, source: SourceLabel) -> Self {
        self.source = source;
        self
    }

    /// Restrict discovery to groups containing `filter`.
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.bench_filter = filter.filter(|f| !f.is_empty());
        self
    }

    /// Annotate every record with `tag`.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Override the estimates file size limit.
    pub fn with_max_file_size(mut self, max: u64) -> Self {
        self.max_file_size = max;
        self
    }

    /// Whether a group directory name passes the filter.
    pub fn matches_group(&self, name: &str) -> bool {
        self.bench_filter
            .as_deref()
            .map_or(true, |filter| name.contains(filter))
    }

    /// Root directory being walked.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Read [`MAX_FILE_SIZE_ENV`], falling back to [`DEFAULT_MAX_FILE_SIZE`]
/// when unset or not a number.
pub fn max_file_size_from_env() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}
