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

//! CLI command implementations

mod completion;
mod export;
mod report;

pub use completion::{
    generate_completion_for_command, installation_instructions, unsupported_shell,
};
pub use export::export;
pub use report::{report, ReportInput, HTML_REPORT_FILE, MARKDOWN_REPORT_FILE};

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming Cargo's target directory.
pub const CARGO_TARGET_DIR_ENV: &str = "CARGO_TARGET_DIR";

/// Criterion output directory relative to a target directory.
const CRITERION_SUBDIR: &str = "criterion";

/// Pick the Criterion output directory.
///
/// An explicit directory is used as given. Otherwise the directory is
/// detected relative to the working directory, see [`detect_criterion_dir`].
pub fn resolve_criterion_dir(explicit: Option<PathBuf>) -> PathBuf {
    match explicit {
        Some(dir) => dir,
        None => {
            let target_dir = std::env::var_os(CARGO_TARGET_DIR_ENV);
            let dir = detect_criterion_dir(Path::new(""), target_dir.as_deref());
            debug!(dir = %dir.display(), "detected criterion directory");
            dir
        }
    }
}

/// Locate Criterion output under `base`.
///
/// Candidates, first existing wins:
/// 1. `<target_dir>/criterion` (relative targets resolve against `base`)
/// 2. `<base>/target/criterion`
/// 3. `<base>/crates/<member>/target/criterion`, members in name order
///
/// Falls back to `<base>/target/criterion` when none exist.
pub fn detect_criterion_dir(base: &Path, target_dir: Option<&OsStr>) -> PathBuf {
    if let Some(target) = target_dir.filter(|t| !t.is_empty()) {
        let candidate = base.join(target).join(CRITERION_SUBDIR);
        if candidate.is_dir() {
            return candidate;
        }
    }

    let default = base.join("target").join(CRITERION_SUBDIR);
    if default.is_dir() {
        return default;
    }

    let mut members: Vec<PathBuf> = fs::read_dir(base.join("crates"))
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path().join("target").join(CRITERION_SUBDIR))
                .filter(|p| p.is_dir())
                .collect()
        })
        .unwrap_or_default();
    members.sort();

    members.into_iter().next().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_dir_wins() {
        let dir = PathBuf::from("/does/not/exist");
        assert_eq!(resolve_criterion_dir(Some(dir.clone())), dir);
    }

    #[test]
    fn test_fallback_when_nothing_exists() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            detect_criterion_dir(tmp.path(), None),
            tmp.path().join("target/criterion")
        );
    }

    #[test]
    fn test_target_dir_env_preferred() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("target/criterion")).unwrap();
        fs::create_dir_all(tmp.path().join("build/criterion")).unwrap();

        assert_eq!(
            detect_criterion_dir(tmp.path(), Some(OsStr::new("build"))),
            tmp.path().join("build/criterion")
        );
        // Missing target dir falls through to the default.
        assert_eq!(
            detect_criterion_dir(tmp.path(), Some(OsStr::new("nope"))),
            tmp.path().join("target/criterion")
        );
    }

    #[test]
    fn test_workspace_member_detected() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("crates/zeta/target/criterion")).unwrap();
        fs::create_dir_all(tmp.path().join("crates/alpha/target/criterion")).unwrap();

        assert_eq!(
            detect_criterion_dir(tmp.path(), None),
            tmp.path().join("crates/alpha/target/criterion")
        );
    }
}
