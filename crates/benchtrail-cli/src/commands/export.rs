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

//! Export command - append Criterion results to the CSV history

use crate::error::CliError;
use benchtrail_core::{discover, DiscoveryConfig, ExportSummary, HistoryTable};
use colored::Colorize;
use std::path::Path;
use tracing::info;

/// Discover results under `config` and append the new ones to `output`.
///
/// Finding no results at all is not an error. Unusable estimates files are
/// reported as warnings by discovery and do not stop the export.
///
/// # Output
///
/// ```text
/// ✓ Exported 3 new results to bench_analysis/benchmark_results.csv
///   Skipped 2 duplicate results
///   Total records in history: 14
/// ```
///
/// # Errors
///
/// Returns `Err` if the history table cannot be written.
pub fn export(config: &DiscoveryConfig, output: &Path) -> Result<ExportSummary, CliError> {
    info!(
        root = %config.root().display(),
        source = %config.source,
        "collecting benchmark results"
    );

    let found = discover(config);
    if !found.skipped.is_empty() {
        info!(count = found.skipped.len(), "skipped unusable estimates files");
    }
    if found.is_empty() {
        println!("No benchmark results found.");
        return Ok(ExportSummary::default());
    }

    let mut table = HistoryTable::open(output);
    info!(existing = table.known_len(), path = %output.display(), "loaded history");

    let summary = table.append(&found.records)?;
    if summary.written > 0 {
        println!(
            "{} Exported {} new results to {}",
            "✓".green().bold(),
            summary.written,
            output.display()
        );
        if summary.skipped > 0 {
            println!("  Skipped {} duplicate results", summary.skipped);
        }
    } else {
        println!(
            "No new results found (skipped {} duplicates)",
            summary.skipped
        );
    }
    println!("  Total records in history: {}", table.known_len());

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const ESTIMATES: &str =
        r#"{"mean":{"point_estimate":520.0},"median":{"point_estimate":500.0}}"#;

    #[test]
    fn test_export_then_reexport() {
        let tmp = TempDir::new().unwrap();
        let run = tmp.path().join("criterion/compare_get/insert/100/new");
        fs::create_dir_all(&run).unwrap();
        fs::write(run.join("estimates.json"), ESTIMATES).unwrap();

        let config = DiscoveryConfig::new(tmp.path().join("criterion")).with_tag("first");
        let output = tmp.path().join("out/history.csv");

        let first = export(&config, &output).unwrap();
        assert_eq!(first.written, 1);
        let second = export(&config, &output).unwrap();
        assert_eq!(second, ExportSummary { written: 0, skipped: 1 });

        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains(",first"));
    }

    #[test]
    fn test_missing_root_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let config = DiscoveryConfig::new(tmp.path().join("absent"));
        let output = tmp.path().join("history.csv");

        assert_eq!(export(&config, &output).unwrap(), ExportSummary::default());
        assert!(!output.exists());
    }
}
