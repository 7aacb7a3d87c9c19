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

//! Markdown export for benchmark records.

use super::{group_by, size_rank};
use crate::error::{Error, Result};
use crate::record::Record;
use crate::throughput::format_duration_ns;
use std::fs;
use std::path::Path;

/// Renders records as Markdown, one table per benchmark group.
///
/// Groups are ordered by name; rows by operation, then numeric size.
pub fn render_markdown(records: &[Record]) -> String {
    if records.is_empty() {
        return "No benchmark results found.".to_string();
    }

    let mut md = String::from("# Benchmark Results\n");

    for (bench, mut rows) in group_by(records, |r| r.benchmark.as_str()) {
        rows.sort_by(|a, b| {
            (a.operation.as_str(), size_rank(&a.size), a.size.as_str()).cmp(&(
                b.operation.as_str(),
                size_rank(&b.size),
                b.size.as_str(),
            ))
        });

        md.push_str(&format!("\n## {}\n\n", bench));
        md.push_str("| Operation | Size | Median Time | Throughput |\n");
        md.push_str("|-----------|------|-------------|------------|\n");

        for r in rows {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                r.operation,
                r.size,
                format_duration_ns(r.median_ns),
                r.throughput_pretty
            ));
        }
    }

    md
}

/// Writes the Markdown rendering of `records` to `path`.
pub fn export_markdown(records: &[Record], path: &Path) -> Result<()> {
    fs::write(path, render_markdown(records)).map_err(|e| Error::io_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimates::Estimates;
    use crate::naming::TestIdentity;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    fn record(bench: &str, test_name: &str, median_ns: f64) -> Record {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Record::new(
            bench,
            TestIdentity::from_test_name(test_name),
            Estimates {
                median_ns,
                mean_ns: median_ns,
            },
            &at,
            "",
        )
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(render_markdown(&[]), "No benchmark results found.");
    }

    #[test]
    fn test_groups_and_rows() {
        let records = vec![
            record("compare_put", "insert/10", 100.0),
            record("compare_get", "insert/1000", 2_500.0),
            record("compare_get", "insert/100", 500.0),
        ];
        let md = render_markdown(&records);

        let get = md.find("## compare_get").unwrap();
        let put = md.find("## compare_put").unwrap();
        assert!(get < put);

        let small = md.find("| insert | 100 | 500.00 ns | 200.00 Mops/s |").unwrap();
        let large = md.find("| insert | 1000 | 2.50 µs | 400.00 Mops/s |").unwrap();
        assert!(small < large);
    }

    #[test]
    fn test_export_markdown() {
        let temp = NamedTempFile::new().unwrap();
        export_markdown(&[record("g", "lookup", 0.0)], temp.path()).unwrap();

        let content = fs::read_to_string(temp.path()).unwrap();
        assert!(content.contains("# Benchmark Results"));
        assert!(content.contains("| lookup | N/A | 0.00 ns | N/A |"));
    }
}
