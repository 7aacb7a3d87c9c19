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

//! The normalized benchmark observation.

use crate::clock::{iso_timestamp, run_id};
use crate::estimates::Estimates;
use crate::naming::TestIdentity;
use crate::throughput::{round2, throughput};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Persisted column order of the history table.
///
/// Field order of [`Record`] must match; the CSV header is derived from it.
pub const COLUMNS: [&str; 11] = [
    "run_id",
    "benchmark",
    "test_name",
    "operation",
    "size",
    "median_ns",
    "mean_ns",
    "throughput_ops_sec",
    "throughput_pretty",
    "timestamp",
    "tag",
];

/// One benchmark observation, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// `YYYYMMDD_HHMMSS` of the estimates file's modification time
    pub run_id: String,
    /// Criterion group directory name
    pub benchmark: String,
    /// `test` or `test/parameter`
    pub test_name: String,
    /// First segment of `test_name`
    pub operation: String,
    /// Second segment of `test_name`, or `N/A`
    pub size: String,
    /// Median point estimate in nanoseconds
    pub median_ns: f64,
    /// Mean point estimate in nanoseconds
    pub mean_ns: f64,
    /// Operations per second derived from the median
    pub throughput_ops_sec: f64,
    /// Human-readable throughput
    pub throughput_pretty: String,
    /// ISO-8601 rendering of the modification time
    pub timestamp: String,
    /// Free-form annotation supplied by the user
    #[serde(default)]
    pub tag: String,
}

impl Record {
    /// Assemble a record from its derived parts.
    ///
    /// Timings and throughput are rounded to two decimals.
    pub fn new(
        benchmark: &str,
        identity: TestIdentity,
        estimates: Estimates,
        modified: &NaiveDateTime,
        tag: &str,
    ) -> Self {
        let tp = throughput(estimates.median_ns, identity.operation_count());
        Self {
            run_id: run_id(modified),
            benchmark: benchmark.to_string(),
            test_name: identity.test_name,
            operation: identity.operation,
            size: identity.size,
            median_ns: round2(estimates.median_ns),
            mean_ns: round2(estimates.mean_ns),
            throughput_ops_sec: round2(tp.ops_per_sec),
            throughput_pretty: tp.pretty,
            timestamp: iso_timestamp(modified),
            tag: tag.to_string(),
        }
    }

    /// Deduplication key of this record.
    pub fn key(&self) -> IdentityKey {
        IdentityKey::new(&self.run_id, &self.test_name)
    }
}

/// `run_id` + `test_name`, the sole deduplication criterion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    /// Run identity
    pub run_id: String,
    /// Full test name
    pub test_name: String,
}

impl IdentityKey {
    /// Build a key from its two components.
    pub fn new(run_id: impl Into<String>, test_name: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            test_name: test_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_record_from_parameterized_test() {
        let record = Record::new(
            "compare_get",
            TestIdentity::new("insert", Some("100")),
            Estimates {
                median_ns: 500.0,
                mean_ns: 520.004,
            },
            &noon(),
            "baseline",
        );

        assert_eq!(record.run_id, "20240101_120000");
        assert_eq!(record.timestamp, "2024-01-01T12:00:00");
        assert_eq!(record.operation, "insert");
        assert_eq!(record.size, "100");
        assert_eq!(record.median_ns, 500.0);
        assert_eq!(record.mean_ns, 520.0);
        assert_eq!(record.throughput_ops_sec, 200_000_000.0);
        assert_eq!(record.throughput_pretty, "200.00 Mops/s");
        assert_eq!(record.tag, "baseline");
    }

    #[test]
    fn test_record_with_zero_median() {
        let record = Record::new(
            "g",
            TestIdentity::new("noop", None),
            Estimates::default(),
            &noon(),
            "",
        );
        assert_eq!(record.throughput_ops_sec, 0.0);
        assert_eq!(record.throughput_pretty, "N/A");
    }

    #[test]
    fn test_key_ignores_other_fields() {
        let a = Record::new(
            "g1",
            TestIdentity::new("insert", Some("100")),
            Estimates::default(),
            &noon(),
            "a",
        );
        let mut b = a.clone();
        b.benchmark = "g2".to_string();
        b.median_ns = 1.0;
        b.tag = "b".to_string();
        assert_eq!(a.key(), b.key());
    }
}
