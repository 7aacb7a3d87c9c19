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

//! Throughput and duration formatting.

/// Display string used when throughput cannot be computed.
pub const NOT_APPLICABLE: &str = "N/A";

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Operations per second with its human-readable rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Throughput {
    /// Operations per second (0 when not applicable)
    pub ops_per_sec: f64,
    /// Display string, e.g. `2.00 Mops/s` or `N/A`
    pub pretty: String,
}

/// Compute throughput from a time point-estimate and an operation count.
///
/// A zero (or negative, or non-finite) time yields `0` and `"N/A"` instead
/// of dividing by zero.
///
/// # Examples
///
/// ```
/// use benchtrail_core::throughput::throughput;
///
/// let t = throughput(500.0, 100);
/// assert_eq!(t.ops_per_sec, 200_000_000.0);
/// assert_eq!(t.pretty, "200.00 Mops/s");
///
/// let t = throughput(0.0, 100);
/// assert_eq!(t.ops_per_sec, 0.0);
/// assert_eq!(t.pretty, "N/A");
/// ```
pub fn throughput(time_ns: f64, count: u64) -> Throughput {
    if !time_ns.is_finite() || time_ns <= 0.0 {
        return Throughput {
            ops_per_sec: 0.0,
            pretty: NOT_APPLICABLE.to_string(),
        };
    }

    let ops_per_sec = count as f64 * NANOS_PER_SEC / time_ns;
    Throughput {
        ops_per_sec,
        pretty: format_ops_per_sec(ops_per_sec),
    }
}

/// Render an operations-per-second value with a magnitude suffix.
pub fn format_ops_per_sec(ops_per_sec: f64) -> String {
    if ops_per_sec >= 1_000_000_000.0 {
        format!("{:.2} Gops/s", ops_per_sec / 1_000_000_000.0)
    } else if ops_per_sec >= 1_000_000.0 {
        format!("{:.2} Mops/s", ops_per_sec / 1_000_000.0)
    } else if ops_per_sec >= 1_000.0 {
        format!("{:.2} Kops/s", ops_per_sec / 1_000.0)
    } else {
        format!("{:.2} ops/s", ops_per_sec)
    }
}

/// Render a nanosecond duration in the largest unit below it.
///
/// ```
/// use benchtrail_core::throughput::format_duration_ns;
///
/// assert_eq!(format_duration_ns(512.0), "512.00 ns");
/// assert_eq!(format_duration_ns(1_500.0), "1.50 µs");
/// assert_eq!(format_duration_ns(2_000_000_000.0), "2.00 s");
/// ```
pub fn format_duration_ns(ns: f64) -> String {
    if ns < 1_000.0 {
        format!("{:.2} ns", ns)
    } else if ns < 1_000_000.0 {
        format!("{:.2} µs", ns / 1_000.0)
    } else if ns < 1_000_000_000.0 {
        format!("{:.2} ms", ns / 1_000_000.0)
    } else {
        format!("{:.2} s", ns / 1_000_000_000.0)
    }
}

/// Round to two decimal places, as persisted in the history table.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_time_is_not_applicable() {
        for count in [0, 1, 100, u64::MAX] {
            let t = throughput(0.0, count);
            assert_eq!(t.ops_per_sec, 0.0);
            assert_eq!(t.pretty, NOT_APPLICABLE);
        }
    }

    #[test]
    fn test_non_finite_time_is_not_applicable() {
        assert_eq!(throughput(f64::NAN, 1).pretty, NOT_APPLICABLE);
        assert_eq!(throughput(f64::INFINITY, 1).pretty, NOT_APPLICABLE);
        assert_eq!(throughput(-10.0, 1).pretty, NOT_APPLICABLE);
    }

    #[test]
    fn test_magnitude_thresholds() {
        assert_eq!(format_ops_per_sec(999.994), "999.99 ops/s");
        assert_eq!(format_ops_per_sec(1_000.0), "1.00 Kops/s");
        assert_eq!(format_ops_per_sec(2_000_000.0), "2.00 Mops/s");
        assert_eq!(format_ops_per_sec(3_500_000_000.0), "3.50 Gops/s");
        assert_eq!(format_ops_per_sec(0.0), "0.00 ops/s");
    }

    #[test]
    fn test_time_per_call_semantics() {
        // One call taking a millisecond is a thousand calls per second.
        let t = throughput(1_000_000.0, 1);
        assert_eq!(t.ops_per_sec, 1_000.0);
        assert_eq!(t.pretty, "1.00 Kops/s");
    }

    #[test]
    fn test_zero_count() {
        let t = throughput(500.0, 0);
        assert_eq!(t.ops_per_sec, 0.0);
        assert_eq!(t.pretty, "0.00 ops/s");
    }

    #[test]
    fn test_duration_units() {
        assert_eq!(format_duration_ns(0.0), "0.00 ns");
        assert_eq!(format_duration_ns(999.0), "999.00 ns");
        assert_eq!(format_duration_ns(1_000.0), "1.00 µs");
        assert_eq!(format_duration_ns(2_500_000.0), "2.50 ms");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(520.256), 520.26);
        assert_eq!(round2(500.0), 500.0);
    }

    proptest! {
        #[test]
        fn prop_pretty_always_has_unit(ops in 0.0f64..1e15) {
            let pretty = format_ops_per_sec(ops);
            prop_assert!(pretty.ends_with("ops/s"));
            let number = pretty.split(' ').next().unwrap();
            let decimals = number.split('.').nth(1).unwrap();
            prop_assert_eq!(decimals.len(), 2);
        }

        #[test]
        fn prop_positive_time_positive_count_gives_positive_throughput(
            time in 1e-3f64..1e12,
            count in 1u64..1_000_000,
        ) {
            let t = throughput(time, count);
            prop_assert!(t.ops_per_sec > 0.0);
            prop_assert_ne!(t.pretty, NOT_APPLICABLE);
        }
    }
}
