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

//! Reader for Criterion `estimates.json` files.
//!
//! Only the `median` and `mean` point estimates are extracted. Criterion
//! writes many more statistics (confidence intervals, standard error,
//! slope) which are ignored. A statistic or `point_estimate` field that is
//! absent reads as `0.0`; one that is present but `null` is malformed.

use crate::error::EstimatesError;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

/// File name Criterion uses for per-run statistics.
pub const ESTIMATES_FILE: &str = "estimates.json";

/// Point estimates extracted from one estimates file, in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Estimates {
    /// Median point estimate
    pub median_ns: f64,
    /// Mean point estimate
    pub mean_ns: f64,
}

#[derive(Debug, Deserialize)]
struct RawEstimates {
    #[serde(default, deserialize_with = "present")]
    median: Option<RawStatistic>,
    #[serde(default, deserialize_with = "present")]
    mean: Option<RawStatistic>,
}

#[derive(Debug, Deserialize)]
struct RawStatistic {
    #[serde(default, deserialize_with = "present")]
    point_estimate: Option<f64>,
}

/// `None` only through `#[serde(default)]`, so an explicit `null` fails.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl RawStatistic {
    fn point(stat: Option<&Self>, name: &'static str) -> Result<f64, EstimatesError> {
        let value = stat.and_then(|s| s.point_estimate).unwrap_or(0.0);
        if !value.is_finite() || value < 0.0 {
            return Err(EstimatesError::InvalidEstimate {
                statistic: name,
                value,
            });
        }
        Ok(value)
    }
}

/// Parse the content of an estimates file.
///
/// # Errors
///
/// Returns [`EstimatesError::Malformed`] when the content is not JSON, the
/// top level is not an object, `median`/`mean` are not objects, or a
/// `point_estimate` is not a number. Returns
/// [`EstimatesError::InvalidEstimate`] for negative or non-finite values.
///
/// # Examples
///
/// ```
/// use benchtrail_core::estimates::parse_estimates;
///
/// let est = parse_estimates(r#"{"median":{"point_estimate":500.0},"mean":{"point_estimate":520.0}}"#)
///     .unwrap();
/// assert_eq!(est.median_ns, 500.0);
/// assert_eq!(est.mean_ns, 520.0);
/// ```
pub fn parse_estimates(content: &str) -> Result<Estimates, EstimatesError> {
    let raw: RawEstimates = serde_json::from_str(content)?;
    Ok(Estimates {
        median_ns: RawStatistic::point(raw.median.as_ref(), "median")?,
        mean_ns: RawStatistic::point(raw.mean.as_ref(), "mean")?,
    })
}

/// Read and parse an estimates file, refusing files above `max_size` bytes.
///
/// A file that disappears between discovery and this call yields
/// [`EstimatesError::Unreadable`] like any other read failure.
pub fn read_estimates(path: &Path, max_size: u64) -> Result<Estimates, EstimatesError> {
    let metadata = fs::metadata(path).map_err(|e| EstimatesError::Unreadable(e.to_string()))?;

    if metadata.len() > max_size {
        return Err(EstimatesError::TooLarge {
            actual: metadata.len(),
            max: max_size,
        });
    }

    let content =
        fs::read_to_string(path).map_err(|e| EstimatesError::Unreadable(e.to_string()))?;
    parse_estimates(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CRITERION_SAMPLE: &str = r#"{
        "mean": {
            "confidence_interval": {"confidence_level": 0.95, "lower_bound": 510.1, "upper_bound": 530.9},
            "point_estimate": 520.25,
            "standard_error": 5.2
        },
        "median": {
            "confidence_interval": {"confidence_level": 0.95, "lower_bound": 495.0, "upper_bound": 505.0},
            "point_estimate": 500.0,
            "standard_error": 2.5
        },
        "median_abs_dev": {"point_estimate": 3.1},
        "slope": null,
        "std_dev": {"point_estimate": 12.0}
    }"#;

    #[test]
    fn test_parse_full_criterion_file() {
        let est = parse_estimates(CRITERION_SAMPLE).unwrap();
        assert_eq!(est.median_ns, 500.0);
        assert_eq!(est.mean_ns, 520.25);
    }

    #[test]
    fn test_missing_statistics_default_to_zero() {
        assert_eq!(parse_estimates("{}").unwrap(), Estimates::default());

        let est = parse_estimates(r#"{"median": {"point_estimate": 42}}"#).unwrap();
        assert_eq!(est.median_ns, 42.0);
        assert_eq!(est.mean_ns, 0.0);

        let est = parse_estimates(r#"{"median": {}, "mean": {"point_estimate": 7.5}}"#).unwrap();
        assert_eq!(est.median_ns, 0.0);
        assert_eq!(est.mean_ns, 7.5);
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = parse_estimates("{\"median\": ").unwrap_err();
        assert!(matches!(err, EstimatesError::Malformed(_)));
    }

    #[test]
    fn test_wrong_nesting_is_malformed() {
        for content in [
            "[1, 2, 3]",
            r#"{"median": 500}"#,
            r#"{"mean": "fast"}"#,
            r#"{"median": {"point_estimate": "500"}}"#,
        ] {
            let err = parse_estimates(content).unwrap_err();
            assert!(
                matches!(err, EstimatesError::Malformed(_)),
                "expected malformed for {content}"
            );
        }
    }

    #[test]
    fn test_explicit_null_is_malformed() {
        for content in [
            r#"{"median": null}"#,
            r#"{"mean": null, "median": {"point_estimate": 1.0}}"#,
            r#"{"median": {"point_estimate": null}}"#,
        ] {
            let err = parse_estimates(content).unwrap_err();
            assert!(
                matches!(err, EstimatesError::Malformed(_)),
                "expected malformed for {content}"
            );
        }
    }

    #[test]
    fn test_negative_estimate_rejected() {
        let err = parse_estimates(r#"{"mean": {"point_estimate": -3.0}}"#).unwrap_err();
        assert!(matches!(
            err,
            EstimatesError::InvalidEstimate {
                statistic: "mean",
                ..
            }
        ));
    }

    #[test]
    fn test_read_missing_file_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let err = read_estimates(&dir.path().join(ESTIMATES_FILE), 1024).unwrap_err();
        assert!(matches!(err, EstimatesError::Unreadable(_)));
    }

    #[test]
    fn test_read_respects_size_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(ESTIMATES_FILE);
        fs::write(&path, CRITERION_SAMPLE).unwrap();

        let err = read_estimates(&path, 16).unwrap_err();
        assert!(matches!(err, EstimatesError::TooLarge { max: 16, .. }));

        let est = read_estimates(&path, 1024 * 1024).unwrap();
        assert_eq!(est.median_ns, 500.0);
    }
}
