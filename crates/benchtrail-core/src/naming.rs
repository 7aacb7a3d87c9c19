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

//! Test identity derived from Criterion directory names.
//!
//! A parameterized benchmark (`group/insert/100/new/estimates.json`) and a
//! test whose own name contains a slash produce the same identity. Criterion
//! never emits a directory name containing the separator, so the two cannot
//! collide in practice.

/// Separator between the test and parameter segments of a test name.
pub const SEPARATOR: char = '/';

/// Value recorded in the `size` column when a test has no second segment.
pub const SIZE_NOT_APPLICABLE: &str = "N/A";

/// Hierarchical identity of one benchmark test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestIdentity {
    /// Full name, `test` or `test/parameter`
    pub test_name: String,
    /// First segment of `test_name`
    pub operation: String,
    /// Second segment of `test_name`, or [`SIZE_NOT_APPLICABLE`]
    pub size: String,
}

impl TestIdentity {
    /// Build the identity from a test directory name and an optional
    /// parameter directory name.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchtrail_core::naming::TestIdentity;
    ///
    /// let id = TestIdentity::new("insert", Some("100"));
    /// assert_eq!(id.test_name, "insert/100");
    /// assert_eq!(id.operation, "insert");
    /// assert_eq!(id.size, "100");
    ///
    /// let id = TestIdentity::new("lookup", None);
    /// assert_eq!(id.size, "N/A");
    /// ```
    pub fn new(test: &str, parameter: Option<&str>) -> Self {
        let test_name = match parameter {
            Some(param) => format!("{test}{SEPARATOR}{param}"),
            None => test.to_string(),
        };
        Self::from_test_name(test_name)
    }

    /// Split an already-joined test name into operation and size.
    pub fn from_test_name(test_name: impl Into<String>) -> Self {
        let test_name = test_name.into();
        let mut parts = test_name.split(SEPARATOR);
        let operation = parts.next().unwrap_or_default().to_string();
        let size = parts
            .next()
            .map_or_else(|| SIZE_NOT_APPLICABLE.to_string(), str::to_string);

        Self {
            test_name,
            operation,
            size,
        }
    }

    /// Number of operations one iteration performs.
    ///
    /// The size is used when it is a plain non-negative integer; anything
    /// else (including `N/A`) counts as a single operation.
    pub fn operation_count(&self) -> u64 {
        operation_count(&self.size)
    }
}

/// Operation count encoded by a `size` value.
pub fn operation_count(size: &str) -> u64 {
    if size.is_empty() || !size.bytes().all(|b| b.is_ascii_digit()) {
        return 1;
    }
    size.parse().unwrap_or(1)
}
