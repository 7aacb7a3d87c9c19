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

//! Error types for benchmark history operations.
//!
//! Two layers of failure exist. [`EstimatesError`] describes why a single
//! `estimates.json` could not be used; discovery logs it and moves on to the
//! next file. [`Error`] is what actually reaches the caller, produced by the
//! history and report write paths.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for benchtrail operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned to callers of the core API.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O operation failed (directory creation, file open, write).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// CSV serialization or deserialization failed.
    #[error("CSV error for '{path}': {message}")]
    Csv {
        /// The history table being read or written
        path: PathBuf,
        /// The error message
        message: String,
    },
}

impl Error {
    /// Create an I/O error with path context.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchtrail_core::Error;
    /// use std::io;
    ///
    /// let err = Error::io_error(
    ///     "history.csv",
    ///     io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    /// );
    /// assert!(err.to_string().contains("history.csv"));
    /// ```
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a CSV error with path context.
    pub fn csv_error(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            message: source.to_string(),
        }
    }
}

/// Reasons a single estimates file is rejected.
///
/// None of these abort a run. The discoverer records them alongside the
/// offending path and keeps walking.
#[derive(Debug, Error)]
pub enum EstimatesError {
    /// File vanished or could not be opened between discovery and read.
    #[error("cannot read estimates: {0}")]
    Unreadable(String),

    /// File is larger than the configured read limit.
    #[error("estimates file is too large ({actual} bytes, limit {max} bytes)")]
    TooLarge {
        /// Actual file size in bytes
        actual: u64,
        /// Configured limit in bytes
        max: u64,
    },

    /// Content is not JSON or the expected nesting is wrong.
    #[error("malformed estimates: {0}")]
    Malformed(String),

    /// A point estimate is negative, NaN or infinite.
    #[error("invalid {statistic} point estimate: {value}")]
    InvalidEstimate {
        /// Statistic name ("median" or "mean")
        statistic: &'static str,
        /// The rejected value
        value: f64,
    },

    /// The file's modification time could not be determined.
    #[error("cannot read modification time: {0}")]
    Timestamp(String),
}

impl From<serde_json::Error> for EstimatesError {
    fn from(source: serde_json::Error) -> Self {
        Self::Malformed(source.to_string())
    }
}
