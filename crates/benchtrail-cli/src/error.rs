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

//! Structured error types for the benchtrail CLI.
//!
//! All commands return `Result<(), CliError>`; `main` prints the error and
//! exits with a failure status.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for benchtrail CLI operations.
///
/// # Examples
///
/// ```rust,no_run
/// use benchtrail_cli::error::CliError;
///
/// fn make_output_dir(path: &str) -> Result<(), CliError> {
///     std::fs::create_dir_all(path).map_err(|e| CliError::io_error(path, e))?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum CliError {
    /// I/O operation failed outside the core library (output directories,
    /// stdout).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// History or report operation failed.
    #[error(transparent)]
    Core(#[from] benchtrail_core::Error),

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create an invalid input error.
    ///
    /// ```rust
    /// use benchtrail_cli::error::CliError;
    ///
    /// let err = CliError::invalid_input("Unsupported shell: 'tcsh'");
    /// assert_eq!(err.to_string(), "Invalid input: Unsupported shell: 'tcsh'");
    /// ```
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
