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

//! Benchtrail CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **export**: append new Criterion results to the CSV history
//! - **report**: render Markdown (and optionally HTML) summaries from the
//!   latest Criterion run or from the history
//! - **completion**: generate shell completion scripts (bash, zsh, fish,
//!   powershell, elvish)
//!
//! # Logging
//!
//! Diagnostics are emitted through `tracing` to stderr. `RUST_LOG`
//! overrides the default `info` level, e.g. `RUST_LOG=benchtrail_core=debug`.
//!
//! # Environment
//!
//! - `CARGO_TARGET_DIR`: consulted when auto-detecting the Criterion directory
//! - `BENCHTRAIL_MAX_FILE_SIZE`: largest `estimates.json` accepted, in bytes
//!
//! # Examples
//!
//! ```no_run
//! use benchtrail_cli::commands::export;
//! use benchtrail_core::DiscoveryConfig;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), benchtrail_cli::error::CliError> {
//! let config = DiscoveryConfig::new("target/criterion").with_tag("baseline");
//! let summary = export(&config, Path::new("bench_analysis/benchmark_results.csv"))?;
//! println!("{} written", summary.written);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
