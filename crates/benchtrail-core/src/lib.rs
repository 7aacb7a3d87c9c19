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

//! Benchtrail core: Criterion results as an append-only CSV history.
//!
//! Criterion leaves one `estimates.json` per benchmark run below
//! `target/criterion`. This crate finds them, turns each into a flat
//! [`Record`], and appends the ones not seen before to a history table, so
//! running it after every `cargo bench` builds a performance log without a
//! database.
//!
//! # Pipeline
//!
//! ```text
//! discover ──▶ estimates + naming + throughput ──▶ Vec<Record>
//!                                                   ├─▶ HistoryTable::append (CSV)
//!                                                   └─▶ report (Markdown / HTML)
//! ```
//!
//! # Deduplication
//!
//! A record is identified by its `run_id` (the estimates file's modification
//! time, to the second) and its `test_name`. Exporting the same Criterion
//! output twice appends nothing the second time. Two distinct runs finishing
//! within the same second share a `run_id` and the later one is dropped.
//!
//! # Example
//!
//! ```no_run
//! use benchtrail_core::{discover, DiscoveryConfig, HistoryTable, SourceLabel};
//!
//! # fn main() -> benchtrail_core::Result<()> {
//! let config = DiscoveryConfig::new("target/criterion")
//!     .with_source(SourceLabel::New)
//!     .with_tag("after radix rewrite");
//! let found = discover(&config);
//!
//! let mut history = HistoryTable::open("bench_analysis/benchmark_results.csv");
//! let summary = history.append(&found.records)?;
//! println!("{} new, {} duplicates", summary.written, summary.skipped);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod discover;
pub mod error;
pub mod estimates;
pub mod naming;
pub mod record;
pub mod report;
pub mod sink;
pub mod throughput;

pub use clock::{FileSystemClock, FixedClock, ModifiedTime};
pub use config::{DiscoveryConfig, SourceLabel};
pub use discover::{discover, discover_with_clock, Discovery, SkippedFile};
pub use error::{Error, EstimatesError, Result};
pub use record::{IdentityKey, Record, COLUMNS};
pub use sink::{latest_runs, load_existing_keys, read_history, ExportSummary, HistoryTable};
