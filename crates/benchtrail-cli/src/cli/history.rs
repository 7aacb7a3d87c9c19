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

//! Commands that read Criterion output.

use super::SourceArg;
use crate::commands;
use crate::error::CliError;
use benchtrail_core::DiscoveryConfig;
use clap::Subcommand;
use std::path::PathBuf;

/// Default history table location.
pub const DEFAULT_HISTORY: &str = "bench_analysis/benchmark_results.csv";

/// Default report directory.
pub const DEFAULT_REPORT_DIR: &str = "bench_results";

/// Export and report commands.
#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Append new Criterion results to the CSV history
    ///
    /// Results already present (same run id and test name) are skipped, so
    /// running this repeatedly against the same Criterion output is safe.
    Export {
        /// Descriptive tag for this run (e.g. 'testing change B')
        #[arg(long, default_value = "")]
        tag: String,

        /// Criterion run directory to read
        #[arg(long, value_enum, default_value = "new")]
        source: SourceArg,

        /// Only include benchmark groups whose name contains this text
        #[arg(long, value_name = "FILTER")]
        bench: Option<String>,

        /// Criterion output directory (default: auto-detect)
        #[arg(long, value_name = "DIR")]
        criterion_dir: Option<PathBuf>,

        /// History CSV path
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_HISTORY)]
        output: PathBuf,
    },

    /// Render Markdown (and optionally HTML) summaries
    ///
    /// Reads the current Criterion output, or a history CSV when --history
    /// is given.
    Report {
        /// Only include benchmark groups whose name contains this text
        #[arg(long, value_name = "FILTER")]
        bench: Option<String>,

        /// Criterion run directory to read
        #[arg(long, value_enum, default_value = "new")]
        source: SourceArg,

        /// Criterion output directory (default: auto-detect)
        #[arg(long, value_name = "DIR")]
        criterion_dir: Option<PathBuf>,

        /// Report the latest run of each test from a history CSV instead of
        /// Criterion output
        #[arg(long, value_name = "FILE", conflicts_with_all = ["source", "criterion_dir"])]
        history: Option<PathBuf>,

        /// Directory the reports are written to
        #[arg(long, value_name = "DIR", default_value = DEFAULT_REPORT_DIR)]
        output_dir: PathBuf,

        /// Also write an HTML page with charts
        #[arg(long)]
        html: bool,
    },
}

impl HistoryCommands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the history table or a report cannot be written.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            HistoryCommands::Export {
                tag,
                source,
                bench,
                criterion_dir,
                output,
            } => {
                let config = DiscoveryConfig::new(commands::resolve_criterion_dir(criterion_dir))
                    .with_source(source.into())
                    .with_filter(bench)
                    .with_tag(tag);
                commands::export(&config, &output).map(|_| ())
            }
            HistoryCommands::Report {
                bench,
                source,
                criterion_dir,
                history,
                output_dir,
                html,
            } => {
                let input = match history {
                    Some(path) => commands::ReportInput::History {
                        path,
                        bench_filter: bench,
                    },
                    None => commands::ReportInput::Criterion(
                        DiscoveryConfig::new(commands::resolve_criterion_dir(criterion_dir))
                            .with_source(source.into())
                            .with_filter(bench),
                    ),
                };
                commands::report(&input, &output_dir, html)
            }
        }
    }
}
