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

//! CLI command definitions and argument parsing.
//!
//! - [`history`]: commands over Criterion output (export, report)
//! - [`utility`]: shell completion

mod history;
mod utility;

use crate::error::CliError;
use clap::{Parser, Subcommand, ValueEnum};

pub use history::HistoryCommands;
pub use utility::UtilityCommands;

use benchtrail_core::SourceLabel;

/// Benchtrail - Criterion benchmark history tracker
///
/// Collects Criterion `estimates.json` results into an append-only CSV
/// history and renders Markdown/HTML summaries.
///
/// # Examples
///
/// ```bash
/// # Append the latest run to bench_analysis/benchmark_results.csv
/// benchtrail export --tag "radix index v2"
///
/// # Record the saved baseline of one group
/// benchtrail export --source base --bench compare_get
///
/// # Markdown and HTML summary of the latest run
/// benchtrail report --html
/// ```
#[derive(Parser)]
#[command(name = "benchtrail")]
#[command(author, version, about = "Benchtrail - Criterion benchmark history tracker", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    // Flattened so the commands appear at top level
    #[command(flatten)]
    History(HistoryCommands),

    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` when writing the history table or a report fails, or
    /// when the arguments are unusable.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::History(cmd) => cmd.execute(),
            Commands::Utility(cmd) => cmd.execute(),
        }
    }
}

/// Criterion run directory selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// Latest run
    New,
    /// Saved baseline
    Base,
}

impl From<SourceArg> for SourceLabel {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::New => SourceLabel::New,
            SourceArg::Base => SourceLabel::Base,
        }
    }
}
