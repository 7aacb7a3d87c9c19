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

//! Report command - Markdown and HTML summaries

use crate::error::CliError;
use benchtrail_core::report::{export_html, export_markdown, render_markdown};
use benchtrail_core::{discover, latest_runs, read_history, DiscoveryConfig, Record};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Markdown report file name inside the output directory.
pub const MARKDOWN_REPORT_FILE: &str = "BENCHMARK_RESULTS.md";

/// HTML report file name inside the output directory.
pub const HTML_REPORT_FILE: &str = "benchmark_results.html";

/// Where report records come from.
#[derive(Debug, Clone)]
pub enum ReportInput {
    /// Walk a Criterion output directory.
    Criterion(DiscoveryConfig),
    /// Read a previously exported history table. Only the latest run of
    /// each test is reported.
    History {
        /// History CSV path
        path: PathBuf,
        /// Case-sensitive substring the benchmark name must contain
        bench_filter: Option<String>,
    },
}

impl ReportInput {
    fn load(&self) -> Result<Vec<Record>, CliError> {
        match self {
            ReportInput::Criterion(config) => Ok(discover(config).records),
            ReportInput::History { path, bench_filter } => {
                let mut records = read_history(path)?;
                if let Some(filter) = bench_filter.as_deref().filter(|f| !f.is_empty()) {
                    records.retain(|r| r.benchmark.contains(filter));
                }
                Ok(latest_runs(records))
            }
        }
    }
}

/// Render reports into `output_dir` and print the Markdown to stdout.
///
/// # Errors
///
/// Returns `Err` if the history table cannot be parsed or a report file
/// cannot be written.
pub fn report(input: &ReportInput, output_dir: &Path, html: bool) -> Result<(), CliError> {
    let records = input.load()?;
    info!(records = records.len(), "rendering reports");

    fs::create_dir_all(output_dir).map_err(|e| CliError::io_error(output_dir, e))?;

    let markdown_path = output_dir.join(MARKDOWN_REPORT_FILE);
    export_markdown(&records, &markdown_path)?;

    println!("{}", render_markdown(&records));
    println!(
        "{} Markdown report written to {}",
        "✓".green().bold(),
        markdown_path.display()
    );

    if html {
        let html_path = output_dir.join(HTML_REPORT_FILE);
        export_html(&records, &html_path)?;
        println!(
            "{} HTML report written to {}",
            "✓".green().bold(),
            html_path.display()
        );
    }

    Ok(())
}
