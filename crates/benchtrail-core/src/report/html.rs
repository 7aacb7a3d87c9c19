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

//! HTML export with one inline SVG chart per operation.
//!
//! Each chart plots median time (log scale) against input size, one line
//! per benchmark group. Sizes are laid out as evenly spaced categories in
//! numeric order. Records with a zero median cannot sit on a log axis and
//! only appear in the table below the chart.

use super::{group_by, size_rank};
use crate::error::{Error, Result};
use crate::record::Record;
use crate::throughput::format_duration_ns;
use std::fs;
use std::path::Path;

const STYLE: &str = "body{font-family:sans-serif;margin:2em;color:#222}\
table{border-collapse:collapse;margin-bottom:2em}\
th,td{border:1px solid #ccc;padding:4px 10px;text-align:left}\
th{background:#f3f3f3}\
svg text{font-size:11px}";

const PALETTE: [&str; 8] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#17becf",
];

const WIDTH: f64 = 760.0;
const HEIGHT: f64 = 300.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 180.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 40.0;

/// Renders records as a standalone HTML page.
pub fn render_html(records: &[Record]) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Benchmark Results</title>\n");
    html.push_str(&format!("<style>{}</style>\n", STYLE));
    html.push_str("</head>\n<body>\n<h1>Benchmark Results</h1>\n");

    if records.is_empty() {
        html.push_str("<p>No benchmark results found.</p>\n");
    }

    for (operation, rows) in group_by(records, |r| r.operation.as_str()) {
        html.push_str(&format!("<h2>{}</h2>\n", escape(operation)));
        html.push_str(&render_chart(&rows));
        html.push_str(&render_table(&rows));
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Writes the HTML rendering of `records` to `path`.
pub fn export_html(records: &[Record], path: &Path) -> Result<()> {
    fs::write(path, render_html(records)).map_err(|e| Error::io_error(path, e))
}

fn sorted_sizes<'a>(rows: &[&'a Record]) -> Vec<&'a str> {
    let mut sizes: Vec<&str> = rows.iter().map(|r| r.size.as_str()).collect();
    sizes.sort_by(|a, b| (size_rank(a), *a).cmp(&(size_rank(b), *b)));
    sizes.dedup();
    sizes
}

fn render_chart(rows: &[&Record]) -> String {
    let plotted: Vec<&Record> = rows.iter().copied().filter(|r| r.median_ns > 0.0).collect();
    if plotted.is_empty() {
        return "<p>No plottable results.</p>\n".to_string();
    }

    let sizes = sorted_sizes(&plotted);
    let (lo, hi) = decade_bounds(&plotted);
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let x_at = |size: &str| {
        let idx = sizes.iter().position(|s| *s == size).unwrap_or(0);
        if sizes.len() == 1 {
            MARGIN_LEFT + plot_w / 2.0
        } else {
            MARGIN_LEFT + plot_w * idx as f64 / (sizes.len() - 1) as f64
        }
    };
    let y_at = |ns: f64| MARGIN_TOP + plot_h * (hi - ns.log10()) / (hi - lo);

    let mut svg = format!(
        "<svg width=\"{WIDTH}\" height=\"{HEIGHT}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
    );

    // Decade gridlines and y labels.
    for decade in (lo as i32)..=(hi as i32) {
        let y = y_at(10f64.powi(decade));
        svg.push_str(&format!(
            "<line x1=\"{MARGIN_LEFT}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"#e5e5e5\"/>\n",
            MARGIN_LEFT + plot_w
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\">{}</text>\n",
            MARGIN_LEFT - 6.0,
            y + 4.0,
            escape(&format_duration_ns(10f64.powi(decade)))
        ));
    }

    for &size in &sizes {
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>\n",
            x_at(size),
            HEIGHT - MARGIN_BOTTOM + 16.0,
            escape(size)
        ));
    }
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">Input Size</text>\n",
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 6.0
    ));

    let by_bench = group_by(plotted.iter().copied(), |r| r.benchmark.as_str());
    for (i, (bench, mut series)) in by_bench.into_iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        series.sort_by_key(|r| (size_rank(&r.size), r.size.clone()));

        let points: Vec<String> = series
            .iter()
            .map(|r| format!("{:.1},{:.1}", x_at(r.size.as_str()), y_at(r.median_ns)))
            .collect();
        svg.push_str(&format!(
            "<polyline fill=\"none\" stroke=\"{color}\" stroke-width=\"2\" points=\"{}\"/>\n",
            points.join(" ")
        ));
        for r in &series {
            svg.push_str(&format!(
                "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"3\" fill=\"{color}\"><title>{} {}: {}</title></circle>\n",
                x_at(r.size.as_str()),
                y_at(r.median_ns),
                escape(bench),
                escape(&r.size),
                escape(&format_duration_ns(r.median_ns))
            ));
        }

        let legend_y = MARGIN_TOP + 16.0 * i as f64;
        svg.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"10\" height=\"10\" fill=\"{color}\"/>\n\
             <text x=\"{:.1}\" y=\"{:.1}\">{}</text>\n",
            WIDTH - MARGIN_RIGHT + 16.0,
            legend_y,
            WIDTH - MARGIN_RIGHT + 32.0,
            legend_y + 9.0,
            escape(bench)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

fn decade_bounds(plotted: &[&Record]) -> (f64, f64) {
    let (min, max) = plotted.iter().fold((f64::MAX, f64::MIN), |(lo, hi), r| {
        (lo.min(r.median_ns), hi.max(r.median_ns))
    });
    let lo = min.log10().floor();
    let hi = max.log10().ceil();
    if hi > lo {
        (lo, hi)
    } else {
        (lo, lo + 1.0)
    }
}

fn render_table(rows: &[&Record]) -> String {
    let mut table = String::from(
        "<table>\n<tr><th>Benchmark</th><th>Size</th><th>Median</th><th>Mean</th><th>Throughput</th></tr>\n",
    );
    let mut rows = rows.to_vec();
    rows.sort_by(|a, b| {
        (a.benchmark.as_str(), size_rank(&a.size), a.size.as_str()).cmp(&(
            b.benchmark.as_str(),
            size_rank(&b.size),
            b.size.as_str(),
        ))
    });
    for r in rows {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&r.benchmark),
            escape(&r.size),
            format_duration_ns(r.median_ns),
            format_duration_ns(r.mean_ns),
            escape(&r.throughput_pretty)
        ));
    }
    table.push_str("</table>\n");
    table
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
