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

//! Human-readable reports over normalized records.
//!
//! - `markdown`: one table per benchmark group
//! - `html`: one chart per operation, median time against size

pub mod html;
pub mod markdown;

pub use html::{export_html, render_html};
pub use markdown::{export_markdown, render_markdown};

use crate::record::Record;
use std::collections::BTreeMap;

/// Records keyed by a derived field, each bucket in input order.
pub(crate) fn group_by<'a, I, F>(records: I, key: F) -> BTreeMap<&'a str, Vec<&'a Record>>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&'a Record) -> &'a str,
{
    let mut groups: BTreeMap<&str, Vec<&Record>> = BTreeMap::new();
    for record in records {
        groups.entry(key(record)).or_default().push(record);
    }
    groups
}

/// Numeric sort position of a size; non-numeric sizes rank as zero.
pub(crate) fn size_rank(size: &str) -> u64 {
    if !size.is_empty() && size.bytes().all(|b| b.is_ascii_digit()) {
        size.parse().unwrap_or(u64::MAX)
    } else {
        0
    }
}
