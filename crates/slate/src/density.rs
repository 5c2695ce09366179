// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use crate::series::OutputRecord;
use crate::value::{Row, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Co-occurrence counts between two categorical dimensions, with the
/// global count extremes a renderer needs to normalise its colour
/// scale. Cells are sparse: a pair never observed in the data is
/// omitted, not zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityMatrix {
    /// One record per observed pair, carrying `x` (row-axis label),
    /// `y` (column-axis label) and `value` (count). Row-major
    /// first-seen order: outer order is the first appearance of each
    /// `x` label, inner order the first appearance of each `y` label
    /// within that `x`.
    pub cells: Vec<OutputRecord>,
    /// Smallest observed cell count; `0` when there are no cells.
    pub min: u64,
    /// Largest observed cell count; `0` when there are no cells.
    pub max: u64,
}

impl DensityMatrix {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Single pass over the rows counting every observed
/// `(row label, column label)` pair. Labels follow the same
/// stringification discipline as grouping, so missing values land under
/// the `"null"` label rather than dropping the row.
pub fn co_occurrence(rows: &[Row], row_key: &str, column_key: &str) -> DensityMatrix {
    let mut grid: IndexMap<String, IndexMap<String, u64>> = IndexMap::new();
    for row in rows {
        let x = row.get(row_key).label();
        let y = row.get(column_key).label();
        *grid.entry(x).or_default().entry(y).or_insert(0) += 1;
    }

    let mut min = u64::MAX;
    let mut max = 0u64;
    let mut cells = Vec::new();
    for (x, columns) in grid {
        for (y, count) in columns {
            min = min.min(count);
            max = max.max(count);
            let mut record = OutputRecord::new();
            record.set("x", Value::Text(x.clone()));
            record.set("y", Value::Text(y));
            record.set_number("value", count as f64);
            cells.push(record);
        }
    }
    if cells.is_empty() {
        min = 0;
    }
    DensityMatrix { cells, min, max }
}
