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

use crate::series::{ChartConfig, ChartKind, OutputRecord};
use crate::value::Row;
use crate::{density, distribution, group, venn};
use tracing::{debug, warn};

/// Routes a row set and configuration to the matching computer and
/// returns the renderer-ready records.
///
/// Total function: malformed or incomplete configurations degrade to an
/// empty sequence so the rendering layer can show a "no data" state
/// instead of crashing. Repeated calls on identical inputs yield
/// identical output.
pub fn chart_data(rows: &[Row], config: &ChartConfig) -> Vec<OutputRecord> {
    debug!(kind = ?config.kind, rows = rows.len(), "dispatching chart data request");
    if rows.is_empty() {
        return Vec::new();
    }
    match config.kind {
        ChartKind::Bar
        | ChartKind::Line
        | ChartKind::Area
        | ChartKind::Pie
        | ChartKind::Doughnut => {
            let Some(category_key) = config.category_key.as_deref() else {
                warn!(kind = ?config.kind, "missing category key, degrading to empty series");
                return Vec::new();
            };
            group::aggregate(rows, category_key, &config.value_keys, config.aggregation)
        }
        ChartKind::Scatter | ChartKind::Bubble => point_series(rows, config),
        ChartKind::Box => {
            let (Some(category_key), Some(value_key)) =
                (config.category_key.as_deref(), config.value_keys.first())
            else {
                warn!("box chart needs a category key and a value key, degrading to empty series");
                return Vec::new();
            };
            distribution::box_summaries(rows, category_key, value_key)
        }
        ChartKind::Heatmap | ChartKind::Contour => {
            let (Some(row_key), Some(column_key)) =
                (config.category_key.as_deref(), config.value_keys.first())
            else {
                warn!("density chart needs two keys, degrading to empty series");
                return Vec::new();
            };
            density::co_occurrence(rows, row_key, column_key).cells
        }
        ChartKind::Venn => {
            let (Some(key_a), Some(key_b)) =
                (config.category_key.as_deref(), config.value_keys.first())
            else {
                warn!("venn chart needs two keys, degrading to empty series");
                return Vec::new();
            };
            venn::intersection_counts(rows, key_a, key_b)
        }
        ChartKind::Unknown => {
            warn!("unrecognised chart type, degrading to empty series");
            Vec::new()
        }
    }
}

/// Scatter and bubble bypass aggregation: one point per row, mapping
/// `x` from the category column, `y` from the first value column and,
/// for bubble with a size key, `z` from the size column. Rows where any
/// required field is not numerically coercible are dropped.
fn point_series(rows: &[Row], config: &ChartConfig) -> Vec<OutputRecord> {
    let Some(x_key) = config.category_key.as_deref() else {
        warn!("point series needs a category key, degrading to empty series");
        return Vec::new();
    };
    let Some(y_key) = config.value_keys.first() else {
        warn!("point series needs a value key, degrading to empty series");
        return Vec::new();
    };
    let z_key = match config.kind {
        ChartKind::Bubble => config.size_key.as_deref(),
        _ => None,
    };

    rows.iter()
        .filter_map(|row| {
            let x = row.get(x_key).as_number()?;
            let y = row.get(y_key).as_number()?;
            let mut record = OutputRecord::new();
            record.set_number("x", x);
            record.set_number("y", y);
            if let Some(z_key) = z_key {
                record.set_number("z", row.get(z_key).as_number()?);
            }
            Some(record)
        })
        .collect()
}
