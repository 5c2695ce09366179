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

use slate::{ChartConfig, ChartDataSystem, Row};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    info!("Starting Slate chart data demo");

    let rows: Vec<Row> = serde_json::from_str(
        r#"[
            {"region": "west",  "product": "ore",  "sales": 120.5, "returns": 3,    "priority": true},
            {"region": "east",  "product": "ore",  "sales": 80,    "returns": 1,    "priority": false},
            {"region": "west",  "product": "coal", "sales": 64.25, "returns": null, "priority": true},
            {"region": "south", "product": "coal", "sales": "41",  "returns": 0,    "priority": "true"},
            {"region": "east",  "product": "coal", "sales": null,  "returns": 2,    "priority": false},
            {"region": "west",  "product": "ore",  "sales": 97,    "returns": 5,    "priority": 1}
        ]"#,
    )?;
    let headers = ["region", "product", "sales", "returns", "priority"]
        .map(String::from)
        .to_vec();

    let mut system = ChartDataSystem::new();

    let profiles = system.profile(&rows, &headers);
    let summary = system.summary(&profiles);
    info!(
        columns = summary.total_columns,
        numeric = summary.numeric_count,
        boolean = summary.boolean_count,
        text = summary.text_count,
        "dataset profiled"
    );
    println!("Column profiles:\n{}", system.export_stats_json(&profiles)?);

    let requests: Vec<ChartConfig> = serde_json::from_str(
        r#"[
            {"type": "bar",     "categoryKey": "region",  "valueKeys": ["sales"], "aggregation": "sum"},
            {"type": "line",    "categoryKey": "product", "valueKeys": ["sales", "returns"], "aggregation": "avg"},
            {"type": "pie",     "categoryKey": "product"},
            {"type": "box",     "categoryKey": "product", "valueKeys": ["sales"]},
            {"type": "heatmap", "categoryKey": "region",  "valueKeys": ["product"]},
            {"type": "venn",    "categoryKey": "priority", "valueKeys": ["returns"]},
            {"type": "scatter", "categoryKey": "sales",   "valueKeys": ["returns"]}
        ]"#,
    )?;

    for config in &requests {
        let records = system.chart_data_cached(1, &rows, config).to_vec();
        info!(kind = ?config.kind, records = records.len(), "series computed");
        println!(
            "{:?} series:\n{}",
            config.kind,
            system.export_records_json(&records)?
        );
    }

    info!("Demo complete");
    Ok(())
}
