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

use slate::{chart_data, Aggregation, ChartConfig, ChartKind, Row};

fn dataset() -> Vec<Row> {
    serde_json::from_str(
        r#"[
            {"region": "west",  "product": "ore",  "sales": 10,   "active": true},
            {"region": "east",  "product": "ore",  "sales": 4,    "active": false},
            {"region": "west",  "product": "coal", "sales": 6,    "active": true},
            {"region": "west",  "product": "ore",  "sales": 2,    "active": false},
            {"region": "south", "product": "coal", "sales": null, "active": true},
            {"region": "east",  "product": "coal", "sales": "8",  "active": "true"}
        ]"#,
    )
    .expect("inline dataset parses")
}

#[test]
fn bar_series_from_json_config() {
    let config: ChartConfig = serde_json::from_str(
        r#"{"type": "bar", "categoryKey": "region", "valueKeys": ["sales"], "aggregation": "sum"}"#,
    )
    .unwrap();
    let records = chart_data(&dataset(), &config);
    let series: Vec<_> = records
        .iter()
        .map(|r| (r.name().unwrap().to_string(), r.number("sales").unwrap()))
        .collect();
    assert_eq!(
        series,
        [
            ("west".to_string(), 18.0),
            ("east".to_string(), 12.0),
            ("south".to_string(), 0.0),
        ]
    );
}

#[test]
fn multi_series_line_carries_one_field_per_value_key() {
    let config = ChartConfig::new(ChartKind::Line)
        .with_category("product")
        .with_values(["sales", "missing_column"])
        .with_aggregation(Aggregation::Avg);
    let records = chart_data(&dataset(), &config);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name(), Some("ore"));
    assert!((records[0].number("sales").unwrap() - 16.0 / 3.0).abs() < 1e-12);
    assert_eq!(records[0].number("missing_column"), Some(0.0));
}

#[test]
fn pie_without_value_keys_counts_rows() {
    let config = ChartConfig::new(ChartKind::Pie).with_category("product");
    let records = chart_data(&dataset(), &config);
    assert_eq!(records[0].name(), Some("ore"));
    assert_eq!(records[0].number("value"), Some(3.0));
    assert_eq!(records[1].name(), Some("coal"));
    assert_eq!(records[1].number("value"), Some(3.0));
}

#[test]
fn box_series_carries_five_number_summary() {
    let rows: Vec<Row> = serde_json::from_str(
        r#"[
            {"g": "a", "v": 1}, {"g": "a", "v": 2}, {"g": "a", "v": 3}, {"g": "a", "v": 4},
            {"g": "a", "v": 5}, {"g": "a", "v": 6}, {"g": "a", "v": 7}, {"g": "a", "v": 8}
        ]"#,
    )
    .unwrap();
    let config = ChartConfig::new(ChartKind::Box)
        .with_category("g")
        .with_values(["v"]);
    let records = chart_data(&rows, &config);
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.number("min"), Some(1.0));
    assert_eq!(record.number("q1"), Some(2.5));
    assert_eq!(record.number("median"), Some(4.5));
    assert_eq!(record.number("q3"), Some(6.5));
    assert_eq!(record.number("max"), Some(8.0));
}

#[test]
fn heatmap_emits_sparse_observed_cells() {
    let config = ChartConfig::new(ChartKind::Heatmap)
        .with_category("region")
        .with_values(["product"]);
    let records = chart_data(&dataset(), &config);
    // west x {ore, coal}, east x {ore, coal}, south x coal: 5 observed pairs.
    assert_eq!(records.len(), 5);
    assert_eq!(records[0].text("x"), Some("west"));
    assert_eq!(records[0].text("y"), Some("ore"));
    assert_eq!(records[0].number("value"), Some(2.0));
}

#[test]
fn venn_counts_membership_across_value_forms() {
    let config = ChartConfig::new(ChartKind::Venn)
        .with_category("active")
        .with_values(["active"]);
    // Degenerate but legal: the same key on both sides means every
    // member lands in the intersection.
    let records = chart_data(&dataset(), &config);
    assert_eq!(records[0].number("value"), Some(0.0));
    assert_eq!(records[1].number("value"), Some(0.0));
    assert_eq!(records[2].number("value"), Some(4.0));
}

#[test]
fn dispatcher_is_idempotent_on_identical_input() {
    let rows = dataset();
    for kind in [
        ChartKind::Bar,
        ChartKind::Scatter,
        ChartKind::Box,
        ChartKind::Heatmap,
        ChartKind::Venn,
    ] {
        let config = ChartConfig::new(kind)
            .with_category("region")
            .with_values(["sales"]);
        assert_eq!(
            chart_data(&rows, &config),
            chart_data(&rows, &config),
            "{kind:?}"
        );
    }
}

#[test]
fn degenerate_configurations_never_panic() {
    let rows = dataset();
    let no_category: ChartConfig = serde_json::from_str(r#"{"type": "heatmap"}"#).unwrap();
    assert!(chart_data(&rows, &no_category).is_empty());

    let unknown: ChartConfig =
        serde_json::from_str(r#"{"type": "hexbin", "categoryKey": "region"}"#).unwrap();
    assert!(chart_data(&rows, &unknown).is_empty());

    let bogus_columns = ChartConfig::new(ChartKind::Scatter)
        .with_category("no_such")
        .with_values(["also_missing"]);
    assert!(chart_data(&rows, &bogus_columns).is_empty());
}

#[test]
fn output_serialises_to_renderer_ready_json() {
    let config = ChartConfig::new(ChartKind::Bar)
        .with_category("region")
        .with_values(["sales"]);
    let records = chart_data(&dataset(), &config);
    let json = serde_json::to_value(&records).unwrap();
    assert_eq!(json[0]["name"], "west");
    assert_eq!(json[0]["sales"], 18.0);
}
