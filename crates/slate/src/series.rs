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

use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Requested chart family. Unrecognised type strings deserialise to
/// `Unknown`, which the dispatcher degrades to an empty series instead
/// of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Area,
    Scatter,
    Bubble,
    Pie,
    Doughnut,
    Heatmap,
    Contour,
    Box,
    Venn,
    #[serde(other)]
    Unknown,
}

/// Per-bucket reduction applied to each requested value column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Sum,
    Avg,
    Min,
    Max,
    Count,
}

/// One requested transformation of a row set into renderer-ready series.
///
/// `category_key` doubles as the grouping label, the X axis, the heatmap
/// row axis and Venn Set A depending on `kind`; `value_keys[0]` supplies
/// the second axis for heatmap/contour and Set B for venn. The engine
/// never validates semantic sense of a mapping - a numeric column used
/// as `category_key` is legal and its values are stringified as labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    #[serde(default)]
    pub category_key: Option<String>,
    #[serde(default)]
    pub value_keys: Vec<String>,
    #[serde(default)]
    pub size_key: Option<String>,
    #[serde(default)]
    pub aggregation: Aggregation,
}

impl ChartConfig {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            category_key: None,
            value_keys: Vec::new(),
            size_key: None,
            aggregation: Aggregation::default(),
        }
    }

    pub fn with_category(mut self, key: impl Into<String>) -> Self {
        self.category_key = Some(key.into());
        self
    }

    pub fn with_values<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_size(mut self, key: impl Into<String>) -> Self {
        self.size_key = Some(key.into());
        self
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }
}

/// Uniform record handed to renderers. Field order is insertion order
/// and survives JSON serialisation, so consumers never re-sort or
/// re-shape the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct OutputRecord {
    fields: IndexMap<String, Value>,
}

impl OutputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record carrying the display key `name`.
    pub fn named(label: impl Into<String>) -> Self {
        let mut record = Self::new();
        record.set("name", Value::Text(label.into()));
        record
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn set_number(&mut self, key: impl Into<String>, value: f64) {
        self.set(key, Value::Number(value));
    }

    pub fn with_number(mut self, key: impl Into<String>, value: f64) -> Self {
        self.set_number(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.fields.get(key) {
            Some(Value::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(Value::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}
