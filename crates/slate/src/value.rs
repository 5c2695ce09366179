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

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single dataset cell. Every coercion in the engine pattern-matches
/// this enum exhaustively; there is no runtime introspection anywhere.
///
/// The untagged representation lets plain JSON rows
/// (`{"region": "west", "sales": 42.5, "active": true, "note": null}`)
/// deserialise directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Missing means absent data: `Null` or the empty string. The engine
    /// uses this single definition everywhere "missing" is decided.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    /// Numeric coercion: a finite number, or a string that parses fully
    /// as a decimal number. Booleans and everything else are not numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Self::Number(_) | Self::Bool(_) | Self::Null => None,
        }
    }

    /// True when the value can be read as a flag: a boolean, the literal
    /// strings `"true"`/`"false"` (ASCII case-insensitive), or numeric
    /// `0`/`1`.
    pub fn is_booleanish(&self) -> bool {
        match self {
            Self::Bool(_) => true,
            Self::Number(n) => *n == 0.0 || *n == 1.0,
            Self::Text(s) => {
                s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false")
            }
            Self::Null => false,
        }
    }

    /// The truthy side of the boolean-ish coercion: `true`, `1`, `"true"`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n == 1.0,
            Self::Text(s) => s.eq_ignore_ascii_case("true"),
            Self::Null => false,
        }
    }

    /// Stringified form used as a category label. Missing values map to
    /// the stable literal `"null"` so downstream renderers can
    /// special-case it. Whole numbers print without a fractional part,
    /// matching the labels an upstream importer would have produced.
    pub fn label(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::Text(s) if s.is_empty() => "null".to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// One dataset record: an order-irrelevant mapping from column name to
/// cell value. Rows are never mutated by the engine; it borrows them
/// read-only for the duration of a call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: HashMap<String, Value>,
}

static NULL: Value = Value::Null;

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Field lookup. An absent column reads as `Null`, so omitting a
    /// field and storing an explicit null are indistinguishable.
    pub fn get(&self, key: &str) -> &Value {
        self.fields.get(key).unwrap_or(&NULL)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
