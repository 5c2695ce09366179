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

use crate::error::ConfigError;
use crate::value::Row;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Inferred semantic type of a column.
///
/// Numeric takes priority: a column where more than the configured
/// majority of valid values coerce numerically is numeric even when the
/// remainder look like flags. Boolean requires every valid value to be
/// boolean-ish. Everything else is text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Boolean,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

/// Read-only snapshot of one column. `valid_count + missing_count`
/// always equals `total_count`. Non-numeric columns carry lexicographic
/// extremes of the string-coerced valid values instead of numeric
/// statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub name: String,
    pub kind: ColumnKind,
    pub total_count: usize,
    pub valid_count: usize,
    pub missing_count: usize,
    pub numeric: Option<NumericSummary>,
    pub min_text: Option<String>,
    pub max_text: Option<String>,
}

/// Aggregate view over a profiled dataset, for summary cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_columns: usize,
    pub numeric_count: usize,
    pub boolean_count: usize,
    pub text_count: usize,
    pub avg_missing_ratio: f64,
}

#[derive(Debug, Clone)]
pub struct ProfilerConfig {
    /// Fraction of valid values that must coerce numerically for the
    /// column to classify as numeric; the test is strictly greater
    /// than, so the default `0.5` means "more than half".
    pub numeric_majority: f64,
    /// Decimal places the mean is rounded to.
    pub mean_precision: u32,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            numeric_majority: 0.5,
            mean_precision: 2,
        }
    }
}

impl ProfilerConfig {
    /// Stricter preset: four out of five valid values must be numeric
    /// before the column classifies as numeric.
    pub fn for_strict_typing() -> Self {
        Self {
            numeric_majority: 0.8,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.numeric_majority) {
            return Err(ConfigError::InvalidProfilerConfig {
                field: "numeric_majority".to_string(),
                value: self.numeric_majority.to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Profiler {
    config: ProfilerConfig,
}

impl Profiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProfilerConfig) -> Self {
        Self { config }
    }

    /// Profiles every header column in parallel. Column order in the
    /// output follows the header list, not any internal ordering.
    pub fn profile_dataset(&self, rows: &[Row], headers: &[String]) -> Vec<ColumnStats> {
        headers
            .par_iter()
            .map(|name| self.profile_column(rows, name))
            .collect()
    }

    /// Profiles a single column. Total: every input, including an empty
    /// row set or an all-null column, yields well-formed stats.
    pub fn profile_column(&self, rows: &[Row], name: &str) -> ColumnStats {
        let total_count = rows.len();
        let valid: Vec<_> = rows
            .iter()
            .map(|row| row.get(name))
            .filter(|v| !v.is_missing())
            .collect();
        let valid_count = valid.len();
        let missing_count = total_count - valid_count;

        let numbers: Vec<f64> = valid.iter().filter_map(|v| v.as_number()).collect();
        let kind = if valid_count > 0
            && numbers.len() as f64 / valid_count as f64 > self.config.numeric_majority
        {
            ColumnKind::Numeric
        } else if valid_count > 0 && valid.iter().all(|v| v.is_booleanish()) {
            ColumnKind::Boolean
        } else {
            ColumnKind::Text
        };

        let (numeric, min_text, max_text) = match kind {
            ColumnKind::Numeric => (self.numeric_summary(numbers), None, None),
            ColumnKind::Boolean | ColumnKind::Text => {
                let mut labels: Vec<String> = valid.iter().map(|v| v.label()).collect();
                labels.sort();
                (None, labels.first().cloned(), labels.last().cloned())
            }
        };

        ColumnStats {
            name: name.to_string(),
            kind,
            total_count,
            valid_count,
            missing_count,
            numeric,
            min_text,
            max_text,
        }
    }

    fn numeric_summary(&self, mut numbers: Vec<f64>) -> Option<NumericSummary> {
        if numbers.is_empty() {
            return None;
        }
        numbers.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let n = numbers.len();
        let mean = numbers.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (numbers[n / 2 - 1] + numbers[n / 2]) / 2.0
        } else {
            numbers[n / 2]
        };
        Some(NumericSummary {
            mean: round_to(mean, self.config.mean_precision),
            median,
            min: numbers[0],
            max: numbers[n - 1],
        })
    }

    pub fn dataset_summary(&self, profiles: &[ColumnStats]) -> DatasetSummary {
        let (numeric_count, boolean_count, text_count) =
            profiles
                .iter()
                .fold((0, 0, 0), |(num, boolean, text), p| match p.kind {
                    ColumnKind::Numeric => (num + 1, boolean, text),
                    ColumnKind::Boolean => (num, boolean + 1, text),
                    ColumnKind::Text => (num, boolean, text + 1),
                });
        let avg_missing_ratio = if profiles.is_empty() {
            0.0
        } else {
            profiles
                .iter()
                .map(|p| {
                    if p.total_count == 0 {
                        0.0
                    } else {
                        p.missing_count as f64 / p.total_count as f64
                    }
                })
                .sum::<f64>()
                / profiles.len() as f64
        };
        DatasetSummary {
            total_columns: profiles.len(),
            numeric_count,
            boolean_count,
            text_count,
            avg_missing_ratio,
        }
    }
}

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}
