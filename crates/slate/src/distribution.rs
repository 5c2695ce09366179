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

use crate::group;
use crate::series::OutputRecord;
use crate::value::Row;
use serde::{Deserialize, Serialize};

/// Box-plot statistics for one bucket.
///
/// Quartile convention: exclusive-median halves. With the bucket sorted
/// ascending and `n` values, `q1` is the median of indices `< n / 2`
/// and `q3` the median of indices `>= (n + 1) / 2`, so for an odd `n`
/// the overall median belongs to neither half. For `[1..=8]` this gives
/// `q1 = 2.5`, `median = 4.5`, `q3 = 6.5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// Computes the summary over a bucket's values, sorting in place.
    /// An empty bucket has no summary.
    pub fn compute(values: &mut [f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let n = values.len();
        let median = median_of(values);
        let lower = &values[..n / 2];
        let upper = &values[(n + 1) / 2..];
        Some(Self {
            min: values[0],
            q1: if lower.is_empty() { median } else { median_of(lower) },
            median,
            q3: if upper.is_empty() { median } else { median_of(upper) },
            max: values[n - 1],
        })
    }
}

/// Middle element of a sorted non-empty slice, averaging the two
/// central elements when the length is even.
fn median_of(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Five-number summaries per category bucket over the numerically
/// coercible values of `value_key`, in first-seen label order. Buckets
/// with no coercible values are dropped - no box can be drawn for an
/// empty group.
pub fn box_summaries(rows: &[Row], category_key: &str, value_key: &str) -> Vec<OutputRecord> {
    group::numeric_buckets(rows, category_key, value_key)
        .into_iter()
        .filter_map(|(label, mut values)| {
            let summary = FiveNumberSummary::compute(&mut values)?;
            let mut record = OutputRecord::named(label);
            record.set_number("min", summary.min);
            record.set_number("q1", summary.q1);
            record.set_number("median", summary.median);
            record.set_number("q3", summary.q3);
            record.set_number("max", summary.max);
            Some(record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn locks_quartile_convention_on_fixed_vector() {
        let mut values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let summary = FiveNumberSummary::compute(&mut values).unwrap();
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.q1, 2.5);
        assert_eq!(summary.median, 4.5);
        assert_eq!(summary.q3, 6.5);
        assert_eq!(summary.max, 8.0);
    }

    #[test]
    fn odd_count_excludes_median_from_both_halves() {
        let mut values = vec![5.0, 1.0, 3.0, 2.0, 4.0];
        let summary = FiveNumberSummary::compute(&mut values).unwrap();
        assert_eq!(summary.q1, 1.5);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q3, 4.5);
    }

    #[test]
    fn single_value_collapses_summary() {
        let mut values = vec![7.0];
        let summary = FiveNumberSummary::compute(&mut values).unwrap();
        assert_eq!(summary.min, 7.0);
        assert_eq!(summary.q1, 7.0);
        assert_eq!(summary.median, 7.0);
        assert_eq!(summary.q3, 7.0);
        assert_eq!(summary.max, 7.0);
    }

    #[test]
    fn empty_bucket_has_no_summary() {
        assert_eq!(FiveNumberSummary::compute(&mut []), None);
    }

    #[test]
    fn buckets_without_coercible_values_are_dropped() {
        let rows = vec![
            Row::from_pairs([("g", Value::from("a")), ("v", Value::from(1.0))]),
            Row::from_pairs([("g", Value::from("a")), ("v", Value::from(3.0))]),
            Row::from_pairs([("g", Value::from("b")), ("v", Value::from("n/a"))]),
        ];
        let records = box_summaries(&rows, "g", "v");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), Some("a"));
        assert_eq!(records[0].number("median"), Some(2.0));
        assert_eq!(records[0].number("min"), Some(1.0));
        assert_eq!(records[0].number("max"), Some(3.0));
    }
}
