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

use crate::series::{Aggregation, OutputRecord};
use crate::value::Row;
use indexmap::IndexMap;

/// Running reduction state for one value column within one bucket.
/// Only numerically coercible contributions feed `sum`/`min`/`max`;
/// missing and non-coercible values are skipped, never the whole row.
#[derive(Debug, Clone, Default)]
struct Accumulator {
    sum: f64,
    valid: usize,
    min: Option<f64>,
    max: Option<f64>,
}

impl Accumulator {
    fn observe(&mut self, value: Option<f64>) {
        if let Some(n) = value {
            self.sum += n;
            self.valid += 1;
            self.min = Some(self.min.map_or(n, |m| m.min(n)));
            self.max = Some(self.max.map_or(n, |m| m.max(n)));
        }
    }

    /// Reduce to the scalar a renderer receives. A bucket with zero
    /// numerically valid contributions yields `0` under `sum`/`avg` and
    /// `None` (field omitted) under `min`/`max` - this silently differs
    /// from "no data" and is part of the output contract.
    fn reduce(&self, aggregation: Aggregation, bucket_rows: usize) -> Option<f64> {
        match aggregation {
            Aggregation::Sum => Some(self.sum),
            Aggregation::Avg => {
                if self.valid == 0 {
                    Some(0.0)
                } else {
                    Some(self.sum / self.valid as f64)
                }
            }
            Aggregation::Min => self.min,
            Aggregation::Max => self.max,
            Aggregation::Count => Some(bucket_rows as f64),
        }
    }
}

#[derive(Debug, Default)]
struct Bucket {
    rows: usize,
    accumulators: Vec<Accumulator>,
}

/// Buckets rows by the stringified category label and reduces each
/// requested value column per bucket. Output order is the first-seen
/// order of labels in row iteration order - this is the X-axis order of
/// bar/line/area charts and is never sorted.
///
/// With no `value_keys` the output degrades to a histogram: one generic
/// `value` field per bucket holding the bucket's row count.
pub fn aggregate(
    rows: &[Row],
    category_key: &str,
    value_keys: &[String],
    aggregation: Aggregation,
) -> Vec<OutputRecord> {
    let mut buckets: IndexMap<String, Bucket> = IndexMap::new();
    for row in rows {
        let label = row.get(category_key).label();
        let bucket = buckets.entry(label).or_insert_with(|| Bucket {
            rows: 0,
            accumulators: vec![Accumulator::default(); value_keys.len()],
        });
        bucket.rows += 1;
        for (accumulator, key) in bucket.accumulators.iter_mut().zip(value_keys) {
            accumulator.observe(row.get(key).as_number());
        }
    }

    buckets
        .into_iter()
        .map(|(label, bucket)| {
            let mut record = OutputRecord::named(label);
            if value_keys.is_empty() {
                record.set_number("value", bucket.rows as f64);
            } else {
                for (key, accumulator) in value_keys.iter().zip(&bucket.accumulators) {
                    if let Some(reduced) = accumulator.reduce(aggregation, bucket.rows) {
                        record.set_number(key.clone(), reduced);
                    }
                }
            }
            record
        })
        .collect()
}

/// Buckets the numerically coercible values of one column per category
/// label, in the same first-seen label order as [`aggregate`]. Labels
/// whose rows carry no coercible value still appear, with an empty
/// vector; the distribution computer decides what to do with those.
pub fn numeric_buckets(
    rows: &[Row],
    category_key: &str,
    value_key: &str,
) -> IndexMap<String, Vec<f64>> {
    let mut buckets: IndexMap<String, Vec<f64>> = IndexMap::new();
    for row in rows {
        let label = row.get(category_key).label();
        let bucket = buckets.entry(label).or_default();
        if let Some(n) = row.get(value_key).as_number() {
            bucket.push(n);
        }
    }
    buckets
}
