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

/// Membership predicate for set-intersection counting: a row belongs to
/// the set named by a key when its value there is boolean-ish
/// (`true`/`false` in any of the boolean, `0`/`1` numeric, or literal
/// string forms) and coerces to `true`. Missing values and free-form
/// text are non-membership.
fn is_member(value: &Value) -> bool {
    value.is_booleanish() && value.is_truthy()
}

/// Single pass over the rows producing exactly three records:
/// `{name: "A", value}`, `{name: "B", value}` and
/// `{name: "Intersection", value}`, where the A and B counts are
/// exclusive (rows in both sets count only toward the intersection).
pub fn intersection_counts(rows: &[Row], key_a: &str, key_b: &str) -> Vec<OutputRecord> {
    let mut only_a = 0u64;
    let mut only_b = 0u64;
    let mut both = 0u64;
    for row in rows {
        let a = is_member(row.get(key_a));
        let b = is_member(row.get(key_b));
        match (a, b) {
            (true, true) => both += 1,
            (true, false) => only_a += 1,
            (false, true) => only_b += 1,
            (false, false) => {}
        }
    }
    vec![
        OutputRecord::named("A").with_number("value", only_a as f64),
        OutputRecord::named("B").with_number("value", only_b as f64),
        OutputRecord::named("Intersection").with_number("value", both as f64),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(p: Value, q: Value) -> Row {
        Row::from_pairs([("p", p), ("q", q)])
    }

    #[test]
    fn counts_exclusive_and_overlapping_membership() {
        let rows = vec![
            flags(Value::Bool(true), Value::Bool(false)),
            flags(Value::Bool(true), Value::Bool(true)),
            flags(Value::Bool(false), Value::Bool(true)),
            flags(Value::Bool(false), Value::Bool(false)),
        ];
        let records = intersection_counts(&rows, "p", "q");
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name(), Some("A"));
        assert_eq!(records[0].number("value"), Some(1.0));
        assert_eq!(records[1].name(), Some("B"));
        assert_eq!(records[1].number("value"), Some(1.0));
        assert_eq!(records[2].name(), Some("Intersection"));
        assert_eq!(records[2].number("value"), Some(1.0));
    }

    #[test]
    fn numeric_and_string_flags_follow_the_same_predicate() {
        let rows = vec![
            flags(Value::Number(1.0), Value::from("false")),
            flags(Value::Number(0.0), Value::from("true")),
            flags(Value::Number(1.0), Value::from("true")),
        ];
        let records = intersection_counts(&rows, "p", "q");
        assert_eq!(records[0].number("value"), Some(1.0));
        assert_eq!(records[1].number("value"), Some(1.0));
        assert_eq!(records[2].number("value"), Some(1.0));
    }

    #[test]
    fn free_form_text_and_missing_are_non_membership() {
        let rows = vec![
            flags(Value::from("yes"), Value::Null),
            flags(Value::Number(2.0), Value::from("")),
        ];
        let records = intersection_counts(&rows, "p", "q");
        for record in &records {
            assert_eq!(record.number("value"), Some(0.0));
        }
    }

    #[test]
    fn empty_input_still_produces_three_records() {
        let records = intersection_counts(&[], "p", "q");
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.number("value") == Some(0.0)));
    }
}
