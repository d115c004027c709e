use std::collections::BTreeSet;

use qualis_core::{Dataset, Status};

use super::infer::numeric_values;
use super::row_list;
use crate::model::CheckOptions;
use crate::sink::FindingSink;

const CHECK: &str = "Cross-Column Consistency";
const MIN_ROWS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Sum,
    Product,
    Difference,
}

impl Op {
    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Op::Sum => a + b,
            Op::Product => a * b,
            Op::Difference => a - b,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Op::Sum => "+",
            Op::Product => "*",
            Op::Difference => "-",
        }
    }

    /// Sum and product are symmetric, so only `a < b` is tried for them.
    fn commutative(self) -> bool {
        !matches!(self, Op::Difference)
    }
}

struct NumericColumn<'a> {
    header: &'a str,
    by_row: Vec<Option<f64>>,
}

struct Relation {
    op: Op,
    a: usize,
    b: usize,
    checked: usize,
    mismatches: Vec<usize>,
}

pub(crate) fn run(dataset: &Dataset, options: &CheckOptions, sink: &mut FindingSink<'_>) {
    if !dataset.is_tabular() {
        sink.push(
            CHECK,
            Status::Info,
            "Cross-column checks skipped: JSON datasets are not tabular",
        );
        return;
    }

    let columns = numeric_columns(dataset, options.cross_column_max_columns);
    for (target, relation) in find_relations(&columns, options.cross_column_min_share) {
        let expression = format!(
            "{} {} {}",
            columns[relation.a].header,
            relation.op.symbol(),
            columns[relation.b].header
        );
        let header = columns[target].header;
        if relation.mismatches.is_empty() {
            sink.push(
                CHECK,
                Status::Pass,
                format!(
                    "Column {header}: equals {expression} in {} rows",
                    relation.checked
                ),
            );
        } else {
            sink.push(
                CHECK,
                Status::Fail,
                format!(
                    "Column {header}: {} rows inconsistent with {expression} ({})",
                    relation.mismatches.len(),
                    row_list(&relation.mismatches, options.max_row_findings)
                ),
            );
        }
    }
}

fn numeric_columns(dataset: &Dataset, max_columns: usize) -> Vec<NumericColumn<'_>> {
    dataset
        .headers
        .iter()
        .filter_map(|header| {
            let values = numeric_values(dataset, header)?;
            let mut by_row = vec![None; dataset.content.len()];
            for (row, value) in values {
                by_row[row] = Some(value);
            }
            Some(NumericColumn {
                header: header.as_str(),
                by_row,
            })
        })
        .take(max_columns)
        .collect()
}

/// At most one relation per target and per column triple, so `c = a + b`
/// is not reported again as `a = c - b`. Sums claim triples before
/// products, products before differences; results come back in target order.
fn find_relations(columns: &[NumericColumn<'_>], min_share: f64) -> Vec<(usize, Relation)> {
    let mut found: Vec<(usize, Relation)> = Vec::new();
    let mut claimed: BTreeSet<[usize; 3]> = BTreeSet::new();
    for op in [Op::Sum, Op::Product, Op::Difference] {
        for target in 0..columns.len() {
            if found.iter().any(|(taken, _)| *taken == target) {
                continue;
            }
            if let Some(relation) = find_relation(columns, target, op, min_share, &claimed) {
                claimed.insert(triple(target, relation.a, relation.b));
                found.push((target, relation));
            }
        }
    }
    found.sort_by_key(|(target, _)| *target);
    found
}

fn triple(c: usize, a: usize, b: usize) -> [usize; 3] {
    let mut key = [c, a, b];
    key.sort_unstable();
    key
}

fn find_relation(
    columns: &[NumericColumn<'_>],
    target: usize,
    op: Op,
    min_share: f64,
    claimed: &BTreeSet<[usize; 3]>,
) -> Option<Relation> {
    for a in 0..columns.len() {
        for b in 0..columns.len() {
            if a == target || b == target || a == b || (op.commutative() && a > b) {
                continue;
            }
            if claimed.contains(&triple(target, a, b)) {
                continue;
            }
            let relation = evaluate(columns, target, op, a, b);
            if relation.checked < MIN_ROWS {
                continue;
            }
            let holding = relation.checked - relation.mismatches.len();
            if holding as f64 / relation.checked as f64 >= min_share {
                return Some(relation);
            }
        }
    }
    None
}

fn evaluate(columns: &[NumericColumn<'_>], target: usize, op: Op, a: usize, b: usize) -> Relation {
    let mut checked = 0;
    let mut mismatches = Vec::new();
    let rows = columns[target].by_row.len();
    for row in 0..rows {
        let (Some(c), Some(x), Some(y)) = (
            columns[target].by_row[row],
            columns[a].by_row[row],
            columns[b].by_row[row],
        ) else {
            continue;
        };
        checked += 1;
        let expected = op.apply(x, y);
        if (c - expected).abs() > 1e-6 * expected.abs().max(1.0) {
            mismatches.push(row);
        }
    }
    Relation {
        op,
        a,
        b,
        checked,
        mismatches,
    }
}
