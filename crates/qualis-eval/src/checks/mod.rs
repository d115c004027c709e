//! Check routines: pure functions from a dataset to findings.
//!
//! Every routine iterates columns in `headers` order and pushes into a
//! [`FindingSink`](crate::sink::FindingSink); none of them performs I/O.

pub(crate) mod advanced;
pub(crate) mod basic;
pub(crate) mod completeness;
pub(crate) mod cross_column;
pub mod infer;
pub(crate) mod lookup;
pub(crate) mod quality;
pub(crate) mod schema;
pub(crate) mod statistics;
pub(crate) mod text;

use qualis_core::Value;

const MAX_VALUE_CHARS: usize = 40;

/// Percentage of `count` in `total`, one decimal at most (`15`, `7.5`).
pub(crate) fn percent(count: usize, total: usize) -> String {
    if total == 0 {
        return "0".to_string();
    }
    format_number(count as f64 * 100.0 / total as f64, 1)
}

/// Render a float with at most `decimals` places and no trailing zeros.
pub(crate) fn format_number(value: f64, decimals: usize) -> String {
    let rendered = format!("{value:.decimals$}");
    if !rendered.contains('.') {
        return rendered;
    }
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// 1-based row numbers, capped, e.g. `rows 2, 5, 9 and 3 more`.
pub(crate) fn row_list(rows: &[usize], cap: usize) -> String {
    let shown = rows
        .iter()
        .take(cap.max(1))
        .map(|row| (row + 1).to_string())
        .collect::<Vec<_>>();
    let label = if rows.len() == 1 { "row" } else { "rows" };
    let hidden = rows.len().saturating_sub(shown.len());
    if hidden == 0 {
        format!("{label} {}", shown.join(", "))
    } else {
        format!("{label} {} and {hidden} more", shown.join(", "))
    }
}

/// Value as quoted in details, shortened when long.
pub(crate) fn quote(value: &Value) -> String {
    let rendered = value.to_string();
    if rendered.chars().count() <= MAX_VALUE_CHARS {
        return rendered;
    }
    let head = rendered.chars().take(MAX_VALUE_CHARS).collect::<String>();
    format!("{head}...")
}

/// Hashable identity of a value; keeps `1` and `"1"` apart.
pub(crate) fn value_key(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(value) => format!("b:{value}"),
        Value::Number(value) => format!("n:{value}"),
        Value::Text(value) => format!("s:{}", escape_key_component(value)),
    }
}

pub(crate) fn escape_key_component(value: &str) -> String {
    value.replace('\\', "\\\\").replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_keeps_one_decimal() {
        assert_eq!(percent(2, 10), "20");
        assert_eq!(percent(3, 40), "7.5");
        assert_eq!(percent(1, 3), "33.3");
        assert_eq!(percent(0, 0), "0");
    }

    #[test]
    fn row_list_caps_and_counts_hidden_rows() {
        assert_eq!(row_list(&[0], 10), "row 1");
        assert_eq!(row_list(&[1, 4, 8], 2), "rows 2, 5 and 1 more");
    }

    #[test]
    fn value_key_separates_types() {
        assert_ne!(value_key(&Value::Number(1.0)), value_key(&Value::from("1")));
        assert_ne!(value_key(&Value::from("a|b")), value_key(&Value::from("a\\|b")));
    }
}
