use std::collections::BTreeMap;

use qualis_core::{Dataset, Method, Status, Value};
use regex::Regex;

use super::{percent, quote};
use crate::errors::EvalError;
use crate::model::CheckOptions;
use crate::sink::FindingSink;

/// Per-column rule applied row by row.
trait ColumnRule {
    fn accepts(&self, value: &Value) -> bool;
    /// Trailing phrase of violation details, e.g. `not in allowed set`.
    fn violation(&self) -> &str;
}

struct AllowedSet {
    values: Vec<String>,
    case_insensitive: bool,
}

impl ColumnRule for AllowedSet {
    fn accepts(&self, value: &Value) -> bool {
        let rendered = value.to_string();
        self.values.iter().any(|allowed| {
            if self.case_insensitive {
                allowed.eq_ignore_ascii_case(&rendered)
            } else {
                *allowed == rendered
            }
        })
    }

    fn violation(&self) -> &str {
        "not in allowed set"
    }
}

struct FullMatch {
    re: Regex,
    phrase: String,
}

impl ColumnRule for FullMatch {
    fn accepts(&self, value: &Value) -> bool {
        self.re.is_match(&value.to_string())
    }

    fn violation(&self) -> &str {
        &self.phrase
    }
}

/// `ValueLookup`: values must come from the configured allowed sets.
pub(crate) fn run_lookup(
    dataset: &Dataset,
    options: &CheckOptions,
    sink: &mut FindingSink<'_>,
) -> Result<(), EvalError> {
    if options.lookups.is_empty() {
        return Err(EvalError::InvalidOptions {
            method: Method::ValueLookup,
            message: "no lookup columns configured".to_string(),
        });
    }
    let rules = options
        .lookups
        .iter()
        .map(|(column, values)| {
            let rule = AllowedSet {
                values: values.clone(),
                case_insensitive: options.lookup_case_insensitive,
            };
            (column.as_str(), rule)
        })
        .collect::<BTreeMap<_, _>>();
    apply_rules(dataset, options, &rules, "Value Lookup", sink);
    Ok(())
}

/// `RegexPattern`: values must fully match the configured expression.
///
/// Every pattern is compiled before any row is inspected, so an invalid one
/// yields no findings at all.
pub(crate) fn run_pattern(
    dataset: &Dataset,
    options: &CheckOptions,
    sink: &mut FindingSink<'_>,
) -> Result<(), EvalError> {
    if options.patterns.is_empty() {
        return Err(EvalError::InvalidOptions {
            method: Method::RegexPattern,
            message: "no column patterns configured".to_string(),
        });
    }
    let mut rules = BTreeMap::new();
    for (column, pattern) in &options.patterns {
        let re = Regex::new(&format!("^(?:{pattern})$")).map_err(|err| {
            EvalError::InvalidOptions {
                method: Method::RegexPattern,
                message: format!("column {column}: invalid pattern '{pattern}': {err}"),
            }
        })?;
        let rule = FullMatch {
            re,
            phrase: format!("does not match pattern '{pattern}'"),
        };
        rules.insert(column.as_str(), rule);
    }
    apply_rules(dataset, options, &rules, "Pattern Match", sink);
    Ok(())
}

fn apply_rules<R: ColumnRule>(
    dataset: &Dataset,
    options: &CheckOptions,
    rules: &BTreeMap<&str, R>,
    check: &str,
    sink: &mut FindingSink<'_>,
) {
    for column in configured_order(dataset, rules.keys().copied()) {
        let Some(rule) = rules.get(column) else {
            continue;
        };
        if !dataset.headers.iter().any(|header| header == column) {
            sink.push(
                check,
                Status::Fail,
                format!("Column {column}: not present in dataset"),
            );
            continue;
        }

        let mut present = 0usize;
        let mut violations = 0usize;
        for (row, value) in dataset.present(column) {
            present += 1;
            if rule.accepts(value) {
                continue;
            }
            violations += 1;
            if violations <= options.max_row_findings {
                sink.push(
                    check,
                    Status::Fail,
                    format!(
                        "Column {column}, row {}: value '{}' {}",
                        row + 1,
                        quote(value),
                        rule.violation()
                    ),
                );
            }
        }

        if violations == 0 {
            sink.push(
                check,
                Status::Pass,
                format!("Column {column}: all {present} values valid"),
            );
        } else if violations > options.max_row_findings {
            sink.push(
                check,
                Status::Fail,
                format!(
                    "Column {column}: {} more values {} ({violations} total, {}%)",
                    violations - options.max_row_findings,
                    rule.violation(),
                    percent(violations, present)
                ),
            );
        }
    }
}

/// Configured columns in `headers` order, then unknown ones alphabetically.
fn configured_order<'a>(
    dataset: &'a Dataset,
    configured: impl Iterator<Item = &'a str>,
) -> Vec<&'a str> {
    let configured = configured.collect::<Vec<_>>();
    let mut ordered = dataset
        .headers
        .iter()
        .map(String::as_str)
        .filter(|header| configured.contains(header))
        .collect::<Vec<_>>();
    for column in configured {
        if !ordered.contains(&column) {
            ordered.push(column);
        }
    }
    ordered
}
