use qualis_core::{Dataset, Status};
use regex::Regex;

use super::infer::date_format;
use super::percent;
use crate::model::CheckOptions;
use crate::sink::FindingSink;

const TEXT_FORMATS: &[(&str, &str)] = &[
    ("email", r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$"),
    ("url", r"(?i)^(https?|ftp)://[^\s/$.?#][^\s]*$"),
    ("phone", r"^\+?[0-9][0-9 ().\-]{5,}[0-9]$"),
    (
        "uuid",
        r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$",
    ),
];

pub(crate) fn run(dataset: &Dataset, options: &CheckOptions, sink: &mut FindingSink<'_>) {
    let formats = compile_formats();
    for header in &dataset.headers {
        let Some(values) = text_values(dataset, header) else {
            continue;
        };
        let total = values.len();
        let dominant = formats.iter().find_map(|(name, re)| {
            let matched = values.iter().filter(|value| re.is_match(value.trim())).count();
            let share = matched as f64 / total as f64;
            (share >= options.text_format_min_share).then_some((*name, matched))
        });
        let Some((format, matched)) = dominant else {
            continue;
        };
        let mismatched = total - matched;
        if mismatched == 0 {
            sink.push(
                "Text Format",
                Status::Pass,
                format!("Column {header}: all {total} values match {format} format"),
            );
        } else {
            sink.push(
                "Text Format",
                Status::Warning,
                format!(
                    "Column {header}: {mismatched} of {total} values ({}%) do not match {format} format",
                    percent(mismatched, total)
                ),
            );
        }
    }
}

fn compile_formats() -> Vec<(&'static str, Regex)> {
    TEXT_FORMATS
        .iter()
        .filter_map(|(name, pattern)| Regex::new(pattern).ok().map(|re| (*name, re)))
        .collect()
}

/// Present text values of a column; `None` when any present value is a
/// number, a date or not text, or there are none. Dates are left to the
/// format checks.
fn text_values<'a>(dataset: &'a Dataset, header: &'a str) -> Option<Vec<&'a str>> {
    let mut values = Vec::new();
    for (_, value) in dataset.present(header) {
        if value.as_number().is_some() {
            return None;
        }
        let text = value.as_text()?;
        if date_format(text).is_some() {
            return None;
        }
        values.push(text);
    }
    if values.is_empty() { None } else { Some(values) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_of(text: &str) -> Option<&'static str> {
        compile_formats()
            .into_iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(name, _)| name)
    }

    #[test]
    fn recognizes_common_text_formats() {
        assert_eq!(format_of("ana@example.com"), Some("email"));
        assert_eq!(format_of("https://example.com/a?b=1"), Some("url"));
        assert_eq!(format_of("+1 (555) 010-2030"), Some("phone"));
        assert_eq!(
            format_of("123e4567-e89b-12d3-a456-426614174000"),
            Some("uuid")
        );
        assert_eq!(format_of("plain words"), None);
    }

    #[test]
    fn date_columns_are_not_text() {
        let dataset = Dataset::new(
            "ds",
            "signups",
            vec!["signup_date".to_string()],
            ["2024-01-05", "2024-02-06", "03/08/2024"]
                .iter()
                .map(|day| qualis_core::Row::from([("signup_date".to_string(), (*day).into())]))
                .collect(),
        );
        assert!(text_values(&dataset, "signup_date").is_none());
    }
}
