use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use qualis_core::{Dataset, Value};

/// Coarse type of a sampled value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    Number,
    Date,
    String,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Number => "number",
            ValueKind::Date => "date",
            ValueKind::String => "string",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const NAIVE_DATETIME_FORMATS: &[(&str, &str)] = &[
    ("iso-datetime", "%Y-%m-%dT%H:%M:%S%.f"),
    ("sql-datetime", "%Y-%m-%d %H:%M:%S%.f"),
];

const NAIVE_DATE_FORMATS: &[(&str, &str)] = &[
    ("iso-date", "%Y-%m-%d"),
    ("us-date", "%m/%d/%Y"),
    ("dmy-dash", "%d-%m-%Y"),
    ("ymd-slash", "%Y/%m/%d"),
];

/// Name of the first date format `text` parses under.
pub fn date_format(text: &str) -> Option<&'static str> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if DateTime::parse_from_rfc3339(text).is_ok() {
        return Some("rfc3339");
    }
    for (name, format) in NAIVE_DATETIME_FORMATS {
        if NaiveDateTime::parse_from_str(text, format).is_ok() {
            return Some(name);
        }
    }
    for (name, format) in NAIVE_DATE_FORMATS {
        if NaiveDate::parse_from_str(text, format).is_ok() {
            return Some(name);
        }
    }
    if DateTime::parse_from_rfc2822(text).is_ok() {
        return Some("rfc2822");
    }
    None
}

/// Numbers first, then dates; booleans and everything else are strings.
pub fn classify(value: &Value) -> ValueKind {
    if value.as_number().is_some() {
        return ValueKind::Number;
    }
    match value {
        Value::Text(text) if date_format(text).is_some() => ValueKind::Date,
        _ => ValueKind::String,
    }
}

/// Type census over the first present values of a column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSample {
    pub sampled: usize,
    pub kinds: BTreeMap<ValueKind, usize>,
    pub date_formats: BTreeMap<&'static str, usize>,
}

impl TypeSample {
    pub fn is_consistent(&self) -> bool {
        self.kinds.len() <= 1
    }

    /// Most frequent kind; ties resolve to the earlier kind.
    pub fn dominant(&self) -> Option<ValueKind> {
        self.kinds
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(kind, _)| *kind)
    }

    /// `number: 80, string: 20`
    pub fn describe_kinds(&self) -> String {
        self.kinds
            .iter()
            .map(|(kind, count)| format!("{kind}: {count}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn describe_date_formats(&self) -> String {
        self.date_formats
            .iter()
            .map(|(format, count)| format!("{format}: {count}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn sample_column(dataset: &Dataset, header: &str, sample_size: usize) -> TypeSample {
    let mut sample = TypeSample::default();
    for (_, value) in dataset.present(header).take(sample_size) {
        sample.sampled += 1;
        let kind = classify(value);
        *sample.kinds.entry(kind).or_default() += 1;
        if kind == ValueKind::Date {
            if let Some(format) = value.as_text().and_then(date_format) {
                *sample.date_formats.entry(format).or_default() += 1;
            }
        }
    }
    sample
}

/// Every present value is numeric and there is at least one.
pub fn numeric_values(dataset: &Dataset, header: &str) -> Option<Vec<(usize, f64)>> {
    let mut values = Vec::new();
    for (row, value) in dataset.present(header) {
        values.push((row, value.as_number()?));
    }
    if values.is_empty() { None } else { Some(values) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_numbers_before_dates() {
        assert_eq!(classify(&Value::Number(3.0)), ValueKind::Number);
        assert_eq!(classify(&Value::from("2024")), ValueKind::Number);
        assert_eq!(classify(&Value::from("2024-02-29")), ValueKind::Date);
        assert_eq!(classify(&Value::from("03/15/2024")), ValueKind::Date);
        assert_eq!(classify(&Value::from("2024-03-01T10:00:00Z")), ValueKind::Date);
        assert_eq!(classify(&Value::Bool(true)), ValueKind::String);
        assert_eq!(classify(&Value::from("hello")), ValueKind::String);
    }

    #[test]
    fn names_the_matching_date_format() {
        assert_eq!(date_format("2024-01-05"), Some("iso-date"));
        assert_eq!(date_format("2024-01-05 10:30:00"), Some("sql-datetime"));
        assert_eq!(date_format("2024-01-05T10:30:00"), Some("iso-datetime"));
        assert_eq!(date_format("05-01-2024"), Some("dmy-dash"));
        assert_eq!(date_format("2024-13-45"), None);
    }
}
