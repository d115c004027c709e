use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Selectable family of related checks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Method {
    Basic,
    Advanced,
    SchemaValidation,
    FormatChecks,
    ValueLookup,
    DataCompleteness,
    DataQuality,
    StatisticalAnalysis,
    TextAnalysis,
    CrossColumn,
    RegexPattern,
}

impl Method {
    /// Every registered method in catalogue order.
    pub const ALL: [Method; 11] = [
        Method::Basic,
        Method::Advanced,
        Method::SchemaValidation,
        Method::FormatChecks,
        Method::ValueLookup,
        Method::DataCompleteness,
        Method::DataQuality,
        Method::StatisticalAnalysis,
        Method::TextAnalysis,
        Method::CrossColumn,
        Method::RegexPattern,
    ];

    /// Stable identifier used in templates, reports and the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Basic => "Basic",
            Method::Advanced => "Advanced",
            Method::SchemaValidation => "SchemaValidation",
            Method::FormatChecks => "FormatChecks",
            Method::ValueLookup => "ValueLookup",
            Method::DataCompleteness => "DataCompleteness",
            Method::DataQuality => "DataQuality",
            Method::StatisticalAnalysis => "StatisticalAnalysis",
            Method::TextAnalysis => "TextAnalysis",
            Method::CrossColumn => "CrossColumn",
            Method::RegexPattern => "RegexPattern",
        }
    }

    /// Category stamped on every finding the method emits.
    pub fn category(self) -> &'static str {
        match self {
            Method::Basic => "Basic",
            Method::Advanced => "Advanced",
            Method::SchemaValidation => "Schema",
            Method::FormatChecks => "Format",
            Method::ValueLookup => "Lookup",
            Method::DataCompleteness => "Completeness",
            Method::DataQuality => "Quality",
            Method::StatisticalAnalysis => "Statistics",
            Method::TextAnalysis => "Text",
            Method::CrossColumn => "Cross-Column",
            Method::RegexPattern => "Pattern",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Method::Basic => "row count, column count, header uniqueness, empty columns",
            Method::Advanced => "duplicate rows, constant columns, key candidates",
            Method::SchemaValidation => "per-column data type consistency",
            Method::FormatChecks => "mixed types, mixed date formats, stray whitespace",
            Method::ValueLookup => "values against caller-supplied allowed sets",
            Method::DataCompleteness => "missing values per column with severity bands",
            Method::DataQuality => "placeholder values and ragged rows",
            Method::StatisticalAnalysis => "numeric outliers outside IQR fences",
            Method::TextAnalysis => "email/url/phone/uuid format consistency",
            Method::CrossColumn => "derived columns that disagree with their inputs",
            Method::RegexPattern => "values against caller-supplied patterns",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    /// Accepts `DataCompleteness`, `data_completeness`, `data-completeness`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(value);
        Method::ALL
            .into_iter()
            .find(|method| normalize(method.as_str()) == wanted)
            .ok_or_else(|| Error::UnknownMethod(value.to_string()))
    }
}

fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !matches!(ch, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_identifiers_and_aliases() {
        let expected = Some(Method::DataCompleteness);
        assert_eq!("DataCompleteness".parse::<Method>().ok(), expected);
        assert_eq!("data_completeness".parse::<Method>().ok(), expected);
        assert_eq!("regex-pattern".parse::<Method>().ok(), Some(Method::RegexPattern));
    }

    #[test]
    fn rejects_unknown_identifiers() {
        let err = "Sentiment".parse::<Method>().expect_err("unknown method");
        assert!(matches!(err, Error::UnknownMethod(name) if name == "Sentiment"));
        assert!("".parse::<Method>().is_err());
    }
}
