use qualis_core::{Dataset, Severity};

use super::percent;
use crate::model::CheckOptions;
use crate::sink::FindingSink;

pub(crate) fn run(dataset: &Dataset, options: &CheckOptions, sink: &mut FindingSink<'_>) {
    let rows = dataset.content.len();
    for header in &dataset.headers {
        let missing = dataset
            .column(header)
            .filter(|value| value.is_missing())
            .count();
        if missing == 0 {
            continue;
        }

        let share = missing as f64 * 100.0 / rows as f64;
        sink.push_graded(
            "Missing Values",
            severity(share, options),
            format!(
                "Column {header}: {missing} missing values ({}%)",
                percent(missing, rows)
            ),
        );
    }
}

/// Medium is `[medium_pct, high_pct)`; exactly `high_pct` falls to low, not medium.
pub(crate) fn severity(share_pct: f64, options: &CheckOptions) -> Severity {
    if share_pct > options.completeness_high_pct {
        Severity::High
    } else if share_pct >= options.completeness_medium_pct
        && share_pct < options.completeness_high_pct
    {
        Severity::Medium
    } else {
        Severity::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_follow_thresholds() {
        let options = CheckOptions::default();
        assert_eq!(severity(50.0, &options), Severity::High);
        assert_eq!(severity(20.5, &options), Severity::High);
        assert_eq!(severity(20.0, &options), Severity::Low);
        assert_eq!(severity(12.0, &options), Severity::Medium);
        assert_eq!(severity(5.0, &options), Severity::Medium);
        assert_eq!(severity(4.9, &options), Severity::Low);
        assert_eq!(severity(1.0, &options), Severity::Low);
    }
}
