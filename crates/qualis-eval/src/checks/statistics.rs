use qualis_core::{Dataset, Status};

use super::infer::numeric_values;
use super::{format_number, percent};
use crate::model::CheckOptions;
use crate::sink::FindingSink;

pub(crate) fn run(dataset: &Dataset, options: &CheckOptions, sink: &mut FindingSink<'_>) {
    for header in &dataset.headers {
        let Some(values) = numeric_values(dataset, header) else {
            continue;
        };
        if values.len() < options.min_numeric_values.max(1) {
            continue;
        }
        let mut sorted = values.iter().map(|(_, value)| *value).collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        let (lo, hi) = tukey_fences(&sorted, options.outlier_iqr_multiplier);

        let outliers = values
            .iter()
            .filter(|(_, value)| *value < lo || *value > hi)
            .count();
        if outliers == 0 {
            sink.push(
                "Outliers",
                Status::Pass,
                format!("Column {header}: no outliers in {} values", values.len()),
            );
        } else {
            sink.push(
                "Outliers",
                Status::Warning,
                format!(
                    "Column {header}: {outliers} outliers ({}%) outside [{}, {}]",
                    percent(outliers, values.len()),
                    format_number(lo, 2),
                    format_number(hi, 2)
                ),
            );
        }
    }
}

/// `[Q1 - k*IQR, Q3 + k*IQR]` over ascending `sorted`.
pub(crate) fn tukey_fences(sorted: &[f64], multiplier: f64) -> (f64, f64) {
    let q1 = quantile(sorted, 0.25);
    let q3 = quantile(sorted, 0.75);
    let iqr = q3 - q1;
    (q1 - multiplier * iqr, q3 + multiplier * iqr)
}

/// Linear interpolation between closest ranks.
pub(crate) fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        len => {
            let position = q.clamp(0.0, 1.0) * (len - 1) as f64;
            let lower = position.floor() as usize;
            let upper = position.ceil() as usize;
            let weight = position - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * weight
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quartiles_interpolate_between_ranks() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 0.75), 3.25);
    }

    #[test]
    fn fences_widen_with_multiplier() {
        let sorted = [10.0, 12.0, 14.0, 16.0, 18.0];
        let (lo, hi) = tukey_fences(&sorted, 1.5);
        assert_eq!((lo, hi), (6.0, 22.0));
        let (lo, hi) = tukey_fences(&sorted, 3.0);
        assert_eq!((lo, hi), (0.0, 28.0));
    }
}
