use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

use crate::CliError;

/// JSON events appended to `path`; `RUST_LOG` overrides `default_level`.
pub fn init_cli_logging(path: &Path, default_level: &str) -> Result<(), CliError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|err| CliError::Logging(err.to_string()))?;

    json_log_subscriber(file, filter)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

/// One JSON object per line with an RFC 3339 UTC timestamp.
fn json_log_subscriber(file: File, filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry().with(filter).with(layer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_appended_as_json_lines() {
        let path = std::env::temp_dir().join(format!("qualis_log_{}.log", uuid::Uuid::new_v4()));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .expect("open log");

        let subscriber = json_log_subscriber(file, EnvFilter::new("info"));
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(event = "below_threshold");
            tracing::warn!(event = "report_deleted", report_id = "rpt-1");
        });

        let contents = std::fs::read_to_string(&path).expect("read log");
        let lines = contents.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 1, "debug events are filtered out");

        let line: serde_json::Value = serde_json::from_str(lines[0]).expect("json line");
        assert_eq!(line["level"], "WARN");
        assert_eq!(line["fields"]["event"], "report_deleted");
        assert_eq!(line["fields"]["report_id"], "rpt-1");
        let timestamp = line["timestamp"].as_str().expect("timestamp");
        assert!(timestamp.ends_with('Z'), "{timestamp}");
    }
}
