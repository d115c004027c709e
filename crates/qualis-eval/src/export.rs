use std::io::{Read, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use qualis_core::{Finding, Status};

use crate::errors::EvalError;

pub const CSV_HEADER: [&str; 4] = ["Check", "Status", "Details", "Timestamp"];

/// Row of an exported findings CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFinding {
    pub check: String,
    pub status: Status,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&Finding> for ExportedFinding {
    fn from(finding: &Finding) -> Self {
        Self {
            check: finding.check.clone(),
            status: finding.status,
            details: finding.details.clone(),
            timestamp: finding.timestamp,
        }
    }
}

/// Write findings as CSV with every field quoted.
pub fn write_findings_csv<W: Write>(writer: W, findings: &[Finding]) -> Result<(), EvalError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);
    writer.write_record(CSV_HEADER)?;
    for finding in findings {
        let timestamp = finding
            .timestamp
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        writer.write_record([
            finding.check.as_str(),
            finding.status.as_str(),
            finding.details.as_str(),
            timestamp.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn findings_to_csv(findings: &[Finding]) -> Result<String, EvalError> {
    let mut buffer = Vec::new();
    write_findings_csv(&mut buffer, findings)?;
    String::from_utf8(buffer).map_err(|err| EvalError::InvalidExport(err.to_string()))
}

/// Parse a CSV produced by [`write_findings_csv`].
pub fn read_findings_csv<R: Read>(reader: R) -> Result<Vec<ExportedFinding>, EvalError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = reader.headers()?.iter().collect::<Vec<_>>();
    if headers != CSV_HEADER {
        return Err(EvalError::InvalidExport(format!(
            "unexpected header: {}",
            headers.join(",")
        )));
    }

    let mut findings = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let line = idx + 2;
        let field = |pos: usize| {
            record.get(pos).ok_or_else(|| {
                EvalError::InvalidExport(format!("line {line}: missing {}", CSV_HEADER[pos]))
            })
        };
        let status = Status::parse(field(1)?).ok_or_else(|| {
            EvalError::InvalidExport(format!("line {line}: unknown status '{}'", &record[1]))
        })?;
        let timestamp = DateTime::parse_from_rfc3339(field(3)?)
            .map_err(|err| EvalError::InvalidExport(format!("line {line}: {err}")))?
            .with_timezone(&Utc);
        findings.push(ExportedFinding {
            check: field(0)?.to_string(),
            status,
            details: field(2)?.to_string(),
            timestamp,
        });
    }
    Ok(findings)
}
