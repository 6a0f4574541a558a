// CSV loading for the portfolio dataset
// The dataset is loaded once at startup and never mutated afterwards

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

use crate::error::{DashboardError, Result};
use crate::record::{Record, FUND_SEPARATOR};

/// Loaded dataset with provenance
#[derive(Debug, Clone, Serialize)]
pub struct Portfolio {
    pub records: Vec<Record>,

    /// Where the records came from (file path or label)
    pub source: String,

    pub loaded_at: DateTime<Utc>,
}

impl Portfolio {
    /// Wrap records that were built in memory
    pub fn from_records(records: Vec<Record>, source: impl Into<String>) -> Self {
        Portfolio {
            records,
            source: source.into(),
            loaded_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn load_csv(csv_path: &Path) -> Result<Portfolio> {
    let source = csv_path.display().to_string();
    let rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .map_err(|e| DashboardError::Csv {
            path: source.clone(),
            source: e,
        })?;

    read_records(rdr, &source)
}

/// Load from any reader (stdin, in-memory buffers)
pub fn load_csv_from_reader<R: Read>(reader: R, source: &str) -> Result<Portfolio> {
    let rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    read_records(rdr, source)
}

fn read_records<R: Read>(mut rdr: csv::Reader<R>, source: &str) -> Result<Portfolio> {
    let csv_error = |e: csv::Error| DashboardError::Csv {
        path: source.to_string(),
        source: e,
    };

    let headers = rdr.headers().map_err(csv_error)?.clone();
    let mut records = Vec::new();

    for result in rdr.records() {
        let row = result.map_err(csv_error)?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        let record: Record = row
            .deserialize(Some(&headers))
            .map_err(|e| DashboardError::InvalidRecord {
                line,
                reason: e.to_string(),
            })?;

        validate_record(&record, line)?;
        records.push(record);
    }

    log::info!("Loaded {} portfolio records from {}", records.len(), source);

    Ok(Portfolio::from_records(records, source))
}

/// Precondition checks; a malformed year is tolerated and only excluded from the timeline
fn validate_record(record: &Record, line: u64) -> Result<()> {
    let invalid = |reason: String| DashboardError::InvalidRecord { line, reason };

    if record.company.trim().is_empty() {
        return Err(invalid("company is empty".to_string()));
    }

    if record.industry.trim().is_empty() {
        return Err(invalid(format!("industry is empty for '{}'", record.company)));
    }

    // every name must be non-empty and carry no stray whitespace around it
    if record.funds().any(|fund| fund.is_empty() || fund != fund.trim()) {
        return Err(invalid(format!(
            "fund list '{}' for '{}' has an empty or padded entry (expected names separated by '{}')",
            record.fund, record.company, FUND_SEPARATOR
        )));
    }

    if !record.year_of_investment.trim().is_empty() && record.year().is_none() {
        log::warn!(
            "Line {}: unparsable year '{}' for '{}', excluded from timeline",
            line,
            record.year_of_investment,
            record.company
        );
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
