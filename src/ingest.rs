use std::io::Read;

use chrono::NaiveDateTime;
use itertools::Itertools;
use tracing::debug;

use crate::{
    error::{ConfigurationError, Result},
    quantity::current::Amperes,
    sample::RawSample,
};

/// Logger exports name their columns inconsistently across firmware revisions, so the
/// schema is resolved by substring instead of exact names.
#[derive(Clone, Debug)]
pub struct ColumnMatcher {
    pattern: String,
}

impl ColumnMatcher {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self { pattern: pattern.into().to_lowercase() }
    }

    #[must_use]
    pub fn matches(&self, header: &str) -> bool {
        header.to_lowercase().contains(&self.pattern)
    }

    /// Index of the single matching column.
    fn resolve(&self, headers: &csv::StringRecord) -> Result<usize, ConfigurationError> {
        let candidates =
            headers.iter().positions(|header| self.matches(header)).collect_vec();
        match candidates.as_slice() {
            [index] => Ok(*index),
            [] => Err(ConfigurationError::NoMatchingColumn { pattern: self.pattern.clone() }),
            _ => Err(ConfigurationError::AmbiguousColumn {
                pattern: self.pattern.clone(),
                count: candidates.len(),
            }),
        }
    }
}

/// Which header names mark the timestamp and current columns.
#[derive(Clone, Debug)]
pub struct CsvSchema {
    pub timestamp: ColumnMatcher,
    pub current: ColumnMatcher,
}

impl Default for CsvSchema {
    /// Matches the usual logger export: a `Date-Time (EDT)`-style timestamp column
    /// and a current column carrying the unit in its name, e.g. `RMS Current (Amps)`.
    fn default() -> Self {
        Self { timestamp: ColumnMatcher::new("date-time"), current: ColumnMatcher::new("amp") }
    }
}

const TIMESTAMP_FORMATS: [&str; 2] = ["%m/%d/%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

fn parse_timestamp(field: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(field.trim(), format).ok())
}

/// Read the raw series from a delimited export with one header row.
///
/// Rows with an unparseable timestamp or current value are dropped, not raised:
/// loggers emit the odd truncated line and a handful of bad rows must not sink the
/// run. Opening the file is the caller's business.
pub fn read_samples<R: Read>(reader: R, schema: &CsvSchema) -> Result<Vec<RawSample>> {
    let mut csv = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv.headers()?.clone();
    let timestamp_index = schema.timestamp.resolve(&headers)?;
    let current_index = schema.current.resolve(&headers)?;

    let mut samples = Vec::new();
    let mut n_dropped = 0_usize;
    for record in csv.records() {
        let record = record?;
        let timestamp = record.get(timestamp_index).and_then(parse_timestamp);
        let current = record
            .get(current_index)
            .and_then(|field| field.trim().parse::<f64>().ok())
            .map(Amperes::from);
        match timestamp.zip(current) {
            Some((timestamp, current)) => samples.push(RawSample::new(timestamp, current)),
            None => n_dropped += 1,
        }
    }
    debug!(n_samples = samples.len(), n_dropped, "read the raw series");
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::Error;

    const EXPORT: &str = "\
#,Date-Time (EDT),RMS Current (Amps)
1,06/09/2025 00:00:00,10.5
2,06/09/2025 00:15:00,12.0
3,not a date,13.0
4,06/09/2025 00:45:00,
5,06/09/2025 01:00:00,9.5
";

    #[test]
    fn test_reads_and_drops() {
        let samples = read_samples(EXPORT.as_bytes(), &CsvSchema::default()).unwrap();
        assert_eq!(samples.len(), 3);
        assert_abs_diff_eq!(samples[0].current.0.0, 10.5);
        assert_eq!(samples[2].timestamp.to_string(), "2025-06-09 01:00:00");
    }

    #[test]
    fn test_iso_timestamps() {
        let export = "Date-Time (EDT),Amps\n2025-06-09 07:30:00,4.2\n";
        let samples = read_samples(export.as_bytes(), &CsvSchema::default()).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].timestamp.to_string(), "2025-06-09 07:30:00");
    }

    #[test]
    fn test_no_matching_column() {
        let export = "Date-Time (EDT),RMS Voltage (V)\n06/09/2025 00:00:00,480\n";
        let error = read_samples(export.as_bytes(), &CsvSchema::default()).unwrap_err();
        assert!(matches!(
            error,
            Error::Configuration(ConfigurationError::NoMatchingColumn { .. })
        ));
    }

    #[test]
    fn test_ambiguous_column() {
        let export = "Date-Time (EDT),Amps A,Amps B\n06/09/2025 00:00:00,1.0,2.0\n";
        let error = read_samples(export.as_bytes(), &CsvSchema::default()).unwrap_err();
        assert!(matches!(
            error,
            Error::Configuration(ConfigurationError::AmbiguousColumn { count: 2, .. })
        ));
    }
}
