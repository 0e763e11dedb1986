use chrono::NaiveDate;

use crate::grid::Bucket;

pub type Result<T = (), E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// No samples survived the deployed/collected window for the named compressor.
    #[error("no samples within the data window for compressor `{compressor}`")]
    EmptyDataset { compressor: String },

    #[error("failed to read the raw series")]
    Csv(#[from] csv::Error),
}

/// Rejected before any profile computation starts.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("an interval of {minutes} minutes does not divide the day evenly")]
    InvalidInterval { minutes: u32 },

    #[error("`{label}` is not a valid `HH:MM` time-of-day label")]
    InvalidBucketLabel { label: String },

    #[error("the collected date {collected} must fall after the deployed date {deployed}")]
    InvalidDateWindow { deployed: NaiveDate, collected: NaiveDate },

    #[error("compressor `{name}` must have a positive voltage")]
    NonPositiveVoltage { name: String },

    #[error("a compressor name must not be empty")]
    EmptyCompressorName,

    #[error("duplicate compressor name `{name}`")]
    DuplicateCompressorName { name: String },

    #[error("no header column matches `{pattern}`")]
    NoMatchingColumn { pattern: String },

    #[error("{count} header columns match `{pattern}`, expected exactly one")]
    AmbiguousColumn { pattern: String, count: usize },

    #[error("{weekday} shutdown range {start}-{end} is reversed")]
    ReversedScheduleRange { weekday: &'static str, start: Bucket, end: Bucket },

    #[error("{weekday} shutdown bound {bucket} is off the {minutes}-minute grid")]
    OffGridScheduleBound { weekday: &'static str, bucket: Bucket, minutes: u32 },

    #[error("{weekday} shutdown ranges {first_start}-{first_end} and {second_start}-{second_end} overlap")]
    OverlappingScheduleRanges {
        weekday: &'static str,
        first_start: Bucket,
        first_end: Bucket,
        second_start: Bucket,
        second_end: Bucket,
    },
}
