use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{error::ConfigurationError, quantity::time::Hours};

pub const MINUTES_PER_DAY: u32 = 1440;

/// Bucket width in minutes, shared by every compressor in a run.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Interval(u32);

impl Interval {
    pub const fn try_new(minutes: u32) -> Result<Self, ConfigurationError> {
        if minutes == 0 || minutes > MINUTES_PER_DAY || !MINUTES_PER_DAY.is_multiple_of(minutes) {
            Err(ConfigurationError::InvalidInterval { minutes })
        } else {
            Ok(Self(minutes))
        }
    }

    pub const fn minutes(self) -> u32 {
        self.0
    }

    /// Fraction of an hour one bucket covers.
    pub fn hours(self) -> Hours {
        Hours::from(f64::from(self.0) / 60.0)
    }

    pub const fn n_buckets(self) -> usize {
        (MINUTES_PER_DAY / self.0) as usize
    }

    /// All buckets of the day in time order, starting at `00:00`.
    pub fn buckets(self) -> impl Iterator<Item = Bucket> {
        (0..MINUTES_PER_DAY).step_by(self.0 as usize).map(Bucket)
    }

    /// The bucket the timestamp falls into: truncation, never rounding, so a reading
    /// exactly on a boundary belongs to the bucket that starts there.
    pub fn floor(self, timestamp: NaiveDateTime) -> Bucket {
        let minute_of_day = timestamp.hour() * 60 + timestamp.minute();
        Bucket(minute_of_day - minute_of_day % self.0)
    }

    pub const fn bucket_index(self, bucket: Bucket) -> usize {
        (bucket.0 / self.0) as usize
    }
}

impl TryFrom<u32> for Interval {
    type Error = ConfigurationError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::try_new(minutes)
    }
}

impl From<Interval> for u32 {
    fn from(interval: Interval) -> Self {
        interval.0
    }
}

/// Time-of-day slot start, stored as the minute offset from midnight and labelled
/// `HH:MM` everywhere it is displayed or serialized.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[must_use]
pub struct Bucket(u32);

impl Bucket {
    pub const fn to_minutes(self) -> u32 {
        self.0
    }
}

impl Display for Bucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Debug for Bucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl FromStr for Bucket {
    type Err = ConfigurationError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigurationError::InvalidBucketLabel { label: label.to_string() };
        let (hours, minutes) = label.split_once(':').ok_or_else(invalid)?;
        let hours: u32 = hours.parse().map_err(|_| invalid())?;
        let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
        if hours >= 24 || minutes >= 60 {
            return Err(invalid());
        }
        Ok(Self(hours * 60 + minutes))
    }
}

impl Serialize for Bucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Bucket {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
