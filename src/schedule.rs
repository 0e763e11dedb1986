use std::{collections::BTreeMap, str::FromStr};

use chrono::Weekday;
use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser::SerializeMap};

use crate::{
    error::ConfigurationError,
    grid::{Bucket, Interval},
    weekday::{self, WEEKDAY_ORDER},
};

/// Inclusive range of buckets within one day.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BucketRange {
    pub start: Bucket,
    pub end: Bucket,
}

impl BucketRange {
    pub const fn new(start: Bucket, end: Bucket) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn contains(self, bucket: Bucket) -> bool {
        (self.start <= bucket) && (bucket <= self.end)
    }
}

/// The user-chosen shutdown ranges per weekday.
///
/// Produced outside the crate, by a scheduling UI or a config file, and read-only
/// for the savings calculation.
#[derive(Clone, Debug, Default)]
pub struct ShutdownSchedule {
    days: [Vec<BucketRange>; 7],
}

impl ShutdownSchedule {
    pub fn insert(&mut self, day: Weekday, range: BucketRange) {
        self.days[weekday::index(day)].push(range);
    }

    #[must_use]
    pub fn ranges(&self, day: Weekday) -> &[BucketRange] {
        &self.days[weekday::index(day)]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }

    /// Weekdays with at least one shutdown range, Monday through Sunday.
    pub fn scheduled_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEKDAY_ORDER.into_iter().filter(|day| !self.ranges(*day).is_empty())
    }

    /// Reject ranges that are reversed, off the grid, or overlapping within a day.
    /// An overlap would silently double-count every bucket it covers twice.
    pub fn validate(&self, interval: Interval) -> Result<(), ConfigurationError> {
        for day in WEEKDAY_ORDER {
            let weekday = weekday::name(day);
            for range in self.ranges(day) {
                if range.end < range.start {
                    return Err(ConfigurationError::ReversedScheduleRange {
                        weekday,
                        start: range.start,
                        end: range.end,
                    });
                }
                for bucket in [range.start, range.end] {
                    if !bucket.to_minutes().is_multiple_of(interval.minutes()) {
                        return Err(ConfigurationError::OffGridScheduleBound {
                            weekday,
                            bucket,
                            minutes: interval.minutes(),
                        });
                    }
                }
            }
            let sorted =
                self.ranges(day).iter().copied().sorted_by_key(|range| range.start).collect_vec();
            for (first, second) in sorted.iter().tuple_windows() {
                if second.start <= first.end {
                    return Err(ConfigurationError::OverlappingScheduleRanges {
                        weekday,
                        first_start: first.start,
                        first_end: first.end,
                        second_start: second.start,
                        second_end: second.end,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Serialize for ShutdownSchedule {
    /// Weekday names mapping to their ranges; weekdays without ranges are omitted.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for day in self.scheduled_days() {
            map.serialize_entry(weekday::name(day), self.ranges(day))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ShutdownSchedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, Vec<BucketRange>>::deserialize(deserializer)?;
        let mut this = Self::default();
        for (name, ranges) in entries {
            let day = Weekday::from_str(&name)
                .map_err(|_| de::Error::custom(format!("`{name}` is not a weekday")))?;
            this.days[weekday::index(day)].extend(ranges);
        }
        Ok(this)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(label: &str) -> Bucket {
        label.parse().unwrap()
    }

    fn range(start: &str, end: &str) -> BucketRange {
        BucketRange::new(bucket(start), bucket(end))
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = range("01:00", "03:00");
        assert!(range.contains(bucket("01:00")));
        assert!(range.contains(bucket("03:00")));
        assert!(!range.contains(bucket("03:15")));
    }

    #[test]
    fn test_scheduled_days_in_week_order() {
        let mut schedule = ShutdownSchedule::default();
        schedule.insert(Weekday::Sat, range("00:00", "06:00"));
        schedule.insert(Weekday::Mon, range("00:00", "05:00"));
        let days = schedule.scheduled_days().collect::<Vec<_>>();
        assert_eq!(days, [Weekday::Mon, Weekday::Sat]);
    }

    #[test]
    fn test_validate_accepts_touching_ranges() {
        let interval = Interval::try_new(60).unwrap();
        let mut schedule = ShutdownSchedule::default();
        schedule.insert(Weekday::Mon, range("00:00", "05:00"));
        schedule.insert(Weekday::Mon, range("06:00", "08:00"));
        schedule.validate(interval).unwrap();
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let interval = Interval::try_new(60).unwrap();
        let mut schedule = ShutdownSchedule::default();
        schedule.insert(Weekday::Mon, range("00:00", "05:00"));
        schedule.insert(Weekday::Mon, range("05:00", "08:00"));
        let error = schedule.validate(interval).unwrap_err();
        assert!(matches!(error, ConfigurationError::OverlappingScheduleRanges { .. }));
    }

    #[test]
    fn test_validate_rejects_reversed_range() {
        let interval = Interval::try_new(60).unwrap();
        let mut schedule = ShutdownSchedule::default();
        schedule.insert(Weekday::Fri, range("06:00", "02:00"));
        let error = schedule.validate(interval).unwrap_err();
        assert!(matches!(error, ConfigurationError::ReversedScheduleRange { .. }));
    }

    #[test]
    fn test_validate_rejects_off_grid_bound() {
        let interval = Interval::try_new(60).unwrap();
        let mut schedule = ShutdownSchedule::default();
        schedule.insert(Weekday::Fri, range("02:30", "06:00"));
        let error = schedule.validate(interval).unwrap_err();
        assert!(matches!(error, ConfigurationError::OffGridScheduleBound { .. }));
    }

    #[test]
    fn test_toml_round_trip() {
        let source = r#"
            Monday = [{ start = "00:00", end = "05:00" }]
            Saturday = [
                { start = "00:00", end = "11:45" },
                { start = "22:00", end = "23:45" },
            ]
        "#;
        let schedule: ShutdownSchedule = toml::from_str(source).unwrap();
        assert_eq!(schedule.ranges(Weekday::Mon), [range("00:00", "05:00")]);
        assert_eq!(schedule.ranges(Weekday::Sat).len(), 2);
        assert!(schedule.ranges(Weekday::Sun).is_empty());

        let rendered = toml::to_string(&schedule).unwrap();
        let round_tripped: ShutdownSchedule = toml::from_str(&rendered).unwrap();
        assert_eq!(round_tripped.ranges(Weekday::Sat), schedule.ranges(Weekday::Sat));
    }

    #[test]
    fn test_rejects_unknown_weekday() {
        assert!(toml::from_str::<ShutdownSchedule>("Caturday = []").is_err());
    }
}
