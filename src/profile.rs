use std::collections::BTreeMap;

use chrono::{Datelike, Weekday};
use itertools::Itertools;
use serde::{Serialize, Serializer, ser::SerializeMap};
use tracing::debug;

use crate::{
    grid::{Bucket, Interval},
    quantity::{current::Amperes, energy::KilowattHours, power::Kilowatts, voltage::Volts},
    sample::RawSample,
    simulation::SimulationConfig,
    weekday::{self, WEEKDAY_ORDER},
};

/// Average power per weekday × time-of-day bucket for one compressor.
///
/// Dense: every weekday carries a value for every bucket of the configured grid, and a
/// bucket nobody sampled reads 0.0 kW, which conflates «confirmed zero draw» with
/// «no data collected».
#[derive(Clone, Debug)]
pub struct WeeklyProfile {
    interval: Interval,
    days: [Vec<Kilowatts>; 7],
}

impl WeeklyProfile {
    /// Reduce a raw current series to the weekly profile.
    ///
    /// Keeps samples dated strictly inside the deployed/collected window, floors each
    /// surviving timestamp to its bucket, averages the current per (weekday, bucket)
    /// group and converts the mean to three-phase power. Consumes the series: the raw
    /// readings are gone once the profile is materialized.
    ///
    /// Returns [`None`] when no sample survives the window.
    #[expect(clippy::cast_precision_loss)]
    pub fn from_samples(
        samples: Vec<RawSample>,
        voltage: Volts,
        config: &SimulationConfig,
    ) -> Option<Self> {
        let n_raw = samples.len();
        let groups = samples
            .into_iter()
            .filter(|sample| config.window_contains(sample.timestamp.date()))
            .map(|sample| {
                (
                    (sample.timestamp.weekday(), config.interval.floor(sample.timestamp)),
                    sample.current,
                )
            })
            .into_group_map();
        if groups.is_empty() {
            return None;
        }
        debug!(n_raw, n_groups = groups.len(), "averaging the grouped series");

        let mut this = Self::zeroed(config.interval);
        for ((day, bucket), currents) in groups {
            let mean = currents.iter().copied().sum::<Amperes>() / currents.len() as f64;
            this.days[weekday::index(day)][config.interval.bucket_index(bucket)] =
                mean.three_phase_power(voltage).round_to_hundredths();
        }
        Some(this)
    }

    fn zeroed(interval: Interval) -> Self {
        Self {
            interval,
            days: std::array::from_fn(|_| vec![Kilowatts::ZERO; interval.n_buckets()]),
        }
    }

    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// Power for the given weekday and bucket.
    #[must_use]
    pub fn power(&self, day: Weekday, bucket: Bucket) -> Kilowatts {
        self.days[weekday::index(day)][self.interval.bucket_index(bucket)]
    }

    /// One weekday's buckets in time order.
    pub fn day(&self, day: Weekday) -> impl Iterator<Item = (Bucket, Kilowatts)> + '_ {
        self.interval.buckets().zip(self.days[weekday::index(day)].iter().copied())
    }

    /// Ordered `(label, power)` rows for one weekday, the shape export collaborators
    /// take.
    #[must_use]
    pub fn day_rows(&self, day: Weekday) -> Vec<(String, Kilowatts)> {
        self.day(day).map(|(bucket, power)| (bucket.to_string(), power)).collect()
    }

    /// Average energy consumed over each weekday, Monday through Sunday.
    #[must_use]
    pub fn daily_energy(&self) -> [KilowattHours; 7] {
        std::array::from_fn(|index| {
            self.days[index].iter().copied().sum::<Kilowatts>() * self.interval.hours()
        })
    }
}

impl Serialize for WeeklyProfile {
    /// Weekday names in Monday..Sunday order, each mapping bucket labels to kilowatts.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(WEEKDAY_ORDER.len()))?;
        for day in WEEKDAY_ORDER {
            let buckets: BTreeMap<String, Kilowatts> =
                self.day(day).map(|(bucket, power)| (bucket.to_string(), power)).collect();
            map.serialize_entry(weekday::name(day), &buckets)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::quantity::rate::KilowattHourRate;

    fn config() -> SimulationConfig {
        SimulationConfig::builder()
            .interval(Interval::try_new(60).unwrap())
            .rate(KilowattHourRate::from(0.1))
            .deployed_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
            .collected_date(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap())
            .build()
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn sample(day: u32, hour: u32, minute: u32, amps: f64) -> RawSample {
        RawSample::new(at(day, hour, minute), Amperes::from(amps))
    }

    #[test]
    fn test_profile_is_dense() {
        let profile =
            WeeklyProfile::from_samples(vec![sample(9, 10, 0, 10.0)], Volts(480), &config())
                .unwrap();
        for day in WEEKDAY_ORDER {
            let buckets = profile.day(day).collect::<Vec<_>>();
            assert_eq!(buckets.len(), 24);
            assert!(buckets.iter().all(|(_, power)| *power >= Kilowatts::ZERO));
        }
    }

    #[test]
    fn test_same_bucket_samples_average() {
        // 2025-06-09 is a Monday.
        let samples = vec![sample(9, 10, 5, 8.0), sample(9, 10, 40, 12.0)];
        let profile = WeeklyProfile::from_samples(samples, Volts(480), &config()).unwrap();
        let power = profile.power(Weekday::Mon, "10:00".parse().unwrap());
        // Mean of 10 A, not the 20 A sum.
        assert_abs_diff_eq!(power.0.0, 8.31, epsilon = 1e-9);
    }

    #[test]
    fn test_unsampled_buckets_read_zero() {
        let profile =
            WeeklyProfile::from_samples(vec![sample(9, 10, 0, 10.0)], Volts(480), &config())
                .unwrap();
        assert_eq!(profile.power(Weekday::Mon, "11:00".parse().unwrap()), Kilowatts::ZERO);
        assert_eq!(profile.power(Weekday::Tue, "10:00".parse().unwrap()), Kilowatts::ZERO);
    }

    #[test]
    fn test_window_bounds_are_exclusive() {
        // Samples dated exactly on the deployed and collected dates are transients.
        let samples = vec![sample(1, 12, 0, 10.0), sample(30, 12, 0, 10.0)];
        assert!(WeeklyProfile::from_samples(samples, Volts(480), &config()).is_none());
    }

    #[test]
    fn test_daily_energy() {
        let samples = vec![sample(9, 10, 0, 10.0), sample(9, 11, 0, 10.0)];
        let profile = WeeklyProfile::from_samples(samples, Volts(480), &config()).unwrap();
        let daily = profile.daily_energy();
        assert_abs_diff_eq!(daily[weekday::index(Weekday::Mon)].0.0, 16.62, epsilon = 1e-9);
        assert_eq!(daily[weekday::index(Weekday::Sun)], KilowattHours::ZERO);
    }

    #[test]
    fn test_serializes_in_order() {
        let profile =
            WeeklyProfile::from_samples(vec![sample(9, 0, 0, 10.0)], Volts(480), &config())
                .unwrap();
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.starts_with(r#"{"Monday":{"00:00":8.31,"#));
        let monday = json.find("Monday").unwrap();
        let sunday = json.find("Sunday").unwrap();
        assert!(monday < sunday);
    }
}
