use serde::{Serialize, Serializer, ser::SerializeMap};
use tracing::debug;

use crate::{
    compressor::Compressor,
    grid::Interval,
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
    schedule::ShutdownSchedule,
    weekday::{self, WEEKDAY_ORDER},
};

/// The fixed weeks-per-year constant every annualized figure uses.
pub const WEEKS_PER_YEAR: f64 = 52.1429;

/// What one compressor saves under the schedule.
#[derive(Clone, Debug, Serialize)]
pub struct CompressorSavings {
    pub compressor: String,

    /// kWh saved per weekday, Monday through Sunday; zero for unscheduled days.
    #[serde(rename = "daily_kilowatt_hours", serialize_with = "serialize_daily")]
    pub daily: [KilowattHours; 7],

    #[serde(rename = "weekly_kilowatt_hours")]
    pub weekly: KilowattHours,

    #[serde(rename = "weekly_dollars")]
    pub weekly_cost: Cost,

    #[serde(rename = "annual_kilowatt_hours")]
    pub annual: KilowattHours,

    #[serde(rename = "annual_dollars")]
    pub annual_cost: Cost,
}

impl CompressorSavings {
    /// Ordered `(weekday, kWh)` rows, Monday through Sunday, the shape export
    /// collaborators take.
    #[must_use]
    pub fn day_rows(&self) -> Vec<(&'static str, KilowattHours)> {
        WEEKDAY_ORDER
            .into_iter()
            .map(|day| (weekday::name(day), self.daily[weekday::index(day)]))
            .collect()
    }
}

/// The full report: per-compressor savings plus the cross-compressor totals.
///
/// Recomputed from scratch whenever the schedule changes; nothing here is persisted.
#[derive(Clone, Debug, Serialize)]
pub struct SavingsReport {
    pub compressors: Vec<CompressorSavings>,

    #[serde(rename = "daily_total_kilowatt_hours", serialize_with = "serialize_daily")]
    pub daily_totals: [KilowattHours; 7],

    #[serde(rename = "weekly_total_kilowatt_hours")]
    pub weekly_total: KilowattHours,

    #[serde(rename = "weekly_total_dollars")]
    pub weekly_total_cost: Cost,

    #[serde(rename = "annual_total_kilowatt_hours")]
    pub annual_total: KilowattHours,

    #[serde(rename = "annual_total_dollars")]
    pub annual_total_cost: Cost,
}

fn serialize_daily<S: Serializer>(
    daily: &[KilowattHours; 7],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(daily.len()))?;
    for day in WEEKDAY_ORDER {
        map.serialize_entry(weekday::name(day), &daily[weekday::index(day)])?;
    }
    map.end()
}

/// Energy and dollars saved by shutting the compressors down on the schedule.
///
/// Pure arithmetic over already-built profiles: a compressor without a profile
/// contributes zero, an empty schedule yields an all-zero report, and no new error
/// kind arises here. The caller validates the schedule beforehand.
#[must_use]
pub fn compute_savings(
    compressors: &[Compressor],
    schedule: &ShutdownSchedule,
    interval: Interval,
    rate: KilowattHourRate,
) -> SavingsReport {
    let mut rows = Vec::with_capacity(compressors.len());
    for compressor in compressors {
        let mut daily = [KilowattHours::ZERO; 7];
        if let Some(profile) = compressor.profile() {
            for day in schedule.scheduled_days() {
                let saved = schedule
                    .ranges(day)
                    .iter()
                    .map(|range| {
                        profile
                            .day(day)
                            .filter(|(bucket, _)| range.contains(*bucket))
                            .map(|(_, power)| power * interval.hours())
                            .sum::<KilowattHours>()
                    })
                    .sum::<KilowattHours>();
                daily[weekday::index(day)] = saved.round_to_hundredths();
            }
        }

        let weekly = daily.iter().copied().sum::<KilowattHours>().round_to_hundredths();
        // The annualized kWh goes into the dollar figure unrounded; only the reported
        // kWh value is rounded.
        let annual_exact = weekly * WEEKS_PER_YEAR;
        rows.push(CompressorSavings {
            compressor: compressor.name().to_string(),
            daily,
            weekly,
            weekly_cost: (weekly * rate).round_to_cents(),
            annual: annual_exact.round_to_hundredths(),
            annual_cost: annual_exact * rate,
        });
    }

    let daily_totals = std::array::from_fn(|index| {
        rows.iter().map(|row| row.daily[index]).sum::<KilowattHours>()
    });
    // The grand weekly is the sum of the per-compressor weeklies, never recomputed
    // from the daily totals.
    let weekly_total = rows.iter().map(|row| row.weekly).sum::<KilowattHours>();
    let annual_total = weekly_total * WEEKS_PER_YEAR;
    debug!(
        n_compressors = rows.len(),
        weekly_total = %weekly_total,
        "computed the savings report"
    );
    SavingsReport {
        compressors: rows,
        daily_totals,
        weekly_total,
        weekly_total_cost: weekly_total * rate,
        annual_total,
        annual_total_cost: annual_total * rate,
    }
}
