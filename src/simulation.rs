use bon::Builder;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    compressor::Compressor,
    error::{ConfigurationError, Result},
    grid::Interval,
    quantity::{energy::KilowattHours, rate::KilowattHourRate},
    sample::RawSample,
    savings::{self, SavingsReport},
    schedule::ShutdownSchedule,
};

/// The shared knobs for one simulation run, reset per run.
#[derive(Copy, Clone, Debug, Builder, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub interval: Interval,

    /// Electricity rate in dollars per kilowatt-hour.
    pub rate: KilowattHourRate,

    /// Day the sensors went on the machines. Readings dated on or before it are
    /// installation transients and excluded.
    pub deployed_date: NaiveDate,

    /// Day the sensors came off. Readings dated on or after it are excluded.
    pub collected_date: NaiveDate,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.collected_date <= self.deployed_date {
            return Err(ConfigurationError::InvalidDateWindow {
                deployed: self.deployed_date,
                collected: self.collected_date,
            });
        }
        Ok(())
    }

    /// Whether the date falls strictly inside the deployed/collected window.
    #[must_use]
    pub fn window_contains(&self, date: NaiveDate) -> bool {
        (self.deployed_date < date) && (date < self.collected_date)
    }
}

/// One simulation run: the configuration plus the compressor roster.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    compressors: Vec<Compressor>,
}

impl Simulation {
    pub fn try_new(config: SimulationConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self { config, compressors: Vec::new() })
    }

    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn compressors(&self) -> &[Compressor] {
        &self.compressors
    }

    /// Add to the roster. Names identify compressors in errors and reports, so they
    /// must be unique within the run.
    pub fn add_compressor(&mut self, compressor: Compressor) -> Result<(), ConfigurationError> {
        if self.compressors.iter().any(|existing| existing.name() == compressor.name()) {
            return Err(ConfigurationError::DuplicateCompressorName {
                name: compressor.name().to_string(),
            });
        }
        self.compressors.push(compressor);
        Ok(())
    }

    /// Build every profile, pulling one raw series per compressor from the caller.
    ///
    /// The loader keeps file I/O outside the crate: it is handed each compressor in
    /// roster order and returns its raw series. The first failure aborts the batch.
    pub fn build_profiles<F>(&mut self, mut load: F) -> Result
    where
        F: FnMut(&Compressor) -> Result<Vec<RawSample>>,
    {
        info!(n_compressors = self.compressors.len(), "crunching the raw series…");
        for compressor in &mut self.compressors {
            let samples = load(compressor)?;
            compressor.build_profile(samples, &self.config)?;
        }
        info!("done");
        Ok(())
    }

    /// Validate the schedule against the run's grid, then price it out.
    pub fn compute_savings(&self, schedule: &ShutdownSchedule) -> Result<SavingsReport> {
        schedule.validate(self.config.interval)?;
        Ok(savings::compute_savings(
            &self.compressors,
            schedule,
            self.config.interval,
            self.config.rate,
        ))
    }

    /// System-wide average consumption per weekday, Monday through Sunday, over the
    /// compressors whose profiles are built.
    #[must_use]
    pub fn system_daily_energy(&self) -> [KilowattHours; 7] {
        let mut totals = [KilowattHours::ZERO; 7];
        for profile in self.compressors.iter().filter_map(Compressor::profile) {
            for (total, energy) in totals.iter_mut().zip(profile.daily_energy()) {
                *total += energy;
            }
        }
        totals
    }
}
