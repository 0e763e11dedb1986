use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    error::{ConfigurationError, Error, Result},
    profile::WeeklyProfile,
    quantity::voltage::Volts,
    sample::RawSample,
    simulation::SimulationConfig,
};

/// One compressor under simulation: its identity, nameplate voltage, where its raw
/// series comes from, and the weekly profile once built.
#[derive(Debug)]
pub struct Compressor {
    name: String,
    voltage: Volts,
    source: PathBuf,
    profile: Option<WeeklyProfile>,
}

impl Compressor {
    pub fn try_new(
        name: impl Into<String>,
        voltage: Volts,
        source: impl Into<PathBuf>,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigurationError::EmptyCompressorName);
        }
        if voltage.0 == 0 {
            return Err(ConfigurationError::NonPositiveVoltage { name });
        }
        Ok(Self { name, voltage, source: source.into(), profile: None })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn voltage(&self) -> Volts {
        self.voltage
    }

    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    #[must_use]
    pub const fn profile(&self) -> Option<&WeeklyProfile> {
        self.profile.as_ref()
    }

    /// Build and attach the weekly profile, consuming the raw series.
    pub fn build_profile(&mut self, samples: Vec<RawSample>, config: &SimulationConfig) -> Result {
        let n_samples = samples.len();
        let profile = WeeklyProfile::from_samples(samples, self.voltage, config)
            .ok_or_else(|| Error::EmptyDataset { compressor: self.name.clone() })?;
        debug!(compressor = %self.name, n_samples, "built the weekly profile");
        self.profile = Some(profile);
        Ok(())
    }
}
