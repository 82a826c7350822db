//! Best-effort accelerator utilisation.
//!
//! Drivers disagree on what the utilisation property is called, so the
//! sampler walks an ordered list of candidate names for every device and the
//! first name present wins. The list is plain configuration.

use tracing::debug;

use crate::counters::RegistryEntry;

/// Outcome of one GPU probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GpuReading {
    /// Average utilisation across every device that exposed a known property.
    Percent(f64),
    /// No device, or no device with any of the candidate properties.
    Unsupported,
}

impl GpuReading {
    /// Utilisation to report; unsupported maps to zero.
    pub fn percent(self) -> f64 {
        match self {
            Self::Percent(p) => p,
            Self::Unsupported => 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GpuSampler {
    properties: Vec<String>,
}

impl GpuSampler {
    pub fn new(properties: Vec<String>) -> Self {
        Self { properties }
    }

    pub fn read(&self, entries: &[RegistryEntry]) -> GpuReading {
        let matches: Vec<f64> = entries
            .iter()
            .filter_map(|entry| self.probe(entry))
            .collect();

        if matches.is_empty() {
            return GpuReading::Unsupported;
        }
        GpuReading::Percent(matches.iter().sum::<f64>() / matches.len() as f64)
    }

    fn probe(&self, entry: &RegistryEntry) -> Option<f64> {
        let (key, value) = self
            .properties
            .iter()
            .find_map(|key| entry.properties.get(key).map(|v| (key, *v)))?;
        if !value.is_finite() {
            return None;
        }
        debug!("gpu '{}': {key} = {value}", entry.name);
        Some(value.clamp(0.0, 100.0))
    }
}
