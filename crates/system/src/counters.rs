//! Raw counter readings and the trait that produces them.
//!
//! A [`CounterSource`] only reports what the OS says right now. Turning
//! cumulative counters into rates is the sampler's job, which keeps the delta
//! arithmetic testable without a real kernel underneath.

use std::collections::BTreeMap;

use sysmon_core::state::{DiskUsage, MemoryUsage};
use sysmon_core::Result;

/// Cumulative scheduler ticks for one logical processor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTicks {
    pub user:   u64,
    pub system: u64,
    pub idle:   u64,
    pub nice:   u64,
}

impl CpuTicks {
    /// Per-state difference `self - earlier`. A state whose counter went
    /// backwards (wraparound, reset) contributes zero.
    #[must_use]
    pub fn since(&self, earlier: &CpuTicks) -> CpuTicks {
        CpuTicks {
            user:   self.user.checked_sub(earlier.user).unwrap_or(0),
            system: self.system.checked_sub(earlier.system).unwrap_or(0),
            idle:   self.idle.checked_sub(earlier.idle).unwrap_or(0),
            nice:   self.nice.checked_sub(earlier.nice).unwrap_or(0),
        }
    }

    pub fn busy(&self) -> u64 {
        self.user + self.system + self.nice
    }

    pub fn total(&self) -> u64 {
        self.busy() + self.idle
    }
}

/// A pair of cumulative byte counters (received/sent, read/written).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteCounters {
    pub inbound:  u64,
    pub outbound: u64,
}

/// One accelerator device as the hardware registry describes it: numeric
/// properties keyed by their vendor-specific names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryEntry {
    pub name:       String,
    pub properties: BTreeMap<String, f64>,
}

/// Everything the sampler needs from the operating system.
///
/// Every call may fail; the sampler maps a failure to a zero for that metric
/// and carries on with the others.
pub trait CounterSource: Send {
    /// Cumulative ticks, one entry per logical processor.
    fn cpu_ticks(&mut self) -> Result<Vec<CpuTicks>>;

    /// Physical memory in use and installed.
    fn memory(&mut self) -> Result<MemoryUsage>;

    /// Capacity of the watched volume.
    fn disk(&mut self) -> Result<DiskUsage>;

    /// Cumulative received/sent bytes over the selected interfaces.
    fn network_bytes(&mut self) -> Result<ByteCounters>;

    /// Cumulative read/written bytes over all disks.
    fn disk_io_bytes(&mut self) -> Result<ByteCounters>;

    /// Accelerator devices with their utilisation properties.
    fn gpu_entries(&mut self) -> Result<Vec<RegistryEntry>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_never_goes_negative() {
        let before = CpuTicks { user: 100, system: 50, idle: 850, nice: 5 };
        let after = CpuTicks { user: 150, system: 40, idle: 890, nice: 5 };
        let d = after.since(&before);
        assert_eq!(d, CpuTicks { user: 50, system: 0, idle: 40, nice: 0 });
        assert_eq!(d.busy(), 50);
        assert_eq!(d.total(), 90);
    }
}
