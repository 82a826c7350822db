use std::time::Instant;

use chrono::Local;
use tracing::debug;

use sysmon_config::SysmonConfig;
use sysmon_core::state::{CpuUsage, IoThroughput, Snapshot, Throughput};
use sysmon_core::SysmonError;

use crate::counters::CounterSource;
use crate::cpu::CpuSampler;
use crate::disk::DiskIoSampler;
use crate::gpu::GpuSampler;
use crate::host::HostCounters;
use crate::network::NetworkSampler;

/// Single owner of all counter state.
///
/// Build exactly one per process and hand it to whoever drives the timer;
/// two samplers over the same host would each see half the deltas.
pub struct Sampler<S = HostCounters> {
    source:  S,
    cpu:     CpuSampler,
    network: NetworkSampler,
    disk_io: DiskIoSampler,
    gpu:     GpuSampler,
}

impl Sampler<HostCounters> {
    /// A sampler over the live host, configured from `config`.
    pub fn host(config: &SysmonConfig) -> Self {
        Self::new(HostCounters::new(config), config.gpu.properties.clone())
    }
}

impl<S: CounterSource> Sampler<S> {
    pub fn new(source: S, gpu_properties: Vec<String>) -> Self {
        Self {
            source,
            cpu:     CpuSampler::new(),
            network: NetworkSampler::new(),
            disk_io: DiskIoSampler::new(),
            gpu:     GpuSampler::new(gpu_properties),
        }
    }

    /// Take a snapshot now.
    pub fn sample(&mut self) -> Snapshot {
        self.sample_at(Instant::now())
    }

    /// Take a snapshot, using `now` as the reference for rate calculations.
    ///
    /// Never fails: a metric whose source errors is reported as zero and the
    /// rest of the snapshot is still filled in.
    pub fn sample_at(&mut self, now: Instant) -> Snapshot {
        let cpu = match self.source.cpu_ticks() {
            Ok(ticks) => self.cpu.update(ticks),
            Err(e) => absorb("cpu", e),
        };

        let memory = self.source.memory().unwrap_or_else(|e| absorb("memory", e));
        let disk = self.source.disk().unwrap_or_else(|e| absorb("disk", e));

        let network = match self.source.network_bytes() {
            Ok(counters) => self.network.update(counters, now),
            Err(e) => absorb("network", e),
        };

        let disk_io = match self.source.disk_io_bytes() {
            Ok(counters) => self.disk_io.update(counters, now),
            Err(e) => absorb("disk io", e),
        };

        let gpu_percent = match self.source.gpu_entries() {
            Ok(entries) => self.gpu.read(&entries).percent(),
            Err(e) => absorb("gpu", e),
        };

        Snapshot {
            taken_at: Local::now(),
            cpu: CpuUsage {
                overall:  finite(cpu.overall),
                per_core: cpu.per_core.into_iter().map(finite).collect(),
            },
            gpu_percent: finite(gpu_percent),
            memory,
            disk,
            network: Throughput {
                down: finite(network.down),
                up:   finite(network.up),
            },
            disk_io: IoThroughput {
                read:  finite(disk_io.read),
                write: finite(disk_io.write),
            },
        }
    }

    /// Probe every counter once without producing a snapshot, so the first
    /// displayed sample already has a baseline to diff against.
    pub fn prime(&mut self) {
        let _ = self.sample();
    }
}

/// Map a failed probe to a zero reading. The next tick is the retry.
fn absorb<T: Default>(metric: &str, err: SysmonError) -> T {
    debug!("{metric} sample failed: {err}");
    T::default()
}

fn finite(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}
