use std::path::Path;
use std::time::Instant;

use sysinfo::Disks;
use sysmon_core::state::{DiskUsage, IoThroughput};
use sysmon_core::{Result, SysmonError};

use crate::counters::ByteCounters;
use crate::rate::DuplexRate;

/// Capacity of the disk mounted at `mount_point`.
pub fn capacity(disks: &Disks, mount_point: &Path) -> Result<DiskUsage> {
    disks
        .iter()
        .find(|d| d.mount_point() == mount_point)
        .map(|d| usage_from(d.total_space(), d.available_space()))
        .ok_or_else(|| {
            SysmonError::System(format!("no disk mounted at '{}'", mount_point.display()))
        })
}

/// `used = total - free`, never underflowing.
pub fn usage_from(total: u64, free: u64) -> DiskUsage {
    let free = free.min(total);
    DiskUsage {
        used: total - free,
        total,
        free,
    }
}

/// Cumulative bytes read/written, summed over every disk.
pub fn io_totals(disks: &Disks) -> ByteCounters {
    disks.iter().fold(ByteCounters::default(), |acc, d| {
        let usage = d.usage();
        ByteCounters {
            inbound:  acc.inbound.saturating_add(usage.total_read_bytes),
            outbound: acc.outbound.saturating_add(usage.total_written_bytes),
        }
    })
}

/// Disk read/write throughput, the same delta scheme as the network sampler.
#[derive(Debug, Default)]
pub struct DiskIoSampler {
    rate: DuplexRate,
}

impl DiskIoSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, counters: ByteCounters, now: Instant) -> IoThroughput {
        let (read, write) = self.rate.update(counters.inbound, counters.outbound, now);
        IoThroughput { read, write }
    }
}
