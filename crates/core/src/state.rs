use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::history::{HistorySet, DEFAULT_HISTORY_LEN};

/// Bytes per GiB. Every "GB" figure shown to the user is really GiB.
pub const GIB: f64 = (1u64 << 30) as f64;
/// Bytes per KiB, used for the KB/s network figures.
pub const KIB: f64 = 1024.0;

/// Everything the display layer reads.
///
/// The monitor task hands out whole clones of this, so a consumer never
/// observes a history that is half-way through a tick.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Latest system resource snapshot.
    pub snapshot: Snapshot,
    /// Rolling history for the charted series.
    pub history: HistorySet,
    /// Number of completed sampling ticks.
    pub ticks: u64,
}

impl AppState {
    pub fn new(history_len: usize) -> Self {
        Self {
            snapshot: Snapshot::default(),
            history: HistorySet::new(history_len),
            ticks: 0,
        }
    }

    /// Fold a fresh snapshot into the state: record history, then replace the
    /// current snapshot.
    pub fn apply(&mut self, snapshot: Snapshot) {
        self.history.record(&snapshot);
        self.snapshot = snapshot;
        self.ticks += 1;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LEN)
    }
}

/// A point-in-time snapshot of system resource usage.
///
/// Every numeric field is finite and non-negative; a metric whose source
/// failed is reported as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Wall-clock time the sample was taken.
    pub taken_at: DateTime<Local>,
    pub cpu:      CpuUsage,
    /// Average accelerator utilisation (0.0 – 100.0).
    pub gpu_percent: f64,
    pub memory:   MemoryUsage,
    pub disk:     DiskUsage,
    pub network:  Throughput,
    pub disk_io:  IoThroughput,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            taken_at:    Local::now(),
            cpu:         CpuUsage::default(),
            gpu_percent: 0.0,
            memory:      MemoryUsage::default(),
            disk:        DiskUsage::default(),
            network:     Throughput::default(),
            disk_io:     IoThroughput::default(),
        }
    }
}

impl Snapshot {
    #[must_use]
    pub fn memory_used_gib(&self) -> f64 {
        self.memory.used as f64 / GIB
    }

    #[must_use]
    pub fn memory_total_gib(&self) -> f64 {
        self.memory.total as f64 / GIB
    }

    /// RAM usage as a percentage in `[0, 100]`.
    #[must_use]
    pub fn memory_percent(&self) -> f64 {
        percent_of(self.memory.used, self.memory.total)
    }

    #[must_use]
    pub fn disk_used_gib(&self) -> f64 {
        self.disk.used as f64 / GIB
    }

    #[must_use]
    pub fn disk_total_gib(&self) -> f64 {
        self.disk.total as f64 / GIB
    }

    #[must_use]
    pub fn disk_free_gib(&self) -> f64 {
        self.disk.free as f64 / GIB
    }

    /// Disk usage as a percentage in `[0, 100]`.
    #[must_use]
    pub fn disk_percent(&self) -> f64 {
        percent_of(self.disk.used, self.disk.total)
    }
}

fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 100.0).clamp(0.0, 100.0)
}

/// CPU utilisation over the last sampling interval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuUsage {
    /// Aggregate usage across all cores (0.0 – 100.0).
    pub overall:  f64,
    /// Per-core usage (0.0 – 100.0), in processor order.
    pub per_core: Vec<f64>,
}

/// Physical memory in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub used:  u64,
    pub total: u64,
}

/// Capacity of the watched volume in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskUsage {
    pub used:  u64,
    pub total: u64,
    pub free:  u64,
}

/// Network receive/transmit rates in bytes/second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Throughput {
    pub down: f64,
    pub up:   f64,
}

impl Throughput {
    #[must_use]
    pub fn down_kbps(&self) -> f64 {
        self.down / KIB
    }

    #[must_use]
    pub fn up_kbps(&self) -> f64 {
        self.up / KIB
    }
}

/// Disk read/write rates in bytes/second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IoThroughput {
    pub read:  f64,
    pub write: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gib_is_two_to_the_thirtieth() {
        assert_eq!(GIB, 1024.0 * 1024.0 * 1024.0);
        let snap = Snapshot {
            memory: MemoryUsage { used: 8 << 30, total: 16 << 30 },
            ..Snapshot::default()
        };
        assert_eq!(snap.memory_used_gib(), 8.0);
        assert_eq!(snap.memory_total_gib(), 16.0);
        assert_eq!(snap.memory_percent(), 50.0);
    }

    #[test]
    fn percent_guards_zero_total() {
        let snap = Snapshot::default();
        assert_eq!(snap.memory_percent(), 0.0);
        assert_eq!(snap.disk_percent(), 0.0);
    }

    #[test]
    fn throughput_kbps() {
        let net = Throughput { down: 2048.0, up: 512.0 };
        assert_eq!(net.down_kbps(), 2.0);
        assert_eq!(net.up_kbps(), 0.5);
    }

    #[test]
    fn apply_records_history_and_counts_ticks() {
        let mut state = AppState::new(4);
        let snap = Snapshot {
            cpu: CpuUsage { overall: 40.0, per_core: vec![30.0, 50.0] },
            memory: MemoryUsage { used: 1, total: 4 },
            ..Snapshot::default()
        };
        state.apply(snap);
        assert_eq!(state.ticks, 1);
        assert_eq!(state.history.cpu.to_vec(), vec![0.0, 0.0, 0.0, 40.0]);
        assert_eq!(state.history.memory.latest(), 25.0);
        assert_eq!(state.history.per_core.len(), 2);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let json = serde_json::to_value(Snapshot::default()).unwrap();
        assert!(json.get("cpu").is_some());
        assert_eq!(json["network"]["down"], 0.0);
    }
}
