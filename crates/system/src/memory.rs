use sysinfo::System;
use sysmon_core::state::MemoryUsage;

/// Memory figures from sysinfo, for platforms without a native reader.
pub fn from_sysinfo(sys: &mut System) -> MemoryUsage {
    sys.refresh_memory();
    clamp(MemoryUsage {
        used:  sys.used_memory(),
        total: sys.total_memory(),
    })
}

/// Enforce `used <= total`. Page counts and the installed size come from
/// different calls, so they can disagree by a few pages.
pub fn clamp(usage: MemoryUsage) -> MemoryUsage {
    MemoryUsage {
        used:  usage.used.min(usage.total),
        total: usage.total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn used_never_exceeds_total() {
        let usage = clamp(MemoryUsage { used: 17 << 30, total: 16 << 30 });
        assert_eq!(usage.used, usage.total);
    }

    #[test]
    fn host_memory_is_consistent() {
        let mut sys = System::new();
        let usage = from_sysinfo(&mut sys);
        assert!(usage.used <= usage.total);
    }
}
