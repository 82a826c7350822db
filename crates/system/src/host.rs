use std::path::PathBuf;

use sysinfo::{Disks, Networks, System};
use sysmon_config::{NetworkConfig, SysmonConfig};
use sysmon_core::state::{DiskUsage, MemoryUsage};
use sysmon_core::{Result, SysmonError};

use crate::counters::{ByteCounters, CounterSource, CpuTicks, RegistryEntry};
use crate::{disk, network};

#[cfg(target_os = "linux")]
use crate::platform::linux as native;
#[cfg(target_os = "macos")]
use crate::platform::macos as native;

/// The live [`CounterSource`]: sysinfo handles for interfaces, volumes and
/// memory, plus native readers for processor ticks and accelerators.
///
/// The sysinfo handles are kept across calls so every refresh reuses the
/// already-enumerated interface and disk lists.
pub struct HostCounters {
    #[cfg_attr(target_os = "macos", allow(dead_code))]
    sys:            System,
    networks:       Networks,
    disks:          Disks,
    selection:      NetworkConfig,
    mount_point:    PathBuf,
    gpu_enabled:    bool,
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    gpu_properties: Vec<String>,
}

impl HostCounters {
    pub fn new(config: &SysmonConfig) -> Self {
        Self {
            sys:            System::new(),
            networks:       Networks::new_with_refreshed_list(),
            disks:          Disks::new_with_refreshed_list(),
            selection:      config.network.clone(),
            mount_point:    PathBuf::from(&config.disk.mount_point),
            gpu_enabled:    config.gpu.enabled,
            gpu_properties: config.gpu.properties.clone(),
        }
    }
}

impl CounterSource for HostCounters {
    fn cpu_ticks(&mut self) -> Result<Vec<CpuTicks>> {
        #[cfg(any(target_os = "linux", target_os = "macos"))]
        {
            native::cpu_ticks()
        }
        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            Err(SysmonError::Unsupported("per-core tick counters"))
        }
    }

    fn memory(&mut self) -> Result<MemoryUsage> {
        #[cfg(target_os = "macos")]
        let usage = native::memory()?;
        #[cfg(not(target_os = "macos"))]
        let usage = crate::memory::from_sysinfo(&mut self.sys);

        if usage.total == 0 {
            return Err(SysmonError::System("total memory reported as zero".into()));
        }
        Ok(crate::memory::clamp(usage))
    }

    fn disk(&mut self) -> Result<DiskUsage> {
        self.disks.refresh(true);
        disk::capacity(&self.disks, &self.mount_point)
    }

    fn network_bytes(&mut self) -> Result<ByteCounters> {
        // true = drop interfaces that disappeared
        self.networks.refresh(true);
        Ok(network::totals(&self.networks, &self.selection))
    }

    fn disk_io_bytes(&mut self) -> Result<ByteCounters> {
        self.disks.refresh(true);
        Ok(disk::io_totals(&self.disks))
    }

    fn gpu_entries(&mut self) -> Result<Vec<RegistryEntry>> {
        if !self.gpu_enabled {
            return Ok(Vec::new());
        }
        #[cfg(target_os = "linux")]
        {
            native::gpu_entries(&self.gpu_properties)
        }
        #[cfg(target_os = "macos")]
        {
            native::gpu_entries()
        }
        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            Err(SysmonError::Unsupported("GPU registry"))
        }
    }
}
