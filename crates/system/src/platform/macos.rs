use std::ffi::CString;
use std::mem::{size_of, MaybeUninit};
use std::process::Command;
use std::ptr;

use libc::{
    c_void, host_processor_info, host_statistics64, integer_t, mach_msg_type_number_t,
    natural_t, processor_info_array_t, vm_statistics64, CPU_STATE_IDLE, CPU_STATE_MAX,
    CPU_STATE_NICE, CPU_STATE_SYSTEM, CPU_STATE_USER, HOST_VM_INFO64, HOST_VM_INFO64_COUNT,
    KERN_SUCCESS, PROCESSOR_CPU_LOAD_INFO,
};
use sysmon_core::state::MemoryUsage;
use sysmon_core::{Result, SysmonError};

use crate::counters::{CpuTicks, RegistryEntry};
use crate::platform::ioreg;

/// Per-processor load ticks from `host_processor_info`.
///
/// The kernel hands back a buffer it allocated in our address space; it is
/// copied into owned `CpuTicks` and released before returning.
pub fn cpu_ticks() -> Result<Vec<CpuTicks>> {
    let mut cpu_count: natural_t = 0;
    let mut info: processor_info_array_t = ptr::null_mut();
    let mut info_count: mach_msg_type_number_t = 0;

    let result = unsafe {
        #[allow(deprecated)]
        let host = libc::mach_host_self();
        host_processor_info(
            host,
            PROCESSOR_CPU_LOAD_INFO,
            &mut cpu_count,
            &mut info,
            &mut info_count,
        )
    };
    if result != KERN_SUCCESS || info.is_null() {
        return Err(SysmonError::System(format!(
            "host_processor_info returned {result}"
        )));
    }

    let states = CPU_STATE_MAX as usize;
    let ticks = {
        let raw = unsafe { std::slice::from_raw_parts(info, info_count as usize) };
        // Tick counters are 32-bit and wrap; read them unsigned so a wrap
        // shows up as a decrease, which the sampler treats as zero.
        let tick = |core: &[integer_t], state: i32| core[state as usize] as u32 as u64;
        raw.chunks_exact(states)
            .take(cpu_count as usize)
            .map(|core| CpuTicks {
                user:   tick(core, CPU_STATE_USER),
                system: tick(core, CPU_STATE_SYSTEM),
                idle:   tick(core, CPU_STATE_IDLE),
                nice:   tick(core, CPU_STATE_NICE),
            })
            .collect()
    };

    unsafe {
        #[allow(deprecated)]
        let task = libc::mach_task_self();
        libc::vm_deallocate(
            task,
            info as libc::vm_address_t,
            (info_count as usize * size_of::<integer_t>()) as libc::vm_size_t,
        );
    }

    Ok(ticks)
}

/// `used = active + wired + compressed` pages; total is `hw.memsize`.
pub fn memory() -> Result<MemoryUsage> {
    let stats = unsafe {
        #[allow(deprecated)]
        let host = libc::mach_host_self();
        let mut stats = MaybeUninit::<vm_statistics64>::uninit();
        let mut count: mach_msg_type_number_t = HOST_VM_INFO64_COUNT;
        let result = host_statistics64(
            host,
            HOST_VM_INFO64,
            stats.as_mut_ptr() as *mut _,
            &mut count,
        );
        if result != KERN_SUCCESS {
            return Err(SysmonError::System(format!(
                "host_statistics64 returned {result}"
            )));
        }
        stats.assume_init()
    };

    let page_size = match unsafe { libc::sysconf(libc::_SC_PAGESIZE) } {
        n if n > 0 => n as u64,
        _ => 4096,
    };

    let pages =
        stats.active_count as u64 + stats.wire_count as u64 + stats.compressor_page_count as u64;

    Ok(MemoryUsage {
        used:  pages * page_size,
        total: sysctl_u64("hw.memsize")?,
    })
}

fn sysctl_u64(name: &str) -> Result<u64> {
    let c_name = CString::new(name)
        .map_err(|_| SysmonError::System(format!("invalid sysctl name '{name}'")))?;
    let mut size: libc::size_t = size_of::<u64>() as libc::size_t;
    let mut value: u64 = 0;
    let result = unsafe {
        libc::sysctlbyname(
            c_name.as_ptr(),
            &mut value as *mut u64 as *mut c_void,
            &mut size,
            ptr::null_mut(),
            0,
        )
    };
    if result != 0 {
        return Err(SysmonError::System(format!(
            "sysctl {name} failed: {}",
            std::io::Error::last_os_error()
        )));
    }
    Ok(value)
}

/// Accelerator entries from the I/O registry, via `ioreg`.
pub fn gpu_entries() -> Result<Vec<RegistryEntry>> {
    let output = Command::new("ioreg")
        .args(["-r", "-d", "1", "-w", "0", "-c", "IOAccelerator"])
        .output()?;
    if !output.status.success() {
        return Err(SysmonError::System(format!("ioreg exited with {}", output.status)));
    }
    Ok(ioreg::parse(&String::from_utf8_lossy(&output.stdout)))
}
