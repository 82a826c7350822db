//! Text views of each metric, mostly one line each. Widgets only read [`AppState`]; deciding
//! which of them appear and in what order is the renderer's job.
//!
//! [`AppState`]: sysmon_core::AppState

pub mod cores;
pub mod cpu;
pub mod disk;
pub mod gpu;
pub mod io;
pub mod memory;
pub mod network;
pub mod sparkline;

pub use cores::CpuCoresWidget;
pub use cpu::CpuWidget;
pub use disk::DiskWidget;
pub use gpu::GpuWidget;
pub use io::DiskIoWidget;
pub use memory::MemoryWidget;
pub use network::NetworkWidget;
pub use sparkline::sparkline;

/// Whole-number percentage, right-aligned in three columns.
pub(crate) fn percent_label(percent: f64) -> String {
    format!("{:>3.0}%", percent.clamp(0.0, 100.0))
}
