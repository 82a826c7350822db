use sysmon_core::AppState;

use crate::network::format_rate;

/// Aggregate disk read / write rates.
#[derive(Debug, Default, Clone)]
pub struct DiskIoWidget;

impl DiskIoWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, state: &AppState) -> String {
        let io = &state.snapshot.disk_io;
        format!("I/O  r {} w {}", format_rate(io.read), format_rate(io.write))
    }
}
