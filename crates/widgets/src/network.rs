use sysmon_core::state::KIB;
use sysmon_core::AppState;

/// Displays network down / up rates.
#[derive(Debug, Default, Clone)]
pub struct NetworkWidget;

impl NetworkWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, state: &AppState) -> String {
        let net = &state.snapshot.network;
        format!("Net  ↓{} ↑{}", format_rate(net.down), format_rate(net.up))
    }
}

/// Format a bytes-per-second rate into a human-readable string.
pub fn format_rate(bps: f64) -> String {
    const MIB: f64 = KIB * KIB;

    let bps = if bps.is_finite() { bps.max(0.0) } else { 0.0 };
    if bps >= MIB {
        format!("{:.1} MB/s", bps / MIB)
    } else if bps >= KIB {
        format!("{:.1} KB/s", bps / KIB)
    } else {
        format!("{bps:.0} B/s")
    }
}
