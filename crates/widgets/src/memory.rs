use sysmon_core::AppState;
use sysmon_theme::Theme;

use crate::sparkline;

/// RAM as `used/total GB`, coloured by the used share.
#[derive(Debug, Clone)]
pub struct MemoryWidget {
    chart_width: usize,
}

impl MemoryWidget {
    pub fn new(chart_width: usize) -> Self {
        Self { chart_width }
    }

    pub fn view(&self, state: &AppState, theme: &Theme) -> String {
        let snap = &state.snapshot;
        let label = format!("{:.1}/{:.1} GB", snap.memory_used_gib(), snap.memory_total_gib());
        let chart = sparkline(state.history.memory.tail(self.chart_width));
        format!("RAM  {} {chart}", theme.paint(&label, snap.memory_percent()))
    }
}
