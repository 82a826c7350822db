use sysmon_core::AppState;
use sysmon_theme::Theme;

use crate::{percent_label, sparkline};

/// Average CPU usage with its recent history.
#[derive(Debug, Clone)]
pub struct CpuWidget {
    chart_width: usize,
}

impl CpuWidget {
    pub fn new(chart_width: usize) -> Self {
        Self { chart_width }
    }

    pub fn view(&self, state: &AppState, theme: &Theme) -> String {
        let percent = state.snapshot.cpu.overall;
        let chart = sparkline(state.history.cpu.tail(self.chart_width));
        format!("CPU  {} {chart}", theme.paint(&percent_label(percent), percent))
    }
}
