use sysmon_core::AppState;
use sysmon_theme::Theme;

use crate::{percent_label, sparkline};

/// Accelerator utilisation. Reads 0% on hosts without a supported GPU.
#[derive(Debug, Clone)]
pub struct GpuWidget {
    chart_width: usize,
}

impl GpuWidget {
    pub fn new(chart_width: usize) -> Self {
        Self { chart_width }
    }

    pub fn view(&self, state: &AppState, theme: &Theme) -> String {
        let percent = state.snapshot.gpu_percent;
        let chart = sparkline(state.history.gpu.tail(self.chart_width));
        format!("GPU  {} {chart}", theme.paint(&percent_label(percent), percent))
    }
}
