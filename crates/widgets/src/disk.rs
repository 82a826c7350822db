use sysmon_core::AppState;
use sysmon_theme::Theme;

const BAR_WIDTH: usize = 10;

/// Capacity of the watched volume with a fill bar.
#[derive(Debug, Default, Clone)]
pub struct DiskWidget;

impl DiskWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, state: &AppState, theme: &Theme) -> String {
        let snap = &state.snapshot;
        let percent = snap.disk_percent();
        let label = format!("{:.0}/{:.0} GB", snap.disk_used_gib(), snap.disk_total_gib());
        format!(
            "Disk {} {}",
            theme.paint(&label, percent),
            level_bar(percent, BAR_WIDTH)
        )
    }
}

/// A `width`-cell bar, filled in proportion to `percent`.
pub fn level_bar(percent: f64, width: usize) -> String {
    let share = if percent.is_finite() { percent.clamp(0.0, 100.0) / 100.0 } else { 0.0 };
    let filled = (share * width as f64).round() as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}
