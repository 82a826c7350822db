//! Turns an [`AppState`] into the text printed for one tick.
//!
//! The status-line modes stay a fixed width from tick to tick so a terminal
//! or status bar showing them does not jitter.

use sysmon_config::{DisplayConfig, DisplayMode};
use sysmon_core::{AppState, Result};
use sysmon_theme::Theme;
use sysmon_widgets::{
    sparkline, CpuCoresWidget, CpuWidget, DiskIoWidget, DiskWidget, GpuWidget, MemoryWidget,
    NetworkWidget,
};

/// U+2007 FIGURE SPACE: blank, but as wide as a digit.
pub const FIGURE_SPACE: char = '\u{2007}';

/// Which view to draw and how, built from the loaded configuration.
#[derive(Debug, Clone)]
pub struct Renderer {
    mode:        DisplayMode,
    chart_width: usize,
    per_core:    bool,
    theme:       Theme,
}

impl Renderer {
    pub fn new(display: &DisplayConfig, theme: Theme) -> Self {
        Self {
            mode:        display.mode,
            chart_width: display.chart_width.max(1),
            per_core:    display.per_core,
            theme,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Render one tick. Only the JSON view can fail.
    pub fn render(&self, state: &AppState) -> Result<String> {
        Ok(match self.mode {
            DisplayMode::Text => status_text(state, &self.theme),
            DisplayMode::Chart => status_chart(state, &self.theme, self.chart_width),
            DisplayMode::Detail => {
                detail(state, &self.theme, self.chart_width, self.per_core).join("\n")
            }
            DisplayMode::Json => json(state)?,
        })
    }
}

/// Right-align a whole percentage in two digits using figure spaces, so
/// `7` and `42` occupy the same width. Fractions are truncated; only a full
/// `100` takes a third digit.
pub fn pad(percent: f64) -> String {
    let value = if percent.is_finite() { percent.clamp(0.0, 100.0) as u32 } else { 0 };
    if value < 10 {
        format!("{FIGURE_SPACE}{value}")
    } else {
        value.to_string()
    }
}

/// `C:xx% M:xx%`
pub fn status_text(state: &AppState, theme: &Theme) -> String {
    let cpu = state.snapshot.cpu.overall;
    let mem = state.snapshot.memory_percent();
    format!(
        "C:{} M:{}",
        theme.paint(&format!("{}%", pad(cpu)), cpu),
        theme.paint(&format!("{}%", pad(mem)), mem),
    )
}

/// `C:` and `M:` followed by the last `width` points of each history.
pub fn status_chart(state: &AppState, theme: &Theme, width: usize) -> String {
    let cpu = sparkline(state.history.cpu.tail(width));
    let mem = sparkline(state.history.memory.tail(width));
    format!(
        "C:{} M:{}",
        theme.paint(&cpu, state.snapshot.cpu.overall),
        theme.paint(&mem, state.snapshot.memory_percent()),
    )
}

/// Every metric, one line each. With `per_core`, the CPU line becomes a grid
/// of per-core sparklines (until the first per-core sample exists).
pub fn detail(state: &AppState, theme: &Theme, width: usize, per_core: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if per_core {
        lines = CpuCoresWidget::new(width).view(state, theme);
    }
    if lines.is_empty() {
        lines.push(CpuWidget::new(width).view(state, theme));
    }
    lines.extend([
        GpuWidget::new(width).view(state, theme),
        MemoryWidget::new(width).view(state, theme),
        DiskWidget::new().view(state, theme),
        NetworkWidget::new().view(state),
        DiskIoWidget::new().view(state),
    ]);
    lines
}

/// The current snapshot as a single JSON line.
pub fn json(state: &AppState) -> Result<String> {
    let line = serde_json::to_string(&state.snapshot).map_err(std::io::Error::from)?;
    Ok(line)
}
