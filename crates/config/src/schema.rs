use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Shortest sampling interval accepted; anything lower is clamped up.
pub const MIN_INTERVAL_MS: u64 = 100;

/// Root configuration structure parsed from `sysmon.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SysmonConfig {
    /// Sampling cadence and history size.
    pub general: GeneralConfig,
    /// How the status line is drawn.
    pub display: DisplayConfig,
    /// Which interfaces count toward network throughput.
    pub network: NetworkConfig,
    /// Which volume is reported.
    pub disk:    DiskConfig,
    /// Accelerator utilisation probes.
    pub gpu:     GpuConfig,
    /// Colour bands.
    pub theme:   ThemeConfig,
}

/// Global sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Milliseconds between two samples.
    pub interval_ms: u64,
    /// Points kept per history series.
    pub history_len: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1_000,
            history_len: 60,
        }
    }
}

impl GeneralConfig {
    /// Sampling interval, clamped to [`MIN_INTERVAL_MS`].
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(MIN_INTERVAL_MS))
    }

    pub fn history_len(&self) -> usize {
        self.history_len.max(1)
    }
}

/// Display settings for the terminal front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    /// Number of history points drawn in a sparkline.
    pub chart_width: usize,
    /// Detail view: one sparkline per core instead of the aggregate CPU line.
    pub per_core: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Text,
            chart_width: 20,
            per_core: false,
        }
    }
}

/// What the display loop prints on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// `C:42% M:63%`
    #[default]
    Text,
    /// CPU and memory sparklines.
    Chart,
    /// Multi-line panel with every metric.
    Detail,
    /// One JSON snapshot per line.
    Json,
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "chart" | "mini-chart" | "minichart" => Ok(Self::Chart),
            "detail" => Ok(Self::Detail),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown display mode '{other}'")),
        }
    }
}

/// Interface selection for the network sampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Explicit allow-list (e.g. `["en0", "en1"]`). Empty = automatic.
    pub interfaces: Vec<String>,
    /// In automatic mode, interfaces whose name starts with one of these are
    /// skipped (loopback, bridges, tunnels, virtual adapters).
    pub exclude_prefixes: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        let prefixes = [
            "lo", "docker", "veth", "br-", "virbr", "vmnet", "utun", "awdl", "llw", "bridge",
            "tun", "tap", "gif", "stf", "anpi", "ap",
        ];
        Self {
            interfaces: Vec::new(),
            exclude_prefixes: prefixes.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl NetworkConfig {
    /// Whether interface `name` contributes to the totals.
    pub fn includes(&self, name: &str) -> bool {
        if !self.interfaces.is_empty() {
            return self.interfaces.iter().any(|i| i == name);
        }
        !self
            .exclude_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }
}

/// Volume selection for the disk sampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskConfig {
    pub mount_point: String,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            mount_point: "/".to_string(),
        }
    }
}

/// GPU probe list. Names are tried in order for each device; first hit wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuConfig {
    pub enabled: bool,
    pub properties: Vec<String>,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            properties: vec![
                // Apple Silicon / AMD via IOAccelerator PerformanceStatistics
                "Device Utilization %".to_string(),
                // Intel iGPU
                "GPU Activity(%)".to_string(),
                "Renderer Utilization %".to_string(),
                // amdgpu sysfs attribute
                "gpu_busy_percent".to_string(),
            ],
        }
    }
}

/// Colour band settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Emit ANSI colour escapes.
    pub color: bool,
    /// Band colours (hex, e.g. `"#a6e3a1"`).
    pub normal:   String,
    pub elevated: String,
    pub critical: String,
    /// Percent at which a value turns "elevated".
    pub elevated_at: f64,
    /// Percent at which a value turns "critical".
    pub critical_at: f64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            color:       true,
            normal:      "#a6e3a1".to_string(), // Catppuccin Mocha green
            elevated:    "#f9e2af".to_string(), // Catppuccin Mocha yellow
            critical:    "#f38ba8".to_string(), // Catppuccin Mocha red
            elevated_at: 60.0,
            critical_at: 85.0,
        }
    }
}
