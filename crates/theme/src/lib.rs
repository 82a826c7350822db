pub mod band;
pub mod colors;

pub use band::{Band, Thresholds};
pub use colors::Color;

use sysmon_config::ThemeConfig;

/// Compiled theme derived from [`ThemeConfig`].
///
/// Colours are pre-parsed from hex strings. Calling [`Theme::from_config`] is
/// infallible: invalid colour strings fall back to the built-in palette.
#[derive(Debug, Clone)]
pub struct Theme {
    /// When `false`, [`Theme::paint`] returns text untouched.
    pub color:      bool,
    pub normal:     Color,
    pub elevated:   Color,
    pub critical:   Color,
    pub thresholds: Thresholds,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            color:      cfg.color,
            normal:     Color::from_hex(&cfg.normal).unwrap_or(Color::GREEN),
            elevated:   Color::from_hex(&cfg.elevated).unwrap_or(Color::YELLOW),
            critical:   Color::from_hex(&cfg.critical).unwrap_or(Color::RED),
            thresholds: Thresholds::new(cfg.elevated_at, cfg.critical_at),
        }
    }

    /// Same palette with escapes switched off.
    #[must_use]
    pub fn plain(mut self) -> Self {
        self.color = false;
        self
    }

    pub fn band(&self, percent: f64) -> Band {
        self.thresholds.classify(percent)
    }

    pub fn color_for(&self, band: Band) -> Color {
        match band {
            Band::Normal => self.normal,
            Band::Elevated => self.elevated,
            Band::Critical => self.critical,
        }
    }

    /// Colour `text` by the band `percent` falls in.
    pub fn paint(&self, text: &str, percent: f64) -> String {
        if !self.color {
            return text.to_string();
        }
        self.color_for(self.band(percent)).paint(text)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}
