/// Load level of a percentage metric, used to pick its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Band {
    Normal,
    Elevated,
    Critical,
}

/// Percent thresholds at which a metric changes band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub elevated: f64,
    pub critical: f64,
}

impl Thresholds {
    /// Thresholds are clamped to `[0, 100]` and `critical` is never allowed
    /// below `elevated`.
    pub fn new(elevated: f64, critical: f64) -> Self {
        let elevated = sane(elevated, 60.0);
        let critical = sane(critical, 85.0).max(elevated);
        Self { elevated, critical }
    }

    pub fn classify(&self, percent: f64) -> Band {
        if percent >= self.critical {
            Band::Critical
        } else if percent >= self.elevated {
            Band::Elevated
        } else {
            Band::Normal
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(60.0, 85.0)
    }
}

fn sane(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        fallback
    }
}
