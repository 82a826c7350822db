use sysmon_core::AppState;
use sysmon_theme::Theme;

use crate::sparkline;

/// Cores drawn side by side before wrapping to a new row.
pub const CORES_PER_ROW: usize = 4;

/// One sparkline per logical processor, laid out in rows of
/// [`CORES_PER_ROW`].
#[derive(Debug, Clone)]
pub struct CpuCoresWidget {
    chart_width: usize,
}

impl CpuCoresWidget {
    pub fn new(chart_width: usize) -> Self {
        Self { chart_width }
    }

    /// Rows of `NN ▁▂▃` cells. Empty until the first per-core sample lands.
    pub fn view(&self, state: &AppState, theme: &Theme) -> Vec<String> {
        let cells: Vec<String> = state
            .history
            .per_core
            .iter()
            .enumerate()
            .map(|(idx, history)| {
                let chart = sparkline(history.tail(self.chart_width));
                format!("{idx:>2} {}", theme.paint(&chart, history.latest()))
            })
            .collect();

        cells
            .chunks(CORES_PER_ROW)
            .enumerate()
            .map(|(row, chunk)| {
                let label = if row == 0 { "CPU " } else { "    " };
                format!("{label}{}", chunk.join("  "))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sysmon_core::state::CpuUsage;
    use sysmon_core::Snapshot;

    fn state_with_cores(values: &[f64]) -> AppState {
        let mut state = AppState::new(2);
        state.apply(Snapshot {
            cpu: CpuUsage { overall: 0.0, per_core: values.to_vec() },
            ..Snapshot::default()
        });
        state
    }

    #[test]
    fn one_cell_per_core() {
        let state = state_with_cores(&[0.0, 100.0, 50.0]);
        let rows = CpuCoresWidget::new(2).view(&state, &Theme::default().plain());
        assert_eq!(rows, vec!["CPU  0 ▁▁   1 ▁█   2 ▁▅"]);
    }

    #[test]
    fn wraps_after_four_cores() {
        let state = state_with_cores(&[10.0; 6]);
        let rows = CpuCoresWidget::new(1).view(&state, &Theme::default().plain());
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("CPU  0 "));
        assert!(rows[1].starts_with("     4 "));
    }

    #[test]
    fn no_cores_no_rows() {
        let state = AppState::new(2);
        assert!(CpuCoresWidget::new(2).view(&state, &Theme::default().plain()).is_empty());
    }
}
