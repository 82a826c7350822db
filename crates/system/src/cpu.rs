use tracing::debug;

use sysmon_core::state::CpuUsage;

use crate::counters::CpuTicks;

/// Turns cumulative per-core ticks into utilisation over the last interval.
///
/// Holds the previous reading as its only state. The first reading just seeds
/// the baseline and reports zeros, so a fresh sampler never shows a spike.
#[derive(Debug, Default)]
pub struct CpuSampler {
    previous: Option<Vec<CpuTicks>>,
}

impl CpuSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in a new reading and return usage since the previous one.
    pub fn update(&mut self, current: Vec<CpuTicks>) -> CpuUsage {
        let usage = match self.previous.as_deref() {
            Some(previous) if previous.len() == current.len() => usage_between(previous, &current),
            Some(previous) => {
                debug!(
                    "cpu topology changed ({} → {} cores); re-seeding baseline",
                    previous.len(),
                    current.len()
                );
                idle_usage(current.len())
            }
            None => idle_usage(current.len()),
        };

        self.previous = Some(current);
        usage
    }
}

fn usage_between(previous: &[CpuTicks], current: &[CpuTicks]) -> CpuUsage {
    let mut sum = CpuTicks::default();
    let per_core = current
        .iter()
        .zip(previous)
        .map(|(now, before)| {
            let delta = now.since(before);
            sum.user += delta.user;
            sum.system += delta.system;
            sum.idle += delta.idle;
            sum.nice += delta.nice;
            busy_percent(&delta)
        })
        .collect();

    CpuUsage {
        overall: busy_percent(&sum),
        per_core,
    }
}

fn busy_percent(delta: &CpuTicks) -> f64 {
    let total = delta.total();
    if total == 0 {
        return 0.0;
    }
    (delta.busy() as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

fn idle_usage(cores: usize) -> CpuUsage {
    CpuUsage {
        overall: 0.0,
        per_core: vec![0.0; cores],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks(user: u64, system: u64, idle: u64, nice: u64) -> CpuTicks {
        CpuTicks { user, system, idle, nice }
    }

    #[test]
    fn first_update_only_seeds() {
        let mut cpu = CpuSampler::new();
        let usage = cpu.update(vec![ticks(100, 50, 850, 0); 4]);
        assert_eq!(usage.overall, 0.0);
        assert_eq!(usage.per_core, vec![0.0; 4]);
    }

    #[test]
    fn single_core_sixty_percent() {
        let mut cpu = CpuSampler::new();
        cpu.update(vec![ticks(100, 50, 850, 0)]);
        let usage = cpu.update(vec![ticks(150, 60, 890, 0)]);
        assert_eq!(usage.per_core, vec![60.0]);
        assert_eq!(usage.overall, 60.0);
    }

    #[test]
    fn overall_weights_cores_by_ticks() {
        let mut cpu = CpuSampler::new();
        cpu.update(vec![ticks(0, 0, 0, 0), ticks(0, 0, 0, 0)]);
        let usage = cpu.update(vec![ticks(100, 0, 0, 0), ticks(0, 0, 100, 0)]);
        assert_eq!(usage.per_core, vec![100.0, 0.0]);
        assert_eq!(usage.overall, 50.0);
    }

    #[test]
    fn nice_counts_as_busy() {
        let mut cpu = CpuSampler::new();
        cpu.update(vec![ticks(0, 0, 0, 0)]);
        let usage = cpu.update(vec![ticks(0, 0, 75, 25)]);
        assert_eq!(usage.overall, 25.0);
    }

    #[test]
    fn no_elapsed_ticks_is_zero_not_nan() {
        let mut cpu = CpuSampler::new();
        cpu.update(vec![ticks(5, 5, 5, 5)]);
        let usage = cpu.update(vec![ticks(5, 5, 5, 5)]);
        assert_eq!(usage.overall, 0.0);
        assert_eq!(usage.per_core, vec![0.0]);
    }

    #[test]
    fn counter_reset_never_goes_negative() {
        let mut cpu = CpuSampler::new();
        cpu.update(vec![ticks(1_000, 1_000, 1_000, 0)]);
        let usage = cpu.update(vec![ticks(10, 10, 10, 0)]);
        assert_eq!(usage.overall, 0.0);
    }

    #[test]
    fn topology_change_reseeds() {
        let mut cpu = CpuSampler::new();
        cpu.update(vec![ticks(0, 0, 0, 0); 2]);
        let usage = cpu.update(vec![ticks(50, 0, 50, 0); 3]);
        assert_eq!(usage.per_core, vec![0.0; 3]);
        assert_eq!(usage.overall, 0.0);

        // The new three-core reading is the baseline now.
        let usage = cpu.update(vec![ticks(100, 0, 100, 0); 3]);
        assert_eq!(usage.per_core, vec![50.0; 3]);
    }

    #[test]
    fn percentages_stay_in_bounds_for_monotonic_counters() {
        let mut cpu = CpuSampler::new();
        let mut state = vec![ticks(0, 0, 0, 0); 3];
        cpu.update(state.clone());
        for step in 1..50u64 {
            for (i, core) in state.iter_mut().enumerate() {
                let i = i as u64;
                core.user += (step * 7 + i) % 13;
                core.system += (step * 3 + i) % 5;
                core.nice += step % 2;
                core.idle += (step * 11 + i) % 17;
            }
            let usage = cpu.update(state.clone());
            assert!((0.0..=100.0).contains(&usage.overall), "{}", usage.overall);
            assert!(usage.per_core.iter().all(|p| (0.0..=100.0).contains(p)));
        }
    }
}
