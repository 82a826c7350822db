use std::collections::VecDeque;

use crate::state::Snapshot;

/// Number of points kept per series unless configured otherwise.
pub const DEFAULT_HISTORY_LEN: usize = 60;

/// Fixed-length rolling history of samples, drawn as sparklines.
///
/// The buffer starts full of zeros so charts draw a full-width baseline from
/// the first tick instead of growing from empty. Its length never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    samples:  VecDeque<f64>,
    capacity: usize,
}

impl History {
    /// A history of `capacity` zeros. A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: std::iter::repeat(0.0).take(capacity).collect(),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest.
    pub fn push(&mut self, value: f64) {
        self.samples.push_back(value);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = f64> + ExactSizeIterator + '_ {
        self.samples.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// The last `n` samples (or all of them if fewer), oldest first.
    pub fn tail(&self, n: usize) -> Vec<f64> {
        let skip = self.samples.len().saturating_sub(n);
        self.iter().skip(skip).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample.
    pub fn latest(&self) -> f64 {
        self.samples.back().copied().unwrap_or(0.0)
    }
}

/// One [`History`] per charted series.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySet {
    /// Aggregate CPU percent.
    pub cpu:      History,
    /// CPU percent per core; rebuilt when the core count changes.
    pub per_core: Vec<History>,
    pub gpu:      History,
    /// Memory used as a percent of total.
    pub memory:   History,
    capacity:     usize,
}

impl HistorySet {
    pub fn new(capacity: usize) -> Self {
        Self {
            cpu:      History::new(capacity),
            per_core: Vec::new(),
            gpu:      History::new(capacity),
            memory:   History::new(capacity),
            capacity,
        }
    }

    /// Append every tracked series from `snapshot`.
    pub fn record(&mut self, snapshot: &Snapshot) {
        self.cpu.push(snapshot.cpu.overall);
        self.gpu.push(snapshot.gpu_percent);
        self.memory.push(snapshot.memory_percent());

        self.ensure_cores(snapshot.cpu.per_core.len());
        for (history, value) in self.per_core.iter_mut().zip(&snapshot.cpu.per_core) {
            history.push(*value);
        }
    }

    // Resize on CPU topology changes
    fn ensure_cores(&mut self, n: usize) {
        if self.per_core.len() == n {
            return;
        }
        self.per_core = (0..n).map(|_| History::new(self.capacity)).collect();
    }
}
