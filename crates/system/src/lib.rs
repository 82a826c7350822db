pub mod counters;
pub mod cpu;
pub mod disk;
pub mod gpu;
pub mod host;
pub mod memory;
pub mod network;
pub mod platform;
pub mod rate;
pub mod sampler;

pub use counters::{ByteCounters, CounterSource, CpuTicks, RegistryEntry};
pub use host::HostCounters;
pub use sampler::Sampler;

use std::time::Duration;
use sysmon_core::AppState;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

/// Handle to the background sampling task.
///
/// Dropping it (or calling [`Monitor::stop`]) ends the task after the tick in
/// flight, so a sample is never half-applied.
pub struct Monitor {
    interval: watch::Sender<Duration>,
    task:     JoinHandle<()>,
}

impl Monitor {
    /// Change the sampling interval; takes effect from the next tick.
    pub fn set_interval(&self, interval: Duration) {
        self.interval.send_if_modified(|current| {
            if *current == interval {
                return false;
            }
            *current = interval;
            true
        });
    }

    pub fn interval(&self) -> Duration {
        *self.interval.borrow()
    }

    /// Stop sampling and wait for the task to finish.
    pub async fn stop(self) {
        let Monitor { interval, task } = self;
        drop(interval);
        let _ = task.await;
    }
}

/// Spawn a background Tokio task that samples every `interval` and forwards
/// the resulting [`AppState`] (snapshot plus history) through the returned
/// channel.
///
/// The task owns the sampler and the history outright; consumers only ever
/// see complete clones. It stops when the receiver or the [`Monitor`] is
/// dropped.
pub fn spawn_monitor<S>(
    sampler: Sampler<S>,
    interval: Duration,
    history_len: usize,
) -> (Monitor, mpsc::Receiver<AppState>)
where
    S: CounterSource + 'static,
{
    let (tx, rx) = mpsc::channel(4);
    let (interval_tx, interval_rx) = watch::channel(interval);

    let task = tokio::spawn(monitor_loop(sampler, interval_rx, history_len, tx));

    (
        Monitor {
            interval: interval_tx,
            task,
        },
        rx,
    )
}

async fn monitor_loop<S: CounterSource>(
    mut sampler: Sampler<S>,
    mut interval_rx: watch::Receiver<Duration>,
    history_len: usize,
    tx: mpsc::Sender<AppState>,
) {
    let mut state = AppState::new(history_len);
    let mut ticker = new_ticker(*interval_rx.borrow_and_update());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                state.apply(sampler.sample());
                if tx.send(state.clone()).await.is_err() {
                    break; // all receivers dropped
                }
            }
            changed = interval_rx.changed() => {
                if changed.is_err() {
                    break; // monitor handle dropped
                }
                let interval = *interval_rx.borrow_and_update();
                info!("sampling interval now {} ms", interval.as_millis());
                ticker = new_ticker(interval);
                // The fresh ticker fires immediately; skip that so the cadence
                // restarts from now.
                ticker.reset();
            }
        }
    }

    debug!("monitor stopped after {} ticks", state.ticks);
}

fn new_ticker(interval: Duration) -> time::Interval {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

#[cfg(test)]
mod tests {
    use super::*;
    use sysmon_core::state::{DiskUsage, MemoryUsage};
    use sysmon_core::Result;

    /// Counters that advance by a fixed step on every read.
    struct Ramp {
        step: u64,
        reads: u64,
    }

    impl CounterSource for Ramp {
        fn cpu_ticks(&mut self) -> Result<Vec<CpuTicks>> {
            self.reads += 1;
            let n = self.reads * self.step;
            Ok(vec![CpuTicks { user: n, system: 0, idle: n, nice: 0 }; 2])
        }

        fn memory(&mut self) -> Result<MemoryUsage> {
            Ok(MemoryUsage { used: 1 << 30, total: 4 << 30 })
        }

        fn disk(&mut self) -> Result<DiskUsage> {
            Ok(DiskUsage { used: 1, total: 2, free: 1 })
        }

        fn network_bytes(&mut self) -> Result<ByteCounters> {
            Ok(ByteCounters { inbound: self.reads * 1_000, outbound: 0 })
        }

        fn disk_io_bytes(&mut self) -> Result<ByteCounters> {
            Ok(ByteCounters::default())
        }

        fn gpu_entries(&mut self) -> Result<Vec<RegistryEntry>> {
            Ok(Vec::new())
        }
    }

    fn ramp_sampler() -> Sampler<Ramp> {
        Sampler::new(Ramp { step: 10, reads: 0 }, Vec::new())
    }

    #[tokio::test(start_paused = true)]
    async fn emits_history_on_every_tick() {
        let (monitor, mut rx) = spawn_monitor(ramp_sampler(), Duration::from_secs(1), 60);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.ticks, 1);
        assert_eq!(first.snapshot.cpu.overall, 0.0);
        assert_eq!(first.history.cpu.len(), 60);

        let second = rx.recv().await.unwrap();
        assert_eq!(second.ticks, 2);
        assert_eq!(second.snapshot.cpu.overall, 50.0);
        assert_eq!(second.history.cpu.tail(2), vec![0.0, 50.0]);
        assert_eq!(second.history.memory.latest(), 25.0);
        assert_eq!(second.history.per_core.len(), 2);

        monitor.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn longer_interval_delays_the_next_tick() {
        let (monitor, mut rx) = spawn_monitor(ramp_sampler(), Duration::from_secs(1), 8);
        rx.recv().await.unwrap();

        monitor.set_interval(Duration::from_secs(2));
        assert_eq!(monitor.interval(), Duration::from_secs(2));

        let before = tokio::time::Instant::now();
        rx.recv().await.unwrap();
        // The old cadence would have ticked at 1 s.
        assert!(before.elapsed() >= Duration::from_secs(2), "{:?}", before.elapsed());

        monitor.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn shorter_interval_takes_effect_immediately() {
        let (monitor, mut rx) = spawn_monitor(ramp_sampler(), Duration::from_secs(1), 8);
        rx.recv().await.unwrap();

        monitor.set_interval(Duration::from_millis(250));

        let before = tokio::time::Instant::now();
        rx.recv().await.unwrap();
        assert!(before.elapsed() <= Duration::from_millis(250), "{:?}", before.elapsed());

        // and keeps the new cadence afterwards
        let before = tokio::time::Instant::now();
        rx.recv().await.unwrap();
        let gap = before.elapsed();
        assert!(gap >= Duration::from_millis(250) && gap < Duration::from_secs(1), "{gap:?}");

        monitor.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_closes_the_channel() {
        let (monitor, mut rx) = spawn_monitor(ramp_sampler(), Duration::from_millis(500), 8);
        rx.recv().await.unwrap();
        drop(monitor);
        // Drain whatever was in flight; the channel must then close.
        while rx.recv().await.is_some() {}
    }
}
