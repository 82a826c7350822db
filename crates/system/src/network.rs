use std::time::Instant;

use sysinfo::Networks;
use sysmon_config::NetworkConfig;
use sysmon_core::state::Throughput;

use crate::counters::ByteCounters;
use crate::rate::DuplexRate;

/// Network down/up rates from cumulative interface byte counters.
#[derive(Debug, Default)]
pub struct NetworkSampler {
    rate: DuplexRate,
}

impl NetworkSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, counters: ByteCounters, now: Instant) -> Throughput {
        let (down, up) = self.rate.update(counters.inbound, counters.outbound, now);
        Throughput { down, up }
    }
}

/// Sum cumulative received/sent bytes of every selected interface.
pub fn totals(networks: &Networks, selection: &NetworkConfig) -> ByteCounters {
    sum_selected(
        networks
            .iter()
            .map(|(name, data)| (name.as_str(), data.total_received(), data.total_transmitted())),
        selection,
    )
}

fn sum_selected<'a>(
    interfaces: impl Iterator<Item = (&'a str, u64, u64)>,
    selection: &NetworkConfig,
) -> ByteCounters {
    interfaces
        .filter(|(name, _, _)| selection.includes(name))
        .fold(ByteCounters::default(), |acc, (_, rx, tx)| ByteCounters {
            inbound:  acc.inbound.saturating_add(rx),
            outbound: acc.outbound.saturating_add(tx),
        })
}
