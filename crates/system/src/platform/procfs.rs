//! Parser for the per-core lines of `/proc/stat`.
//!
//! `cpuN user nice system idle iowait irq softirq steal …` (jiffies). The
//! aggregate `cpu` line is skipped; the sampler sums per-core deltas itself.

use crate::counters::CpuTicks;

pub fn parse_stat(text: &str) -> Vec<CpuTicks> {
    text.lines().filter_map(parse_core_line).collect()
}

fn parse_core_line(line: &str) -> Option<CpuTicks> {
    let mut fields = line.split_whitespace();
    let label = fields.next()?;
    let index = label.strip_prefix("cpu")?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let values: Vec<u64> = fields.take(8).map(|f| f.parse().unwrap_or(0)).collect();
    let field = |i: usize| values.get(i).copied().unwrap_or(0);

    // user nice system idle iowait irq softirq steal
    Some(CpuTicks {
        user:   field(0),
        nice:   field(1),
        system: field(2) + field(5) + field(6) + field(7),
        idle:   field(3) + field(4),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
cpu  10132153 290696 3084719 46828483 16683 0 25195 0 0 0
cpu0 1393280 32966 572056 13343292 6130 0 17875 0 0 0
cpu1 1335878 28232 543464 13360815 2930 10 1 2 0 0
intr 1462898 0 0 0
ctxt 115315
cpufreq 12
";

    #[test]
    fn one_entry_per_core() {
        let ticks = parse_stat(SAMPLE);
        assert_eq!(ticks.len(), 2);
        assert_eq!(
            ticks[0],
            CpuTicks { user: 1393280, nice: 32966, system: 572056 + 17875, idle: 13343292 + 6130 }
        );
        assert_eq!(ticks[1].system, 543464 + 10 + 1 + 2);
    }

    #[test]
    fn short_lines_default_missing_fields() {
        let ticks = parse_stat("cpu0 1 2 3 4\n");
        assert_eq!(ticks, vec![CpuTicks { user: 1, nice: 2, system: 3, idle: 4 }]);
    }
}
