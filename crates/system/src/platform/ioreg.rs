//! Parser for `ioreg -r -d 1 -w 0 -c IOAccelerator` output.
//!
//! Each accelerator is printed as a `+-o Name  <class …>` header followed by
//! its property table. Utilisation lives in the single-line
//! `"PerformanceStatistics" = {"key"=value,…}` dictionary.

use std::collections::BTreeMap;

use crate::counters::RegistryEntry;

const STATS_KEY: &str = "\"PerformanceStatistics\" = {";

pub fn parse(output: &str) -> Vec<RegistryEntry> {
    let mut entries = Vec::new();
    let mut name = String::new();

    for line in output.lines() {
        let trimmed = line.trim_start_matches(|c: char| c == ' ' || c == '|');
        if let Some(rest) = trimmed.strip_prefix("+-o ") {
            name = rest.split_whitespace().next().unwrap_or_default().to_string();
            continue;
        }
        if let Some(start) = line.find(STATS_KEY) {
            let body = &line[start + STATS_KEY.len()..];
            let body = body.rfind('}').map_or(body, |end| &body[..end]);
            entries.push(RegistryEntry {
                name: name.clone(),
                properties: parse_dictionary(body),
            });
        }
    }
    entries
}

/// `"a"=1,"b"=2` → numeric properties; non-numeric values are skipped.
fn parse_dictionary(body: &str) -> BTreeMap<String, f64> {
    body.split(',')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let key = key.trim().trim_matches('"');
            let value = value.trim().parse::<f64>().ok()?;
            Some((key.to_string(), value))
        })
        .collect()
}
