use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use sysmon_core::Result;

use crate::counters::{CpuTicks, RegistryEntry};
use crate::platform::procfs;

pub fn cpu_ticks() -> Result<Vec<CpuTicks>> {
    let text = fs::read_to_string("/proc/stat")?;
    Ok(procfs::parse_stat(&text))
}

/// One entry per DRM card; each candidate property is tried as an attribute
/// file under `device/` (e.g. amdgpu's `gpu_busy_percent`).
pub fn gpu_entries(properties: &[String]) -> Result<Vec<RegistryEntry>> {
    drm_entries(Path::new("/sys/class/drm"), properties)
}

fn drm_entries(root: &Path, properties: &[String]) -> Result<Vec<RegistryEntry>> {
    let mut entries = Vec::new();
    for dir in fs::read_dir(root)? {
        let dir = dir?;
        let name = dir.file_name().to_string_lossy().into_owned();
        // `card0-HDMI-A-1` and friends are connectors, not devices.
        if !is_card(&name) {
            continue;
        }
        let device = dir.path().join("device");
        let values: BTreeMap<String, f64> = properties
            .iter()
            .filter_map(|prop| {
                let raw = fs::read_to_string(device.join(prop)).ok()?;
                let value = raw.trim().parse::<f64>().ok()?;
                Some((prop.clone(), value))
            })
            .collect();
        entries.push(RegistryEntry { name, properties: values });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn is_card(name: &str) -> bool {
    name.strip_prefix("card")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_names() {
        assert!(is_card("card0"));
        assert!(is_card("card12"));
        assert!(!is_card("card0-HDMI-A-1"));
        assert!(!is_card("renderD128"));
        assert!(!is_card("card"));
    }

    #[test]
    fn reads_attribute_files_of_each_card() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        let card = root.join("card0").join("device");
        fs::create_dir_all(&card).unwrap();
        fs::create_dir_all(root.join("card0-DP-1")).unwrap();
        fs::write(card.join("gpu_busy_percent"), "42\n").unwrap();

        let props = vec!["missing".to_string(), "gpu_busy_percent".to_string()];
        let entries = drm_entries(root, &props).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "card0");
        assert_eq!(entries[0].properties.get("gpu_busy_percent"), Some(&42.0));
        assert!(!entries[0].properties.contains_key("missing"));
    }

    #[test]
    fn host_has_proc_stat() {
        let ticks = cpu_ticks().unwrap();
        assert!(!ticks.is_empty());
    }
}
