use crate::util::error::MonitorError;
use crate::util::sysfs::read_sysfs_value;
use chrono::Local;
use log::debug;
use std::{fs, path::Path};

/// Root of the kernel's power-supply class tree.
pub const POWER_SUPPLY_PATH: &str = "/sys/class/power_supply";

/// Battery devices are named BAT0, BAT1, ... by the ACPI battery driver.
const BATTERY_PREFIX: &str = "BAT";

/// One timestamped snapshot of battery attributes.
///
/// Every field is kept as the raw sysfs string; an attribute that is missing
/// or unreadable is recorded as an empty string rather than failing the
/// whole sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatterySample {
    pub timestamp: String,
    pub percent: String,
    pub state: String,
    pub energy_full: String,
    pub energy_now: String,
    pub voltage_now: String,
    pub power_now: String,
}

/// Find the battery to sample.
///
/// Scans the power-supply directory for entries named `BAT*`, sorts the
/// names, and returns the first. The selection is fixed for the lifetime of
/// the process.
///
/// # Errors
///
/// Returns `MonitorError::NoBattery` if no matching device exists, and
/// `MonitorError::Io` if the directory cannot be listed.
pub fn find_first_battery(power_supply_path: &Path) -> Result<String, MonitorError> {
    let mut batteries: Vec<String> = fs::read_dir(power_supply_path)?
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(BATTERY_PREFIX))
        .collect();
    batteries.sort();

    batteries.into_iter().next().ok_or_else(|| {
        MonitorError::NoBattery(format!(
            "No {}/{}* device found",
            power_supply_path.display(),
            BATTERY_PREFIX
        ))
    })
}

/// Read one sample from the given battery device.
///
/// Attributes are read independently; a missing file leaves its field
/// empty. Laptops expose capacity either as `energy_*` (µWh) or `charge_*`
/// (µAh) files, and drain as either `power_now` (µW) or `current_now` (µA),
/// so each pair is resolved by preference order.
pub fn read_sample(power_supply_path: &Path, battery: &str) -> BatterySample {
    let base = power_supply_path.join(battery);
    let attr = |name: &str| read_sysfs_value(base.join(name)).ok();

    let sample = BatterySample {
        timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        percent: attr("capacity").unwrap_or_default(),
        state: attr("status").unwrap_or_default(),
        energy_full: attr("energy_full")
            .or_else(|| attr("charge_full"))
            .unwrap_or_default(),
        energy_now: attr("energy_now")
            .or_else(|| attr("charge_now"))
            .unwrap_or_default(),
        voltage_now: attr("voltage_now").unwrap_or_default(),
        power_now: attr("power_now")
            .or_else(|| attr("current_now"))
            .unwrap_or_default(),
    };
    debug!("Sampled {battery}: {}% {}", sample.percent, sample.state);
    sample
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fake_power_supply(devices: &[(&str, &[(&str, &str)])]) -> TempDir {
        let root = TempDir::new().unwrap();
        for (device, attrs) in devices {
            let dir = root.path().join(device);
            fs::create_dir(&dir).unwrap();
            for (name, value) in *attrs {
                fs::write(dir.join(name), format!("{value}\n")).unwrap();
            }
        }
        root
    }

    #[test]
    fn picks_lexicographically_first_battery() {
        let root = fake_power_supply(&[("BAT1", &[]), ("BAT0", &[]), ("AC", &[])]);
        assert_eq!(find_first_battery(root.path()).unwrap(), "BAT0");
    }

    #[test]
    fn ignores_non_battery_supplies() {
        let root = fake_power_supply(&[("AC", &[]), ("ucsi-source-psy-1", &[])]);
        assert!(matches!(
            find_first_battery(root.path()),
            Err(MonitorError::NoBattery(_))
        ));
    }

    #[test]
    fn empty_directory_is_no_battery() {
        let root = fake_power_supply(&[]);
        assert!(matches!(
            find_first_battery(root.path()),
            Err(MonitorError::NoBattery(_))
        ));
    }

    #[test]
    fn sample_survives_missing_attributes() {
        let root = fake_power_supply(&[("BAT0", &[("capacity", "88")])]);
        let sample = read_sample(root.path(), "BAT0");
        assert_eq!(sample.percent, "88");
        assert_eq!(sample.state, "");
        assert_eq!(sample.energy_full, "");
        assert_eq!(sample.energy_now, "");
        assert_eq!(sample.voltage_now, "");
        assert_eq!(sample.power_now, "");
        assert!(!sample.timestamp.is_empty());
    }

    #[test]
    fn sample_with_no_attributes_at_all() {
        let root = fake_power_supply(&[("BAT0", &[])]);
        let sample = read_sample(root.path(), "BAT0");
        assert_eq!(sample.percent, "");
        assert_eq!(sample.power_now, "");
    }

    #[test]
    fn prefers_energy_files_over_charge_files() {
        let root = fake_power_supply(&[(
            "BAT0",
            &[
                ("energy_full", "57000000"),
                ("charge_full", "9999"),
                ("energy_now", "42000000"),
                ("charge_now", "8888"),
            ],
        )]);
        let sample = read_sample(root.path(), "BAT0");
        assert_eq!(sample.energy_full, "57000000");
        assert_eq!(sample.energy_now, "42000000");
    }

    #[test]
    fn falls_back_to_charge_and_current_units() {
        let root = fake_power_supply(&[(
            "BAT0",
            &[
                ("capacity", "73"),
                ("status", "Discharging"),
                ("charge_now", "4200000"),
                ("charge_full", "5700000"),
                ("voltage_now", "12300000"),
                ("current_now", "850000"),
            ],
        )]);
        let sample = read_sample(root.path(), "BAT0");
        assert_eq!(sample.percent, "73");
        assert_eq!(sample.state, "Discharging");
        assert_eq!(sample.energy_full, "5700000");
        assert_eq!(sample.energy_now, "4200000");
        assert_eq!(sample.voltage_now, "12300000");
        assert_eq!(sample.power_now, "850000");
    }
}
