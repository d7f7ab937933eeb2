// Boot identity derivation: one of three strategies names the output file.
use crate::config::NamingScheme;
use crate::util::sysfs::read_sysfs_value;
use chrono::DateTime;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const BOOT_ID_PATH: &str = "/proc/sys/kernel/random/boot_id";
const UPTIME_PATH: &str = "/proc/uptime";

/// The kernel's random per-boot token, a UUID-like string.
///
/// Returns an empty string if the file is unreadable.
pub fn boot_id() -> String {
    read_sysfs_value(BOOT_ID_PATH).unwrap_or_default()
}

/// Boot wall-clock time as a compact UTC timestamp (`YYYYMMDDTHHMMSSZ`),
/// computed as current time minus system uptime.
pub fn boot_time_compact() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default();
    let boot_secs = (now - uptime_seconds().unwrap_or_default()) as i64;
    DateTime::from_timestamp(boot_secs, 0)
        .map(|t| t.format("%Y%m%dT%H%M%SZ").to_string())
        .unwrap_or_default()
}

fn uptime_seconds() -> Option<f64> {
    let contents = read_sysfs_value(UPTIME_PATH).ok()?;
    contents.split_whitespace().next()?.parse().ok()
}

/// Count the boots visible to the journal by running
/// `journalctl --list-boots` and counting non-empty output lines. The
/// current boot always appears, so the count is a 1-based ordinal for it.
///
/// Returns `None` if the command is missing, fails, or lists nothing.
///
/// Caveat: the count shifts when the journal rotates or is vacuumed, so the
/// ordinal is only stable while older boots stay in the journal.
pub fn journal_boot_count() -> Option<usize> {
    let output = Command::new("journalctl")
        .arg("--list-boots")
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let count = String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .count();
    if count == 0 { None } else { Some(count) }
}

/// Resolve the log file name for this run.
///
/// `boot_count` supplies the journal boot ordinal so tests can substitute a
/// fake; when it yields `None` the boot-number scheme silently falls back to
/// the boot-time identity for this run.
pub fn resolve_file_name(
    scheme: NamingScheme,
    boot_count: impl FnOnce() -> Option<usize>,
) -> String {
    match scheme {
        NamingScheme::BootId => format!("battery_{}.csv", boot_id()),
        NamingScheme::BootNumber => match boot_count() {
            Some(n) => format!("battery_boot{n:05}.csv"),
            None => format!("battery_{}.csv", boot_time_compact()),
        },
        NamingScheme::BootTime => format!("battery_{}.csv", boot_time_compact()),
    }
}
