use crate::util::error::MonitorError;
use std::{fs, path::Path};

/// Read a value from a sysfs file with consistent error handling
///
/// # Returns
///
/// Returns the trimmed contents of the file as a String
///
/// # Errors
///
/// Returns `MonitorError::ReadError` if the file is missing or unreadable.
/// Callers that treat a missing attribute as an empty value use `.ok()`
/// and pick the default at the call site.
pub fn read_sysfs_value(path: impl AsRef<Path>) -> Result<String, MonitorError> {
    let p = path.as_ref();
    fs::read_to_string(p)
        .map(|s| s.trim().to_string())
        .map_err(|e| MonitorError::ReadError(format!("Path: {:?}, Error: {}", p.display(), e)))
}
