use std::io;

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read sysfs path: {0}")]
    ReadError(String),

    #[error("No battery device found: {0}")]
    NoBattery(String),
}

// A unified error type for the entire application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Monitor(#[from] MonitorError),

    #[error("{0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
