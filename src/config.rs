// Configuration types and loading for batlog
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Environment variable selecting the filename scheme, overridden by `--scheme`.
pub const SCHEME_ENV_VAR: &str = "BATLOG_FILENAME_SCHEME";

/// Strategy used to derive the boot identity that names the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingScheme {
    /// Kernel random boot token from /proc/sys/kernel/random/boot_id
    BootId,
    /// Ordinal of the current boot as counted from `journalctl --list-boots`
    BootNumber,
    /// Boot wall-clock time derived from current time minus uptime
    BootTime,
}

impl NamingScheme {
    /// Parse a scheme name. Anything other than the three known names
    /// resolves to `BootId`, silently.
    pub fn from_name(name: &str) -> Self {
        match name {
            "boot-number" => Self::BootNumber,
            "boot-time" => Self::BootTime,
            _ => Self::BootId,
        }
    }

    /// The scheme label recorded in each CSV row.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BootId => "boot-id",
            Self::BootNumber => "boot-number",
            Self::BootTime => "boot-time",
        }
    }
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self::BootId
    }
}

/// Effective process-wide configuration, built once at startup and passed
/// down the call chain.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scheme: NamingScheme,
    pub poll_interval_sec: u64,
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scheme: NamingScheme::default(),
            poll_interval_sec: default_poll_interval_sec(),
            log_dir: default_log_dir(),
        }
    }
}

// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

// Intermediate struct for TOML parsing
#[derive(Deserialize, Debug, Default, Clone)]
struct AppConfigToml {
    scheme: Option<String>,
    poll_interval_sec: Option<u64>,
    log_dir: Option<PathBuf>,
}

impl From<AppConfigToml> for AppConfig {
    fn from(toml_config: AppConfigToml) -> Self {
        Self {
            scheme: toml_config
                .scheme
                .map(|s| NamingScheme::from_name(&s))
                .unwrap_or_default(),
            poll_interval_sec: toml_config
                .poll_interval_sec
                .unwrap_or_else(default_poll_interval_sec),
            log_dir: toml_config.log_dir.unwrap_or_else(default_log_dir),
        }
    }
}

const fn default_poll_interval_sec() -> u64 {
    60
}

fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("battery-logs")
}

/// Load application configuration.
///
/// Tries the user-specific TOML file, then applies the scheme environment
/// variable on top. Falls back to default settings if no file is found.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = match user_config_path() {
        Some(path) if path.exists() => {
            let contents = fs::read_to_string(&path)?;
            let toml_config: AppConfigToml = toml::from_str(&contents)?;
            log::debug!("Loaded config from: {}", path.display());
            AppConfig::from(toml_config)
        }
        _ => AppConfig::default(),
    };

    if let Ok(scheme) = std::env::var(SCHEME_ENV_VAR) {
        config.scheme = NamingScheme::from_name(&scheme);
    }

    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/batlog/config.toml"))
}
