mod boot;
mod config;
mod daemon;
mod logger;
mod power_supply;
mod util;

use crate::config::{AppConfig, NamingScheme};
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Filename scheme for this run: boot-id, boot-number, or boot-time
    #[clap(long)]
    scheme: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {e}. Using default values.");
            AppConfig::default()
        }
    };

    // CLI override wins over both the config file and the environment.
    if let Some(scheme) = cli.scheme {
        config.scheme = NamingScheme::from_name(&scheme);
    }

    if let Err(e) = daemon::run(&config) {
        eprintln!("Error: {e}");
        if let Some(source) = std::error::Error::source(&e) {
            eprintln!("Caused by: {source}");
        }
        std::process::exit(1);
    }
}
