use crate::boot;
use crate::config::AppConfig;
use crate::logger::{SampleLog, SampleRow};
use crate::power_supply::{self, POWER_SUPPLY_PATH};
use crate::util::error::AppError;
use log::info;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Run the sampling loop until interrupted.
///
/// The battery and the output path are fixed once at startup; every tick
/// reads one sample, tags it with the battery name and scheme label, and
/// appends it to the log.
pub fn run(config: &AppConfig) -> Result<(), AppError> {
    let power_supply_path = Path::new(POWER_SUPPLY_PATH);
    let battery = power_supply::find_first_battery(power_supply_path)?;

    fs::create_dir_all(&config.log_dir)?;
    let out_path = config
        .log_dir
        .join(boot::resolve_file_name(config.scheme, boot::journal_boot_count));
    let mut log_file = SampleLog::open(&out_path)?;

    // Flag flipped by the signal handler; the loop checks it each slice.
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");

    info!("Logging to: {}", out_path.display());
    info!(
        "Battery: {battery} | filename scheme: {}",
        config.scheme.as_str()
    );
    info!("Unplug the charger for your idle test. Press Ctrl+C to stop early.");

    let interval = Duration::from_secs(config.poll_interval_sec);
    while running.load(Ordering::SeqCst) {
        let sample = power_supply::read_sample(power_supply_path, &battery);
        log_file.append(&SampleRow::new(sample, &battery, config.scheme.as_str()))?;
        sleep_interruptibly(interval, &running);
    }

    info!("Stopped by user.");
    Ok(())
}

// Sleep in short slices so an interrupt during the interval takes effect
// promptly rather than after the full minute.
fn sleep_interruptibly(interval: Duration, running: &AtomicBool) {
    let mut slept = Duration::ZERO;
    while slept < interval && running.load(Ordering::SeqCst) {
        let step = (interval - slept).min(Duration::from_secs(1));
        std::thread::sleep(step);
        slept += step;
    }
}
