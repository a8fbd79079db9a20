use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::ApiError;
use crate::models::{DeviceId, Liveness};

pub fn setup_logger() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .with_line_number(true)
        .with_file(true)
        .with_env_filter(env_filter)
        .init();

    info!("Logger initialized");
}

pub fn log_checkin(device: &DeviceId) {
    debug!("Check-in from {}", device);
}

pub fn log_status(device: &str, liveness: Liveness) {
    debug!("Status of {}: {}", device, liveness);
}

pub fn log_rejected(action: &str, device: Option<&str>, reason: &ApiError) {
    warn!(
        "Rejected {} for device {}: {}",
        action,
        device.unwrap_or("<none>"),
        reason
    );
}

pub fn log_error_msg(action: &str, error: &str) {
    error!("Error during {}: {}", action, error);
}

/// Access log line, emitted only when verbose logging is on.
pub fn log_request(info: warp::log::Info<'_>) {
    info!(
        "{} {} {} {} {:?}",
        info.remote_addr()
            .map_or_else(|| "-".to_string(), |addr| addr.to_string()),
        info.method(),
        info.path(),
        info.status().as_u16(),
        info.elapsed()
    );
}
