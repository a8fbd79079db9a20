pub mod registry;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{TokenCheck, TokenKind};
use crate::config::Config;
use crate::models::DeviceId;

pub use registry::{Registry, SharedRegistry};

/// Everything a request handler needs, cloned into each filter.
#[derive(Debug, Clone)]
pub struct AppState {
    pub registry: SharedRegistry,
    pub checkin_token: Arc<TokenCheck>,
    pub status_token: Arc<TokenCheck>,
    pub ttl: Duration,
    pub canary_status: bool,
    pub index_html: Arc<PathBuf>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let devices = config.devices.iter().filter_map(|name| DeviceId::normalize(name));

        Self {
            registry: Arc::new(Registry::new(devices)),
            checkin_token: Arc::new(TokenCheck::new(
                TokenKind::Checkin,
                config.checkin_token.as_str(),
                config.checkin_token_check,
            )),
            status_token: Arc::new(TokenCheck::new(
                TokenKind::Status,
                config.status_token.as_str(),
                config.status_token_check,
            )),
            ttl: config.ttl,
            canary_status: config.canary_status,
            index_html: Arc::new(config.index_html.clone()),
        }
    }
}
