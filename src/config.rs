use ::config::{Environment, File};
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::auth::TokenKind;
use crate::error::ConfigError;
use crate::models::DeviceId;

pub const ENV_PREFIX: &str = "CANARY";

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub devices: Vec<String>,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub ttl: Duration,
    #[serde(alias = "checkintoken")]
    pub checkin_token: String,
    #[serde(alias = "checkintokencheck")]
    pub checkin_token_check: bool,
    #[serde(alias = "statustoken")]
    pub status_token: String,
    #[serde(alias = "statustokencheck")]
    pub status_token_check: bool,
    /// Answer `Online` for `/status/canary` so the monitor itself can be probed.
    #[serde(alias = "canarystatus")]
    pub canary_status: bool,
    #[serde(alias = "listenip")]
    pub listen_ip: String,
    #[serde(alias = "listenport")]
    pub listen_port: u16,
    #[serde(alias = "indexhtml")]
    pub index_html: PathBuf,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            devices: Vec::new(),
            ttl: Duration::from_secs(300),
            checkin_token: String::new(),
            checkin_token_check: true,
            status_token: String::new(),
            status_token_check: false,
            canary_status: false,
            listen_ip: "0.0.0.0".to_string(),
            listen_port: 54034,
            index_html: PathBuf::from("index.html"),
            verbose: false,
        }
    }
}

impl Config {
    /// Reads `path` (format from its extension), then `CANARY_*` environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with(path, std::env::vars())
    }

    /// Like [`Config::load`], with the environment given as `vars`.
    pub fn load_with(
        path: &Path,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, ConfigError> {
        let (secrets, settings): (Vec<_>, Vec<_>) =
            vars.into_iter().partition(|(key, _)| is_secret_var(key));

        let config: Config = ::config::Config::builder()
            .add_source(File::from(path))
            .add_source(environment().source(Some(settings.into_iter().collect())))
            .add_source(
                Environment::with_prefix(ENV_PREFIX).source(Some(secrets.into_iter().collect())),
            )
            .build()?
            .try_deserialize()?;

        config.validated()
    }

    /// Folds device names to canonical case and rejects settings the server
    /// cannot run with.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if self.devices.is_empty() {
            return Err(ConfigError::NoDevices);
        }

        let mut seen = HashSet::new();
        let mut devices = Vec::with_capacity(self.devices.len());
        for raw in &self.devices {
            let device = DeviceId::normalize(raw).ok_or(ConfigError::EmptyDevice)?;
            if !seen.insert(device.clone()) {
                return Err(ConfigError::DuplicateDevice(device.to_string()));
            }
            devices.push(device.to_string());
        }
        self.devices = devices;

        if self.ttl.is_zero() {
            return Err(ConfigError::ZeroTtl);
        }
        if self.checkin_token_check && self.checkin_token.is_empty() {
            return Err(ConfigError::MissingToken(TokenKind::Checkin));
        }
        if self.status_token_check && self.status_token.is_empty() {
            return Err(ConfigError::MissingToken(TokenKind::Status));
        }

        self.listen_addr()?;
        Ok(self)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .listen_ip
            .parse()
            .map_err(|_| ConfigError::ListenAddr(self.listen_ip.clone()))?;
        Ok(SocketAddr::new(ip, self.listen_port))
    }

    /// `key : value` lines sorted by key, secrets redacted.
    pub fn display_lines(&self) -> Vec<String> {
        let redact = |token: &str| {
            if token.is_empty() {
                String::new()
            } else {
                "<redacted>".to_string()
            }
        };

        let mut settings = vec![
            ("canary_status", self.canary_status.to_string()),
            ("checkin_token", redact(&self.checkin_token)),
            ("checkin_token_check", self.checkin_token_check.to_string()),
            ("devices", format!("[{}]", self.devices.join(" "))),
            ("index_html", self.index_html.display().to_string()),
            ("listen_ip", self.listen_ip.clone()),
            ("listen_port", self.listen_port.to_string()),
            ("status_token", redact(&self.status_token)),
            ("status_token_check", self.status_token_check.to_string()),
            ("ttl", self.ttl.as_secs().to_string()),
            ("verbose", self.verbose.to_string()),
        ];
        settings.sort_by_key(|(key, _)| *key);

        settings
            .into_iter()
            .map(|(key, value)| format!("{key} : {value}"))
            .collect()
    }
}

/// Tokens are read verbatim; a token such as `007123` must not go through number parsing.
const SECRET_KEYS: [&str; 4] = ["CHECKIN_TOKEN", "CHECKINTOKEN", "STATUS_TOKEN", "STATUSTOKEN"];

fn is_secret_var(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    key.strip_prefix(ENV_PREFIX)
        .and_then(|rest| rest.strip_prefix('_'))
        .is_some_and(|rest| SECRET_KEYS.contains(&rest))
}

/// `CANARY_DEVICES` is a comma-separated list; every other key maps one to one.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("devices")
}
