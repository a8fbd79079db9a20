// Library interface for the binary and integration tests
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

pub use crate::config::Config;
pub use models::{classify, DeviceId, Liveness};
pub use state::{AppState, Registry};
