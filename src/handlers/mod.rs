pub mod checkin;
pub mod index;
pub mod status;

use serde::Deserialize;

pub use checkin::{checkin, checkin_handler};
pub use index::index_handler;
pub use status::{dashboard, device_status, status_handler};

#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}
