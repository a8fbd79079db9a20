pub mod checkin;
pub mod device;
pub mod status;

pub use checkin::Checkin;
pub use device::DeviceId;
pub use status::{classify, Liveness, StatusRow};
