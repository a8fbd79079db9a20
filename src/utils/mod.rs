pub mod html;
pub mod logger;
