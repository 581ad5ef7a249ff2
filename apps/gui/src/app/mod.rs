mod config;
mod main;

pub use self::config::{ApiConfig, AppConfig};
pub use main::App;
