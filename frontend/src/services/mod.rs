pub mod api;
pub mod config;
pub mod date_utils;
pub mod download;
pub mod logging;
pub mod routing;
pub mod session;

pub use api::{ApiClient, ApiError};
pub use config::AppConfig;
pub use logging::Logger;
pub use session::Session;
