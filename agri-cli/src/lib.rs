pub mod app;
pub mod config;
pub mod form;
pub mod logging;
pub mod render;
pub mod state;
pub mod utils;

pub use app::App;
pub use config::{AppConfig, ConfigError, Overrides};
pub use form::YieldForm;
