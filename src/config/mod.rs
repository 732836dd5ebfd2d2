//! Configuration management for academy-rs
//!
//! TOML files layered per environment, overridden by `ACADEMY_*`
//! environment variables and finally by CLI flags. See [`ConfigLoader`].

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{AuthConfig, DatabaseConfig, ServerConfig, Settings};
