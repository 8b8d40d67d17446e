//! Configuration loading and management.
//!
//! This module loads the application configuration from a YAML file:
//! where the site administration API lives, how the calculator treats
//! invalid numeric input, and where the calculator service listens.
//! Environment variables can override each value.
//!
//! # Example
//!
//! ```no_run
//! use site_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/site-payroll.yaml")
//!     .and_then(ConfigLoader::with_env_overrides)
//!     .unwrap();
//! println!("Numeric input policy: {}", config.calculator().numeric_input);
//! ```

mod loader;
mod types;

pub use loader::{
    ConfigLoader, ENV_API_URL, ENV_BIND_ADDR, ENV_NUMERIC_POLICY, ENV_TIMEOUT_SECS,
};
pub use types::{
    AppConfig, CalculatorConfig, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS, RemoteApiConfig,
    ServerConfig,
};
