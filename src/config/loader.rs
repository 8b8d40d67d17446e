//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the
//! application configuration from a YAML file and overlaying environment
//! variables.

use std::fs;
use std::path::Path;

use tracing::info;
use url::Url;

use crate::calculation::NumericInputPolicy;
use crate::error::{EngineError, EngineResult};

use super::types::{AppConfig, CalculatorConfig, RemoteApiConfig, ServerConfig};

/// Environment variable overriding `remote_api.base_url`.
pub const ENV_API_URL: &str = "SITE_PAYROLL_API_URL";
/// Environment variable overriding `remote_api.timeout_secs`.
pub const ENV_TIMEOUT_SECS: &str = "SITE_PAYROLL_TIMEOUT_SECS";
/// Environment variable overriding `server.bind_addr`.
pub const ENV_BIND_ADDR: &str = "SITE_PAYROLL_BIND_ADDR";
/// Environment variable overriding `calculator.numeric_input`.
pub const ENV_NUMERIC_POLICY: &str = "SITE_PAYROLL_NUMERIC_POLICY";

/// Loads and provides access to the application configuration.
///
/// # File Format
///
/// ```yaml
/// remote_api:
///   base_url: https://api.example.com
///   timeout_secs: 30
/// calculator:
///   numeric_input: default_to_zero   # or: reject
/// server:
///   bind_addr: 127.0.0.1:3000
/// ```
///
/// # Example
///
/// ```no_run
/// use site_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/site-payroll.yaml").unwrap();
/// println!("Remote API: {}", loader.remote_api().base_url);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if the file cannot be read
    /// - [`EngineError::ConfigParseError`] if it is not valid configuration
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::from_yaml_str(&content, &path_str)?;
        info!(path = %path_str, "Configuration loaded");
        Ok(loader)
    }

    /// Parses configuration from YAML text. `origin` names the source in
    /// error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> EngineResult<Self> {
        // An empty document parses as YAML null; treat it as all defaults.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: AppConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        if config.remote_api.timeout_secs == 0 {
            return Err(EngineError::ConfigParseError {
                path: origin.to_string(),
                message: "remote_api.timeout_secs must be greater than zero".to_string(),
            });
        }

        Ok(Self { config })
    }

    /// Overlays process environment variables on the loaded values.
    pub fn with_env_overrides(self) -> EngineResult<Self> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Overlays values from `lookup` on the loaded values. Unset or empty
    /// variables leave the file value in place.
    pub fn with_overrides<F>(mut self, lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let invalid = |name: &str, message: String| EngineError::ConfigParseError {
            path: format!("${name}"),
            message,
        };

        if let Some(raw) = get(ENV_API_URL) {
            self.config.remote_api.base_url =
                Url::parse(raw.trim()).map_err(|e| invalid(ENV_API_URL, e.to_string()))?;
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            self.config.remote_api.timeout_secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    invalid(
                        ENV_TIMEOUT_SECS,
                        format!("expected a positive number of seconds, got '{raw}'"),
                    )
                })?;
        }
        if let Some(raw) = get(ENV_BIND_ADDR) {
            self.config.server.bind_addr = raw
                .trim()
                .parse()
                .map_err(|e: std::net::AddrParseError| invalid(ENV_BIND_ADDR, e.to_string()))?;
        }
        if let Some(raw) = get(ENV_NUMERIC_POLICY) {
            self.config.calculator.numeric_input = raw
                .parse::<NumericInputPolicy>()
                .map_err(|message| invalid(ENV_NUMERIC_POLICY, message))?;
        }

        Ok(self)
    }

    /// Returns the full configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the remote API settings.
    pub fn remote_api(&self) -> &RemoteApiConfig {
        &self.config.remote_api
    }

    /// Returns the calculator settings.
    pub fn calculator(&self) -> &CalculatorConfig {
        &self.config.calculator
    }

    /// Returns the calculator service settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }
}

impl From<AppConfig> for ConfigLoader {
    fn from(config: AppConfig) -> Self {
        Self { config }
    }
}
