//! Configuration types.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section and
//! field has a default, so an empty file is a valid configuration.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::calculation::NumericInputPolicy;

/// Default base URL of the site administration API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the remote site administration API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteApiConfig {
    /// Base URL; endpoint paths are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Calculator behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// What happens to non-numeric input for numeric fields.
    #[serde(default)]
    pub numeric_input: NumericInputPolicy,
}

/// Settings for the local calculator HTTP service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// The complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote site administration API.
    #[serde(default)]
    pub remote_api: RemoteApiConfig,
    /// Calculator behaviour.
    #[serde(default)]
    pub calculator: CalculatorConfig,
    /// Local calculator service.
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_API_BASE_URL).expect("DEFAULT_API_BASE_URL is a valid URL")
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}
