//! Configuration schema
//!
//! Defines the structure of the configuration file.

use crate::core::auth::AUTH_URL;
use crate::core::status::{STATUS_TIMEOUT, STATUS_URL};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    #[serde(default)]
    pub network: NetworkConfig,
}

/// Remote service locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Mojang-style status endpoint
    #[serde(default = "default_status_url")]
    pub status_url: String,

    /// Azuriom auth API base (`/authenticate` and `/logout` are appended)
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            status_url: default_status_url(),
            auth_url: default_auth_url(),
        }
    }
}

/// Network settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Proxy URL (empty = no proxy)
    #[serde(default)]
    pub proxy: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Status check timeout in milliseconds
    #[serde(default = "default_status_timeout")]
    pub status_timeout_ms: u64,

    /// Login/logout timeout in seconds (unset = no timeout)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_seconds: Option<u64>,
}

impl NetworkConfig {
    pub fn status_timeout(&self) -> Duration {
        Duration::from_millis(self.status_timeout_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            proxy: String::new(),
            user_agent: default_user_agent(),
            status_timeout_ms: default_status_timeout(),
            request_timeout_seconds: None,
        }
    }
}

// Default value functions for serde
fn default_status_url() -> String {
    STATUS_URL.to_string()
}
fn default_auth_url() -> String {
    AUTH_URL.to_string()
}
fn default_user_agent() -> String {
    format!("azuriom-client/{}", env!("CARGO_PKG_VERSION"))
}
fn default_status_timeout() -> u64 {
    STATUS_TIMEOUT.as_millis() as u64
}
