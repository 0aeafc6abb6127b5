//! Core module
//!
//! Remote services used by the launcher.

pub mod auth;
pub mod status;

use crate::config::Config;
use crate::util::http::build_client;
use anyhow::Result;
use auth::AzuriomAuth;
use status::StatusChecker;

/// Status and auth clients sharing one HTTP connection pool
#[derive(Debug, Clone)]
pub struct Services {
    pub status: StatusChecker,
    pub auth: AzuriomAuth,
}

impl Services {
    /// Build both clients from the configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = build_client(&config.network)?;

        let status = StatusChecker::with_client(client.clone(), &config.endpoints.status_url)
            .timeout(config.network.status_timeout());
        let auth = AzuriomAuth::with_client(client, &config.endpoints.auth_url)
            .timeout(config.network.request_timeout());

        Ok(Self { status, auth })
    }
}
