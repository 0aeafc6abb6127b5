//! HTTP client construction

use crate::config::NetworkConfig;
use anyhow::{Context, Result};

/// Build the shared HTTP client from network settings
pub fn build_client(network: &NetworkConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(&network.user_agent);

    if !network.proxy.is_empty() {
        let proxy = reqwest::Proxy::all(&network.proxy)
            .with_context(|| format!("Invalid proxy URL: {}", network.proxy))?;
        builder = builder.proxy(proxy);
    }

    builder.build().context("Failed to build HTTP client")
}
