//! Mojang service status
//!
//! Queries the status endpoint and folds the answer into a fixed table of
//! known services. The check is fail-open: it never returns an error.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Default status endpoint
pub const STATUS_URL: &str = "https://status.mojang.com/check";

/// Timeout applied to every status request
pub const STATUS_TIMEOUT: Duration = Duration::from_millis(2500);

/// Known services: (hostname, label, essential)
const SERVICES: [(&str, &str, bool); 6] = [
    ("sessionserver.mojang.com", "Multiplayer Session Service", true),
    ("authserver.mojang.com", "Authentication Service", true),
    ("textures.minecraft.net", "Minecraft Skins", false),
    ("api.mojang.com", "Public API", false),
    ("minecraft.net", "Minecraft.net", false),
    ("account.mojang.com", "Mojang Accounts Website", false),
];

/// Health of a single service
///
/// `Grey` is not reported by Mojang; it stands for "unknown".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Green,
    Yellow,
    Red,
    #[default]
    Grey,
}

impl ServiceStatus {
    /// Parse a status colour, ignoring case. Unknown values map to `Grey`.
    pub fn parse(status: &str) -> Self {
        if status.eq_ignore_ascii_case("green") {
            Self::Green
        } else if status.eq_ignore_ascii_case("yellow") {
            Self::Yellow
        } else if status.eq_ignore_ascii_case("red") {
            Self::Red
        } else {
            Self::Grey
        }
    }

    /// Hex colour used to display this status
    pub fn hex(self) -> &'static str {
        match self {
            Self::Green => "#a5c325",
            Self::Yellow => "#eac918",
            Self::Red => "#c32625",
            Self::Grey => "#848484",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Grey => "grey",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Convert a Mojang status colour to its hex value
pub fn status_to_hex(status: &str) -> &'static str {
    ServiceStatus::parse(status).hex()
}

/// One row of the service table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceEntry {
    /// Service hostname, as keyed by the status endpoint
    pub service: &'static str,
    pub status: ServiceStatus,
    /// Human-readable label
    pub name: &'static str,
    /// Whether the service is critical to logging in and playing
    pub essential: bool,
}

/// Status of every known service, in a fixed order
///
/// Only `status` ever changes; the set and order of services are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusBoard {
    entries: Vec<ServiceEntry>,
}

impl StatusBoard {
    /// All known services with an unknown status
    pub fn baseline() -> Self {
        let entries = SERVICES
            .iter()
            .map(|&(service, name, essential)| ServiceEntry {
                service,
                status: ServiceStatus::Grey,
                name,
                essential,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ServiceEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ServiceEntry> {
        self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ServiceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a service by hostname
    pub fn get(&self, service: &str) -> Option<&ServiceEntry> {
        self.entries.iter().find(|e| e.service == service)
    }

    /// Mark every service as unknown
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.status = ServiceStatus::Grey;
        }
    }

    /// Merge a status report into the table
    ///
    /// Each report element is a single-key object `{hostname: colour}`.
    /// Unknown hostnames and malformed elements are skipped, and services
    /// missing from the report keep their current status.
    /// Returns the number of services updated.
    pub fn apply(&mut self, report: &[Value]) -> usize {
        let mut updated = 0;

        for element in report {
            let Some((key, value)) = element.as_object().and_then(|o| o.iter().next()) else {
                continue;
            };
            let Some(colour) = value.as_str() else {
                tracing::debug!("Ignoring non-string status for {}", key);
                continue;
            };

            if let Some(entry) = self.entries.iter_mut().find(|e| e.service == key) {
                entry.status = ServiceStatus::parse(colour);
                updated += 1;
            }
        }

        updated
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::baseline()
    }
}

impl<'a> IntoIterator for &'a StatusBoard {
    type Item = &'a ServiceEntry;
    type IntoIter = std::slice::Iter<'a, ServiceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Client for the service status endpoint
#[derive(Debug, Clone)]
pub struct StatusChecker {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl StatusChecker {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new(), STATUS_URL)
    }

    /// Use an existing HTTP client and a custom endpoint
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            timeout: STATUS_TIMEOUT,
        }
    }

    /// Override the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Check the status of every known service
    ///
    /// Never fails: if the endpoint cannot be reached or answers with
    /// anything but 200, every service is reported as grey.
    pub async fn check_status(&self) -> StatusBoard {
        self.refresh(&StatusBoard::baseline()).await
    }

    /// Like [`check_status`](Self::check_status), starting from a previous result
    ///
    /// Services the endpoint does not mention keep their status from
    /// `previous`, and a 200 whose body is not a JSON array leaves `previous`
    /// as it was. A failed request still resets every service to grey.
    pub async fn refresh(&self, previous: &StatusBoard) -> StatusBoard {
        let mut board = previous.clone();

        match self.fetch().await {
            Ok(Some(report)) => {
                let updated = board.apply(&report);
                tracing::debug!("Updated {} of {} services", updated, board.len());
            }
            Ok(None) => {
                tracing::debug!("Status response is not a list; keeping previous statuses");
            }
            Err(e) => {
                tracing::warn!("Unable to retrieve Mojang status.");
                tracing::debug!("Error while retrieving Mojang statuses: {:#}", e);
                board.reset();
            }
        }

        board
    }

    /// Fetch the raw report; `None` when a 200 body is not a JSON array
    async fn fetch(&self) -> Result<Option<Vec<Value>>> {
        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .context("Failed to reach status endpoint")?;

        let status = response.status();
        if status != StatusCode::OK {
            anyhow::bail!("Status endpoint returned HTTP {}", status);
        }

        let body = response
            .bytes()
            .await
            .context("Failed to read status response")?;

        Ok(serde_json::from_slice(&body).ok())
    }
}

impl Default for StatusChecker {
    fn default() -> Self {
        Self::new()
    }
}
