//! azuriom-client library root
//!
//! Mojang service status and Azuriom login/logout for launchers.

pub mod config;
pub mod core;
pub mod error;
pub mod util;

pub use config::Config;
pub use crate::core::Services;
pub use crate::core::auth::{AuthResult, AzuriomAuth, Credentials};
pub use crate::core::status::{ServiceEntry, ServiceStatus, StatusBoard, StatusChecker, status_to_hex};
pub use error::ApiError;
