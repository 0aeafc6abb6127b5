//! Authentication module
//!
//! Handles login and logout against an Azuriom site.

mod azuriom;

pub use azuriom::{AUTH_URL, AuthResult, AzuriomAuth, Credentials, LogoutRequest};
