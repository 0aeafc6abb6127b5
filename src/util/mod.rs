//! Utility module
//!
//! Common utilities used across the application.

pub mod http;
