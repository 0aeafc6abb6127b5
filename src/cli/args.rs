//! CLI argument definitions
//!
//! Uses clap derive macros for argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// azuriom-client - Mojang status and Azuriom account client
#[derive(Parser, Debug)]
#[command(name = "azuriom-client")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Read configuration from this file instead of the default location
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the status of Mojang services
    Status {
        /// Print the raw service list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage authentication
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthAction {
    /// Login with an Azuriom account
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,
        /// Account password
        #[arg(short, long)]
        password: String,
        /// Launcher client token
        #[arg(long)]
        client_token: Option<String>,
    },
    /// Invalidate an access token
    Logout {
        /// Access token returned by login
        #[arg(short, long)]
        access_token: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the config file location
    Path,
    /// Print the effective configuration
    Show,
}
