//! CLI module
//!
//! Command-line interface for azuriom-client.

mod args;

pub use args::{Args, AuthAction, Commands, ConfigAction};

use anyhow::{Context, Result};
use azuriom_client::config::{self, Config};
use azuriom_client::{ApiError, Services, StatusBoard};
use std::path::{Path, PathBuf};

/// Load the configuration, from `path` if given
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => config::load_from(path),
        None => config::load(),
    }
}

/// Dispatch a parsed command
///
/// `config_path` is the file given with `--config`, if any.
pub async fn run(command: Commands, config: &Config, config_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Status { json } => show_status(config, json).await,
        Commands::Auth { action } => handle_auth(action, config).await,
        Commands::Config { action } => handle_config(action, config, config_path),
    }
}

/// Print the status of every known service
async fn show_status(config: &Config, json: bool) -> Result<()> {
    let services = Services::from_config(config)?;
    let board = services.status.check_status().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    print_board(&board);
    Ok(())
}

fn print_board(board: &StatusBoard) {
    println!("🌐 Mojang services:");
    for entry in board {
        let essential = if entry.essential { " (essential)" } else { "" };
        println!(
            "   {} {:<7} {}{}",
            entry.status.hex(),
            entry.status,
            entry.name,
            essential
        );
    }
}

/// Handle auth subcommands
async fn handle_auth(action: AuthAction, config: &Config) -> Result<()> {
    let services = Services::from_config(config)?;

    match action {
        AuthAction::Login {
            email,
            password,
            client_token,
        } => {
            println!("🔐 Logging in as {}...", email);

            let result = services
                .auth
                .authenticate(&email, &password, client_token.as_deref())
                .await
                .map_err(describe_rejection)?;

            if let Some(username) = result.username() {
                println!("✅ Logged in as: \x1b[1;32m{}\x1b[0m", username);
            } else {
                println!("✅ Logged in.");
            }
            println!("{}", serde_json::to_string_pretty(result.as_value())?);
            Ok(())
        }
        AuthAction::Logout { access_token } => {
            services
                .auth
                .logout(&access_token)
                .await
                .map_err(describe_rejection)?;

            println!("✅ Logged out.");
            Ok(())
        }
    }
}

/// Turn an API error into a user-facing message
fn describe_rejection(error: ApiError) -> anyhow::Error {
    let message = match error.code() {
        _ if error.is_transport() => "Could not reach the server".to_string(),
        Some(code) => format!("Request rejected ({})", code),
        None => "Request rejected".to_string(),
    };
    anyhow::Error::new(error).context(message)
}

/// The file configuration is read from
fn effective_config_path(config_path: Option<&Path>) -> PathBuf {
    config_path.map_or_else(config::config_path, Path::to_path_buf)
}

/// Handle config subcommands
fn handle_config(action: ConfigAction, config: &Config, config_path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Path => println!("{}", effective_config_path(config_path).display()),
        ConfigAction::Show => {
            let text = toml::to_string_pretty(config).context("Failed to serialize config")?;
            print!("{}", text);
        }
    }
    Ok(())
}
