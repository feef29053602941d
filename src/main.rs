//! File transfer action runner - Entry Point
//!
//! Runs one SFTP/FTP action described by a TOML file and exits non-zero
//! when it does not succeed.

use log::{error, info};
use std::process::ExitCode;

use file_transfer_actions::actions::run_action;
use file_transfer_actions::config::{DEFAULT_CONFIG_PATH, load_request};
use file_transfer_actions::error::report;
use file_transfer_actions::utils::logging::setup_logging;

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let request = match load_request(&path) {
        Ok(request) => request,
        Err(e) => {
            error!("Failed to load action from {}: {}", path, e);
            return ExitCode::from(2);
        }
    };

    let action = request.action.clone();
    info!("Launching action {}...", action);

    // Transfers block on network I/O; keep them off the async workers.
    let outcome = match tokio::task::spawn_blocking(move || run_action(&request)).await {
        Ok(result) => report(&action, result),
        Err(e) => {
            error!("Action {} aborted: {}", action, e);
            false
        }
    };

    if outcome {
        info!("Action {} succeeded", action);
        ExitCode::SUCCESS
    } else {
        info!("Action {} returned false", action);
        ExitCode::FAILURE
    }
}
