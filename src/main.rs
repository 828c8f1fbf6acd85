//! RAX FXP - Entry Point
//!
//! Connects to the two configured FTP servers and copies one file from the
//! source to the destination with an FXP transfer.

use log::{error, info, warn};
use std::process;
use std::time::Duration;
use tokio::time::timeout;

use rax_fxp::config::{EndpointConfig, FxpConfig};
use rax_fxp::error::handlers::exit_code;
use rax_fxp::utils::logging::setup_logging;
use rax_fxp::{ControlConnection, FxpOrchestrator, TransferOutcome};

const DEFAULT_CONFIG: &str = "config";

#[tokio::main]
async fn main() {
    setup_logging();

    let config_name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    let config = match FxpConfig::load(&config_name) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration {}: {}", config_name, e);
            process::exit(2);
        }
    };

    info!("Launching FXP transfer...");

    let deadline = config.transfer.connect_timeout();
    let source = connect(&config.source, "source", deadline).await;
    let destination = connect(&config.destination, "destination", deadline).await;

    let orchestrator = FxpOrchestrator::new(config.transfer.compensation);
    let transfer = orchestrator.transfer(
        &destination,
        &config.transfer.destination_path,
        &source,
        &config.transfer.source_path,
    );

    let outcome = match config.transfer.transfer_timeout() {
        Some(limit) => match timeout(limit, transfer).await {
            Ok(outcome) => Some(outcome),
            Err(_) => {
                error!("Transfer did not finish within {}s", limit.as_secs());
                None
            }
        },
        None => Some(transfer.await),
    };

    for connection in [source, destination] {
        let label = connection.label().to_string();
        if let Err(e) = connection.quit().await {
            warn!("Failed to close {} cleanly: {}", label, e);
        }
    }

    match outcome {
        Some(TransferOutcome::Completed(_)) => info!("Done."),
        Some(TransferOutcome::Failed(err)) => process::exit(exit_code(&err)),
        None => process::exit(1),
    }
}

/// Connects and logs in to one server, exiting the process on failure.
async fn connect(endpoint: &EndpointConfig, label: &str, deadline: Duration) -> ControlConnection {
    let address = endpoint.address();

    let session = async {
        let connection = ControlConnection::connect(&address, label).await?;
        connection
            .login(&endpoint.username, &endpoint.password)
            .await?;
        Ok::<_, rax_fxp::error::ChannelError>(connection)
    };

    match timeout(deadline, session).await {
        Ok(Ok(connection)) => connection,
        Ok(Err(e)) => {
            error!("Failed to open {} connection to {}: {}", label, address, e);
            process::exit(1);
        }
        Err(_) => {
            error!("Timed out connecting to {} at {}", label, address);
            process::exit(1);
        }
    }
}
